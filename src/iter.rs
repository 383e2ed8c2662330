use core::{fmt, iter::FusedIterator, mem, ptr, slice};

use crate::{utils::debug_slice, SmallCowVec};

/// An iterator moving the elements out of a [`SmallCowVec`].
///
/// A shared buffer is made unique when the iterator is created.
pub struct IntoIter<T, const N: usize> {
    // owns the storage, but no element: `len` is kept at 0
    vec: SmallCowVec<T, N>,
    start: usize,
    end: usize,
}

impl<T, const N: usize> IntoIter<T, N> {
    /// The remaining elements.
    pub fn as_slice(&self) -> &[T] {
        let remaining = unsafe { self.vec.data_ptr().add(self.start) };
        unsafe { slice::from_raw_parts(remaining, self.end - self.start) }
    }
}

impl<T: Clone, const N: usize> IntoIterator for SmallCowVec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(mut self) -> Self::IntoIter {
        self.make_unique();
        let end = self.len();
        unsafe { self.set_len(0) };
        IntoIter {
            vec: self,
            start: 0,
            end,
        }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        let item = unsafe { self.vec.data_ptr().add(self.start).read() };
        self.start += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        Some(unsafe { self.vec.data_ptr().add(self.end).read() })
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        let start = mem::replace(&mut self.start, self.end);
        let remaining = unsafe { self.vec.data_ptr_mut().add(start) };
        let remaining = ptr::slice_from_raw_parts_mut(remaining, self.end - start);
        unsafe { ptr::drop_in_place(remaining) };
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IntoIter(")?;
        debug_slice(self.as_slice(), f)?;
        f.write_str(")")
    }
}
