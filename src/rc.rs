use alloc::alloc::dealloc;
use core::{
    alloc::Layout,
    cell::Cell,
    convert::Infallible,
    marker::PhantomData,
    mem::{align_of, size_of},
    ptr,
    ptr::NonNull,
};

use crate::{
    error::AllocErrorImpl,
    utils::{abort, UnwrapInfallible},
};

// The structure needs to be repr(C) for the element slots to start at a fixed
// offset from the header.
#[repr(C)]
struct Header {
    rc: Cell<usize>,
    capacity: usize,
}

/// Handle to a reference-counted heap allocation holding a header followed by
/// `capacity` slots of `T`.
///
/// The buffer doesn't know how many of its slots are initialized; every handle
/// holder tracks it, and all holders of a shared buffer agree on it because a
/// shared buffer is never mutated. There is no `Drop` impl, the last holder
/// must call [`RcBuffer::release`].
pub(crate) struct RcBuffer<T> {
    header: NonNull<Header>,
    _phantom: PhantomData<T>,
}

impl<T> RcBuffer<T> {
    const DATA_OFFSET: usize = (size_of::<Header>() + align_of::<T>() - 1) & !(align_of::<T>() - 1);

    fn layout<E: AllocErrorImpl>(capacity: usize) -> Result<Layout, E> {
        let (layout, offset) = Layout::array::<T>(capacity)
            .and_then(|array| Layout::new::<Header>().extend(array))
            .map_err(|_| E::capacity_overflow())?;
        debug_assert_eq!(offset, Self::DATA_OFFSET);
        Ok(layout.pad_to_align())
    }

    pub(crate) fn with_capacity<E: AllocErrorImpl>(capacity: usize) -> Result<Self, E> {
        let layout = Self::layout::<E>(capacity)?;
        let header = E::alloc::<Header>(layout)?;
        let rc = Cell::new(1);
        unsafe { header.as_ptr().write(Header { rc, capacity }) };
        Ok(Self {
            header,
            _phantom: PhantomData,
        })
    }

    fn header(&self) -> &Header {
        unsafe { self.header.as_ref() }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.header().capacity
    }

    #[inline]
    pub(crate) fn ref_count(&self) -> usize {
        self.header().rc.get()
    }

    #[inline]
    pub(crate) fn is_unique(&self) -> bool {
        self.ref_count() == 1
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> NonNull<T> {
        let data = unsafe { self.header.as_ptr().cast::<u8>().add(Self::DATA_OFFSET) };
        unsafe { NonNull::new_unchecked(data.cast()) }
    }

    pub(crate) fn share(&self) -> Self {
        let rc = self.header().rc.get();
        // same policy as `alloc::rc::Rc`
        if rc == usize::MAX {
            abort();
        }
        self.header().rc.set(rc + 1);
        Self {
            header: self.header,
            _phantom: PhantomData,
        }
    }

    /// Gives up this handle. The last handle drops the first `len` elements
    /// and frees the allocation.
    ///
    /// # Safety
    ///
    /// The first `len` slots must be initialized.
    pub(crate) unsafe fn release(self, len: usize) {
        let rc = self.header().rc.get() - 1;
        self.header().rc.set(rc);
        if rc != 0 {
            return;
        }
        // frees the allocation even if an element destructor panics
        struct Dealloc(NonNull<Header>, Layout);
        impl Drop for Dealloc {
            fn drop(&mut self) {
                unsafe { dealloc(self.0.as_ptr().cast(), self.1) };
            }
        }
        let layout = Self::layout::<Infallible>(self.capacity()).unwrap_infallible();
        let _dealloc = Dealloc(self.header, layout);
        let elements = ptr::slice_from_raw_parts_mut(self.as_ptr().as_ptr(), len);
        unsafe { ptr::drop_in_place(elements) };
    }
}
