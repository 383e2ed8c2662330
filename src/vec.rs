use alloc::vec::Vec;
use core::{
    borrow::Borrow,
    cmp,
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    mem,
    mem::{ManuallyDrop, MaybeUninit},
    ops::{Deref, Index, IndexMut, RangeBounds},
    ptr, slice,
    slice::SliceIndex,
};

use either::Either;

use crate::{
    error::{AllocErrorImpl, OutOfRange, TryReserveError},
    rc::RcBuffer,
    utils::{debug_slice, panic_out_of_bounds, range_bounds, UnwrapInfallible},
};

/// A vector storing up to `N` elements inline, and sharing its heap buffer
/// between clones until one of them is mutated.
///
/// Cloning a vector whose elements are on the heap only increments a reference
/// count. Every method that may mutate the elements first makes the buffer
/// unique, cloning the elements if it was shared; this is why mutating methods
/// require `T: Clone`.
///
/// If an element `clone` panics in the middle of an operation, the vector is
/// left exactly as it was before the call: same length, capacity, storage,
/// elements and buffer.
///
/// The reference count is not atomic, so the vector is neither `Send` nor
/// `Sync`.
pub struct SmallCowVec<T, const N: usize> {
    len: usize,
    heap: bool,
    storage: Storage<T, N>,
}

union Storage<T, const N: usize> {
    inline: ManuallyDrop<[MaybeUninit<T>; N]>,
    heap: ManuallyDrop<RcBuffer<T>>,
}

impl<T, const N: usize> SmallCowVec<T, N> {
    /// Number of elements stored without allocation.
    pub const INLINE_CAPACITY: usize = N;

    #[inline]
    pub const fn new() -> Self {
        Self {
            len: 0,
            heap: false,
            storage: Storage {
                // an array of `MaybeUninit` doesn't need initialization
                inline: ManuallyDrop::new(unsafe { MaybeUninit::uninit().assume_init() }),
            },
        }
    }

    fn from_buffer(buffer: RcBuffer<T>, len: usize) -> Self {
        Self {
            len,
            heap: true,
            storage: Storage {
                heap: ManuallyDrop::new(buffer),
            },
        }
    }

    /// Empty vector able to hold `capacity` elements, inline when possible.
    fn with_storage_for<E: AllocErrorImpl>(capacity: usize) -> Result<Self, E> {
        if capacity <= N {
            return Ok(Self::new());
        }
        Ok(Self::from_buffer(RcBuffer::with_capacity::<E>(capacity)?, 0))
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage_for::<Infallible>(capacity).unwrap_infallible()
    }

    #[inline(always)]
    fn storage(&self) -> Either<&[MaybeUninit<T>; N], &RcBuffer<T>> {
        if self.heap {
            Either::Right(unsafe { &*self.storage.heap })
        } else {
            Either::Left(unsafe { &*self.storage.inline })
        }
    }

    #[inline(always)]
    fn storage_mut(&mut self) -> Either<&mut [MaybeUninit<T>; N], &mut RcBuffer<T>> {
        if self.heap {
            Either::Right(unsafe { &mut *self.storage.heap })
        } else {
            Either::Left(unsafe { &mut *self.storage.inline })
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `N` for inline storage, the buffer capacity otherwise.
    #[inline]
    pub fn capacity(&self) -> usize {
        match self.storage() {
            Either::Left(_) => N,
            Either::Right(buffer) => buffer.capacity(),
        }
    }

    /// Whether the elements are stored inside the vector itself.
    #[inline]
    pub const fn is_inline(&self) -> bool {
        !self.heap
    }

    /// Whether the heap buffer is referenced by other vectors.
    #[inline]
    pub fn is_shared(&self) -> bool {
        self.ref_count() > 1
    }

    /// Number of vectors referencing the storage, `1` for inline storage.
    #[inline]
    pub fn ref_count(&self) -> usize {
        match self.storage() {
            Either::Left(_) => 1,
            Either::Right(buffer) => buffer.ref_count(),
        }
    }

    #[inline]
    pub(crate) fn data_ptr(&self) -> *const T {
        match self.storage() {
            Either::Left(inline) => inline.as_ptr().cast(),
            Either::Right(buffer) => buffer.as_ptr().as_ptr(),
        }
    }

    // Doesn't make the buffer unique.
    #[inline]
    pub(crate) fn data_ptr_mut(&mut self) -> *mut T {
        match self.storage_mut() {
            Either::Left(inline) => inline.as_mut_ptr().cast(),
            Either::Right(buffer) => buffer.as_ptr().as_ptr(),
        }
    }

    /// Returns a pointer to the first element, without making the buffer unique.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data_ptr(), self.len) }
    }

    /// # Safety
    ///
    /// The storage must not be shared, and the first `len` elements must be
    /// initialized. Elements after `len` are not dropped.
    pub(crate) unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(!self.is_shared() && len <= self.capacity());
        self.len = len;
    }

    /// # Safety
    ///
    /// The storage must not be shared.
    unsafe fn as_mut_slice_unchecked(&mut self) -> &mut [T] {
        debug_assert!(!self.is_shared());
        unsafe { slice::from_raw_parts_mut(self.data_ptr_mut(), self.len) }
    }

    /// # Safety
    ///
    /// The storage must not be shared, and `len` must be lower than capacity.
    #[inline]
    unsafe fn push_unchecked(&mut self, item: T) {
        debug_assert!(!self.is_shared() && self.len < self.capacity());
        unsafe { self.data_ptr_mut().add(self.len).write(item) };
        self.len += 1;
    }

    /// Moves the elements into new storage of the given capacity, inline when
    /// it fits.
    ///
    /// # Safety
    ///
    /// The storage must not be shared, and `capacity` must not be lower than `len`.
    unsafe fn relocate<E: AllocErrorImpl>(&mut self, capacity: usize) -> Result<(), E> {
        debug_assert!(!self.is_shared() && capacity >= self.len);
        let mut relocated = Self::with_storage_for::<E>(capacity)?;
        unsafe { ptr::copy_nonoverlapping(self.data_ptr(), relocated.data_ptr_mut(), self.len) };
        relocated.len = mem::replace(&mut self.len, 0);
        // `self` now owns no element, dropping it only frees its buffer
        *self = relocated;
        Ok(())
    }

    fn required_capacity<E: AllocErrorImpl>(&self, additional: usize) -> Result<usize, E> {
        self.len
            .checked_add(additional)
            .ok_or_else(E::capacity_overflow)
    }

    fn grown_capacity(&self, required: usize) -> usize {
        cmp::max(required, self.capacity().saturating_mul(2))
    }

    /// Removes all the elements, keeping the capacity.
    ///
    /// A shared buffer is not cloned; the vector gets a new empty buffer of
    /// the same capacity instead.
    pub fn clear(&mut self) {
        if self.is_shared() {
            *self = Self::with_capacity(self.capacity());
            return;
        }
        let len = mem::replace(&mut self.len, 0);
        let elements = ptr::slice_from_raw_parts_mut(self.data_ptr_mut(), len);
        unsafe { ptr::drop_in_place(elements) };
    }

    /// Swaps the storage of two vectors, without cloning or moving elements
    /// out of their buffers.
    #[inline]
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn try_get(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len;
        self.as_slice().get(index).ok_or(OutOfRange { index, len })
    }
}

impl<T: Clone, const N: usize> SmallCowVec<T, N> {
    pub fn from_slice(slice: &[T]) -> Self {
        let mut this = Self::with_capacity(slice.len());
        for item in slice {
            unsafe { this.push_unchecked(item.clone()) };
        }
        this
    }

    pub fn from_elem(elem: T, n: usize) -> Self {
        let mut this = Self::with_capacity(n);
        if n > 0 {
            for _ in 1..n {
                unsafe { this.push_unchecked(elem.clone()) };
            }
            unsafe { this.push_unchecked(elem) };
        }
        this
    }

    /// Builds a unique vector of the given capacity with clones of the first
    /// `len` elements. Nothing is modified if a clone panics.
    fn clone_prefix<E: AllocErrorImpl>(&self, len: usize, capacity: usize) -> Result<Self, E> {
        debug_assert!(len <= self.len && len <= capacity);
        let mut cloned = Self::with_storage_for::<E>(capacity)?;
        for item in &self.as_slice()[..len] {
            unsafe { cloned.push_unchecked(item.clone()) };
        }
        Ok(cloned)
    }

    /// Same as `clone_prefix` with all the elements, and `item` inserted at `index`.
    fn clone_with_inserted(&self, capacity: usize, index: usize, item: T) -> Self {
        let mut cloned = Self::with_capacity(capacity);
        let (head, tail) = self.as_slice().split_at(index);
        for item in head {
            unsafe { cloned.push_unchecked(item.clone()) };
        }
        unsafe { cloned.push_unchecked(item) };
        for item in tail {
            unsafe { cloned.push_unchecked(item.clone()) };
        }
        cloned
    }

    /// Clones the elements into a new buffer of the same capacity if the
    /// current one is shared.
    pub(crate) fn make_unique(&mut self) {
        if self.is_shared() {
            *self = self
                .clone_prefix::<Infallible>(self.len, self.capacity())
                .unwrap_infallible();
        }
    }

    /// Returns a mutable pointer to the first element, making the buffer
    /// unique first.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.make_unique();
        self.data_ptr_mut()
    }

    /// Returns a mutable slice of the elements, making the buffer unique first.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.make_unique();
        unsafe { self.as_mut_slice_unchecked() }
    }

    /// The buffer is made unique once, before the iterator is returned.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        if index >= len {
            return Err(OutOfRange { index, len });
        }
        Ok(&mut self.as_mut_slice()[index])
    }

    fn reserve_impl<E: AllocErrorImpl>(&mut self, additional: usize, exact: bool) -> Result<(), E> {
        let required = self.required_capacity::<E>(additional)?;
        if required <= self.capacity() {
            return Ok(());
        }
        let capacity = if exact {
            required
        } else {
            self.grown_capacity(required)
        };
        if self.is_shared() {
            *self = self.clone_prefix::<E>(self.len, capacity)?;
            Ok(())
        } else {
            unsafe { self.relocate::<E>(capacity) }
        }
    }

    /// Reserves capacity for at least `additional` more elements, at least
    /// doubling the current capacity if it has to grow.
    ///
    /// Sufficient capacity makes it a no-op, even if the buffer is shared.
    /// Otherwise, a shared buffer is cloned into the new one.
    pub fn reserve(&mut self, additional: usize) {
        self.reserve_impl::<Infallible>(additional, false)
            .unwrap_infallible();
    }

    /// Reserves capacity for exactly `additional` more elements if the current
    /// capacity is not sufficient.
    pub fn reserve_exact(&mut self, additional: usize) {
        self.reserve_impl::<Infallible>(additional, true)
            .unwrap_infallible();
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.reserve_impl::<TryReserveError>(additional, false)
    }

    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.reserve_impl::<TryReserveError>(additional, true)
    }

    /// Shrinks the capacity to the length, moving the elements back inline
    /// when they fit.
    pub fn shrink_to_fit(&mut self) {
        if !self.heap {
            return;
        }
        let capacity = cmp::max(self.len, N);
        if capacity == self.capacity() {
            return;
        }
        if self.is_shared() {
            *self = self
                .clone_prefix::<Infallible>(self.len, capacity)
                .unwrap_infallible();
        } else {
            unsafe { self.relocate::<Infallible>(capacity) }.unwrap_infallible();
        }
    }

    pub fn push(&mut self, item: T) {
        if self.len == self.capacity() {
            self.reserve(1);
        } else {
            self.make_unique();
        }
        unsafe { self.push_unchecked(item) };
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.make_unique();
        self.len -= 1;
        Some(unsafe { self.data_ptr().add(self.len).read() })
    }

    /// Inserts an element at `index`, shifting the following ones.
    ///
    /// If the buffer is shared, the new buffer is built with the element
    /// already in place.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) {
        let len = self.len;
        if index > len {
            panic_out_of_bounds(index, len);
        }
        let full = len == self.capacity();
        let capacity = if full {
            let required = self
                .required_capacity::<Infallible>(1)
                .unwrap_infallible();
            self.grown_capacity(required)
        } else {
            self.capacity()
        };
        if self.is_shared() {
            *self = self.clone_with_inserted(capacity, index, item);
            return;
        }
        if full {
            unsafe { self.relocate::<Infallible>(capacity) }.unwrap_infallible();
        }
        unsafe {
            let at = self.data_ptr_mut().add(index);
            ptr::copy(at, at.add(1), len - index);
            at.write(item);
        }
        self.len = len + 1;
    }

    /// Removes and returns the element at `index`, shifting the following ones.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            panic_out_of_bounds(index, len);
        }
        self.make_unique();
        unsafe {
            let at = self.data_ptr_mut().add(index);
            let item = at.read();
            ptr::copy(at.add(1), at, len - index - 1);
            self.len = len - 1;
            item
        }
    }

    /// Removes and returns the element at `index`, replacing it with the last
    /// element.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            panic_out_of_bounds(index, len);
        }
        self.make_unique();
        unsafe {
            let base = self.data_ptr_mut();
            let item = base.add(index).read();
            ptr::copy(base.add(len - 1), base.add(index), 1);
            self.len = len - 1;
            item
        }
    }

    /// Removes the elements in `range`, shifting the following ones.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or ends after `len`.
    pub fn remove_range(&mut self, range: impl RangeBounds<usize>) {
        let (start, end) = range_bounds(self.len, range);
        if start == end {
            return;
        }
        self.make_unique();
        let len = self.len;
        // elements after the range are leaked if a destructor panics
        self.len = start;
        unsafe {
            let base = self.data_ptr_mut();
            let removed = ptr::slice_from_raw_parts_mut(base.add(start), end - start);
            ptr::drop_in_place(removed);
            ptr::copy(base.add(end), base.add(start), len - end);
        }
        self.len = len - (end - start);
    }

    /// Keeps the first `len` elements and drops the others.
    ///
    /// If the buffer is shared, only the kept elements are cloned.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        if self.is_shared() {
            *self = self
                .clone_prefix::<Infallible>(len, self.capacity())
                .unwrap_infallible();
            return;
        }
        let old_len = mem::replace(&mut self.len, len);
        unsafe {
            let truncated = ptr::slice_from_raw_parts_mut(self.data_ptr_mut().add(len), old_len - len);
            ptr::drop_in_place(truncated);
        }
    }

    /// Retains only the elements for which the predicate returns `true`.
    ///
    /// If the predicate panics, the elements already removed stay removed.
    pub fn retain(&mut self, mut f: impl FnMut(&T) -> bool) {
        self.make_unique();
        let len = mem::replace(&mut self.len, 0);
        let mut guard = RetainGuard {
            vec: self,
            len,
            processed: 0,
            deleted: 0,
        };
        while guard.processed < len {
            unsafe {
                let current = guard.vec.data_ptr_mut().add(guard.processed);
                if !f(&*current) {
                    guard.processed += 1;
                    guard.deleted += 1;
                    ptr::drop_in_place(current);
                    continue;
                }
                if guard.deleted > 0 {
                    ptr::copy_nonoverlapping(current, current.sub(guard.deleted), 1);
                }
                guard.processed += 1;
            }
        }
    }

    /// Appends clones of all the elements of `other`.
    ///
    /// If a clone panics, the elements already appended are dropped; a shared
    /// buffer is left untouched, an unique one may have grown.
    pub fn extend_from_slice(&mut self, other: &[T]) {
        let required = self
            .required_capacity::<Infallible>(other.len())
            .unwrap_infallible();
        if self.is_shared() {
            let capacity = if required > self.capacity() {
                self.grown_capacity(required)
            } else {
                self.capacity()
            };
            let mut extended = self
                .clone_prefix::<Infallible>(self.len, capacity)
                .unwrap_infallible();
            for item in other {
                unsafe { extended.push_unchecked(item.clone()) };
            }
            *self = extended;
            return;
        }
        self.reserve(other.len());
        let len = self.len;
        let mut guard = TruncateGuard { vec: self, len };
        for item in other {
            unsafe { guard.vec.push_unchecked(item.clone()) };
        }
        mem::forget(guard);
    }

    /// Converts into a `Vec`, moving the elements if the buffer is unique and
    /// cloning them otherwise.
    pub fn into_vec(mut self) -> Vec<T> {
        if self.is_shared() {
            return self.as_slice().to_vec();
        }
        let mut vec = Vec::with_capacity(self.len);
        unsafe {
            ptr::copy_nonoverlapping(self.data_ptr(), vec.as_mut_ptr(), self.len);
            vec.set_len(self.len);
        }
        self.len = 0;
        vec
    }
}

struct RetainGuard<'a, T, const N: usize> {
    vec: &'a mut SmallCowVec<T, N>,
    len: usize,
    processed: usize,
    deleted: usize,
}

impl<T, const N: usize> Drop for RetainGuard<'_, T, N> {
    fn drop(&mut self) {
        if self.deleted > 0 {
            unsafe {
                let base = self.vec.data_ptr_mut();
                let src = base.add(self.processed);
                let dst = src.sub(self.deleted);
                ptr::copy(src, dst, self.len - self.processed);
            }
        }
        self.vec.len = self.len - self.deleted;
    }
}

// Drops the elements appended after `len`.
struct TruncateGuard<'a, T, const N: usize> {
    vec: &'a mut SmallCowVec<T, N>,
    len: usize,
}

impl<T, const N: usize> Drop for TruncateGuard<'_, T, N> {
    fn drop(&mut self) {
        let appended = self.vec.len - self.len;
        self.vec.len = self.len;
        unsafe {
            let base = self.vec.data_ptr_mut().add(self.len);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base, appended));
        }
    }
}

impl<T, const N: usize> Drop for SmallCowVec<T, N> {
    fn drop(&mut self) {
        let len = self.len;
        if self.heap {
            unsafe { ManuallyDrop::take(&mut self.storage.heap).release(len) };
        } else {
            unsafe { ptr::drop_in_place(self.as_mut_slice_unchecked()) };
        }
    }
}

impl<T: Clone, const N: usize> Clone for SmallCowVec<T, N> {
    /// Heap buffers are shared; inline elements are cloned.
    fn clone(&self) -> Self {
        match self.storage() {
            Either::Left(_) => self
                .clone_prefix::<Infallible>(self.len, N)
                .unwrap_infallible(),
            Either::Right(buffer) => Self::from_buffer(buffer.share(), self.len),
        }
    }
}

impl<T, const N: usize> Default for SmallCowVec<T, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for SmallCowVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_slice(self.as_slice(), f)
    }
}

impl<T, const N: usize> Deref for SmallCowVec<T, N> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, const N: usize> AsRef<[T]> for SmallCowVec<T, N> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, const N: usize> Borrow<[T]> for SmallCowVec<T, N> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T, I: SliceIndex<[T]>, const N: usize> Index<I> for SmallCowVec<T, N> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T: Clone, I: SliceIndex<[T]>, const N: usize> IndexMut<I> for SmallCowVec<T, N> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Hash, const N: usize> Hash for SmallCowVec<T, N> {
    #[inline]
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.as_slice().hash(state);
    }
}

impl<T: PartialEq, const N: usize, const M: usize> PartialEq<SmallCowVec<T, M>>
    for SmallCowVec<T, N>
{
    fn eq(&self, other: &SmallCowVec<T, M>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for SmallCowVec<T, N> {}

impl<T: PartialOrd, const N: usize> PartialOrd for SmallCowVec<T, N> {
    fn partial_cmp(&self, other: &SmallCowVec<T, N>) -> Option<cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, const N: usize> Ord for SmallCowVec<T, N> {
    fn cmp(&self, other: &SmallCowVec<T, N>) -> cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T]> for SmallCowVec<T, N> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<'a, T: PartialEq, const N: usize> PartialEq<&'a [T]> for SmallCowVec<T, N> {
    fn eq(&self, other: &&'a [T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, const N: usize, const M: usize> PartialEq<[T; M]> for SmallCowVec<T, N> {
    fn eq(&self, other: &[T; M]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<Vec<T>> for SmallCowVec<T, N> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, const N: usize> PartialEq<SmallCowVec<T, N>> for Vec<T> {
    fn eq(&self, other: &SmallCowVec<T, N>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, const N: usize> PartialEq<SmallCowVec<T, N>> for [T] {
    fn eq(&self, other: &SmallCowVec<T, N>) -> bool {
        self == other.as_slice()
    }
}

impl<'a, T: Clone, const N: usize> From<&'a [T]> for SmallCowVec<T, N> {
    fn from(value: &'a [T]) -> Self {
        Self::from_slice(value)
    }
}

impl<T, const N: usize, const M: usize> From<[T; M]> for SmallCowVec<T, N> {
    fn from(value: [T; M]) -> Self {
        let array = ManuallyDrop::new(value);
        let mut this = Self::with_capacity(M);
        unsafe { ptr::copy_nonoverlapping(array.as_ptr(), this.data_ptr_mut(), M) };
        this.len = M;
        this
    }
}

impl<T, const N: usize> From<Vec<T>> for SmallCowVec<T, N> {
    fn from(mut value: Vec<T>) -> Self {
        let len = value.len();
        let mut this = Self::with_capacity(len);
        unsafe {
            value.set_len(0);
            ptr::copy_nonoverlapping(value.as_ptr(), this.data_ptr_mut(), len);
        }
        this.len = len;
        this
    }
}

impl<T: Clone, const N: usize> From<SmallCowVec<T, N>> for Vec<T> {
    fn from(value: SmallCowVec<T, N>) -> Self {
        value.into_vec()
    }
}

impl<T, const N: usize> FromIterator<T> for SmallCowVec<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<T>>().into()
    }
}

impl<T: Clone, const N: usize> Extend<T> for SmallCowVec<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a, const N: usize> Extend<&'a T> for SmallCowVec<T, N> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a SmallCowVec<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Clone, const N: usize> IntoIterator for &'a mut SmallCowVec<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
