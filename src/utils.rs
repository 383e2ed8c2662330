use core::{
    convert::Infallible,
    fmt,
    ops::{Bound, RangeBounds},
};

pub(crate) fn debug_slice<T: fmt::Debug>(slice: &[T], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(slice).finish()
}

pub(crate) fn range_bounds(len: usize, range: impl RangeBounds<usize>) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&n) => n,
        Bound::Excluded(&n) => n.checked_add(1).unwrap_or_else(|| panic_invalid_range()),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&n) => n.checked_add(1).unwrap_or_else(|| panic_invalid_range()),
        Bound::Excluded(&n) => n,
        Bound::Unbounded => len,
    };
    if start > end {
        panic_invalid_range();
    }
    if end > len {
        panic_out_of_bounds(end, len);
    }
    (start, end)
}

#[cold]
#[track_caller]
fn panic_invalid_range() -> ! {
    panic!("invalid range")
}

#[cold]
#[track_caller]
pub(crate) fn panic_out_of_bounds(index: usize, len: usize) -> ! {
    panic!("index {index} out of bounds (len {len})")
}

#[cold]
#[track_caller]
pub(crate) fn panic_capacity_overflow() -> ! {
    panic!("capacity overflow")
}

#[inline(never)]
#[cold]
pub(crate) fn abort() -> ! {
    cfg_if::cfg_if! {
        if #[cfg(feature = "std")] {
            extern crate std;
            std::process::abort();
        } else {
            // in no_std, use double panic
            struct Abort;
            impl Drop for Abort {
                fn drop(&mut self) {
                    panic!("abort");
                }
            }
            let _guard = Abort;
            panic!("abort");
        }
    }
}

pub(crate) trait UnwrapInfallible<T> {
    fn unwrap_infallible(self) -> T;
}

impl<T> UnwrapInfallible<T> for Result<T, Infallible> {
    #[inline(always)]
    fn unwrap_infallible(self) -> T {
        match self {
            Ok(ok) => ok,
            Err(never) => match never {},
        }
    }
}
