//! The errors.

use core::fmt;

pub(crate) use private::AllocErrorImpl;

/// Index passed to a checked accessor is not lower than the vector length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    /// The requested index.
    pub index: usize,
    /// The vector length at the time of the access.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of range for length {}",
            self.index, self.len
        )
    }
}

/// Error which can occur when trying to reserve additional capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryReserveError {
    /// The required capacity exceeds the buffer maximum (usually isize::MAX bytes).
    CapacityOverflow,
    /// The memory allocator returned an error.
    AllocError,
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => f.write_str("capacity overflow"),
            Self::AllocError => f.write_str("allocation error"),
        }
    }
}

#[cfg(feature = "std")]
const _: () = {
    extern crate std;
    impl std::error::Error for OutOfRange {}
    impl std::error::Error for TryReserveError {}
};

mod private {
    use alloc::alloc::{alloc, handle_alloc_error};
    use core::{alloc::Layout, convert::Infallible, ptr::NonNull};

    use crate::{error::TryReserveError, utils::panic_capacity_overflow};

    /// Selects what happens on allocation failure: `TryReserveError` reports it,
    /// `Infallible` panics on overflow and calls `handle_alloc_error` on OOM.
    pub trait AllocErrorImpl: Sized {
        fn capacity_overflow() -> Self;
        fn alloc<T>(layout: Layout) -> Result<NonNull<T>, Self>;
    }

    impl AllocErrorImpl for TryReserveError {
        fn capacity_overflow() -> Self {
            Self::CapacityOverflow
        }
        fn alloc<T>(layout: Layout) -> Result<NonNull<T>, Self> {
            // the header is always part of the layout
            debug_assert!(layout.size() > 0);
            let ptr = unsafe { alloc(layout) };
            Ok(NonNull::new(ptr).ok_or(TryReserveError::AllocError)?.cast())
        }
    }

    impl AllocErrorImpl for Infallible {
        #[cold]
        #[inline(never)]
        fn capacity_overflow() -> Self {
            panic_capacity_overflow()
        }
        fn alloc<T>(layout: Layout) -> Result<NonNull<T>, Self> {
            TryReserveError::alloc::<T>(layout).map_err(|_| handle_alloc_error(layout))
        }
    }
}
