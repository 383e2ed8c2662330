//! A vector with small-size optimization and copy-on-write heap storage.
//!
//! [`SmallCowVec<T, N>`] keeps up to `N` elements inline. Past that, elements
//! live in a reference-counted heap buffer which clones share until one of
//! them is mutated.
//!
//! ```
//! use small_cow_vec::SmallCowVec;
//!
//! let mut a = SmallCowVec::<u32, 3>::from([1, 2, 3, 4]);
//! let b = a.clone();
//! assert_eq!(a.as_ptr(), b.as_ptr());
//!
//! a[0] = 42;
//! assert_ne!(a.as_ptr(), b.as_ptr());
//! assert_eq!(b, [1, 2, 3, 4]);
//! ```
#![no_std]
extern crate alloc;

pub mod error;
mod iter;
mod macros;
mod rc;
#[cfg(feature = "serde")]
mod serde;
mod utils;
mod vec;

pub use crate::{iter::IntoIter, vec::SmallCowVec};
