/// Creates a [`SmallCowVec`](crate::SmallCowVec) containing the arguments,
/// like `vec!`.
///
/// ```
/// use small_cow_vec::{small_cow_vec, SmallCowVec};
///
/// let v: SmallCowVec<u8, 4> = small_cow_vec![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
/// let v: SmallCowVec<u8, 4> = small_cow_vec![0; 8];
/// assert!(!v.is_inline());
/// ```
#[macro_export]
macro_rules! small_cow_vec {
    () => {
        $crate::SmallCowVec::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::SmallCowVec::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::SmallCowVec::from([$($x),+])
    };
}
