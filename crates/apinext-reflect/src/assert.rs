//! Assertion helpers for tests that compare unordered collections.

/// Sorted multiset comparison of two slices.
///
/// Neither input is modified.
#[must_use]
pub fn has_same_elements<T: Ord>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&T> = a.iter().collect();
    let mut b: Vec<&T> = b.iter().collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Asserts that two `Serialize + Debug` values are deeply equal, ignoring the
/// order of every sequence inside them.
///
/// ```
/// use apinext_reflect::assert_eq_ignore_order;
///
/// assert_eq_ignore_order!(vec![1, 2, 3], vec![3, 1, 2]);
/// ```
#[macro_export]
macro_rules! assert_eq_ignore_order {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if !$crate::equal_ignore_order(left, right) {
                    panic!(
                        "assertion `left == right` (ignoring order) failed\n  left: {:?}\n right: {:?}",
                        left, right
                    );
                }
            }
        }
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left, right) => {
                if !$crate::equal_ignore_order(left, right) {
                    panic!(
                        "assertion `left == right` (ignoring order) failed: {}\n  left: {:?}\n right: {:?}",
                        format_args!($($arg)+),
                        left,
                        right
                    );
                }
            }
        }
    };
}

/// Negated form of [`assert_eq_ignore_order!`].
#[macro_export]
macro_rules! assert_ne_ignore_order {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if $crate::equal_ignore_order(left, right) {
                    panic!(
                        "assertion `left != right` (ignoring order) failed\n  left: {:?}\n right: {:?}",
                        left, right
                    );
                }
            }
        }
    };
}
