//! Tolerance-aware scalar comparisons.
//!
//! Floating point equality is never exact here; every comparison in the LU
//! pivot search and the convergence predicate goes through one of the
//! functions below instead of `==`, `<` or `>`.

/// The scalar type used throughout the crate.
pub type Precision = f64;

/// Machine epsilon for [`Precision`].
pub const SCALAR_EPSILON: Precision = Precision::EPSILON;

/// Default absolute tolerance: a little over two orders of epsilon.
pub const DEFAULT_ABSOLUTE: Precision = 64.0 * SCALAR_EPSILON;

/// Default relative tolerance: a little over four orders of epsilon.
pub const DEFAULT_RELATIVE: Precision = 65536.0 * SCALAR_EPSILON;

/// Checks whether two scalars are equal up to tolerance.
///
/// Three regimes are handled, selected by `norm = |s0| + |s1|`:
/// - `norm > Precision::MAX`: compare `|s0 - s1| / Precision::MAX` against `tol_rel`.
/// - `tol_abs < norm < Precision::MAX`: compare `|s0 - s1| / norm` against `tol_rel`.
/// - `norm <= tol_abs`: compare `|s0 - s1|` against `tol_abs` directly.
#[inline]
pub fn is_nearly_equal(s0: Precision, s1: Precision, tol_rel: Precision, tol_abs: Precision) -> bool {
    debug_assert!(tol_rel >= SCALAR_EPSILON, "relative tolerance must be at least scalar epsilon");
    debug_assert!(tol_rel <= 1.0, "relative tolerance greater than 1 will magnify the norm");
    if s0 == s1 {
        return true;
    }
    let norm = (s0.abs() + s1.abs()).min(Precision::MAX);
    (s0 - s1).abs() < tol_abs.max(tol_rel * norm)
}

/// `is_nearly_equal` using the crate's default tolerances.
#[inline]
pub fn is_nearly_equal_default(s0: Precision, s1: Precision) -> bool {
    is_nearly_equal(s0, s1, DEFAULT_RELATIVE, DEFAULT_ABSOLUTE)
}

/// `s0 > s1 || s0 ~= s1`.
#[inline]
pub fn is_nearly_greater_equal(s0: Precision, s1: Precision, tol_rel: Precision, tol_abs: Precision) -> bool {
    s0 > s1 || is_nearly_equal(s0, s1, tol_rel, tol_abs)
}

/// `s0 < s1 || s0 ~= s1`.
#[inline]
pub fn is_nearly_less_equal(s0: Precision, s1: Precision, tol_rel: Precision, tol_abs: Precision) -> bool {
    s0 < s1 || is_nearly_equal(s0, s1, tol_rel, tol_abs)
}

/// `!is_nearly_less_equal(s0, s1, ..)`.
///
/// This is not a strict greater-than: it is defined to be the logical
/// complement of [`is_nearly_less_equal`] so the two stay consistent at the
/// tolerance boundary, even though that means a `s0` that is truly (but not
/// nearly) greater than `s1` can still report `false` if it falls inside the
/// equality band from the other side. Do not rely on this for a strict `>`.
#[inline]
pub fn is_nearly_greater(s0: Precision, s1: Precision, tol_rel: Precision, tol_abs: Precision) -> bool {
    !is_nearly_less_equal(s0, s1, tol_rel, tol_abs)
}

/// `!is_nearly_greater_equal(s0, s1, ..)`. See [`is_nearly_greater`]'s note on non-strictness.
#[inline]
pub fn is_nearly_less(s0: Precision, s1: Precision, tol_rel: Precision, tol_abs: Precision) -> bool {
    !is_nearly_greater_equal(s0, s1, tol_rel, tol_abs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_equal_short_circuits() {
        assert!(is_nearly_equal(1.0, 1.0, DEFAULT_RELATIVE, DEFAULT_ABSOLUTE));
    }

    #[test]
    fn tiny_difference_within_absolute_tolerance() {
        assert!(is_nearly_equal_default(0.0, SCALAR_EPSILON));
    }

    #[test]
    fn large_relative_difference_is_not_equal() {
        assert!(!is_nearly_equal_default(1.0, 1.1));
    }

    #[test]
    fn greater_equal_consistent_with_less_equal() {
        assert!(is_nearly_greater_equal(5.0, 1.0, DEFAULT_RELATIVE, DEFAULT_ABSOLUTE));
        assert!(!is_nearly_less_equal(5.0, 1.0, DEFAULT_RELATIVE, DEFAULT_ABSOLUTE));
        assert!(is_nearly_greater(5.0, 1.0, DEFAULT_RELATIVE, DEFAULT_ABSOLUTE));
    }

    #[test]
    fn nearly_equal_values_are_not_strictly_greater() {
        let a = 1.0;
        let b = 1.0 + SCALAR_EPSILON;
        assert!(!is_nearly_greater(a, b, DEFAULT_RELATIVE, DEFAULT_ABSOLUTE));
        assert!(!is_nearly_less(a, b, DEFAULT_RELATIVE, DEFAULT_ABSOLUTE));
    }
}
