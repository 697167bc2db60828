//! Finite probability distributions.
//!
//! [`FiniteDistribution`] carries the algebra (conjunction, mixture and scaling) as provided
//! methods, so that every finite distribution gets it for free. The algebra always produces
//! the canonical [`DictDistribution`].
//!
//! ```
//! use tabula_core::{DictDistribution, FiniteDistribution};
//!
//! let a = DictDistribution::new([("a", 0.1), ("b", 0.2), ("c", 0.7)]);
//! let b = DictDistribution::new([("a", 0.5), ("b", 0.5)]);
//! let ab = a.intersect(&b).unwrap();
//! assert!(ab.isclose(&DictDistribution::new([("a", 1. / 3.), ("b", 2. / 3.)])));
//!
//! let d = DictDistribution::deterministic("d");
//! let mixture = d * 0.5 | a * 0.5;
//! assert!((mixture.prob(&"c") - 0.35).abs() < 1e-12);
//! ```
mod base;
mod dict;
pub use base::{Distribution, Event, FiniteDistribution, ABS_TOL, REL_TOL};
pub use dict::DictDistribution;

/// Computes `ln(sum(exp(l)))` with the maximum shifted out.
///
/// Returns negative infinity for an empty slice or when every entry is negative infinity.
pub(crate) fn log_sum_exp(logits: &[f64]) -> f64 {
    let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max.is_infinite() {
        return max;
    }
    max + logits.iter().map(|l| (l - max).exp()).sum::<f64>().ln()
}

/// Whether `a` and `b` are within `rel_tol` of the larger magnitude, or within `abs_tol`.
pub(crate) fn is_close(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= (rel_tol * b.abs()).max(rel_tol * a.abs()) || diff <= abs_tol
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_log_sum_exp() {
        assert_eq!(log_sum_exp(&[]), f64::NEG_INFINITY);
        assert_eq!(log_sum_exp(&[f64::NEG_INFINITY, f64::NEG_INFINITY]), f64::NEG_INFINITY);
        assert!((log_sum_exp(&[0.0, 0.0]) - 2f64.ln()).abs() < 1e-12);

        // Would overflow without the shift.
        assert!((log_sum_exp(&[1000.0, 1000.0]) - (1000.0 + 2f64.ln())).abs() < 1e-9);
        // Would underflow to ln(0) without the shift.
        assert!((log_sum_exp(&[-1000.0, -1000.0]) - (-1000.0 + 2f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn test_is_close() {
        assert!(is_close(1.0, 1.0 + 1e-12, REL_TOL, ABS_TOL));
        assert!(!is_close(1.0, 1.0 + 1e-6, REL_TOL, ABS_TOL));
        assert!(!is_close(0.0, 1e-300, REL_TOL, ABS_TOL));
        assert!(is_close(0.0, 1e-300, REL_TOL, 1e-12));
    }
}
