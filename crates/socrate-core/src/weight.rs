//! Selection weight policy.
//!
//! Members who struggled (failed answers, absences) weigh more; every call
//! shrinks the weight quadratically so the same member is rarely picked twice
//! in a short span. The weight never reaches zero.

/// Bonus added per failed answer.
pub const FAILED_BONUS: f64 = 0.5;

/// Bonus added per absence.
pub const ABSENT_BONUS: f64 = 2.0;

/// Compute the selection weight for a set of participation counters.
///
/// `(1 + 0.5 * failed + 2 * absent) / (called + 1)^2`
pub fn weight(called: u32, failed: u32, absent: u32) -> f64 {
    let numerator = 1.0 + FAILED_BONUS * f64::from(failed) + ABSENT_BONUS * f64::from(absent);
    let calls = f64::from(called) + 1.0;
    numerator / (calls * calls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fresh_member_weighs_one() {
        assert!((weight(0, 0, 0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn one_call_quarters_the_weight() {
        assert!((weight(1, 0, 0) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn absences_count_four_times_failures() {
        assert!((weight(0, 4, 0) - 3.0).abs() < f64::EPSILON);
        assert!((weight(0, 0, 1) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mixed_counters() {
        // (1 + 0.5 * 2 + 2 * 1) / 3^2 = 4 / 9
        assert!((weight(2, 2, 1) - 4.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn large_counters_stay_positive() {
        assert!(weight(u32::MAX, 0, 0) > 0.0);
        assert!(weight(u32::MAX, u32::MAX, u32::MAX).is_finite());
    }

    proptest! {
        #[test]
        fn prop_weight_positive(called in 0u32..10_000, failed in 0u32..10_000, absent in 0u32..10_000) {
            let w = weight(called, failed, absent);
            prop_assert!(w > 0.0);
            prop_assert!(w.is_finite());
        }

        #[test]
        fn prop_decreasing_in_called(called in 0u32..10_000, failed in 0u32..1_000, absent in 0u32..1_000) {
            prop_assert!(weight(called + 1, failed, absent) < weight(called, failed, absent));
        }

        #[test]
        fn prop_increasing_in_failed(called in 0u32..1_000, failed in 0u32..10_000, absent in 0u32..1_000) {
            prop_assert!(weight(called, failed + 1, absent) > weight(called, failed, absent));
        }

        #[test]
        fn prop_increasing_in_absent(called in 0u32..1_000, failed in 0u32..1_000, absent in 0u32..10_000) {
            prop_assert!(weight(called, failed, absent + 1) > weight(called, failed, absent));
        }
    }
}
