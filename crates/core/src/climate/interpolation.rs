//! Monthly to daily interpolation of climate drivers
//!
//! Each monthly value is pinned to the representative day of its month
//! ([`MID_MONTH_DAYS`]) and days in between are filled by straight lines.
//! The year is periodic: the segment after mid-December continues into
//! mid-January of the same series rather than being clamped.

use crate::core_types::{DAYS_PER_YEAR, MID_MONTH_DAYS, MONTHS_PER_YEAR, MONTH_LENGTHS};

/// Interpolation knot for one day: the bracketing months and the weight of the later one
#[derive(Debug, Clone, Copy, PartialEq)]
struct Knot {
    lower: usize,
    upper: usize,
    weight: f64,
}

/// Periodic piecewise-linear interpolator from 12 monthly values to 365 daily values
///
/// The bracketing months and weights for every day are computed once, so
/// interpolating a series is a single pass with no allocation.
///
/// ```
/// use stash_core::climate::ClimateInterpolator;
/// use stash_core::core_types::{DAYS_PER_YEAR, MID_MONTH_DAYS};
///
/// let interpolator = ClimateInterpolator::new();
/// let monthly = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0];
/// let mut daily = [0.0; DAYS_PER_YEAR];
/// interpolator.interpolate(&monthly, &mut daily);
/// assert_eq!(daily[MID_MONTH_DAYS[6]], 7.0);
/// ```
#[derive(Debug, Clone)]
pub struct ClimateInterpolator {
    knots: [Knot; DAYS_PER_YEAR],
}

impl Default for ClimateInterpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl ClimateInterpolator {
    /// Build the knot table for the model calendar
    #[must_use]
    pub fn new() -> Self {
        let mut knots = [Knot {
            lower: 0,
            upper: 0,
            weight: 0.0,
        }; DAYS_PER_YEAR];

        let first = MID_MONTH_DAYS[0] as f64;
        let last = MID_MONTH_DAYS[MONTHS_PER_YEAR - 1] as f64;
        let year = DAYS_PER_YEAR as f64;

        for (day, knot) in knots.iter_mut().enumerate() {
            let d = day as f64;
            *knot = if d < first {
                // Wrap back to the previous December
                Knot {
                    lower: MONTHS_PER_YEAR - 1,
                    upper: 0,
                    weight: (d - (last - year)) / (first - (last - year)),
                }
            } else if d >= last {
                // Wrap forward to the next January
                Knot {
                    lower: MONTHS_PER_YEAR - 1,
                    upper: 0,
                    weight: (d - last) / (first + year - last),
                }
            } else {
                let lower = MID_MONTH_DAYS
                    .iter()
                    .rposition(|&mid| mid <= day)
                    .unwrap_or(0);
                let upper = lower + 1;
                let a = MID_MONTH_DAYS[lower] as f64;
                let b = MID_MONTH_DAYS[upper] as f64;
                Knot {
                    lower,
                    upper,
                    weight: (d - a) / (b - a),
                }
            };
        }

        Self { knots }
    }

    /// Interpolate a monthly series into the daily target array
    ///
    /// The monthly values must already have passed the missing-data check;
    /// sentinels are interpolated like any other number.
    pub fn interpolate(&self, monthly: &[f64; MONTHS_PER_YEAR], daily: &mut [f64; DAYS_PER_YEAR]) {
        for (value, knot) in daily.iter_mut().zip(self.knots.iter()) {
            let a = monthly[knot.lower];
            let b = monthly[knot.upper];
            *value = a + (b - a) * knot.weight;
        }
    }

    /// Interpolate monthly totals as a daily rate
    ///
    /// Each total is divided by its month length before interpolation, so
    /// the daily series is in units per day (e.g. mm/day for precipitation).
    pub fn interpolate_totals(
        &self,
        monthly_totals: &[f64; MONTHS_PER_YEAR],
        daily: &mut [f64; DAYS_PER_YEAR],
    ) {
        let mut rates = [0.0; MONTHS_PER_YEAR];
        for (m, rate) in rates.iter_mut().enumerate() {
            *rate = monthly_totals[m] / MONTH_LENGTHS[m] as f64;
        }
        self.interpolate(&rates, daily);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp() -> [f64; MONTHS_PER_YEAR] {
        [
            -8.0, -6.5, -1.0, 5.0, 11.0, 15.5, 18.0, 17.0, 12.0, 6.0, 0.5, -5.0,
        ]
    }

    #[test]
    fn test_reproduces_monthly_values_at_mid_month() {
        let interpolator = ClimateInterpolator::new();
        let monthly = ramp();
        let mut daily = [0.0; DAYS_PER_YEAR];
        interpolator.interpolate(&monthly, &mut daily);

        for (m, &mid) in MID_MONTH_DAYS.iter().enumerate() {
            assert_eq!(daily[mid], monthly[m], "month {m} at day {mid}");
        }
    }

    #[test]
    fn test_constant_series_stays_constant() {
        let interpolator = ClimateInterpolator::new();
        let mut daily = [0.0; DAYS_PER_YEAR];
        interpolator.interpolate(&[20.0; MONTHS_PER_YEAR], &mut daily);
        assert!(daily.iter().all(|&v| (v - 20.0).abs() < 1e-12));
    }

    #[test]
    fn test_wraps_between_december_and_january() {
        let interpolator = ClimateInterpolator::new();
        let mut monthly = [0.0; MONTHS_PER_YEAR];
        monthly[0] = 31.0; // January
        let mut daily = [0.0; DAYS_PER_YEAR];
        interpolator.interpolate(&monthly, &mut daily);

        // 31 days separate mid-December (349) from mid-January (15 + 365)
        assert_abs_diff_eq!(daily[0], 16.0, epsilon = 1e-12);
        assert_abs_diff_eq!(daily[364], 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(daily[349], 0.0, epsilon = 1e-12);
        // Continuity across the year boundary
        assert_abs_diff_eq!(daily[0] - daily[364], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_values_stay_within_bracketing_months() {
        let interpolator = ClimateInterpolator::new();
        let monthly = ramp();
        let mut daily = [0.0; DAYS_PER_YEAR];
        interpolator.interpolate(&monthly, &mut daily);

        let min = monthly.iter().copied().fold(f64::INFINITY, f64::min);
        let max = monthly.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(daily.iter().all(|&v| v >= min - 1e-12 && v <= max + 1e-12));

        // Linear segment: halfway between mid-June (166) and mid-July (196)
        assert_abs_diff_eq!(daily[181], (15.5 + 18.0) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_totals_become_daily_rates() {
        let interpolator = ClimateInterpolator::new();
        let mut daily = [0.0; DAYS_PER_YEAR];
        interpolator.interpolate_totals(&[62.0; MONTHS_PER_YEAR], &mut daily);

        assert_abs_diff_eq!(daily[MID_MONTH_DAYS[0]], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(daily[MID_MONTH_DAYS[1]], 62.0 / 28.0, epsilon = 1e-12);
        assert_abs_diff_eq!(daily[MID_MONTH_DAYS[3]], 62.0 / 30.0, epsilon = 1e-12);
    }
}
