//! Monthly to daily interpolation properties on irregular series

use approx::assert_abs_diff_eq;
use stash_core::climate::{ClimateInterpolator, ClimatePreset, DailyDrivers};
use stash_core::core_types::{month_of_day, DAYS_PER_YEAR, MID_MONTH_DAYS, MONTHS_PER_YEAR, MONTH_LENGTHS};

const SERIES: [[f64; MONTHS_PER_YEAR]; 3] = [
    [-18.2, -15.0, -7.4, 1.3, 9.9, 15.2, 18.8, 16.0, 9.1, 1.7, -8.8, -15.5],
    [3.0, 140.0, 0.0, 55.5, 12.25, 90.0, 0.5, 33.0, 210.0, 1.0, 77.0, 8.0],
    [0.9, 0.1, 0.5, 0.5, 0.75, 0.05, 1.0, 0.0, 0.33, 0.66, 0.2, 0.8],
];

#[test]
fn test_mid_month_days_reproduce_inputs() {
    let interpolator = ClimateInterpolator::new();
    for monthly in &SERIES {
        let mut daily = [0.0; DAYS_PER_YEAR];
        interpolator.interpolate(monthly, &mut daily);
        for (month, &day) in MID_MONTH_DAYS.iter().enumerate() {
            assert_eq!(month_of_day(day), month);
            assert_abs_diff_eq!(daily[day], monthly[month], epsilon = 1e-12);
        }
    }
}

#[test]
fn test_daily_values_stay_between_bracketing_months() {
    let interpolator = ClimateInterpolator::new();
    for monthly in &SERIES {
        let mut daily = [0.0; DAYS_PER_YEAR];
        interpolator.interpolate(monthly, &mut daily);

        for month in 0..MONTHS_PER_YEAR {
            let next = (month + 1) % MONTHS_PER_YEAR;
            let (lo, hi) = if monthly[month] <= monthly[next] {
                (monthly[month], monthly[next])
            } else {
                (monthly[next], monthly[month])
            };
            let start = MID_MONTH_DAYS[month];
            let end = if next == 0 {
                MID_MONTH_DAYS[0] + DAYS_PER_YEAR
            } else {
                MID_MONTH_DAYS[next]
            };
            for d in start..=end {
                let v = daily[d % DAYS_PER_YEAR];
                assert!(v >= lo - 1e-9 && v <= hi + 1e-9, "day {d}: {v} not in [{lo}, {hi}]");
            }
        }
    }
}

#[test]
fn test_year_boundary_is_continuous() {
    let interpolator = ClimateInterpolator::new();
    let monthly = SERIES[0];
    let mut daily = [0.0; DAYS_PER_YEAR];
    interpolator.interpolate(&monthly, &mut daily);

    // Dec 15 -> Jan 15 spans 31 days; consecutive days differ by one step
    let step = (monthly[0] - monthly[11]) / 31.0;
    assert_abs_diff_eq!(daily[0] - daily[DAYS_PER_YEAR - 1], step, epsilon = 1e-9);
    assert_abs_diff_eq!(daily[1] - daily[0], step, epsilon = 1e-9);
}

#[test]
fn test_precipitation_rate_matches_month_totals() {
    let interpolator = ClimateInterpolator::new();
    let mut daily = [0.0; DAYS_PER_YEAR];
    interpolator.interpolate_totals(&SERIES[1], &mut daily);
    for (month, &day) in MID_MONTH_DAYS.iter().enumerate() {
        let rate = SERIES[1][month] / MONTH_LENGTHS[month] as f64;
        assert_abs_diff_eq!(daily[day], rate, epsilon = 1e-12);
    }
    assert!(daily.iter().all(|&p| p >= 0.0));
}

#[test]
fn test_interpolated_rates_keep_annual_precipitation() {
    let interpolator = ClimateInterpolator::new();
    for preset in ClimatePreset::all() {
        let monthly = preset.drivers();
        let mut daily = DailyDrivers::default();
        daily.fill_from(&interpolator, &monthly);

        let annual: f64 = monthly.precipitation.iter().sum();
        let interpolated: f64 = daily.precipitation.iter().sum();
        // Linear interpolation of rates redistributes water between months
        // but keeps the annual total close
        assert!(
            (interpolated - annual).abs() / annual < 0.05,
            "{}: {interpolated} vs {annual}",
            preset.name
        );
    }
}
