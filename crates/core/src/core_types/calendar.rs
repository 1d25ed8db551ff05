//! Fixed 365-day model calendar
//!
//! Every cell is simulated over the same no-leap year. Month boundaries and
//! the representative (mid-month) day used as the interpolation knot for each
//! monthly driver are compile-time tables.

/// Number of simulated days in a year
pub const DAYS_PER_YEAR: usize = 365;

/// Number of months in a year
pub const MONTHS_PER_YEAR: usize = 12;

/// Length of each month in days (no leap year)
pub const MONTH_LENGTHS: [usize; MONTHS_PER_YEAR] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// 0-based index of the first day of each month
pub const MONTH_STARTS: [usize; MONTHS_PER_YEAR] = month_starts();

/// 0-based index of the representative day of each month
///
/// `start + length / 2`, i.e. 15, 45, 74, ... 349. Interpolated daily series
/// reproduce the monthly input exactly on these days.
pub const MID_MONTH_DAYS: [usize; MONTHS_PER_YEAR] = mid_month_days();

/// Three-letter month labels, used for table output
pub const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const fn month_starts() -> [usize; MONTHS_PER_YEAR] {
    let mut starts = [0; MONTHS_PER_YEAR];
    let mut m = 1;
    while m < MONTHS_PER_YEAR {
        starts[m] = starts[m - 1] + MONTH_LENGTHS[m - 1];
        m += 1;
    }
    starts
}

const fn mid_month_days() -> [usize; MONTHS_PER_YEAR] {
    let starts = month_starts();
    let mut mids = [0; MONTHS_PER_YEAR];
    let mut m = 0;
    while m < MONTHS_PER_YEAR {
        mids[m] = starts[m] + MONTH_LENGTHS[m] / 2;
        m += 1;
    }
    mids
}

/// Month (0-11) containing a 0-based day of the year
///
/// Days past the end of the year map to December.
#[must_use]
pub fn month_of_day(day: usize) -> usize {
    MONTH_STARTS
        .iter()
        .rposition(|&start| day >= start)
        .unwrap_or(0)
}

/// Day range `[start, end)` of a month (0-11)
#[must_use]
pub fn month_days(month: usize) -> std::ops::Range<usize> {
    let start = MONTH_STARTS[month];
    start..start + MONTH_LENGTHS[month]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_lengths_cover_year() {
        assert_eq!(MONTH_LENGTHS.iter().sum::<usize>(), DAYS_PER_YEAR);
        assert_eq!(MONTH_STARTS[0], 0);
        assert_eq!(MONTH_STARTS[11] + MONTH_LENGTHS[11], DAYS_PER_YEAR);
    }

    #[test]
    fn test_mid_month_days() {
        assert_eq!(
            MID_MONTH_DAYS,
            [15, 45, 74, 105, 135, 166, 196, 227, 258, 288, 319, 349]
        );
    }

    #[test]
    fn test_month_of_day() {
        assert_eq!(month_of_day(0), 0);
        assert_eq!(month_of_day(30), 0);
        assert_eq!(month_of_day(31), 1);
        assert_eq!(month_of_day(58), 1);
        assert_eq!(month_of_day(59), 2);
        assert_eq!(month_of_day(364), 11);
        assert_eq!(month_of_day(400), 11);
    }

    #[test]
    fn test_month_days_partition_year() {
        let mut covered = 0;
        for m in 0..MONTHS_PER_YEAR {
            let range = month_days(m);
            assert_eq!(range.start, covered);
            for d in range.clone() {
                assert_eq!(month_of_day(d), m);
            }
            covered = range.end;
        }
        assert_eq!(covered, DAYS_PER_YEAR);
    }
}
