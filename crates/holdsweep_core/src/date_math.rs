//! Calendar arithmetic for start-date sampling and holding periods.
//!
//! Day offsets use Rata Die day-numbering so a day difference or a day shift
//! is O(1) with no `jiff::Span` normalisation. Month and year offsets are
//! calendar based: the day of month is kept and clamped to the length of the
//! target month, so 2016-02-29 plus twelve months is 2017-02-28 and 2015-01-31
//! plus one month is 2015-02-28. Repeating the same offset over many trials
//! never drifts the way adding 365-day blocks does.

use jiff::civil::Date;

use crate::error::ParameterError;

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days in a month without building a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Rata Die day number (days since 0001-01-01), proleptic Gregorian.
///
/// Floor division keeps the numbering continuous through year 0 and the
/// negative years `jiff` supports.
#[inline]
fn rata_die(d: Date) -> i32 {
    let y = d.year() as i32;
    let m = d.month() as i32;
    let day = d.day() as i32;

    // March = month 1 so February ends the year
    let a = (14 - m) / 12;
    let y2 = y - a;
    let m2 = m + 12 * a - 3;

    day + (153 * m2 + 2) / 5 + 365 * y2 + y2.div_euclid(4) - y2.div_euclid(100)
        + y2.div_euclid(400)
        - 306
}

/// Inverse of `rata_die()`, `None` outside the `jiff` calendar range.
#[inline]
fn rd_to_date(rd: i32) -> Option<Date> {
    if rd < rata_die(Date::MIN) || rd > rata_die(Date::MAX) {
        return None;
    }
    let z = rd + 306;
    let h = 100 * z - 25;
    let a = h.div_euclid(3_652_425);
    let b = a - a.div_euclid(4);
    let y = (100 * b + h).div_euclid(36_525);
    let c = b + z - 365 * y - y.div_euclid(4);
    let m = (5 * c + 456) / 153;
    let day = c - (153 * m - 457) / 5;

    let (year, month) = if m > 12 { (y + 1, m - 12) } else { (y, m) };

    Date::new(year as i16, month as i8, day as i8).ok()
}

/// Number of days from `d1` to `d2`, positive when `d2 > d1`.
#[inline]
pub fn days_between(d1: Date, d2: Date) -> i32 {
    rata_die(d2) - rata_die(d1)
}

/// Shift a date by `n` days, `None` past `Date::MIN` or `Date::MAX`.
#[inline]
pub fn checked_add_days(d: Date, n: i32) -> Option<Date> {
    rd_to_date(rata_die(d).checked_add(n)?)
}

/// Shift a date by `n` days, stopping at `Date::MIN` or `Date::MAX`.
#[inline]
pub fn add_days(d: Date, n: i32) -> Date {
    checked_add_days(d, n).unwrap_or(if n < 0 { Date::MIN } else { Date::MAX })
}

/// Shift a date by `months` calendar months, clamping to the month end.
pub fn add_months(d: Date, months: i32) -> Result<Date, ParameterError> {
    let out_of_range = || ParameterError::DateOutOfRange { date: d, months };

    let total_months = (d.year() as i32 * 12 + d.month() as i32 - 1)
        .checked_add(months)
        .ok_or_else(out_of_range)?;
    let new_year = i16::try_from(total_months.div_euclid(12)).map_err(|_| out_of_range())?;
    let new_month = (total_months.rem_euclid(12) + 1) as i8;
    if !(1..=9999).contains(&new_year) {
        return Err(out_of_range());
    }
    let new_day = d.day().min(days_in_month(new_year, new_month));
    Date::new(new_year, new_month, new_day).map_err(|_| out_of_range())
}

/// Shift a date by whole calendar years.
pub fn add_years(d: Date, years: i32) -> Result<Date, ParameterError> {
    add_months(d, years.saturating_mul(12))
}

/// Parse `YYYY-MM-DD` or the compact `YYYYMMDD` form.
pub fn parse_date(s: &str) -> Result<Date, ParameterError> {
    let s = s.trim();
    let malformed = || ParameterError::MalformedDate(s.to_string());

    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year: i16 = s[0..4].parse().map_err(|_| malformed())?;
        let month: i8 = s[4..6].parse().map_err(|_| malformed())?;
        let day: i8 = s[6..8].parse().map_err(|_| malformed())?;
        return Date::new(year, month, day).map_err(|_| malformed());
    }

    s.parse::<Date>().map_err(|_| malformed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_days_between_across_year() {
        assert_eq!(days_between(date(2024, 1, 1), date(2025, 1, 1)), 366);
        assert_eq!(days_between(date(2025, 1, 1), date(2026, 1, 1)), 365);
        assert_eq!(days_between(date(2025, 1, 2), date(2025, 1, 1)), -1);
    }

    #[test]
    fn test_days_between_matches_jiff() {
        let pairs = [
            (date(1970, 1, 1), date(2030, 6, 15)),
            (date(2024, 2, 29), date(2025, 2, 28)),
            (date(1900, 3, 1), date(2100, 3, 1)),
        ];
        for (d1, d2) in pairs {
            let jiff_days = (d2 - d1).get_days();
            assert_eq!(days_between(d1, d2), jiff_days, "mismatch for {d1} -> {d2}");
        }
    }

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(date(2015, 1, 1), 45), date(2015, 2, 15));
        assert_eq!(add_days(date(2024, 2, 28), 1), date(2024, 2, 29));
        assert_eq!(add_days(date(2025, 1, 1), -1), date(2024, 12, 31));
    }

    #[test]
    fn test_day_shifts_at_calendar_limits() {
        assert_eq!(checked_add_days(Date::MAX, 1), None);
        assert_eq!(checked_add_days(Date::MIN, -1), None);
        assert_eq!(checked_add_days(Date::MAX, i32::MAX), None);
        assert_eq!(checked_add_days(date(9999, 12, 30), 1), Some(Date::MAX));
        assert_eq!(add_days(date(9999, 12, 1), 5000), Date::MAX);
        assert_eq!(add_days(date(1, 1, 1), -5_000_000), Date::MIN);
    }

    #[test]
    fn test_day_shifts_before_year_one() {
        assert_eq!(add_days(date(1, 1, 1), -1), date(0, 12, 31));
        // Year 0 is a leap year
        assert_eq!(add_days(date(0, 3, 1), -1), date(0, 2, 29));
        assert_eq!(
            add_days(date(1, 2, 1), -5000),
            date(1, 2, 1) - jiff::Span::new().days(5000)
        );
        assert_eq!(add_days(Date::MIN, 1), date(-9999, 1, 2));
    }

    #[test]
    fn test_negative_years_match_jiff() {
        let pairs = [
            (date(-1, 1, 1), date(1, 1, 1)),
            (date(-9999, 1, 1), date(-5000, 6, 15)),
            (date(-401, 2, 28), date(-399, 3, 1)),
        ];
        for (d1, d2) in pairs {
            let jiff_days = (d2 - d1).get_days();
            assert_eq!(days_between(d1, d2), jiff_days, "mismatch for {d1} -> {d2}");
            assert_eq!(add_days(d1, jiff_days), d2);
        }
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(date(2015, 1, 31), 1).unwrap(), date(2015, 2, 28));
        assert_eq!(add_months(date(2016, 1, 31), 1).unwrap(), date(2016, 2, 29));
        assert_eq!(add_months(date(2015, 1, 1), 6).unwrap(), date(2015, 7, 1));
        assert_eq!(add_months(date(2015, 3, 31), -1).unwrap(), date(2015, 2, 28));
    }

    #[test]
    fn test_add_years_leap_day() {
        assert_eq!(add_years(date(2016, 2, 29), 1).unwrap(), date(2017, 2, 28));
        assert_eq!(add_years(date(2016, 2, 29), 4).unwrap(), date(2020, 2, 29));
    }

    #[test]
    fn test_repeated_year_offsets_do_not_drift() {
        // 150 years of anniversaries land on the same calendar day
        let start = date(1870, 6, 15);
        for years in 0..150 {
            let d = add_years(start, years).unwrap();
            assert_eq!((d.month(), d.day()), (6, 15));
        }
    }

    #[test]
    fn test_add_months_out_of_range() {
        assert!(matches!(
            add_years(date(9998, 6, 1), 5),
            Err(ParameterError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2016-01-01").unwrap(), date(2016, 1, 1));
        assert_eq!(parse_date("20160101").unwrap(), date(2016, 1, 1));
        assert_eq!(parse_date(" 2020-02-29 ").unwrap(), date(2020, 2, 29));
        assert!(matches!(
            parse_date("20150230"),
            Err(ParameterError::MalformedDate(_))
        ));
        assert!(parse_date("01/02/2016").is_err());
        assert!(parse_date("").is_err());
    }
}
