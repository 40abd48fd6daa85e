use chrono::{Datelike, NaiveDate};

/// Advances a calendar date by `offset` whole months and returns the
/// resulting `(month, year)` pair, month 1-based.
///
/// Only month and year are derived; the day of month is deliberately not
/// preserved because obligations are keyed by month and year alone.
pub fn month_year_after(date: NaiveDate, offset: u32) -> (u32, i32) {
    let total = date.month0() + offset;
    let month = total % 12 + 1;
    let year = date.year() + (total / 12) as i32;
    (month, year)
}

/// Number of whole calendar months elapsed from `start` to `now`.
///
/// This is the canonical month-count rule for ledger projection:
/// `(now.year * 12 + now.month) - (start.year * 12 + start.month)`,
/// clamped to zero. A date before `start` therefore counts as zero
/// elapsed months, and the day of month never matters.
pub fn whole_months_between(start: NaiveDate, now: NaiveDate) -> u32 {
    if now < start {
        return 0;
    }
    let diff =
        (now.year() * 12 + now.month() as i32) - (start.year() * 12 + start.month() as i32);
    diff.max(0) as u32
}

/// Number of days from `start` to `end`, negative-free.
///
/// Used for the derived (non-authoritative) project duration.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(0)
}
