//! crates/wishlist_core/src/dates.rs
//!
//! Date calculations behind the once-per-day action policy. Both functions
//! take the instant as a parameter so call sites stay deterministic in tests;
//! production code passes `Utc::now()`.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc, Weekday};

/// The instant that is 00:00:00 UTC on the calendar day after `now`'s UTC
/// date. Used as the expiry of the acted-today cookie.
pub fn tomorrow_at_midnight_utc(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap_or(NaiveDate::MAX);
    Utc.from_utc_datetime(&tomorrow.and_hms_opt(0, 0, 0).unwrap_or_default())
}

/// True iff `date` falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
