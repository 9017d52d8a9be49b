use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, TimeDelta};
use rand::Rng;

/// First day example dates are drawn from
pub fn start_of_2025() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("2025-01-01 is a valid date")
}

/// Uniform date in `[start, end)`, or `None` when the range is empty
pub fn random_date_between<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<NaiveDate> {
    let days = (end - start).num_days();
    if days <= 0 {
        return None;
    }
    Some(start + TimeDelta::days(rng.gen_range(0..days)))
}

/// A date from 1 Jan 2025 up to, but not including, today's local date.
pub fn random_date_2025() -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    random_date_between(&mut rand::thread_rng(), start_of_2025(), today)
        .with_context(|| format!("No example date available between 2025-01-01 and {}", today))
}
