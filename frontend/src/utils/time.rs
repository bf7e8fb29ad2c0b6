use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

pub fn now_in_tz(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// Calendar date used for "cannot start today or earlier" checks.
pub fn today_in_tz(tz: Tz) -> NaiveDate {
    now_in_tz(tz).date_naive()
}
