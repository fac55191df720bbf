//! Sample calendar data: business days, a fixed two-block working day and a
//! daily standup.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday};

use crate::error::{PlannerError, Result};
use crate::event::Event;
use crate::period::WorkPeriod;

const BLOCK_MINUTES: i64 = 210;

fn morning_start() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).expect("09:00 is a valid time")
}

fn afternoon_start() -> NaiveTime {
    NaiveTime::from_hms_opt(13, 30, 0).expect("13:30 is a valid time")
}

pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first `count` weekdays on or after `start`.
pub fn working_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    start
        .iter_days()
        .filter(|d| is_working_day(*d))
        .take(count)
        .collect()
}

/// Two work periods, 09:00-12:30 and 13:30-17:00, on each of the first
/// `days` weekdays on or after `start`.
pub fn work_periods(start: NaiveDate, days: usize) -> Result<Vec<WorkPeriod>> {
    let block = Duration::minutes(BLOCK_MINUTES);
    working_days(start, days)
        .into_iter()
        .flat_map(|d| [d.and_time(morning_start()), d.and_time(afternoon_start())])
        .map(|block_start| WorkPeriod::with_duration(block_start, block))
        .collect()
}

/// A "standup" event at `start`'s wall-clock time in `zone` on each of the
/// first `days` weekdays on or after `start`'s date.
///
/// # Errors
/// Returns `PlannerError::InvalidEvent` if the standup time does not exist on
/// one of those days (it falls in a DST gap).
pub fn standups<Z: TimeZone>(
    start: NaiveDateTime,
    days: usize,
    duration: Duration,
    zone: &Z,
) -> Result<Vec<Event>> {
    working_days(start.date(), days)
        .into_iter()
        .map(|d| {
            let local = d.and_time(start.time());
            let zoned = zone.from_local_datetime(&local).earliest().ok_or_else(|| {
                PlannerError::InvalidEvent(format!("standup time {} does not exist", local))
            })?;
            Event::with_duration(zoned, duration, "standup")
        })
        .collect()
}
