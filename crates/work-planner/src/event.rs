//! Fixed calendar events (meetings) that carve time out of work periods.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// A zoned time interval. Immutable once created.
///
/// Serializes with RFC 3339 timestamps. Deserialization applies the same
/// validation as [`Event::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    description: String,
}

#[derive(Deserialize)]
struct EventRecord {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    #[serde(default)]
    description: String,
}

impl TryFrom<EventRecord> for Event {
    type Error = PlannerError;

    fn try_from(record: EventRecord) -> Result<Self> {
        Event::new(record.start, record.end, record.description)
    }
}

impl Event {
    /// Create an event from two zoned instants.
    ///
    /// # Errors
    /// Returns `PlannerError::InvalidEvent` if `end` precedes `start`.
    pub fn new<Z: TimeZone>(
        start: DateTime<Z>,
        end: DateTime<Z>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let description = description.into();
        let start = start.fixed_offset();
        let end = end.fixed_offset();
        if end < start {
            return Err(PlannerError::InvalidEvent(format!(
                "'{}' ends at {} before it starts at {}",
                description,
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self {
            start,
            end,
            description,
        })
    }

    pub fn with_duration<Z: TimeZone>(
        start: DateTime<Z>,
        duration: Duration,
        description: impl Into<String>,
    ) -> Result<Self> {
        let description = description.into();
        let end = start.clone().checked_add_signed(duration).ok_or_else(|| {
            PlannerError::InvalidEvent(format!(
                "'{}' duration {} runs out of range",
                description, duration
            ))
        })?;
        Self::new(start, end, description)
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Wall-clock start of the event as seen in `zone`.
    pub fn local_start<Z: TimeZone>(&self, zone: &Z) -> NaiveDateTime {
        self.start.with_timezone(zone).naive_local()
    }

    /// Wall-clock end of the event as seen in `zone`.
    pub fn local_end<Z: TimeZone>(&self, zone: &Z) -> NaiveDateTime {
        self.end.with_timezone(zone).naive_local()
    }
}

/// Parse an IANA timezone name (e.g. "Europe/London").
///
/// # Errors
/// Returns `PlannerError::InvalidTimezone` for unknown names.
pub fn parse_zone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| PlannerError::InvalidTimezone(name.to_string()))
}
