//! Work periods: half-open civil-time intervals that carry assigned task parts.
//!
//! The interesting operation is [`WorkPeriod::split`]. Task parts are laid out
//! back to back from the period's start, so cutting the period at a point also
//! cuts whichever part straddles that point.

use std::fmt;

use chrono::{Duration, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::{PlannerError, Result};
use crate::task::TaskPart;

/// A contiguous span of civil time available for task work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPeriod {
    start: NaiveDateTime,
    end: NaiveDateTime,
    parts: Vec<TaskPart>,
}

impl WorkPeriod {
    /// Create an empty period covering `[start, end)`.
    ///
    /// # Errors
    /// Returns `PlannerError::InvalidPeriod` if `end` is not after `start`.
    /// Returns `PlannerError::PeriodTooLong` if `end` is later than the
    /// midnight that begins `start`'s day plus two days.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end <= start {
            return Err(PlannerError::InvalidPeriod { start, end });
        }
        // No limit when two days past `start` is beyond the calendar's range.
        let limit = start_of_day(start).checked_add_signed(Duration::days(2));
        if limit.is_some_and(|limit| end > limit) {
            return Err(PlannerError::PeriodTooLong { start, end });
        }
        Ok(Self {
            start,
            end,
            parts: Vec::new(),
        })
    }

    /// # Errors
    /// As [`WorkPeriod::new`]; a duration that runs past the representable
    /// range counts as too long (or, if negative, as ending before `start`).
    pub fn with_duration(start: NaiveDateTime, duration: Duration) -> Result<Self> {
        match start.checked_add_signed(duration) {
            Some(end) => Self::new(start, end),
            None if duration > Duration::zero() => Err(PlannerError::PeriodTooLong {
                start,
                end: NaiveDateTime::MAX,
            }),
            None => Err(PlannerError::InvalidPeriod {
                start,
                end: NaiveDateTime::MIN,
            }),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Civil length of the period. Zero for the tail left by a split at `end`.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Elapsed time between the endpoints when read as wall-clock times in
    /// `zone`. Falls back to the civil length if either endpoint does not
    /// exist in that zone.
    pub fn duration_in<Z: TimeZone>(&self, zone: &Z) -> Duration {
        let start = zone.from_local_datetime(&self.start).earliest();
        let end = zone.from_local_datetime(&self.end).earliest();
        match (start, end) {
            (Some(start), Some(end)) => end.signed_duration_since(start),
            _ => self.duration(),
        }
    }

    pub fn task_parts(&self) -> &[TaskPart] {
        &self.parts
    }

    pub fn set_task_parts(&mut self, parts: Vec<TaskPart>) {
        self.parts = parts;
    }

    pub fn take_task_parts(&mut self) -> Vec<TaskPart> {
        std::mem::take(&mut self.parts)
    }

    pub fn add_task_part(&mut self, part: TaskPart) {
        self.parts.push(part);
    }

    /// Total duration of the assigned task parts.
    pub fn tasks_duration(&self) -> Duration {
        self.parts
            .iter()
            .fold(Duration::zero(), |acc, part| acc + part.duration())
    }

    /// Two half-open periods overlap iff each starts before the other ends.
    /// Abutting periods do not overlap.
    pub fn overlaps(&self, other: &WorkPeriod) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Split the period at `at`.
    ///
    /// Returns the head `[start, at)` and leaves `self` as the tail
    /// `[at, end)`. Returns `None`, leaving `self` untouched, unless
    /// `start < at <= end`. Splitting at `end` is allowed and leaves a
    /// zero-length tail.
    ///
    /// Task parts starting before `at` move to the head, the rest stay in the
    /// tail. A part straddling `at` is cut in two and its remainder becomes the
    /// first part of the tail.
    pub fn split(&mut self, at: NaiveDateTime) -> Option<WorkPeriod> {
        if at <= self.start || at > self.end {
            return None;
        }

        let mut head = WorkPeriod {
            start: self.start,
            end: at,
            parts: Vec::new(),
        };
        self.start = at;

        let mut parts = std::mem::take(&mut self.parts).into_iter();
        let mut tail = Vec::new();
        let mut cursor = head.start;
        for mut part in parts.by_ref() {
            // A part too long to represent its end certainly ends after `at`.
            match cursor.checked_add_signed(part.duration()) {
                Some(part_end) if part_end <= at => {
                    head.parts.push(part);
                    cursor = part_end;
                    if part_end == at {
                        break;
                    }
                }
                _ => {
                    let remainder = part
                        .split(at - cursor)
                        .expect("a part straddling the split point can be cut");
                    head.parts.push(part);
                    tail.push(remainder);
                    break;
                }
            }
        }
        tail.extend(parts);
        self.parts = tail;

        Some(head)
    }

    /// Consuming form of [`split`](Self::split): returns `(head, tail)`.
    ///
    /// When no split happens the head is `None` and the tail is the period
    /// unchanged.
    pub fn into_split(mut self, at: NaiveDateTime) -> (Option<WorkPeriod>, WorkPeriod) {
        let head = self.split(at);
        (head, self)
    }

    /// Split at the first civil midnight after `start`.
    ///
    /// Used when rendering a schedule day by day.
    pub fn split_at_next_midnight(&mut self) -> Option<WorkPeriod> {
        let midnight = start_of_day(self.start).checked_add_signed(Duration::days(1))?;
        self.split(midnight)
    }
}

impl fmt::Display for WorkPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Work Period: {} to {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )?;
        for part in &self.parts {
            write!(f, "\n    {}", part)?;
        }
        Ok(())
    }
}

fn start_of_day(t: NaiveDateTime) -> NaiveDateTime {
    t.date().and_time(NaiveTime::MIN)
}
