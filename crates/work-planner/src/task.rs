//! Tasks and the task parts that are actually placed into work periods.
//!
//! A [`Task`] is immutable and shared behind an [`Arc`]. Allocation works on
//! [`TaskPart`]s: slices of a task's duration that can be cut further when a
//! period boundary falls inside them. Every part cut from the same whole part
//! belongs to one lineage, which hands out sequence numbers so fragments of a
//! task are numbered 1, 2, 3... in the order they were produced.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::Duration;

use crate::error::{PlannerError, Result};

/// An indivisible unit of work with a fixed total duration.
#[derive(Debug, PartialEq, Eq)]
pub struct Task {
    duration: Duration,
    description: String,
}

impl Task {
    /// Create a task. The duration must be positive.
    pub fn new(duration: Duration, description: impl Into<String>) -> Result<Arc<Self>> {
        let description = description.into();
        if duration <= Duration::zero() {
            return Err(PlannerError::InvalidTask(format!(
                "'{}' must have a positive duration",
                description
            )));
        }
        Ok(Arc::new(Self {
            duration,
            description,
        }))
    }

    /// # Errors
    /// Returns `PlannerError::InvalidTask` if the duration is not positive or
    /// does not fit in a `Duration`.
    pub fn from_hours_minutes(
        hours: i64,
        minutes: i64,
        description: impl Into<String>,
    ) -> Result<Arc<Self>> {
        let description = description.into();
        let duration = Duration::try_hours(hours)
            .zip(Duration::try_minutes(minutes))
            .and_then(|(h, m)| h.checked_add(&m))
            .ok_or_else(|| out_of_range(&description, format!("{}h {}m", hours, minutes)))?;
        Self::new(duration, description)
    }

    pub fn from_minutes(minutes: i64, description: impl Into<String>) -> Result<Arc<Self>> {
        let description = description.into();
        let duration = Duration::try_minutes(minutes)
            .ok_or_else(|| out_of_range(&description, format!("{}m", minutes)))?;
        Self::new(duration, description)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

fn out_of_range(description: &str, requested: String) -> PlannerError {
    PlannerError::InvalidTask(format!(
        "'{}' duration {} is out of range",
        description, requested
    ))
}

/// A contiguous slice of a task's duration.
///
/// Equality is by owning task identity, duration and sequence number.
#[derive(Debug, Clone)]
pub struct TaskPart {
    task: Arc<Task>,
    duration: Duration,
    sequence: u32,
    lineage: Arc<AtomicU32>,
}

impl TaskPart {
    /// The whole of `task` as a single part with sequence number 1.
    pub fn whole_of(task: &Arc<Task>) -> Self {
        Self {
            task: Arc::clone(task),
            duration: task.duration(),
            sequence: 1,
            lineage: Arc::new(AtomicU32::new(1)),
        }
    }

    pub fn task(&self) -> &Arc<Task> {
        &self.task
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Number of parts issued so far for this part's lineage.
    pub fn part_count(&self) -> u32 {
        self.lineage.load(Ordering::Relaxed)
    }

    /// Cut this part after `before`.
    ///
    /// `self` keeps the first `before` of the duration; the returned part
    /// carries the remainder and the lineage's next sequence number.
    /// Returns `None`, leaving `self` and the lineage untouched, unless
    /// `before` lies strictly between zero and the part's duration.
    pub fn split(&mut self, before: Duration) -> Option<TaskPart> {
        if before <= Duration::zero() || before >= self.duration {
            return None;
        }
        let sequence = self.lineage.fetch_add(1, Ordering::Relaxed) + 1;
        let after = TaskPart {
            task: Arc::clone(&self.task),
            duration: self.duration - before,
            sequence,
            lineage: Arc::clone(&self.lineage),
        };
        self.duration = before;
        Some(after)
    }
}

/// Copies task parts onto fresh lineages so that cutting the copies does not
/// advance the originals' sequence numbers. Parts that shared a lineage keep
/// sharing one after copying.
#[derive(Debug, Default)]
pub(crate) struct LineageForks {
    forks: HashMap<usize, Arc<AtomicU32>>,
}

impl LineageForks {
    pub(crate) fn fork(&mut self, part: &TaskPart) -> TaskPart {
        let key = Arc::as_ptr(&part.lineage) as usize;
        let lineage = Arc::clone(
            self.forks
                .entry(key)
                .or_insert_with(|| Arc::new(AtomicU32::new(part.part_count()))),
        );
        TaskPart {
            lineage,
            ..part.clone()
        }
    }
}

impl PartialEq for TaskPart {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.task, &other.task)
            && self.duration == other.duration
            && self.sequence == other.sequence
    }
}

impl Eq for TaskPart {}

impl fmt::Display for TaskPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.part_count();
        write!(f, "{}", self.task.description())?;
        if count != 1 {
            write!(f, "({}/{})", self.sequence, count)?;
        }
        write!(f, ", {}", format_duration(self.duration))
    }
}

/// Render a duration as "2hrs 5mins", "1hr 0mins" or "45mins".
pub fn format_duration(duration: Duration) -> String {
    let hours = duration.num_hours();
    let minutes = (duration - Duration::hours(hours)).num_minutes();
    match hours {
        0 => format!("{}mins", minutes),
        1 => format!("1hr {}mins", minutes),
        h => format!("{}hrs {}mins", h, minutes),
    }
}
