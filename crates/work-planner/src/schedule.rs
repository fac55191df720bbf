//! The result of an allocation run.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Duration, NaiveDate};

use crate::period::WorkPeriod;
use crate::task::{LineageForks, TaskPart};

/// Scheduled periods in chronological order, each carrying the task parts
/// placed in it.
///
/// `is_successful()` is false when some task time could not be placed. The
/// partial allocation is still available, along with the leftover parts.
#[derive(Debug, Clone)]
pub struct Schedule {
    periods: Vec<WorkPeriod>,
    unscheduled: Vec<TaskPart>,
    successful: bool,
}

impl Schedule {
    pub fn new(periods: Vec<WorkPeriod>, unscheduled: Vec<TaskPart>) -> Self {
        let successful = unscheduled.is_empty();
        Self {
            periods,
            unscheduled,
            successful,
        }
    }

    pub fn periods(&self) -> &[WorkPeriod] {
        &self.periods
    }

    pub fn is_successful(&self) -> bool {
        self.successful
    }

    /// Task parts left over when the periods ran out.
    pub fn unscheduled(&self) -> &[TaskPart] {
        &self.unscheduled
    }

    /// Total task time placed across all periods.
    pub fn allocated(&self) -> Duration {
        self.periods
            .iter()
            .fold(Duration::zero(), |acc, p| acc + p.tasks_duration())
    }

    /// Scheduled periods cut at each civil midnight and grouped by date.
    ///
    /// Works on copies; the schedule itself is left as it is.
    pub fn days(&self) -> BTreeMap<NaiveDate, Vec<WorkPeriod>> {
        let mut forks = LineageForks::default();
        let mut days: BTreeMap<NaiveDate, Vec<WorkPeriod>> = BTreeMap::new();

        for period in &self.periods {
            let mut rest = period.clone();
            rest.set_task_parts(period.task_parts().iter().map(|p| forks.fork(p)).collect());

            while let Some(head) = rest.split_at_next_midnight() {
                days.entry(head.start().date()).or_default().push(head);
                if rest.duration() == Duration::zero() {
                    break;
                }
            }
            if rest.duration() > Duration::zero() {
                days.entry(rest.start().date()).or_default().push(rest);
            }
        }

        days
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.successful {
            return write!(f, "Schedule unsuccessful: insufficient time for tasks");
        }
        for (i, (date, periods)) in self.days().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", date)?;
            for period in periods {
                write!(f, "\n  {}", period)?;
            }
        }
        Ok(())
    }
}
