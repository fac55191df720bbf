//! Greedy allocation of tasks into work periods.
//!
//! Tasks are placed in priority order, periods are filled in chronological
//! order, and each period takes as much of the remaining work as fits. The
//! trimming is done by [`WorkPeriod::split`]: the whole remaining list is
//! assigned to the period, which is then split at its own end so anything
//! that does not fit lands in the discarded tail.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, info, trace};

use crate::period::WorkPeriod;
use crate::schedule::Schedule;
use crate::task::{Task, TaskPart};

/// Periods with this many usable minutes or fewer receive no work.
pub const MINIMUM_PERIOD_MINUTES: i64 = 5;

/// Allocate `tasks` across `periods`, ignoring time before `now`.
///
/// `periods` must be sorted and non-overlapping, typically the output of
/// [`crate::reconcile::overlay_events`]. They are consumed: each scheduled
/// period in the result is the head half of a split.
///
/// Running out of period time is not an error. The returned schedule is
/// marked unsuccessful and keeps both the partial allocation and the parts
/// that could not be placed.
pub fn allocate(periods: Vec<WorkPeriod>, tasks: &[Arc<Task>], now: NaiveDateTime) -> Schedule {
    let mut remaining: Vec<TaskPart> = tasks.iter().map(TaskPart::whole_of).collect();
    let mut scheduled = Vec::with_capacity(periods.len());

    for mut period in periods {
        let effective_start = period.start().max(now);
        if period.end() - effective_start <= Duration::minutes(MINIMUM_PERIOD_MINUTES) {
            trace!(start = %period.start(), end = %period.end(), "period too short, skipped");
            continue;
        }
        if effective_start > period.start() {
            // The part of the period already in the past is not schedulable.
            period.split(effective_start);
        }

        period.set_task_parts(std::mem::take(&mut remaining));
        let end = period.end();
        let (filled, mut overflow) = period.into_split(end);
        let filled = filled.expect("a non-empty period always splits at its own end");
        remaining = overflow.take_task_parts();

        debug!(
            start = %filled.start(),
            end = %filled.end(),
            parts = filled.task_parts().len(),
            remaining = remaining.len(),
            "period filled"
        );
        scheduled.push(filled);
    }

    let schedule = Schedule::new(scheduled, remaining);
    info!(
        successful = schedule.is_successful(),
        periods = schedule.periods().len(),
        allocated_minutes = schedule.allocated().num_minutes(),
        "schedule created"
    );
    schedule
}
