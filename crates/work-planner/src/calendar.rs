//! The calendar aggregate: work periods, prioritized tasks and events.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::error::{PlannerError, Result};
use crate::event::Event;
use crate::period::WorkPeriod;
use crate::reconcile;
use crate::schedule::Schedule;
use crate::scheduler;
use crate::task::Task;

/// Owns the inputs to scheduling.
///
/// - Work periods are kept sorted by start and never overlap.
/// - Tasks are kept in insertion order, which is their priority order.
/// - Events are kept sorted by start instant (then end).
///
/// Scheduling reads the calendar but never changes it, so the same calendar
/// can be scheduled repeatedly.
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    work_periods: Vec<WorkPeriod>,
    tasks: Vec<Arc<Task>>,
    events: Vec<Event>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a work period in start order.
    ///
    /// # Errors
    /// Returns `PlannerError::Overlap` if the period overlaps a stored one.
    /// Periods that only touch at a boundary are accepted.
    pub fn add_work_period(&mut self, period: WorkPeriod) -> Result<&mut Self> {
        let idx = self
            .work_periods
            .partition_point(|p| p.start() < period.start());

        let preceding = idx.checked_sub(1).map(|i| &self.work_periods[i]);
        if let Some(prev) = preceding.filter(|prev| prev.end() > period.start()) {
            return Err(overlap(prev, &period));
        }
        if let Some(next) = self
            .work_periods
            .get(idx)
            .filter(|next| next.start() < period.end())
        {
            return Err(overlap(next, &period));
        }

        self.work_periods.insert(idx, period);
        Ok(self)
    }

    /// Insert several work periods, stopping at the first overlap.
    pub fn add_work_periods(
        &mut self,
        periods: impl IntoIterator<Item = WorkPeriod>,
    ) -> Result<&mut Self> {
        for period in periods {
            self.add_work_period(period)?;
        }
        Ok(self)
    }

    /// Append a task at the lowest priority so far.
    pub fn add_task(&mut self, task: Arc<Task>) -> &mut Self {
        self.tasks.push(task);
        self
    }

    pub fn add_task_hm(
        &mut self,
        hours: i64,
        minutes: i64,
        description: impl Into<String>,
    ) -> Result<&mut Self> {
        let task = Task::from_hours_minutes(hours, minutes, description)?;
        Ok(self.add_task(task))
    }

    pub fn add_event(&mut self, event: Event) -> &mut Self {
        let idx = self
            .events
            .partition_point(|e| (e.start(), e.end()) <= (event.start(), event.end()));
        self.events.insert(idx, event);
        self
    }

    pub fn add_event_for<Z: TimeZone>(
        &mut self,
        start: DateTime<Z>,
        duration: Duration,
        description: impl Into<String>,
    ) -> Result<&mut Self> {
        let event = Event::with_duration(start, duration, description)?;
        Ok(self.add_event(event))
    }

    pub fn work_periods(&self) -> &[WorkPeriod] {
        &self.work_periods
    }

    pub fn tasks(&self) -> &[Arc<Task>] {
        &self.tasks
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The calendar's work periods with event time removed, as seen in `zone`.
    pub fn overlay_events<Z: TimeZone>(&self, zone: &Z) -> Vec<WorkPeriod> {
        reconcile::overlay_events(&self.work_periods, &self.events, zone)
    }

    /// Allocate all tasks into the event-free work time after `now`.
    ///
    /// `zone` gives the civil time the work periods are expressed in; both
    /// the events and `now` are projected into it.
    pub fn create_schedule<Z: TimeZone>(&self, now: DateTime<Utc>, zone: &Z) -> Schedule {
        let free = self.overlay_events(zone);
        let cutoff = now.with_timezone(zone).naive_local();
        scheduler::allocate(free, &self.tasks, cutoff)
    }
}

fn overlap(existing: &WorkPeriod, rejected: &WorkPeriod) -> PlannerError {
    PlannerError::Overlap {
        existing: format!("[{}, {})", existing.start(), existing.end()),
        rejected: format!("[{}, {})", rejected.start(), rejected.end()),
    }
}
