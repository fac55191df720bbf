//! JSON calendar documents read by the CLI, and the JSON shapes it prints.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use work_planner::{sample, Calendar, Event, Schedule, Task, TaskPart, WorkPeriod};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A calendar as written by hand or produced by `workplan sample`.
///
/// Work periods are civil times in `zone`; events carry their own offsets.
#[derive(Debug, Serialize, Deserialize)]
pub struct CalendarDocument {
    pub zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
    #[serde(default)]
    pub work_periods: Vec<PeriodSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_days: Option<WorkingDaysSpec>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskSpec {
    pub description: String,
    pub minutes: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PeriodSpec {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Expands to the standard two-block day on each working day.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkingDaysSpec {
    pub start_date: NaiveDate,
    pub days: usize,
}

impl CalendarDocument {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse calendar document")
    }

    /// Build a calendar, failing on the first invalid or overlapping entry.
    pub fn to_calendar(&self) -> Result<Calendar> {
        let mut calendar = Calendar::new();

        for spec in &self.work_periods {
            let period = WorkPeriod::new(spec.start, spec.end)
                .with_context(|| format!("Invalid work period {} to {}", spec.start, spec.end))?;
            calendar.add_work_period(period)?;
        }
        if let Some(days) = &self.working_days {
            calendar.add_work_periods(sample::work_periods(days.start_date, days.days)?)?;
        }
        for spec in &self.tasks {
            let task = Task::from_minutes(spec.minutes, spec.description.as_str())?;
            calendar.add_task(task);
        }
        for event in &self.events {
            calendar.add_event(event.clone());
        }

        Ok(calendar)
    }

    /// A three-day sample in `zone` with a daily standup, starting on `start`.
    pub fn sample(zone: Tz, start: NaiveDate, days: usize) -> Result<Self> {
        let nine = start
            .and_hms_opt(9, 0, 0)
            .context("09:00 is a valid time")?;
        let standups = sample::standups(nine, days, Duration::minutes(15), &zone)?;
        let now = zone
            .from_local_datetime(&start.and_time(chrono::NaiveTime::MIN))
            .earliest()
            .map(|dt| dt.fixed_offset());

        Ok(Self {
            zone: zone.name().to_string(),
            now,
            tasks: vec![
                TaskSpec {
                    description: "Answer urgent e-mail".to_string(),
                    minutes: 60,
                },
                TaskSpec {
                    description: "Write deployment report".to_string(),
                    minutes: 240,
                },
                TaskSpec {
                    description: "Plan security configuration".to_string(),
                    minutes: 240,
                },
            ],
            work_periods: vec![],
            working_days: Some(WorkingDaysSpec {
                start_date: start,
                days,
            }),
            events: standups,
        })
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct PartDto {
    task: String,
    sequence: u32,
    minutes: i64,
}

impl From<&TaskPart> for PartDto {
    fn from(part: &TaskPart) -> Self {
        Self {
            task: part.task().description().to_string(),
            sequence: part.sequence(),
            minutes: part.duration().num_minutes(),
        }
    }
}

#[derive(Serialize)]
pub struct PeriodDto {
    start: NaiveDateTime,
    end: NaiveDateTime,
    parts: Vec<PartDto>,
}

impl From<&WorkPeriod> for PeriodDto {
    fn from(period: &WorkPeriod) -> Self {
        Self {
            start: period.start(),
            end: period.end(),
            parts: period.task_parts().iter().map(PartDto::from).collect(),
        }
    }
}

#[derive(Serialize)]
pub struct ScheduleDto {
    successful: bool,
    allocated_minutes: i64,
    periods: Vec<PeriodDto>,
    unscheduled: Vec<PartDto>,
}

impl From<&Schedule> for ScheduleDto {
    fn from(schedule: &Schedule) -> Self {
        Self {
            successful: schedule.is_successful(),
            allocated_minutes: schedule.allocated().num_minutes(),
            periods: schedule.periods().iter().map(PeriodDto::from).collect(),
            unscheduled: schedule.unscheduled().iter().map(PartDto::from).collect(),
        }
    }
}
