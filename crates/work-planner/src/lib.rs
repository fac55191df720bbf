//! # work-planner
//!
//! Day-by-day work planning: allocates a prioritized list of tasks into
//! available work periods after carving out time taken by fixed events.
//!
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use work_planner::{Calendar, Event, WorkPeriod};
//!
//! let day = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
//! let mut calendar = Calendar::new();
//! calendar
//!     .add_work_period(WorkPeriod::new(day.and_hms_opt(9, 0, 0).unwrap(), day.and_hms_opt(12, 0, 0).unwrap()).unwrap())
//!     .unwrap();
//! calendar.add_task_hm(2, 0, "write report").unwrap();
//! calendar.add_event(
//!     Event::new(
//!         Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap(),
//!         Utc.with_ymd_and_hms(2026, 3, 16, 10, 30, 0).unwrap(),
//!         "standup",
//!     )
//!     .unwrap(),
//! );
//!
//! let now = Utc.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap();
//! let schedule = calendar.create_schedule(now, &Utc);
//! assert!(schedule.is_successful());
//! assert_eq!(schedule.periods().len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`task`] — tasks and the splittable task parts placed into periods
//! - [`period`] — work periods and splitting with task-part redistribution
//! - [`event`] — zoned events projected into civil time
//! - [`reconcile`] — sweep that removes event time from work periods
//! - [`scheduler`] — greedy allocation of task parts into periods
//! - [`schedule`] — allocation result and day-by-day view
//! - [`calendar`] — aggregate owning periods, tasks and events
//! - [`sample`] — generated business-day periods and standups
//! - [`error`] — error types

pub mod calendar;
pub mod error;
pub mod event;
pub mod period;
pub mod reconcile;
pub mod sample;
pub mod schedule;
pub mod scheduler;
pub mod task;

pub use calendar::Calendar;
pub use error::PlannerError;
pub use event::{parse_zone, Event};
pub use period::WorkPeriod;
pub use reconcile::overlay_events;
pub use schedule::Schedule;
pub use scheduler::allocate;
pub use task::{format_duration, Task, TaskPart};
