//! Overlay calendar events onto work periods.
//!
//! A merge-style sweep over two sorted sequences. Each step either emits the
//! current period, drops the current event, or trims the current period, so
//! the whole pass is linear in the combined input size.

use chrono::TimeZone;
use tracing::{debug, trace};

use crate::event::Event;
use crate::period::WorkPeriod;

/// Remove event time from work periods.
///
/// `periods` and `events` must each be sorted by start. Events are projected
/// into `zone` to compare with the civil-time periods. The caller's periods
/// are not modified; the result is a new sorted list of non-overlapping
/// periods, none of which overlaps an event.
///
/// A period that an event covers completely is dropped without leaving a
/// zero-length remainder. Events that take no time are ignored.
pub fn overlay_events<Z: TimeZone>(
    periods: &[WorkPeriod],
    events: &[Event],
    zone: &Z,
) -> Vec<WorkPeriod> {
    let mut pending = periods.iter().cloned();
    let mut free = Vec::with_capacity(periods.len());
    let mut current = pending.next();
    let mut event_idx = 0;

    while let Some(mut period) = current.take() {
        let Some(event) = events.get(event_idx) else {
            free.push(period);
            break;
        };
        let event_start = event.local_start(zone);
        let event_end = event.local_end(zone);

        if event_start >= event_end {
            // Empty, or reversed by a fall-back transition, in this zone.
            trace!(event = event.description(), "empty event skipped");
            event_idx += 1;
            current = Some(period);
            continue;
        }
        if period.end() <= event_start {
            // Period ends before the event begins.
            trace!(start = %period.start(), end = %period.end(), "period clear of events");
            free.push(period);
            current = pending.next();
        } else if period.start() >= event_end {
            // Event ends before the period begins.
            event_idx += 1;
            current = Some(period);
        } else if period.start() < event_start {
            // Overlap, period starts first: keep the free head.
            let head = period
                .split(event_start)
                .expect("event start lies strictly inside the period");
            debug!(start = %head.start(), end = %head.end(), event = event.description(), "period trimmed before event");
            free.push(head);
            current = Some(period);
        } else if period.end() > event_end {
            // Overlap, event starts first or together: drop the consumed head.
            period
                .split(event_end)
                .expect("event end lies strictly inside the period");
            debug!(start = %period.start(), end = %period.end(), event = event.description(), "period trimmed after event");
            event_idx += 1;
            current = Some(period);
        } else {
            debug!(start = %period.start(), end = %period.end(), event = event.description(), "period covered by event");
            current = pending.next();
        }
    }

    free.extend(pending);
    free
}
