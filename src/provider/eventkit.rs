use std::sync::mpsc;

use block2::RcBlock;
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use objc2::rc::Retained;
use objc2::runtime::Bool;
use objc2_event_kit::{EKAuthorizationStatus, EKEntityType, EKEvent, EKEventStore};
use objc2_foundation::{NSDate, NSError};
use tracing::{debug, info, warn};

use super::{InstanceProvider, ProviderError};
use crate::calendar::date::{add_days, julian_day};
use crate::calendar::{InstanceRow, TimeSpan};

/// Seconds between Unix epoch (1970-01-01) and NSDate reference date (2001-01-01)
const NSDATE_UNIX_OFFSET: f64 = 978307200.0;

/// Apple Calendar through EventKit.
///
/// A store is opened per query so the provider stays `Send` for the
/// blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventKitProvider;

impl EventKitProvider {
    pub fn authorization_status() -> EKAuthorizationStatus {
        unsafe { EKEventStore::authorizationStatusForEntityType(EKEntityType::Event) }
    }

    /// Ask the user for full calendar access if it was never decided.
    pub fn request_access(&self) -> Result<bool, ProviderError> {
        match Self::authorization_status() {
            EKAuthorizationStatus::FullAccess => return Ok(true),
            EKAuthorizationStatus::Denied | EKAuthorizationStatus::Restricted => {
                warn!("calendar access denied by system settings");
                return Ok(false);
            }
            _ => {}
        }

        let store = unsafe { EKEventStore::new() };
        let (tx, rx) = mpsc::channel();
        let block = RcBlock::new(move |granted: Bool, _error: *mut NSError| {
            let _ = tx.send(granted.as_bool());
        });

        unsafe {
            store.requestFullAccessToEventsWithCompletion(&*block as *const _ as *mut _);
        }

        let granted = rx.recv().map_err(|_| ProviderError::AccessDenied)?;
        info!(granted, "calendar access requested");
        Ok(granted)
    }
}

impl InstanceProvider for EventKitProvider {
    fn name(&self) -> &'static str {
        "eventkit"
    }

    fn is_read_permitted(&self) -> bool {
        Self::authorization_status() == EKAuthorizationStatus::FullAccess
    }

    fn instances(&self, window: TimeSpan) -> Result<Vec<InstanceRow>, ProviderError> {
        let store = unsafe { EKEventStore::new() };
        let ns_start = millis_to_nsdate(window.start);
        let ns_end = millis_to_nsdate(window.end);

        let predicate = unsafe {
            store.predicateForEventsWithStartDate_endDate_calendars(&ns_start, &ns_end, None)
        };

        let ek_events = unsafe { store.eventsMatchingPredicate(&predicate) };
        let count = ek_events.len();
        let mut rows = Vec::with_capacity(count);

        for i in 0..count {
            let ev = ek_events.objectAtIndex(i);
            if let Some(row) = convert_event(&ev) {
                rows.push(row);
            }
        }

        debug!(rows = rows.len(), "eventkit instances");
        Ok(rows)
    }
}

/// EventKit reports all-day events as local 00:00 to 23:59:59; they are
/// rewritten to the UTC whole-day convention the grid expects.
fn convert_event(ev: &EKEvent) -> Option<InstanceRow> {
    let start = unsafe { nsdate_to_datetime(&ev.startDate()) }?;
    let end = unsafe { nsdate_to_datetime(&ev.endDate()) }?;
    let is_all_day = unsafe { ev.isAllDay() };

    if is_all_day {
        let first = start.with_timezone(&Local).date_naive();
        let last = end.with_timezone(&Local).date_naive().max(first);
        return Some(all_day_row(first, last));
    }

    let first = start.with_timezone(&Local).date_naive();
    let last = (end - Duration::milliseconds(1)).with_timezone(&Local).date_naive();
    Some(InstanceRow::new(
        start.timestamp_millis(),
        end.timestamp_millis(),
        julian_day(first),
        julian_day(last.max(first)),
    ))
}

fn all_day_row(first: NaiveDate, last: NaiveDate) -> InstanceRow {
    let utc_midnight = |date: NaiveDate| Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN));
    InstanceRow::new(
        utc_midnight(first).timestamp_millis(),
        utc_midnight(add_days(last, 1)).timestamp_millis(),
        julian_day(first),
        julian_day(last),
    )
}

fn millis_to_nsdate(millis: i64) -> Retained<NSDate> {
    let unix_ts = millis as f64 / 1000.0;
    NSDate::dateWithTimeIntervalSinceReferenceDate(unix_ts - NSDATE_UNIX_OFFSET)
}

fn nsdate_to_datetime(date: &NSDate) -> Option<DateTime<Utc>> {
    let nsdate_ts = date.timeIntervalSinceReferenceDate();
    let unix_millis = ((nsdate_ts + NSDATE_UNIX_OFFSET) * 1000.0).round() as i64;
    DateTime::from_timestamp_millis(unix_millis)
}
