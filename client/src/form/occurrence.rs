use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use dailyflo::task::Task;

/// The user's answer to the "Update recurring task" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurringSaveChoice {
    ThisOccurrenceOnly,
    AllOccurrences,
    Cancel,
}

/// Computes the concrete timestamp of the occurrence being viewed or edited.
///
/// A non-recurring task, or a recurring one opened without an occurrence
/// date, resolves to its own due date (or `now` if it has none). A recurring
/// task opened from a specific occurrence combines that calendar day with the
/// task's time-of-day at local time; without a time-of-day it defaults to
/// noon UTC, which keeps the day stable when the date-only value is later
/// re-derived on either side of a timezone boundary.
pub fn resolve_occurrence_date(
    task: &Task,
    occurrence_date: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    let occurrence_date = match occurrence_date {
        Some(date) if task.is_recurring() => date,
        _ => return task.due_date.unwrap_or(now),
    };

    match task.time {
        Some(time) => time
            .apply_to(occurrence_date)
            .and_local_timezone(Local)
            .earliest()
            .map(|datetime| datetime.with_timezone(&Utc))
            .unwrap_or_else(|| noon_utc(occurrence_date)),
        None => noon_utc(occurrence_date),
    }
}

fn noon_utc(date: NaiveDate) -> DateTime<Utc> {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    Utc.from_utc_datetime(&date.and_time(noon))
}
