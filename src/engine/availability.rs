use chrono::{DateTime, TimeZone};

use crate::models::walk::Walk;

/// Whether `walk` counts as pending work on the calendar day of `reference`.
/// The planned start is converted into the reference's time zone first, so
/// "today" means today where the walker is, not today in UTC.
pub fn blocks_day<Tz: TimeZone>(walk: &Walk, reference: &DateTime<Tz>) -> bool {
    if !walk.status.is_blocking() {
        return false;
    }

    let start_local = walk.start_time_planned.with_timezone(&reference.timezone());
    start_local.date_naive() == reference.date_naive()
}

/// Gate for the availability toggle: open only when none of the walker's
/// walks are still pending today. `reference` is injected by the caller,
/// never read from the system clock here.
pub fn can_go_available<Tz: TimeZone>(walks: &[Walk], reference: &DateTime<Tz>) -> bool {
    !walks.iter().any(|walk| blocks_day(walk, reference))
}
