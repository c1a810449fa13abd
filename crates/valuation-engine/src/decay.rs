//! Catalog-age arithmetic for the decay model.
//!
//! Age is measured in whole calendar months between release and evaluation
//! date, floored at one so a release dated in the current month still counts
//! as one month live and downstream run-rate division stays well-defined.

use chrono::{Datelike, NaiveDate};

/// Whole calendar months an asset has been live as of the evaluation date.
///
/// Day-of-month is ignored, matching the calendar-month convention of the
/// decay schedule. Release dates in the future clamp to one month.
pub fn months_live(release_date: NaiveDate, valued_at: NaiveDate) -> u32 {
    let months = (valued_at.year() - release_date.year()) * 12
        + (valued_at.month() as i32 - release_date.month() as i32);
    months.max(1) as u32
}
