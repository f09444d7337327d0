//! Daily state indices from per-state entry dates.

use chrono::NaiveDate;

use crate::error::CalendarError;

/// Parses an ISO-8601 entry date. An empty (or all-blank) field means the
/// ticket never entered that state and yields `None`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if the text is not a valid
/// `YYYY-MM-DD` date.
pub fn parse_entry_date(value: &str) -> Result<Option<NaiveDate>, CalendarError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| CalendarError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Converts the date a ticket entered each workflow state into one state
/// index per day.
///
/// `entries[i]` is the date the ticket entered state `i`, or `None` if it
/// never did. Each day carries the state most recently entered as of that
/// day. States entered on the same day collapse to the later one. An entry
/// dated before the current one is taken as the new current state without
/// emitting any days. The sequence ends with the index of the last column
/// as a one-off terminal marker.
///
/// # Errors
///
/// Returns [`CalendarError::Empty`] if `entries` is empty and
/// [`CalendarError::MissingStart`] if the first state has no date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use flowcast_calendar::states_from_entry_dates;
///
/// let d = |day| NaiveDate::from_ymd_opt(2019, 11, day);
/// let states = states_from_entry_dates(&[d(1), None, d(5), d(6)]).unwrap();
/// assert_eq!(states, vec![0, 0, 0, 0, 2, 3]);
/// ```
pub fn states_from_entry_dates(
    entries: &[Option<NaiveDate>],
) -> Result<Vec<usize>, CalendarError> {
    let (first, rest) = entries.split_first().ok_or(CalendarError::Empty)?;
    let mut current_date = first.ok_or(CalendarError::MissingStart)?;
    let mut current_state = 0;
    let mut states = Vec::new();

    for (offset, entry) in rest.iter().enumerate() {
        let Some(date) = *entry else {
            continue;
        };
        let days = (date - current_date).num_days();
        if days > 0 {
            states.extend(std::iter::repeat_n(current_state, days as usize));
        }
        current_state = offset + 1;
        current_date = date;
    }

    states.push(entries.len() - 1);
    Ok(states)
}
