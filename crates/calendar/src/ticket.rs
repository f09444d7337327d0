//! Tickets from a workflow export and which of them to keep.

use chrono::NaiveDate;

use crate::derive::{parse_entry_date, states_from_entry_dates};
use crate::error::CalendarError;

/// One exported ticket: its final status and the date it entered each state.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    final_status: String,
    entries: Vec<Option<NaiveDate>>,
}

impl Ticket {
    /// Creates a ticket from already-parsed entry dates.
    pub fn new(final_status: impl Into<String>, entries: Vec<Option<NaiveDate>>) -> Self {
        Self {
            final_status: final_status.into(),
            entries,
        }
    }

    /// Builds a ticket from the fields of one export line:
    /// `final_status, date_0, date_1, ...`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::MissingStatus`] if there are no fields and
    /// [`CalendarError::InvalidDate`] if a date field does not parse.
    pub fn from_fields<'a, I>(fields: I) -> Result<Self, CalendarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = fields.into_iter();
        let final_status = fields.next().ok_or(CalendarError::MissingStatus)?;
        let entries = fields
            .map(parse_entry_date)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(final_status.trim(), entries))
    }

    /// Status the ticket ended in.
    pub fn final_status(&self) -> &str {
        &self.final_status
    }

    /// Entry date per state column.
    pub fn entries(&self) -> &[Option<NaiveDate>] {
        &self.entries
    }

    /// Daily state sequence, see [`states_from_entry_dates`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`states_from_entry_dates`].
    pub fn states(&self) -> Result<Vec<usize>, CalendarError> {
        states_from_entry_dates(&self.entries)
    }
}

/// Which tickets contribute sequences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TicketPolicy {
    /// Keep every ticket, finished or not.
    #[default]
    IncludeAll,
    /// Keep only tickets whose final status equals `status`.
    DoneOnly { status: String },
}

impl TicketPolicy {
    /// Returns `true` if a ticket that ended in `final_status` is kept.
    pub fn admits(&self, final_status: &str) -> bool {
        match self {
            TicketPolicy::IncludeAll => true,
            TicketPolicy::DoneOnly { status } => final_status == status,
        }
    }
}
