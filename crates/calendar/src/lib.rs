//! # flowcast-calendar
//!
//! Turns the dates a ticket entered each workflow state into the daily
//! state sequences the Markov model learns from.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["export line"] -->|"Ticket::from_fields()"| B["Ticket"]
//!     B -->|"TicketPolicy::admits()"| C{"kept?"}
//!     C -->|"Ticket::states()"| D["Vec of state index"]
//!     E["Vec of Option NaiveDate"] -->|"states_from_entry_dates()"| D
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use flowcast_calendar::{Ticket, TicketPolicy};
//!
//! let ticket = Ticket::from_fields(["Done", "2019-11-01", "2019-11-01", "2019-11-01", "2019-11-06"])
//!     .unwrap();
//! let policy = TicketPolicy::DoneOnly { status: "Done".to_string() };
//! assert!(policy.admits(ticket.final_status()));
//! assert_eq!(ticket.states().unwrap(), vec![2, 2, 2, 2, 2, 3]);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `derive` | Entry dates to daily state indices |
//! | `ticket` | Export tickets and inclusion policy |
//! | `error` | Error types |

mod derive;
mod error;
mod ticket;

pub use derive::{parse_entry_date, states_from_entry_dates};
pub use error::CalendarError;
pub use ticket::{Ticket, TicketPolicy};
