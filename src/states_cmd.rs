//! States command: ticket export of state entry dates -> state sequences.

use std::fs::File;
use std::io::Read;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use flowcast_calendar::{Ticket, TicketPolicy};

use crate::cli::StatesArgs;
use crate::config::FlowcastConfig;
use crate::convert;

/// Run the conversion.
pub fn run(args: StatesArgs) -> Result<()> {
    let _cmd = info_span!("states").entered();
    let mut config = FlowcastConfig::load(args.config.as_deref())?;
    if args.only_done {
        config.states.only_done = true;
    }
    let policy = convert::build_ticket_policy(&config.states);

    let file = File::open(&args.input)
        .with_context(|| format!("failed to open ticket file: {}", args.input.display()))?;
    let sequences = convert_tickets(file, &policy)?;
    let text = render_sequences(&sequences);

    match args.output {
        Some(path) => {
            std::fs::write(&path, text)
                .with_context(|| format!("failed to write sequences: {}", path.display()))?;
            info!(path = %path.display(), "sequences written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Reads `final_status,date_0,date_1,...` lines and converts every ticket
/// the policy admits into its daily state sequence.
pub fn convert_tickets<R: Read>(reader: R, policy: &TicketPolicy) -> Result<Vec<Vec<usize>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut sequences = Vec::new();
    let mut n_dropped = 0usize;
    for record in rdr.records() {
        let record = record.context("failed to read ticket file")?;
        let line = record.position().map_or(0, |p| p.line());
        let ticket =
            Ticket::from_fields(record.iter()).with_context(|| format!("ticket on line {line}"))?;
        if !policy.admits(ticket.final_status()) {
            debug!(line, status = ticket.final_status(), "ticket dropped by policy");
            n_dropped += 1;
            continue;
        }
        let states = ticket
            .states()
            .with_context(|| format!("ticket on line {line}"))?;
        sequences.push(states);
    }

    info!(n_kept = sequences.len(), n_dropped, "tickets converted");
    Ok(sequences)
}

/// One comma-separated sequence per line, the sequence loader's format.
pub fn render_sequences(sequences: &[Vec<usize>]) -> String {
    let mut out = String::new();
    for seq in sequences {
        let line: Vec<String> = seq.iter().map(|s| s.to_string()).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}
