use log::{debug, info, warn};
use std::io::BufRead;
use termcolor::WriteColor;

use crate::capture::parser::EventParser;
use crate::models::stats::PrinterStats;
use crate::printer::{Disposition, MessagePrinter};
use crate::utils::error::AppResult;

/// Feeds decoded events from a line-oriented source into a printer
pub struct CaptureManager<R: BufRead> {
    /// Source of JSON-encoded events
    source: R,

    parser: EventParser,

    /// Lines that could not be parsed
    errors: u64,
}

impl<R: BufRead> CaptureManager<R> {
    /// Create a manager reading from `source`
    pub fn new(source: R) -> Self {
        Self {
            source,
            parser: EventParser::new(),
            errors: 0,
        }
    }

    /// Print events until the source is exhausted or the printer asks to stop
    pub fn run<W: WriteColor>(&mut self, printer: &mut MessagePrinter<W>) -> AppResult<PrinterStats> {
        info!("Starting to print messages");

        let mut buf = Vec::new();
        let mut line_number = 0u64;
        loop {
            buf.clear();
            if self.source.read_until(b'\n', &mut buf)? == 0 {
                debug!("Event source exhausted after {} lines", line_number);
                break;
            }
            line_number += 1;

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Skipping non UTF-8 line {}: {}", line_number, e);
                    self.errors += 1;
                    continue;
                }
            };

            let event = match self.parser.parse_line(line) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping malformed event on line {}: {}", line_number, e);
                    self.errors += 1;
                    continue;
                }
            };

            let disposition = printer.print_message(&event)?;
            if let Disposition::Printed(_) = disposition {
                debug!("Message {} printed", event.id);
            }
            if disposition.should_stop() {
                info!("Stopping after line {}", line_number);
                break;
            }
        }

        let stats = printer.stats();
        info!(
            "Printed {} of {} messages ({} malformed lines)",
            stats.printed_messages, stats.total_messages, self.errors
        );
        Ok(stats)
    }

    /// Number of lines skipped because they could not be parsed
    pub fn errors(&self) -> u64 {
        self.errors
    }
}
