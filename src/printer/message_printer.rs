use log::{debug, info, trace};
use std::io::Write;
use termcolor::WriteColor;

use crate::models::config::{self, Filter, PrinterOptions};
use crate::models::endpoint::Endpoint;
use crate::models::message::DecodedEvent;
use crate::models::stats::PrinterStats;
use crate::printer::filter;
use crate::printer::format::{describe_connection, describe_header};
use crate::printer::matcher::find_all;
use crate::printer::session::{Progress, SessionCounter};
use crate::printer::styled::{Style, StyledText};
use crate::printer::value::ValueFormatter;
use crate::utils::error::AppResult;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Outcome of handing one event to the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Rejected by the endpoint or value-size filter, or raw mode without raw bytes
    Filtered,
    /// Did not satisfy the search pattern and no after-match window was open
    NoMatch,
    /// Emitted (or counted, in quiet mode)
    Printed(Progress),
}

impl Disposition {
    pub fn should_stop(&self) -> bool {
        matches!(self, Disposition::Printed(Progress::Stop))
    }
}

/// Decides which decoded events to show and writes them to a terminal sink
pub struct MessagePrinter<W: WriteColor> {
    options: PrinterOptions,
    filter: Filter,
    value_formatter: Box<dyn ValueFormatter>,
    out: W,
    session: SessionCounter,
    total_messages: u64,
}

impl<W: WriteColor> MessagePrinter<W> {
    /// Create a printer, refusing option combinations it cannot honor
    pub fn new(
        options: PrinterOptions,
        filter: Filter,
        value_formatter: Box<dyn ValueFormatter>,
        out: W,
    ) -> AppResult<Self> {
        config::validate(&options, &filter)?;

        let session = SessionCounter::new(options.max_messages);
        Ok(Self {
            options,
            filter,
            value_formatter,
            out,
            session,
            total_messages: 0,
        })
    }

    /// Whether the connection passes the host/port criteria
    pub fn match_address(&self, from: &Endpoint, to: &Endpoint) -> bool {
        filter::matches(from, to, &self.filter)
    }

    /// Run one event through filtering, formatting, matching and counting
    pub fn print_message(&mut self, event: &DecodedEvent) -> AppResult<Disposition> {
        if !self.match_address(&event.from, &event.to) {
            trace!("Message {} rejected by endpoint filter", event.id);
            return Ok(Disposition::Filtered);
        }

        self.total_messages += 1;

        if !filter::value_size_in_range(event.value.len(), &self.filter) {
            trace!(
                "Message {} rejected by value size filter ({} bytes)",
                event.id,
                event.value.len()
            );
            return Ok(Disposition::Filtered);
        }

        if self.options.raw {
            let segments = event.raw_segments();
            return Ok(match self.print_raw(segments.as_deref())? {
                Some(progress) => Disposition::Printed(progress),
                None => {
                    trace!("Message {} carries no raw bytes", event.id);
                    Disposition::Filtered
                }
            });
        }

        let mut styled = self.serialize_message(event);

        if let Some(pattern) = &self.filter.pattern {
            let matches = find_all(styled.text(), pattern);
            let success = matches.is_empty() == self.filter.invert_match;

            if !success && self.session.after_match_remaining() == 0 {
                trace!("Message {} does not satisfy the pattern", event.id);
                return Ok(Disposition::NoMatch);
            }
            if !self.filter.invert_match {
                for span in &matches {
                    styled.set_style(span.offset, span.length, Style::Match);
                }
            }
            if success {
                // the current message consumes one slot of the window
                self.session
                    .open_after_match_window(self.options.num_after_match + 1);
            }
        }

        if !self.options.quiet {
            styled.write_to(&mut self.out)?;
            self.out.flush()?;
        }

        Ok(Disposition::Printed(self.count_stats()))
    }

    /// Echo raw wire bytes as a single write.
    ///
    /// `None` or an empty segment list is a no-op and is not counted.
    pub fn print_raw(&mut self, segments: Option<&[&[u8]]>) -> AppResult<Option<Progress>> {
        let segments = match segments {
            Some(segments) if !segments.is_empty() => segments,
            _ => return Ok(None),
        };

        let raw_message = segments.concat();
        self.out.write_all(&raw_message)?;
        self.out.flush()?;

        Ok(Some(self.count_stats()))
    }

    /// Compose the display text of an event without printing it
    pub fn serialize_message(&self, event: &DecodedEvent) -> StyledText {
        let mut styled = StyledText::new();

        if self.options.print_timestamps {
            if let Some(timestamp) = event.timestamp {
                styled.append_line(
                    &timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    Style::Timestamp,
                );
            }
        }

        let connection = describe_connection(
            &event.from,
            &event.to,
            event.protocol,
            self.options.local_address_width,
        );
        if !connection.is_empty() {
            styled.append_line(&connection, Style::Connection);
        }

        let header = describe_header(event.operation, event.result, &event.key);
        if !header.is_empty() {
            styled.append_line(&header, Style::Header);
        }

        let mut fields = vec![format!("  \"id\": {}", event.id)];
        if let Some(flags) = event.flags {
            fields.push(format!("  \"flags\": {}", flags));
        }
        if let Some(exptime) = event.exptime {
            fields.push(format!("  \"exptime\": {}", exptime));
        }
        if !event.value.is_empty() {
            fields.push(format!(
                "  \"value\": {}",
                self.value_formatter.format_value(&event.value)
            ));
        }
        styled.append_line("{", Style::Body);
        styled.append_line(&fields.join(",\n"), Style::Body);
        styled.append_line("}", Style::Body);
        styled.append("\n", Style::Plain);

        styled
    }

    fn count_stats(&mut self) -> Progress {
        let progress = self.session.on_message_printed();
        debug!(
            "Printed message {} (after-match window: {})",
            self.session.printed(),
            self.session.after_match_remaining()
        );
        if progress == Progress::Stop {
            info!(
                "Reached the limit of {} printed messages",
                self.session.max_messages()
            );
        }
        progress
    }

    pub fn stats(&self) -> PrinterStats {
        PrinterStats {
            total_messages: self.total_messages,
            printed_messages: self.session.printed(),
        }
    }

    /// Give back the output sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
