use log::{log_enabled, trace, Level};

use crate::models::message::DecodedEvent;
use crate::utils::error::AppResult;

/// Parses decoder output (one JSON object per line) into events
pub struct EventParser {}

impl EventParser {
    /// Create a new event parser
    pub fn new() -> Self {
        Self {}
    }

    /// Parse one line; blank lines yield `None`
    pub fn parse_line(&self, line: &str) -> AppResult<Option<DecodedEvent>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let event: DecodedEvent = serde_json::from_str(line)?;

        if log_enabled!(Level::Trace) {
            trace!(
                "Parsed message {}: {:?} {:?}, key {} bytes, value {} bytes",
                event.id,
                event.operation,
                event.result,
                event.key.len(),
                event.value.len()
            );
        }

        Ok(Some(event))
    }
}

impl Default for EventParser {
    fn default() -> Self {
        Self::new()
    }
}
