use serde::{Deserialize, Serialize};

/// Counters of a printing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PrinterStats {
    /// Messages that passed the endpoint filter
    pub total_messages: u64,

    /// Messages emitted (or selected, in quiet mode)
    pub printed_messages: u64,
}
