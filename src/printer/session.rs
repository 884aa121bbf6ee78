/// What the caller should do after a message was printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Keep feeding events
    Continue,
    /// The message bound was reached; end the session
    Stop,
}

/// Counts printed messages and tracks the after-match window
#[derive(Debug, Clone, Default)]
pub struct SessionCounter {
    printed: u64,
    max_messages: u64,
    after_match_remaining: u64,
}

impl SessionCounter {
    /// Create a counter; `max_messages` of 0 means unbounded
    pub fn new(max_messages: u64) -> Self {
        Self {
            printed: 0,
            max_messages,
            after_match_remaining: 0,
        }
    }

    /// Record one emitted message.
    ///
    /// The stop decision and the after-match decrement are independent and
    /// may both happen on the same call.
    pub fn on_message_printed(&mut self) -> Progress {
        self.printed += 1;

        let progress = if self.max_messages > 0 && self.printed >= self.max_messages {
            Progress::Stop
        } else {
            Progress::Continue
        };

        if self.after_match_remaining > 0 {
            self.after_match_remaining -= 1;
        }

        progress
    }

    /// Allow the next `count` printed messages through without a match
    pub fn open_after_match_window(&mut self, count: u64) {
        self.after_match_remaining = count;
    }

    pub fn after_match_remaining(&self) -> u64 {
        self.after_match_remaining
    }

    pub fn printed(&self) -> u64 {
        self.printed
    }

    pub fn max_messages(&self) -> u64 {
        self.max_messages
    }
}
