use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::models::endpoint::LOCAL_PREFIX;
use crate::utils::error::{AppError, AppResult};

/// Default display width for local endpoint descriptions (size of a unix socket path)
pub const DEFAULT_LOCAL_ADDRESS_WIDTH: usize = 108;

/// Display options of the message printer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterOptions {
    /// Echo the exact wire bytes instead of formatted messages
    pub raw: bool,

    /// Select and count messages without writing them
    pub quiet: bool,

    /// Disable colored output
    pub disable_color: bool,

    /// Prefix every message with its capture timestamp
    pub print_timestamps: bool,

    /// Stop the session after this many printed messages (0 = unbounded)
    pub max_messages: u64,

    /// Messages to keep printing after a pattern match
    pub num_after_match: u64,

    /// Maximum width of a local endpoint description, prefix included
    pub local_address_width: usize,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            raw: false,
            quiet: false,
            disable_color: false,
            print_timestamps: false,
            max_messages: 0,
            num_after_match: 0,
            local_address_width: DEFAULT_LOCAL_ADDRESS_WIDTH,
        }
    }
}

/// Display-time selection criteria
#[derive(Debug, Clone)]
pub struct Filter {
    /// Expected IP on either side of the connection
    pub host: Option<IpAddr>,

    /// Expected port on either side of the connection (0 = any)
    pub port: u16,

    /// Smallest value size shown
    pub value_min_size: usize,

    /// Largest value size shown
    pub value_max_size: usize,

    /// Pattern the rendered message must match
    pub pattern: Option<Regex>,

    /// Show messages that do NOT match the pattern
    pub invert_match: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            host: None,
            port: 0,
            value_min_size: 0,
            value_max_size: usize::MAX,
            pattern: None,
            invert_match: false,
        }
    }
}

impl Filter {
    /// Compile and set the search pattern
    pub fn with_pattern(mut self, pattern: &str) -> AppResult<Self> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }
}

/// Reject option combinations the printer cannot honor
pub fn validate(options: &PrinterOptions, filter: &Filter) -> AppResult<()> {
    if filter.value_min_size > filter.value_max_size {
        return Err(AppError::Config(format!(
            "minimum value size {} exceeds maximum value size {}",
            filter.value_min_size, filter.value_max_size
        )));
    }
    if filter.pattern.is_none() {
        if filter.invert_match {
            return Err(AppError::Config("invert match requires a pattern".to_string()));
        }
        if options.num_after_match > 0 {
            return Err(AppError::Config(
                "printing messages after a match requires a pattern".to_string(),
            ));
        }
    }
    if options.local_address_width <= LOCAL_PREFIX.len() + 1 {
        return Err(AppError::Config(format!(
            "local address width {} leaves no room for a description",
            options.local_address_width
        )));
    }
    Ok(())
}
