//! Display core of a cache-protocol traffic inspector.
//!
//! Decoded request/reply events go in; the [`printer::MessagePrinter`]
//! decides which of them to show, renders them as colored text and tells the
//! caller when the session's message bound has been reached.

pub mod capture;
pub mod models;
pub mod printer;
pub mod utils;
