pub mod filter;
pub mod format;
pub mod matcher;
pub mod message_printer;
pub mod session;
pub mod styled;
pub mod value;

pub use message_printer::{Disposition, MessagePrinter};
pub use session::Progress;
