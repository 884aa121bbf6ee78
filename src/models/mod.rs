pub mod config;
pub mod endpoint;
pub mod message;
pub mod stats;
