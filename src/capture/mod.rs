pub mod manager;
pub mod parser;
