pub mod blog;
pub mod config;
pub mod data;
pub mod solve;
pub mod stats;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;
