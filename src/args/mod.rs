//! Command-line argument parsing and handling.

pub mod commands;
pub mod definition;
pub mod render;
pub mod utils;

// Re-export commonly used items
pub use commands::{describe_error, run};
pub use definition::{Args, Command, VoteDirection};
pub use utils::determine_log_level;
