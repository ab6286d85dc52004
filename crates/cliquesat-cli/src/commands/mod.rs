//! CLI commands.

pub mod dump;
pub mod report;
pub mod solve;
