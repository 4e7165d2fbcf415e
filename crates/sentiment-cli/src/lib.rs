//! CLI library components for the sentiment tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
