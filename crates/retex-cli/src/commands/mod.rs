//! CLI command implementations.

pub mod banks;
pub mod config;
pub mod process;
