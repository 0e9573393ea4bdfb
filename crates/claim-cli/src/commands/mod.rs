//! Subcommand implementations.

pub(crate) mod config;
pub(crate) mod history;
pub(crate) mod run;
