//! Command-line tools over the opening catalog.

pub mod args;
pub mod config;
pub mod logging;
