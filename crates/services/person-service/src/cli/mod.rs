//! CLI module - Command-line interface for the person service.
//!
//! Provides commands for:
//! - `migrate` - Database migrations
//! - `check` - Store connectivity
//! - `demo` - Scripted walkthrough of every operation
//! - one subcommand per person operation

pub mod args;

pub use args::{Cli, Commands};
