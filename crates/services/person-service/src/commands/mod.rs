//! Command implementations.

pub mod demo;
pub mod migrate;
pub mod person;

use serde::Serialize;

use common::{AppError, AppResult};

/// Print a value to stdout as pretty JSON
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to render output: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
