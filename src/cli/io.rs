//! Shell I/O handling
//!
//! - Input: command lines via stdin
//! - Output: one JSON object per response via stdout
//! - UTF-8 only

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Prints the prompt, naming the current dataset when one is loaded
pub fn prompt(current_dataset: Option<&str>) -> CliResult<()> {
    let mut stdout = io::stdout();
    match current_dataset {
        Some(name) => write!(stdout, "shelfdb:{}> ", name)?,
        None => write!(stdout, "shelfdb> ")?,
    }
    stdout.flush()?;
    Ok(())
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", response)?;
    stdout.flush()?;

    Ok(())
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", response)?;
    stdout.flush()?;

    Ok(())
}
