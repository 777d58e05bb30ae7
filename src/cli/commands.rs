//! Shell command dispatch
//!
//! Resolves configuration, owns the session, and maps parsed requests to
//! engine calls. Engine errors are printed as structured responses and
//! never end the session.

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::engine::{EngineResult, Session};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{prompt, write_error, write_response};
use super::parse::{parse_line, ShellRequest};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding dataset files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.is_empty() {
            return Err(CliError::Config("data_dir must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }
}

/// CLI entry point: resolve configuration, build a session, and run the
/// requested mode
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let data_dir: PathBuf = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => config.data_path().to_path_buf(),
    };

    let mut session = Session::new(data_dir);

    match cli.command {
        Some(Command::Exec { line }) => exec_line(&mut session, &line),
        Some(Command::Shell) | None => run_shell(&mut session),
    }
}

/// One-shot mode: run a single command line and exit
fn exec_line(session: &mut Session, line: &str) -> CliResult<()> {
    let request = parse_line(line.trim())?;
    respond(session, request)?;
    Ok(())
}

/// Interactive mode: prompt, parse, dispatch, repeat until EOF or EXIT
fn run_shell(session: &mut Session) -> CliResult<()> {
    prompt(session.current_dataset())?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();

        if !trimmed.is_empty() {
            let done = match parse_line(trimmed) {
                Ok(request) => respond(session, request)?,
                Err(e) => {
                    write_error(e.code(), &e.to_string())?;
                    false
                }
            };
            if done {
                return Ok(());
            }
        }

        prompt(session.current_dataset())?;
    }

    Ok(())
}

/// Renders one request's outcome. Returns true when the session should
/// end.
fn respond(session: &mut Session, request: ShellRequest) -> CliResult<bool> {
    match request {
        ShellRequest::Exit => return Ok(true),
        ShellRequest::Help => write_response(json!(HELP_TEXT))?,
        other => match execute(session, other) {
            Ok(data) => write_response(data)?,
            Err(e) => write_error(e.code(), &e.to_string())?,
        },
    }
    Ok(false)
}

/// Maps a parsed request to the corresponding engine call and wraps the
/// structured payload for display
pub fn execute(session: &mut Session, request: ShellRequest) -> EngineResult<Value> {
    match request {
        ShellRequest::Create { name } => {
            session.create_dataset(&name, &[])?;
            Ok(json!({ "dataset": name, "created": true }))
        }
        ShellRequest::Load { name } => {
            let records = session.load_dataset(&name)?;
            Ok(json!({ "dataset": name, "records": records }))
        }
        ShellRequest::Add { record } => {
            session.add_record(record)?;
            Ok(json!({ "added": 1 }))
        }
        ShellRequest::Find { condition } => {
            let result = session.find(&condition)?;
            Ok(to_payload(&result))
        }
        ShellRequest::Update {
            field,
            value,
            condition,
        } => {
            let outcome = session.update(&field, value, &condition)?;
            Ok(to_payload(&outcome))
        }
        ShellRequest::Delete { condition } => {
            let outcome = session.delete(&condition)?;
            Ok(to_payload(&outcome))
        }
        ShellRequest::SortBy { spec, condition } => {
            let records = session.sort(&spec, condition.as_ref())?;
            Ok(to_payload(&records))
        }
        ShellRequest::Join { dataset, field } => {
            let joined = session.join(&dataset, &field)?;
            Ok(to_payload(&joined))
        }
        ShellRequest::Count { condition } => {
            let total = session.count(condition.as_ref())?;
            Ok(json!({ "count": total }))
        }
        ShellRequest::Sum { target, condition } => {
            let total = session.sum(&target, condition.as_ref())?;
            Ok(json!({ "field": target, "sum": total }))
        }
        ShellRequest::Average { target, condition } => {
            let mean = session.average(&target, condition.as_ref())?;
            Ok(json!({ "field": target, "average": mean }))
        }
        ShellRequest::Max { target } => {
            let value = session.max(&target)?;
            Ok(json!({ "field": target, "max": value }))
        }
        ShellRequest::Min { target } => {
            let value = session.min(&target)?;
            Ok(json!({ "field": target, "min": value }))
        }
        ShellRequest::Help | ShellRequest::Exit => Ok(Value::Null),
    }
}

fn to_payload<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("payload serialization cannot fail")
}

const HELP_TEXT: &str = "\
CREATE <name>
LOAD <name>
ADD <record-as-json-object>
FIND <field> <op> <value>
UPDATE <field> = <value> WHERE <field> <op> <value>
DELETE WHERE <field> <op> <value>
SORTBY <field> [ASC|DESC] [WHERE <field> <op> <value>]
JOIN <dataset> <field>
COUNT [WHERE <field> <op> <value>]
SUM <field> [WHERE <field> <op> <value>]
AVERAGE <field> [WHERE <field> <op> <value>]
MAX <field>
MIN <field>
HELP
EXIT";
