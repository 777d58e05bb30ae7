//! Shell command grammar
//!
//! Turns one command line into a structured request. This is the only
//! place raw text is interpreted; the engine receives typed conditions
//! and records.
//!
//! Condition syntax everywhere it appears: `<field> <op> <value>` with
//! op one of `=`, `!=`, `>`, `<`, `>=`, `<=`. Values may be quoted to
//! keep surrounding whitespace.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::query::{coerce_value, Condition, SortDirection, SortSpec};
use crate::store::Record;

use super::errors::{CliError, CliResult};

lazy_static! {
    static ref CONDITION_RE: Regex =
        Regex::new(r"^(\S+?)\s*(!=|>=|<=|=|>|<)\s*(.+)$").expect("condition pattern");
    static ref UPDATE_RE: Regex =
        Regex::new(r"^(\S+)\s*=\s*(.+?)\s+(?i:WHERE)\s+(.+)$").expect("update pattern");
    static ref WHERE_RE: Regex = Regex::new(r"^(?i:WHERE)\s+(.+)$").expect("where pattern");
    static ref WHERE_SPLIT_RE: Regex = Regex::new(r"\s+(?i:WHERE)\s+").expect("where split");
}

/// One parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum ShellRequest {
    Create { name: String },
    Load { name: String },
    Add { record: Record },
    Find { condition: Condition },
    Update { field: String, value: Value, condition: Condition },
    Delete { condition: Condition },
    SortBy { spec: SortSpec, condition: Option<Condition> },
    Join { dataset: String, field: String },
    Count { condition: Option<Condition> },
    Sum { target: String, condition: Option<Condition> },
    Average { target: String, condition: Option<Condition> },
    Max { target: String },
    Min { target: String },
    Help,
    Exit,
}

/// Parses one trimmed, non-empty command line
pub fn parse_line(line: &str) -> CliResult<ShellRequest> {
    let (keyword, payload) = match line.split_once(char::is_whitespace) {
        Some((k, rest)) => (k, rest.trim()),
        None => (line, ""),
    };

    match keyword.to_ascii_uppercase().as_str() {
        "CREATE" => Ok(ShellRequest::Create {
            name: single_word(payload, "CREATE <name>")?,
        }),
        "LOAD" => Ok(ShellRequest::Load {
            name: single_word(payload, "LOAD <name>")?,
        }),
        "ADD" => parse_add(payload),
        "FIND" => Ok(ShellRequest::Find {
            condition: parse_condition(payload)?,
        }),
        "UPDATE" => parse_update(payload),
        "DELETE" => parse_delete(payload),
        "SORTBY" => parse_sortby(payload),
        "JOIN" => parse_join(payload),
        "COUNT" => Ok(ShellRequest::Count {
            condition: parse_optional_where(payload)?,
        }),
        "SUM" => {
            let (target, condition) = parse_target_with_where(payload, "SUM <field> [WHERE ...]")?;
            Ok(ShellRequest::Sum { target, condition })
        }
        "AVERAGE" => {
            let (target, condition) =
                parse_target_with_where(payload, "AVERAGE <field> [WHERE ...]")?;
            Ok(ShellRequest::Average { target, condition })
        }
        "MAX" => Ok(ShellRequest::Max {
            target: single_word(payload, "MAX <field>")?,
        }),
        "MIN" => Ok(ShellRequest::Min {
            target: single_word(payload, "MIN <field>")?,
        }),
        "HELP" | "?" => Ok(ShellRequest::Help),
        "EXIT" | "QUIT" => Ok(ShellRequest::Exit),
        other => Err(CliError::usage(format!("unknown command: {}", other))),
    }
}

/// Parses a `<field> <op> <value>` condition
pub fn parse_condition(text: &str) -> CliResult<Condition> {
    let caps = CONDITION_RE
        .captures(text.trim())
        .ok_or_else(|| CliError::usage("expected <field> <op> <value>"))?;

    Condition::parse(&caps[1], &caps[2], unquote(&caps[3]))
        .map_err(|e| CliError::usage(e.to_string()))
}

fn parse_add(payload: &str) -> CliResult<ShellRequest> {
    if payload.is_empty() {
        return Err(CliError::usage("ADD <record-as-json-object>"));
    }
    let record: Record = serde_json::from_str(payload)
        .map_err(|e| CliError::usage(format!("invalid JSON record: {}", e)))?;
    Ok(ShellRequest::Add { record })
}

fn parse_update(payload: &str) -> CliResult<ShellRequest> {
    let caps = UPDATE_RE.captures(payload).ok_or_else(|| {
        CliError::usage("UPDATE <field> = <value> WHERE <field> <op> <value>")
    })?;

    Ok(ShellRequest::Update {
        field: caps[1].to_string(),
        value: coerce_value(&unquote(&caps[2])),
        condition: parse_condition(&caps[3])?,
    })
}

fn parse_delete(payload: &str) -> CliResult<ShellRequest> {
    let caps = WHERE_RE
        .captures(payload)
        .ok_or_else(|| CliError::usage("DELETE WHERE <field> <op> <value>"))?;
    Ok(ShellRequest::Delete {
        condition: parse_condition(&caps[1])?,
    })
}

fn parse_sortby(payload: &str) -> CliResult<ShellRequest> {
    let usage = "SORTBY <field> [ASC|DESC] [WHERE <field> <op> <value>]";
    if payload.is_empty() {
        return Err(CliError::usage(usage));
    }

    let mut parts = WHERE_SPLIT_RE.splitn(payload, 2);
    let head = parts.next().unwrap_or("").trim();
    let condition = match parts.next() {
        Some(rest) => Some(parse_condition(rest)?),
        None => None,
    };

    let tokens: Vec<&str> = head.split_whitespace().collect();
    let spec = match tokens.as_slice() {
        [field] => SortSpec::asc(*field),
        [field, direction] => match SortDirection::parse(direction) {
            Some(dir) => SortSpec {
                field: (*field).to_string(),
                direction: dir,
            },
            None => {
                return Err(CliError::usage(format!(
                    "invalid order '{}'; use ASC or DESC",
                    direction
                )))
            }
        },
        _ => return Err(CliError::usage(usage)),
    };

    Ok(ShellRequest::SortBy { spec, condition })
}

fn parse_join(payload: &str) -> CliResult<ShellRequest> {
    let tokens: Vec<&str> = payload.split_whitespace().collect();
    match tokens.as_slice() {
        [dataset, field] => Ok(ShellRequest::Join {
            dataset: (*dataset).to_string(),
            field: (*field).to_string(),
        }),
        _ => Err(CliError::usage("JOIN <dataset> <field>")),
    }
}

fn parse_optional_where(payload: &str) -> CliResult<Option<Condition>> {
    if payload.is_empty() {
        return Ok(None);
    }
    let caps = WHERE_RE
        .captures(payload)
        .ok_or_else(|| CliError::usage("expected WHERE <field> <op> <value>"))?;
    Ok(Some(parse_condition(&caps[1])?))
}

fn parse_target_with_where(payload: &str, usage: &str) -> CliResult<(String, Option<Condition>)> {
    let mut parts = WHERE_SPLIT_RE.splitn(payload, 2);
    let target = parts.next().unwrap_or("").trim();
    if target.is_empty() || target.split_whitespace().count() != 1 {
        return Err(CliError::usage(usage));
    }
    let condition = match parts.next() {
        Some(rest) => Some(parse_condition(rest)?),
        None => None,
    };
    Ok((target.to_string(), condition))
}

fn single_word(payload: &str, usage: &str) -> CliResult<String> {
    let tokens: Vec<&str> = payload.split_whitespace().collect();
    match tokens.as_slice() {
        [word] => Ok((*word).to_string()),
        _ => Err(CliError::usage(usage)),
    }
}

/// Strips one pair of surrounding double quotes, if present
fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}
