//! Action parser
//!
//! Pulls the `Action:` / `Action Input:` pair out of free-form model text.
//! Parsing never fails; malformed text yields an empty or partial result.

use serde_json::Value;
use std::fmt;

pub const ACTION_MARKER: &str = "Action:";
pub const ACTION_INPUT_MARKER: &str = "Action Input:";
pub const OBSERVATION_MARKER: &str = "Observation:";

/// Tool input, decoded as JSON when possible
#[derive(Debug, Clone, PartialEq)]
pub enum ActionInput {
    Structured(Value),
    Raw(String),
}

impl ActionInput {
    /// Decode `text` as JSON, keeping it verbatim on failure
    pub fn decode(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ActionInput::Structured(value),
            Err(_) => ActionInput::Raw(text),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ActionInput::Structured(_))
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            ActionInput::Structured(value) => Some(value),
            ActionInput::Raw(_) => None,
        }
    }

    /// Plain text view; a decoded JSON string yields its contents unquoted
    pub fn as_text(&self) -> String {
        match self {
            ActionInput::Raw(text) => text.clone(),
            ActionInput::Structured(Value::String(text)) => text.clone(),
            ActionInput::Structured(value) => value.to_string(),
        }
    }
}

impl Default for ActionInput {
    fn default() -> Self {
        ActionInput::Raw(String::new())
    }
}

impl fmt::Display for ActionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionInput::Raw(text) => f.write_str(text),
            ActionInput::Structured(value) => write!(f, "{}", value),
        }
    }
}

/// Result of scanning one model reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedAction {
    pub action: Option<String>,
    pub input: ActionInput,
}

/// Extract the action name and its input from `text`.
///
/// `Action Input:` starts collecting; following non-blank lines are appended
/// until the next `Action:` or `Observation:` line. The collected lines are
/// joined with `\n` and then decoded as JSON when they parse.
pub fn parse_action(text: &str) -> ParsedAction {
    let mut action = None;
    let mut buffer: Vec<&str> = Vec::new();
    let mut collecting = false;

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(ACTION_MARKER) {
            action = Some(rest.trim().to_string());
            collecting = false;
            continue;
        }

        if let Some(rest) = line.strip_prefix(ACTION_INPUT_MARKER) {
            collecting = true;
            let rest = rest.trim();
            if !rest.is_empty() {
                buffer.push(rest);
            }
            continue;
        }

        if line.starts_with(OBSERVATION_MARKER) {
            collecting = false;
            continue;
        }

        let line = line.trim();
        if collecting && !line.is_empty() {
            buffer.push(line);
        }
    }

    if action.is_none() {
        return ParsedAction::default();
    }

    ParsedAction {
        action,
        input: ActionInput::decode(buffer.join("\n")),
    }
}
