//! Tool dispatch
//!
//! Turns a parsed action into an observation string. Every outcome, including
//! unknown tools and tool failures, comes back as `Observation: ...` text so
//! the model can read it and correct itself.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, warn};

use crate::parser::{ActionInput, ParsedAction, OBSERVATION_MARKER};
use crate::tools::{Tool, ToolError, ToolRegistry};

const LOG_PREVIEW_CHARS: usize = 500;

/// Run the parsed action against `registry` and describe the result
pub async fn dispatch(registry: &ToolRegistry, parsed: ParsedAction) -> String {
    let ParsedAction { action, input } = parsed;
    let action = action.unwrap_or_default();
    debug!("Tool call: '{}' with input: {}", action, input);

    let tool = if action.trim().is_empty() {
        None
    } else {
        registry.get(&action)
    };

    let Some(tool) = tool else {
        let available = registry.keys();
        warn!(
            "Tool not found. Action: '{}', available tools: {:?}",
            action, available
        );
        return format!(
            "{} Tool '{}' not found. Available tools: {:?}",
            OBSERVATION_MARKER, action, available
        );
    };

    match invoke(tool, input).await {
        Ok(output) => {
            debug!("Tool '{}' observation: {}", tool.name(), log_preview(&output));
            format!("{} {}", OBSERVATION_MARKER, output)
        }
        Err(e) => {
            warn!("Tool '{}' execution error: {}", tool.name(), e);
            format!(
                "{} There was an error executing the tool\nError: {}",
                OBSERVATION_MARKER, e
            )
        }
    }
}

/// Invoke one tool; failures, panics included, are returned as data
pub async fn invoke(
    tool: &(dyn Tool + Send + Sync),
    input: ActionInput,
) -> Result<String, ToolError> {
    debug!("Executing tool '{}'", tool.name());
    match AssertUnwindSafe(tool.run(input)).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            error!("Tool '{}' panicked: {}", tool.name(), reason);
            Err(ToolError::Panicked(reason))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn log_preview(text: &str) -> String {
    if text.chars().count() > LOG_PREVIEW_CHARS {
        let head: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
