//! ReAct agent core
//!
//! A bounded think → act → observe loop: the model replies in a small textual
//! protocol (`Action:`, `Action Input:`, `Observation:`, `Final Answer:`),
//! the reply is parsed, the named tool runs, and its output goes back into the
//! conversation until a final answer appears or the step budget runs out.

use thiserror::Error;

pub mod dispatcher;
pub mod loop_agent;
pub mod parser;
pub mod prompt;
pub mod tools;

pub use dispatcher::dispatch;
pub use loop_agent::{AgentOptions, ReactAgent, Transition, TurnOutcome, TurnReport};
pub use parser::{parse_action, ActionInput, ParsedAction};
pub use prompt::{InstructionPrompt, REACT_PROMPT_TEMPLATE};
pub use tools::{normalize_tool_name, AresInternetTool, Tool, ToolError, ToolRegistry};

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("◆ DUPLICATE TOOL: '{key}' registered by both '{existing}' and '{incoming}'")]
    DuplicateTool {
        key: String,
        existing: String,
        incoming: String,
    },

    #[error("◆ EMPTY TOOL NAME")]
    EmptyToolName,

    #[error("◆ TOOL SETUP FAILED: {0}")]
    ToolSetup(#[from] ToolError),

    #[error("◆ PROVIDER ERROR: {0}")]
    Provider(#[from] reagent_provider::ProviderError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
