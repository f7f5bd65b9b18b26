//! Agent loop - the ReAct state machine
//!
//! Each step queries the model with the full history, records the reply, and
//! then either finishes (final answer), dispatches a tool (action), or simply
//! moves on (neither). The step budget is the only bound on a turn.

use tracing::{debug, error, info, warn};

use reagent_config::Config;
use reagent_provider::{ChatParams, Message, Provider};

use crate::dispatcher;
use crate::parser::parse_action;
use crate::prompt::{InstructionPrompt, REACT_PROMPT_TEMPLATE};
use crate::tools::ToolRegistry;

pub const FINAL_ANSWER: &str = "Final Answer";
pub const FINAL_ANSWER_MARKER: &str = "Final Answer:";
pub const EXHAUSTED_MESSAGE: &str =
    "The agent was unable to provide a conclusive answer after multiple steps.";
pub const DEFAULT_MAX_STEPS: u32 = 10;

/// Construction options for [`ReactAgent`]
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Model name; `None` uses the provider's default
    pub model: Option<String>,
    pub max_steps: u32,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Optional system message placed before the instructions
    pub system_prompt: Option<String>,
    /// Instruction template with `{tools}` and `{tool_names}` placeholders
    pub template: String,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            model: None,
            max_steps: DEFAULT_MAX_STEPS,
            max_tokens: 2000,
            temperature: 0.7,
            system_prompt: None,
            template: REACT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

impl AgentOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model(),
            max_steps: config.max_steps(),
            max_tokens: config.provider.max_tokens,
            temperature: config.provider.temperature,
            system_prompt: config.agent.system_prompt.clone(),
            ..Self::default()
        }
    }
}

/// What a model reply means for the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    FinalAnswer(String),
    DispatchTool,
    Continue,
}

impl Transition {
    /// Classify a reply. A final answer takes precedence over an action.
    pub fn classify(reply: &str) -> Self {
        if reply.contains(FINAL_ANSWER) {
            let answer = reply
                .rsplit(FINAL_ANSWER_MARKER)
                .next()
                .unwrap_or(reply)
                .trim();
            return Transition::FinalAnswer(answer.to_string());
        }

        if reply.contains("Action") && reply.contains("Action Input") {
            return Transition::DispatchTool;
        }

        Transition::Continue
    }
}

/// How a turn ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    FinalAnswer(String),
    Exhausted,
    ModelError(String),
}

impl TurnOutcome {
    /// Text handed back to the caller
    pub fn into_text(self) -> String {
        match self {
            TurnOutcome::FinalAnswer(answer) => answer,
            TurnOutcome::Exhausted => EXHAUSTED_MESSAGE.to_string(),
            TurnOutcome::ModelError(e) => {
                format!("Error: Could not get a response from the model - {}", e)
            }
        }
    }
}

/// Outcome plus counters for one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub outcome: TurnOutcome,
    pub steps: u32,
    pub dispatches: u32,
}

/// A ReAct agent serving one conversation.
///
/// The history starts with the system messages and only ever grows; it is
/// kept across calls so follow-up prompts see earlier turns.
pub struct ReactAgent<P: Provider> {
    provider: P,
    model: String,
    max_steps: u32,
    max_tokens: u32,
    temperature: f32,
    tools: ToolRegistry,
    prompt: InstructionPrompt,
    history: Vec<Message>,
}

impl<P: Provider> ReactAgent<P> {
    /// Create an agent with default options
    pub fn new(provider: P, tools: ToolRegistry) -> Self {
        Self::with_options(provider, tools, AgentOptions::default())
    }

    /// Create an agent from the loaded configuration
    pub fn from_config(provider: P, tools: ToolRegistry, config: &Config) -> Self {
        Self::with_options(provider, tools, AgentOptions::from_config(config))
    }

    pub fn with_options(provider: P, tools: ToolRegistry, options: AgentOptions) -> Self {
        let prompt = InstructionPrompt::render(&options.template, &tools);
        let history = prompt.system_messages(options.system_prompt.as_deref());
        let model = options
            .model
            .unwrap_or_else(|| provider.default_model());

        info!(
            "◆ AGENT READY: model={}, max_steps={}, tools={:?}",
            model,
            options.max_steps,
            tools.keys()
        );

        Self {
            provider,
            model,
            max_steps: options.max_steps,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            tools,
            prompt,
            history,
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn instruction_prompt(&self) -> &InstructionPrompt {
        &self.prompt
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Answer `prompt`, returning the final answer or a fixed failure text
    pub async fn call(&mut self, prompt: &str) -> String {
        self.run(prompt).await.outcome.into_text()
    }

    /// Run one user turn through the state machine
    pub async fn run(&mut self, prompt: &str) -> TurnReport {
        self.history.push(Message::user(prompt));
        info!("User prompt: {}", prompt);

        let mut steps = 0;
        let mut dispatches = 0;

        while steps < self.max_steps {
            steps += 1;
            debug!("--- Step {} ---", steps);

            let reply = match self.query_model().await {
                Ok(reply) => reply,
                Err(e) => {
                    error!("Error getting model response: {}", e);
                    return TurnReport {
                        outcome: TurnOutcome::ModelError(e.to_string()),
                        steps,
                        dispatches,
                    };
                }
            };

            self.history.push(Message::assistant(reply.clone()));
            debug!("Assistant response:\n{}", reply);

            match Transition::classify(&reply) {
                Transition::FinalAnswer(answer) => {
                    info!("◆ FINAL ANSWER after {} step(s)", steps);
                    return TurnReport {
                        outcome: TurnOutcome::FinalAnswer(answer),
                        steps,
                        dispatches,
                    };
                }
                Transition::DispatchTool => {
                    let observation = dispatcher::dispatch(&self.tools, parse_action(&reply)).await;
                    dispatches += 1;
                    self.history.push(Message::assistant(observation));
                }
                Transition::Continue => {
                    debug!("No tool call and no final answer, continuing");
                }
            }
        }

        warn!("◆ STEP BUDGET EXHAUSTED ({} steps)", self.max_steps);
        TurnReport {
            outcome: TurnOutcome::Exhausted,
            steps,
            dispatches,
        }
    }

    async fn query_model(&self) -> crate::Result<String> {
        let params = ChatParams {
            model: self.model.clone(),
            messages: self.history.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self.provider.chat(params).await?;
        response
            .trimmed_content()
            .map(str::to_string)
            .ok_or_else(|| reagent_provider::ProviderError::InvalidResponse.into())
    }
}
