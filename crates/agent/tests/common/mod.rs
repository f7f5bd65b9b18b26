//! Shared test tools and a scripted provider
#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;
use reagent_agent::{ActionInput, Tool, ToolError};
use reagent_provider::{ChatParams, ChatResponse, Provider, ProviderError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

mock! {
    pub Provider {}

    #[async_trait]
    impl Provider for Provider {
        async fn chat(&self, params: ChatParams) -> Result<ChatResponse, ProviderError>;
        fn default_model(&self) -> String;
        fn is_configured(&self) -> bool;
    }
}

/// Mock provider that answers with `replies` in order, exactly once each
pub fn scripted_provider(replies: &[&str]) -> MockProvider {
    let mut mock = MockProvider::new();
    mock.expect_default_model()
        .returning(|| "mock-model".to_string());

    let replies: Vec<String> = replies.iter().map(|r| r.to_string()).collect();
    let next = AtomicUsize::new(0);
    mock.expect_chat()
        .times(replies.len())
        .returning(move |_| {
            let i = next.fetch_add(1, Ordering::SeqCst);
            Ok(ChatResponse::text(replies[i].clone()))
        });
    mock
}

/// Tool with a configurable name that echoes its input
pub struct EchoTool {
    name: String,
}

impl EchoTool {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Echoes the input back."
    }

    fn arg(&self) -> &str {
        "Any text"
    }

    async fn run(&self, input: ActionInput) -> Result<String, ToolError> {
        Ok(format!("echo: {}", input))
    }
}

/// Tool that always fails
pub struct FailingTool;

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        "Broken Tool"
    }

    fn description(&self) -> &str {
        "Always fails."
    }

    fn arg(&self) -> &str {
        "Anything"
    }

    async fn run(&self, _input: ActionInput) -> Result<String, ToolError> {
        Err(ToolError::Failed("upstream exploded".to_string()))
    }
}

/// Tool that records every input it receives
#[derive(Clone, Default)]
pub struct RecordingTool {
    pub calls: Arc<Mutex<Vec<ActionInput>>>,
}

impl RecordingTool {
    pub fn calls(&self) -> Vec<ActionInput> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tool for RecordingTool {
    fn name(&self) -> &str {
        "Recorder"
    }

    fn description(&self) -> &str {
        "Records inputs."
    }

    fn arg(&self) -> &str {
        "A JSON object"
    }

    async fn run(&self, input: ActionInput) -> Result<String, ToolError> {
        self.calls.lock().unwrap().push(input);
        Ok("recorded".to_string())
    }
}

/// Tool that panics instead of returning
pub struct PanickingTool;

#[async_trait]
impl Tool for PanickingTool {
    fn name(&self) -> &str {
        "Panicky"
    }

    fn description(&self) -> &str {
        "Panics on every call."
    }

    fn arg(&self) -> &str {
        "Anything"
    }

    async fn run(&self, _input: ActionInput) -> Result<String, ToolError> {
        panic!("tool blew up");
    }
}
