//! Instruction prompt for the ReAct protocol

use reagent_provider::Message;

use crate::tools::ToolRegistry;

/// Default instruction template. `{tools}` receives the tool catalogue and
/// `{tool_names}` the comma-joined tool names.
pub const REACT_PROMPT_TEMPLATE: &str = r#"
You are an intelligent AI agent equipped with external tools that you can call to solve problems and answer questions accurately.

You have access to the following tools:

{tools}

IMPORTANT INSTRUCTIONS:

1. Think step-by-step before using any tool.
2. Use tools when:
   - You need real-time or factual information
   - A task requires code execution, file generation, or structured output
   - The answer depends on specialized functionality that a tool provides
3. Choose the most relevant tool from: [{tool_names}]
4. Format your Action Input exactly as required by the tool description.
   - If the input requires JSON or structured text, format it correctly.
   - Do not guess; use valid syntax.
5. After a tool returns a result (Observation), reflect on how it helps answer the question.
6. Use the exact tool output in your Final Answer when appropriate.
7. If no tool provides helpful output, say so in your Final Answer.
8. Never hallucinate or fabricate facts. Always rely on tool output for factual claims.
9. You may use multiple Thought/Action/Observation steps if needed.
10. Always conclude with `Final Answer:`.

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer based on the tool results
Final Answer: the final answer to the original input question, incorporating the exact information from the tools

Begin!
"#;

/// The rendered instruction prompt. Built once from the registry and never
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionPrompt {
    text: String,
}

impl InstructionPrompt {
    /// Fill `template` with the registry's catalogue and tool names
    pub fn render(template: &str, registry: &ToolRegistry) -> Self {
        let text = template
            .replace("{tools}", &registry.catalogue())
            .replace("{tool_names}", &registry.names().join(", "));
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Leading system messages: optional preamble, then the instructions
    pub fn system_messages(&self, preamble: Option<&str>) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if let Some(preamble) = preamble.filter(|p| !p.trim().is_empty()) {
            messages.push(Message::system(preamble));
        }
        messages.push(Message::system(self.text.clone()));
        messages
    }
}

impl Default for InstructionPrompt {
    fn default() -> Self {
        Self::render(REACT_PROMPT_TEMPLATE, &ToolRegistry::new())
    }
}
