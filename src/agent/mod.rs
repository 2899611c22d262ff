//! Agent system for tutoring with tool calling.
//!
//! Provides an LLM agent that decides which tutoring tools to call
//! (assessment, practice generation, explanations, progress updates)
//! and loops until the model produces a final answer.

mod model;
mod runner;
mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use model::{ChatModel, ModelTurn, OpenAIChatModel};
pub use runner::{Agent, AgentResponse, ToolCallRecord, DEFAULT_MAX_ITERATIONS, MAX_ITERATIONS_MESSAGE};
pub use tools::{is_known_tool, parse_tool_call, tool_definitions, ToolCall, ToolContext, TOOL_NAMES};
