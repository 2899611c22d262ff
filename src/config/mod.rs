//! Configuration module for Laer.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AssessmentPrompts, ExplanationPrompts, Prompts, TutorPrompts};
pub use settings::{
    ClientSettings, GeneralSettings, ModelSettings, PromptSettings, ServerSettings, Settings,
    TutorSettings,
};
