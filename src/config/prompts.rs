//! Prompt templates for Laer.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub tutor: TutorPrompts,
    pub assessment: AssessmentPrompts,
    pub explanation: ExplanationPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// System instruction for the tutoring agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorPrompts {
    pub system: String,
}

impl Default for TutorPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an expert tutor with agentic capabilities. Your goal is to actively help students learn, not just answer questions.

CORE PRINCIPLES:
1. Diagnose knowledge gaps proactively
2. Adapt teaching strategy based on student responses
3. Generate personalized practice when needed
4. Use multiple explanation modalities
5. Track progress and adjust learning path

When a student asks a question or struggles with a concept:
- First, assess their current understanding
- Identify any knowledge gaps
- Choose the most effective explanation method
- Generate targeted practice if needed
- Update their learning path accordingly

Always be supportive, patient, and focused on helping them achieve mastery."#
                .to_string(),
        }
    }
}

/// Prompts for the gap assessment tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentPrompts {
    pub system: String,
    pub user: String,
}

impl Default for AssessmentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an experienced teacher evaluating a student's answer. Identify precisely what the student understands and which prerequisite ideas are missing or misconceived. Be specific and brief."#.to_string(),

            user: r#"Topic: {{topic}}
Learning objective: {{learning_objective}}

Student response:
{{student_response}}

Respond with a JSON object:
{"summary": "<one or two sentences>", "knowledgeGaps": ["<gap>", ...], "estimatedMastery": <number between 0 and 1>}"#.to_string(),
        }
    }
}

/// Prompts for the alternative explanation tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationPrompts {
    pub system: String,
    pub user: String,
}

impl Default for ExplanationPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a patient tutor who re-explains concepts in a new way when earlier explanations did not land. Never repeat an approach the student has already seen."#.to_string(),

            user: r#"Explain "{{concept}}" using a {{explanation_type}} explanation.

Approaches already tried:
{{previous_attempts}}

Keep it concise and end with one short check-for-understanding question."#.to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = super::Settings::expand_path(dir);

            let tutor_path = custom_path.join("tutor.toml");
            if tutor_path.exists() {
                let content = std::fs::read_to_string(&tutor_path)?;
                prompts.tutor = toml::from_str(&content)?;
            }

            let assessment_path = custom_path.join("assessment.toml");
            if assessment_path.exists() {
                let content = std::fs::read_to_string(&assessment_path)?;
                prompts.assessment = toml::from_str(&content)?;
            }

            let explanation_path = custom_path.join("explanation.toml");
            if explanation_path.exists() {
                let content = std::fs::read_to_string(&explanation_path)?;
                prompts.explanation = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }

    /// The tutor system instruction with custom variables applied.
    pub fn tutor_system(&self) -> String {
        Self::render(&self.tutor.system, &self.variables)
    }
}
