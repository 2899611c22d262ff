//! Practice problem generation.

use crate::models::{Difficulty, PracticeProblem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Number of template problems produced per call.
const TEMPLATE_PROBLEM_COUNT: usize = 2;

/// A batch of practice problems returned to the agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSet {
    pub problems: Vec<PracticeProblem>,
    /// Worked solutions keyed by problem id.
    pub solutions: HashMap<String, String>,
    pub adaptive_followup: bool,
}

/// Generate practice problems for a topic.
///
/// Always returns the two template problems. `problem_type` and `count` are
/// accepted but not yet honored.
pub fn generate_problems(
    topic: &str,
    difficulty: Difficulty,
    problem_type: &str,
    count: u8,
) -> ProblemSet {
    if count as usize != TEMPLATE_PROBLEM_COUNT {
        debug!(
            "Requested {} '{}' problems, returning {} templates",
            count, problem_type, TEMPLATE_PROBLEM_COUNT
        );
    }

    let problems = vec![
        PracticeProblem {
            id: "1".to_string(),
            question: format!("Explain {} in your own words.", topic),
            problem_type: "conceptual".to_string(),
            difficulty,
            hints: vec![
                "Think about the key components".to_string(),
                "Consider real-world applications".to_string(),
            ],
            solution: None,
            step_by_step_guide: None,
        },
        PracticeProblem {
            id: "2".to_string(),
            question: format!("Solve this practical problem related to {}.", topic),
            problem_type: "application".to_string(),
            difficulty,
            hints: Vec::new(),
            solution: None,
            step_by_step_guide: Some(true),
        },
    ];

    ProblemSet {
        problems,
        solutions: HashMap::new(),
        adaptive_followup: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_two_problems() {
        for count in [1, 2, 5, 10] {
            let set = generate_problems("derivatives", Difficulty::Beginner, "numeric", count);
            assert_eq!(set.problems.len(), 2, "count={}", count);
        }
    }

    #[test]
    fn test_problems_annotated_with_topic_and_difficulty() {
        let set = generate_problems("vectors", Difficulty::Advanced, "proof", 3);

        assert!(set.problems[0].question.contains("vectors"));
        assert!(set.problems[1].question.contains("vectors"));
        assert!(set
            .problems
            .iter()
            .all(|p| p.difficulty == Difficulty::Advanced));
        assert_eq!(set.problems[0].hints.len(), 2);
        assert_eq!(set.problems[1].step_by_step_guide, Some(true));
        assert!(set.adaptive_followup);
        assert!(set.solutions.is_empty());
    }

    #[test]
    fn test_problem_set_wire_format() {
        let set = generate_problems("limits", Difficulty::Intermediate, "conceptual", 2);
        let json = serde_json::to_value(&set).unwrap();

        assert_eq!(json["adaptiveFollowup"], true);
        assert_eq!(json["problems"][0]["type"], "conceptual");
        assert_eq!(json["problems"][1]["difficulty"], "intermediate");
        assert_eq!(json["problems"][1]["stepByStepGuide"], true);
    }
}
