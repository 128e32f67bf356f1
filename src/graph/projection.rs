use crate::flowchart::{Step, StepBody};
use serde::Serialize;

/// What the classifier gets to see of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedStep {
    pub id: String,
    pub title: String,
    pub text: String,
}

impl ProjectedStep {
    /// Projects a step, keeping at most `max_chars` characters of its body.
    /// Rich-content bodies are summarized by the step title.
    pub fn from_step(step: &Step, max_chars: usize) -> Self {
        let text = match &step.body {
            StepBody::PlainText(text) => truncate_chars(text, max_chars).to_string(),
            StepBody::RichContent(_) => step.title.clone(),
        };
        Self {
            id: step.id.clone(),
            title: step.title.clone(),
            text,
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
