use crate::flowchart::{Choice, Emphasis, Step, StepBody, Transition};
use itertools::Itertools;

/// Formats flowchart steps into human-readable text.
pub struct StepFormatter;

impl StepFormatter {
    /// Format a step as a title line, its body, and the ways out of it.
    pub fn format_step(step: &Step) -> String {
        let mut result = format!("{}\n\n{}\n", step.title, Self::format_body(&step.body));

        match &step.transition {
            Transition::Choices(choices) => {
                result.push_str("\nSelecione uma opção:\n");
                result.push_str(&Self::format_choices(choices));
                result.push('\n');
            }
            Transition::Next(target) => {
                result.push_str(&format!("\nPróximo passo -> {}\n", target));
            }
            Transition::Terminal => {
                result.push_str("\nFim do fluxo. Reinicie o atendimento se necessário.\n");
            }
        }
        result
    }

    /// Numbered choice list, one per line, starting at 1.
    pub fn format_choices(choices: &[Choice]) -> String {
        choices
            .iter()
            .enumerate()
            .map(|(index, choice)| {
                format!(
                    "{}. {}{}",
                    index + 1,
                    choice.label,
                    Self::emphasis_marker(choice.effective_emphasis())
                )
            })
            .join("\n")
    }

    fn format_body(body: &StepBody) -> String {
        match body {
            StepBody::PlainText(text) => text.clone(),
            StepBody::RichContent(handle) => format!("[conteúdo: {}]", handle),
        }
    }

    fn emphasis_marker(emphasis: Emphasis) -> &'static str {
        match emphasis {
            Emphasis::Primary => "",
            Emphasis::Secondary => " (secundária)",
            Emphasis::Danger => " (!)",
        }
    }
}
