use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a step in the flowchart.
pub type StepId = String;

/// The complete, canonical definition of a diagnostic flowchart, ready to be
/// loaded into a `GraphStore`. This is the target structure for any custom
/// data model conversion.
#[derive(Debug, Clone, Default)]
pub struct FlowchartDefinition {
    pub steps: Vec<Step>,
}

/// A single node of the diagnostic decision tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub id: StepId,
    pub kind: StepKind,
    pub title: String,
    pub body: StepBody,
    /// Name of an icon the rendering layer may show next to the title.
    pub icon: Option<String>,
    pub transition: Transition,
}

impl Step {
    /// Iterates over every step identifier this step can lead to.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        let (choices, next): (&[Choice], Option<&str>) = match &self.transition {
            Transition::Choices(choices) => (choices.as_slice(), None),
            Transition::Next(target) => (&[], Some(target.as_str())),
            Transition::Terminal => (&[], None),
        };
        choices
            .iter()
            .map(|choice| choice.target.as_str())
            .chain(next)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.transition, Transition::Terminal)
    }
}

/// Informational category of a step. It does not affect traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Start,
    Question,
    Action,
    Solution,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Start => write!(f, "start"),
            StepKind::Question => write!(f, "question"),
            StepKind::Action => write!(f, "action"),
            StepKind::Solution => write!(f, "solution"),
        }
    }
}

/// Display content of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StepBody {
    PlainText(String),
    /// Opaque handle to rich content (tables, light diagrams, ...) that only
    /// the rendering layer knows how to draw.
    RichContent(String),
}

impl StepBody {
    /// Returns the plain text, if this body has any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StepBody::PlainText(text) => Some(text),
            StepBody::RichContent(_) => None,
        }
    }
}

/// How the agent leaves a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Transition {
    /// A non-empty, ordered list of labelled choices.
    Choices(Vec<Choice>),
    /// A single unconditional "next step" pointer.
    Next(StepId),
    /// A leaf step.
    Terminal,
}

/// A labelled, directed transition from one step to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub target: StepId,
    pub emphasis: Option<Emphasis>,
}

impl Choice {
    pub fn new(label: impl Into<String>, target: impl Into<StepId>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            emphasis: None,
        }
    }

    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = Some(emphasis);
        self
    }

    /// The emphasis to render with. Choices without one render as primary.
    pub fn effective_emphasis(&self) -> Emphasis {
        self.emphasis.unwrap_or(Emphasis::Primary)
    }
}

/// Visual emphasis category of a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Primary,
    Secondary,
    Danger,
}
