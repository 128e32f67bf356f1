use super::definition::FlowchartDefinition;
use crate::error::GraphError;

/// A trait for custom data models that can be converted into a `FlowchartDefinition`.
///
/// This is the extension point that keeps the graph store format-agnostic. The
/// bundled dataset implements it for its JSON layout; a deployment that keeps
/// its flowchart in another shape implements it for its own structs.
///
/// # Example
///
/// ```rust,no_run
/// use triage::error::GraphError;
/// use triage::flowchart::{FlowchartDefinition, IntoFlowchart, Step, StepBody, StepKind, Transition};
///
/// struct Row { id: String, title: String, next: Option<String> }
/// struct Sheet { rows: Vec<Row> }
///
/// impl IntoFlowchart for Sheet {
///     fn into_flowchart(self) -> Result<FlowchartDefinition, GraphError> {
///         let steps = self
///             .rows
///             .into_iter()
///             .map(|row| Step {
///                 id: row.id,
///                 kind: StepKind::Action,
///                 title: row.title,
///                 body: StepBody::PlainText(String::new()),
///                 icon: None,
///                 transition: match row.next {
///                     Some(target) => Transition::Next(target),
///                     None => Transition::Terminal,
///                 },
///             })
///             .collect();
///         Ok(FlowchartDefinition { steps })
///     }
/// }
/// ```
pub trait IntoFlowchart {
    /// Consumes the object and converts it into the canonical flowchart model.
    fn into_flowchart(self) -> Result<FlowchartDefinition, GraphError>;
}

impl IntoFlowchart for FlowchartDefinition {
    fn into_flowchart(self) -> Result<FlowchartDefinition, GraphError> {
        Ok(self)
    }
}
