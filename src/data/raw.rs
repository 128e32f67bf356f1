use crate::error::GraphError;
use crate::flowchart::{
    Choice, Emphasis, FlowchartDefinition, IntoFlowchart, Step, StepBody, StepKind, Transition,
};
use serde::Deserialize;

// --- JSON Deserialization Structs (Input Format Specific) ---
// These match the bundled `flowchart.json` layout and are only used for conversion.

#[derive(Debug, Deserialize)]
pub struct RawFlowchart {
    pub nodes: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
pub struct RawNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "richText")]
    pub rich_text: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<RawOption>>,
    #[serde(default, alias = "nextNodeId")]
    pub next_node_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawOption {
    pub text: String,
    #[serde(alias = "nextNodeId")]
    pub next_node_id: String,
    #[serde(default)]
    pub style: Option<Emphasis>,
}

impl RawFlowchart {
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(|e| GraphError::JsonParseError(e.to_string()))
    }
}

impl IntoFlowchart for RawFlowchart {
    fn into_flowchart(self) -> Result<FlowchartDefinition, GraphError> {
        let steps = self
            .nodes
            .into_iter()
            .map(RawNode::into_step)
            .collect::<Result<_, _>>()?;
        Ok(FlowchartDefinition { steps })
    }
}

impl RawNode {
    fn into_step(self) -> Result<Step, GraphError> {
        let transition = match (self.options, self.next_node_id) {
            (Some(_), Some(_)) => return Err(GraphError::ConflictingTransitions(self.id)),
            (Some(options), None) => Transition::Choices(
                options
                    .into_iter()
                    .map(|option| Choice {
                        label: option.text,
                        target: option.next_node_id,
                        emphasis: option.style,
                    })
                    .collect(),
            ),
            (None, Some(next)) => Transition::Next(next),
            (None, None) => Transition::Terminal,
        };

        let body = match self.rich_text {
            Some(handle) => StepBody::RichContent(handle),
            None => StepBody::PlainText(self.text.unwrap_or_default()),
        };

        Ok(Step {
            id: self.id,
            kind: self.kind,
            title: self.title,
            body,
            icon: self.icon,
            transition,
        })
    }
}
