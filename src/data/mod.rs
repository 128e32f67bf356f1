//! The diagnostic flowchart and equipment catalogue bundled with the crate.
//!
//! Both are embedded at compile time and parsed once at start-up. A broken
//! bundled flowchart is a configuration error, surfaced by `default_graph`
//! before any session starts.

use crate::equipment::ModelCatalog;
use crate::error::{EquipmentError, GraphError};
use crate::flowchart::{FlowchartDefinition, IntoFlowchart};
use crate::graph::{DEFAULT_ENTRY, GraphStore};

mod raw;

pub use raw::{RawFlowchart, RawNode, RawOption};

const FLOWCHART_JSON: &str = include_str!("flowchart.json");
const EQUIPMENT_JSON: &str = include_str!("equipment.json");

/// Parses the bundled flowchart into the canonical model.
pub fn default_flowchart() -> Result<FlowchartDefinition, GraphError> {
    RawFlowchart::from_json(FLOWCHART_JSON)?.into_flowchart()
}

/// Builds and validates the bundled flowchart, entered at `start`.
pub fn default_graph() -> Result<GraphStore, GraphError> {
    GraphStore::builder(default_flowchart()?)
        .with_entry(DEFAULT_ENTRY)
        .build()
}

/// Parses the bundled ONU and router model catalogue.
pub fn default_catalog() -> Result<ModelCatalog, EquipmentError> {
    ModelCatalog::from_json(EQUIPMENT_JSON)
}
