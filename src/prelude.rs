//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the triage crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use triage::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph = Arc::new(triage::data::default_graph()?);
//! let mut navigation = NavigationController::new(graph);
//!
//! navigation.navigate("problem_selection")?;
//! println!("{}", StepFormatter::format_step(navigation.current_step()));
//! # Ok(())
//! # }
//! ```

// Flowchart model and graph store
pub use crate::flowchart::{
    Choice, Emphasis, FlowchartDefinition, IntoFlowchart, Step, StepBody, StepId, StepKind,
    Transition,
};
pub use crate::graph::{GraphStore, ProjectedStep};

// Navigation, resolution and sessions
pub use crate::navigation::NavigationController;
pub use crate::resolver::{
    GeminiClassifier, Resolution, ResolverOptions, StepResolver, TextClassifier, WorkedExample,
};
pub use crate::session::Session;

// Equipment
pub use crate::equipment::{
    DataUri, EquipmentCategory, EquipmentModel, EquipmentPanel, EquipmentRecord, EquipmentStatus,
    ModelCatalog,
};

// Configuration
pub use crate::config::ClassifierConfig;

// Error types
pub use crate::error::{
    EquipmentError, GraphError, NavigationError, ResolutionError, SessionError,
};

// Rendering
pub use crate::render::StepFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
