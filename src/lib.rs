//! # Triage - Guided Diagnosis for ISP Support Agents
//!
//! **Triage** walks a call-center agent through a decision tree of
//! troubleshooting steps (ONU lights, Wi-Fi, IPTV, ...) while keeping track of
//! the customer's equipment. It also maps an agent's free-text description of
//! the problem onto a starting step, with the help of an external text
//! classifier, without ever letting that classifier send the agent somewhere
//! the flowchart does not define.
//!
//! ## Core Workflow
//!
//! 1.  **Load the flowchart**: Use the bundled dataset (`data::default_graph`) or
//!     convert your own format through the `IntoFlowchart` trait, then build a
//!     validated `GraphStore`. Dangling transitions and a missing entry step fail here.
//! 2.  **Open a session**: A `Session` owns the navigation position and the
//!     customer's equipment records. The graph is shared through an `Arc`.
//! 3.  **Navigate**: `navigate`, `choose`, `advance` and `reset` move through the
//!     flowchart. Rejected transitions leave the session where it was.
//! 4.  **Search**: A `StepResolver` asks the classifier for the best starting
//!     step and vetoes any answer the graph does not know.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use triage::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! triage::logging::init_tracing();
//!
//! let graph = Arc::new(triage::data::default_graph()?);
//! let catalog = triage::data::default_catalog()?;
//! let mut session = Session::new(graph.clone(), catalog);
//!
//! // Walk the flowchart by hand...
//! session.advance()?;
//! println!("{}", StepFormatter::format_step(session.current_step()));
//!
//! // ...or jump to the step that best matches the customer's complaint.
//! let resolver = StepResolver::new(graph, GeminiClassifier::from_env()?);
//! match session.search(&resolver, "luz los piscando").await? {
//!     Resolution::Matched(id) => println!("-> Jumped to '{}'", id),
//!     Resolution::NoMatch => println!("-> No confident match, staying put"),
//! }
//!
//! session.set_note(1, "LOS vermelha desde ontem")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod equipment;
pub mod error;
pub mod flowchart;
pub mod graph;
pub mod logging;
pub mod navigation;
pub mod prelude;
pub mod render;
pub mod resolver;
pub mod session;
