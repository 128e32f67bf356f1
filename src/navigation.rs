use crate::error::NavigationError;
use crate::flowchart::{Step, StepId, Transition};
use crate::graph::GraphStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Walks a `GraphStore` one validated transition at a time.
///
/// The controller holds the only piece of mutable navigation state, the
/// identifier of the current step. Every transition is checked against the
/// store before it is committed, so the current step is always renderable.
/// There is no history: `reset` is the only way back.
#[derive(Debug)]
pub struct NavigationController {
    graph: Arc<GraphStore>,
    current: StepId,
}

impl NavigationController {
    /// Creates a controller positioned on the store's entry step.
    pub fn new(graph: Arc<GraphStore>) -> Self {
        let current = graph.entry_id().to_string();
        Self { graph, current }
    }

    pub fn graph(&self) -> &Arc<GraphStore> {
        &self.graph
    }

    pub fn current_id(&self) -> &str {
        &self.current
    }

    /// The step the agent is currently on.
    pub fn current_step(&self) -> &Step {
        // `current` only ever holds validated identifiers.
        self.graph
            .get(&self.current)
            .unwrap_or_else(|| self.graph.entry_step())
    }

    pub fn is_at_entry(&self) -> bool {
        self.current == self.graph.entry_id()
    }

    /// Moves to `target` if it exists in the store.
    ///
    /// On an unknown identifier the current step is left untouched and
    /// `NavigationError::StepNotFound` is returned.
    pub fn navigate(&mut self, target: &str) -> Result<&Step, NavigationError> {
        if !self.graph.contains(target) {
            warn!(
                from = %self.current,
                requested = target,
                "rejected navigation to unknown flowchart step"
            );
            return Err(NavigationError::StepNotFound(target.to_string()));
        }

        info!(from = %self.current, to = target, "navigated");
        self.current = target.to_string();
        Ok(self.current_step())
    }

    /// Returns to the entry step. Always succeeds.
    pub fn reset(&mut self) -> &Step {
        info!(from = %self.current, "navigation reset");
        self.current = self.graph.entry_id().to_string();
        self.current_step()
    }

    /// Follows the current step's unconditional "next" pointer.
    pub fn advance(&mut self) -> Result<&Step, NavigationError> {
        let target = match &self.current_step().transition {
            Transition::Next(target) => target.clone(),
            _ => {
                return Err(NavigationError::NoSuchTransition {
                    step_id: self.current.clone(),
                    requested: "next".to_string(),
                });
            }
        };
        self.navigate(&target)
    }

    /// Follows the choice at `index` (zero-based) of the current step.
    pub fn choose(&mut self, index: usize) -> Result<&Step, NavigationError> {
        let target = match &self.current_step().transition {
            Transition::Choices(choices) => choices.get(index).map(|choice| choice.target.clone()),
            _ => None,
        };
        let target = target.ok_or_else(|| NavigationError::NoSuchTransition {
            step_id: self.current.clone(),
            requested: format!("choice #{}", index + 1),
        })?;
        self.navigate(&target)
    }
}
