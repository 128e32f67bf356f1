use crate::error::GraphError;
use crate::flowchart::{FlowchartDefinition, IntoFlowchart, Step, StepId};
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;
use tracing::{debug, warn};

mod projection;
mod validation;

pub use projection::ProjectedStep;

/// Identifier of the entry step, by convention.
pub const DEFAULT_ENTRY: &str = "start";

/// Immutable, validated flowchart.
///
/// Steps are kept in definition order, with an identifier index for O(1)
/// lookups. Once built, a store is never mutated, so it can be shared freely
/// (typically behind an `Arc`) between a navigation controller and a resolver.
#[derive(Debug)]
pub struct GraphStore {
    steps: Vec<Step>,
    index: AHashMap<StepId, usize>,
    entry: usize,
}

pub struct GraphStoreBuilder {
    definition: FlowchartDefinition,
    entry_id: StepId,
}

impl GraphStoreBuilder {
    pub fn new(definition: FlowchartDefinition) -> Self {
        Self {
            definition,
            entry_id: DEFAULT_ENTRY.to_string(),
        }
    }

    pub fn with_entry(mut self, entry_id: &str) -> Self {
        self.entry_id = entry_id.to_string();
        self
    }

    /// Validates the definition and freezes it into a `GraphStore`.
    ///
    /// Fails on duplicate identifiers, empty choice lists, transitions to
    /// undefined steps, and a missing entry step.
    pub fn build(self) -> Result<GraphStore, GraphError> {
        let steps = self.definition.steps;
        let mut index = AHashMap::with_capacity(steps.len());
        for (position, step) in steps.iter().enumerate() {
            if index.insert(step.id.clone(), position).is_some() {
                return Err(GraphError::DuplicateStep(step.id.clone()));
            }
        }

        validation::check_transitions(&steps, &index)?;

        let entry = *index
            .get(&self.entry_id)
            .ok_or_else(|| GraphError::MissingEntryStep(self.entry_id.clone()))?;

        let store = GraphStore {
            steps,
            index,
            entry,
        };

        let unreachable = validation::unreachable_steps(&store);
        if !unreachable.is_empty() {
            warn!(
                entry = store.entry_id(),
                steps = ?unreachable,
                "flowchart contains steps unreachable from the entry step"
            );
        }
        debug!(
            steps = store.len(),
            entry = store.entry_id(),
            "flowchart loaded"
        );

        Ok(store)
    }
}

impl GraphStore {
    pub fn builder(definition: FlowchartDefinition) -> GraphStoreBuilder {
        GraphStoreBuilder::new(definition)
    }

    /// Converts any `IntoFlowchart` source and builds a store with the default entry.
    pub fn from_source(source: impl IntoFlowchart) -> Result<Self, GraphError> {
        Self::builder(source.into_flowchart()?).build()
    }

    /// Looks up a step by identifier.
    pub fn get(&self, id: &str) -> Option<&Step> {
        self.index.get(id).map(|&position| &self.steps[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn entry_id(&self) -> &str {
        &self.steps[self.entry].id
    }

    pub fn entry_step(&self) -> &Step {
        &self.steps[self.entry]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates over the steps in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    /// Breadth-first walk over every transition starting at `id`.
    ///
    /// Returns the identifiers visited, starting with `id` itself. An unknown
    /// starting identifier yields an empty list. Cycles are visited once.
    pub fn reachable_from(&self, id: &str) -> Vec<&str> {
        let Some(start) = self.get(id) else {
            return Vec::new();
        };

        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([start]);
        seen.insert(start.id.as_str());

        while let Some(step) = queue.pop_front() {
            order.push(step.id.as_str());
            for target in step.targets() {
                if seen.insert(target) {
                    if let Some(next) = self.get(target) {
                        queue.push_back(next);
                    }
                }
            }
        }
        order
    }

    /// Reduced view of every step for the resolver prompt: identifier, title,
    /// and a body capped at `max_chars` characters.
    pub fn projection(&self, max_chars: usize) -> Vec<ProjectedStep> {
        self.steps
            .iter()
            .map(|step| ProjectedStep::from_step(step, max_chars))
            .collect()
    }
}
