use super::GraphStore;
use crate::error::GraphError;
use crate::flowchart::{Step, StepId, Transition};
use ahash::{AHashMap, AHashSet};

/// Checks that every choice list is non-empty and every target resolves.
pub(super) fn check_transitions(
    steps: &[Step],
    index: &AHashMap<StepId, usize>,
) -> Result<(), GraphError> {
    for step in steps {
        if let Transition::Choices(choices) = &step.transition {
            if choices.is_empty() {
                return Err(GraphError::EmptyChoices(step.id.clone()));
            }
        }

        if let Some(missing) = step.targets().find(|target| !index.contains_key(*target)) {
            return Err(GraphError::DanglingTarget {
                step_id: step.id.clone(),
                target_id: missing.to_string(),
            });
        }
    }
    Ok(())
}

/// Steps that no chain of transitions from the entry step reaches, in definition order.
pub(super) fn unreachable_steps(store: &GraphStore) -> Vec<&str> {
    let reachable: AHashSet<&str> = store
        .reachable_from(store.entry_id())
        .into_iter()
        .collect();
    store
        .iter()
        .map(|step| step.id.as_str())
        .filter(|id| !reachable.contains(id))
        .collect()
}
