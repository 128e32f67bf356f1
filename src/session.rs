use crate::equipment::{DataUri, EquipmentPanel, EquipmentRecord, EquipmentStatus, ModelCatalog};
use crate::error::{NavigationError, SessionError};
use crate::flowchart::Step;
use crate::graph::GraphStore;
use crate::navigation::NavigationController;
use crate::resolver::{Resolution, StepResolver, TextClassifier};
use std::sync::Arc;
use tracing::info;

/// All mutable state of one agent's diagnostic session.
///
/// The session owns its navigation position and the customer's equipment; the
/// flowchart itself is shared, read-only, with any other session. Every
/// command returns a `Result` and, on failure, leaves the session on a valid
/// step.
#[derive(Debug)]
pub struct Session {
    navigation: NavigationController,
    equipment: EquipmentPanel,
}

impl Session {
    /// Starts a session on the entry step with the catalogue's default equipment.
    pub fn new(graph: Arc<GraphStore>, catalog: ModelCatalog) -> Self {
        Self::with_equipment(graph, EquipmentPanel::new(catalog))
    }

    pub fn with_equipment(graph: Arc<GraphStore>, equipment: EquipmentPanel) -> Self {
        Self {
            navigation: NavigationController::new(graph),
            equipment,
        }
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn current_step(&self) -> &Step {
        self.navigation.current_step()
    }

    pub fn navigate(&mut self, target: &str) -> Result<&Step, NavigationError> {
        self.navigation.navigate(target)
    }

    pub fn reset(&mut self) -> &Step {
        self.navigation.reset()
    }

    pub fn advance(&mut self) -> Result<&Step, NavigationError> {
        self.navigation.advance()
    }

    pub fn choose(&mut self, index: usize) -> Result<&Step, NavigationError> {
        self.navigation.choose(index)
    }

    pub fn equipment(&self) -> &EquipmentPanel {
        &self.equipment
    }

    pub fn set_note(&mut self, id: u32, notes: &str) -> Result<&EquipmentRecord, SessionError> {
        Ok(self.equipment.set_note(id, notes)?)
    }

    pub fn set_model(&mut self, id: u32, model: &str) -> Result<&EquipmentRecord, SessionError> {
        Ok(self.equipment.set_model(id, model)?)
    }

    pub fn set_status(
        &mut self,
        id: u32,
        status: EquipmentStatus,
    ) -> Result<&EquipmentRecord, SessionError> {
        Ok(self.equipment.set_status(id, status)?)
    }

    pub fn set_image(&mut self, model: &str, image: DataUri) {
        self.equipment.set_image(model, image);
    }

    /// Resolves a free-text problem description and, on a match, moves there.
    ///
    /// The resolver must share the session's `GraphStore`, otherwise the call
    /// fails with `GraphMismatch` before the classifier is asked. Navigation
    /// state is only touched after the classifier has answered. A `NoMatch`
    /// keeps the agent where they are.
    pub async fn search<C: TextClassifier>(
        &mut self,
        resolver: &StepResolver<C>,
        query: &str,
    ) -> Result<Resolution, SessionError> {
        if !Arc::ptr_eq(resolver.graph(), self.navigation.graph()) {
            return Err(SessionError::GraphMismatch);
        }

        let resolution = resolver.resolve(query).await?;
        match &resolution {
            Resolution::Matched(id) => {
                self.navigation.navigate(id)?;
            }
            Resolution::NoMatch => {
                info!(query, current = self.navigation.current_id(), "search found no step");
            }
        }
        Ok(resolution)
    }
}
