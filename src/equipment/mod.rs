use crate::error::EquipmentError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

mod image;

pub use image::DataUri;

/// Kind of customer-premises device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentCategory {
    #[serde(rename = "ONU")]
    Onu,
    #[serde(rename = "Roteador")]
    Router,
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentCategory::Onu => write!(f, "ONU"),
            EquipmentCategory::Router => write!(f, "Roteador"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Online,
    Offline,
    #[serde(rename = "Alerta")]
    Alert,
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentStatus::Online => write!(f, "Online"),
            EquipmentStatus::Offline => write!(f, "Offline"),
            EquipmentStatus::Alert => write!(f, "Alerta"),
        }
    }
}

/// Per-customer device metadata tracked alongside a diagnostic session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub id: u32,
    #[serde(rename = "type")]
    pub category: EquipmentCategory,
    pub model: String,
    pub status: EquipmentStatus,
    pub notes: String,
}

/// A selectable device model and its reference picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentModel {
    pub name: String,
    #[serde(alias = "imageUrl")]
    pub image_url: String,
}

/// The models an agent can pick from, per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    #[serde(default, alias = "onuModels")]
    pub onu_models: Vec<EquipmentModel>,
    #[serde(default, alias = "routerModels")]
    pub router_models: Vec<EquipmentModel>,
}

impl ModelCatalog {
    pub fn from_json(json: &str) -> Result<Self, EquipmentError> {
        serde_json::from_str(json).map_err(|e| EquipmentError::CatalogParseError(e.to_string()))
    }

    pub fn models(&self, category: EquipmentCategory) -> &[EquipmentModel] {
        match category {
            EquipmentCategory::Onu => &self.onu_models,
            EquipmentCategory::Router => &self.router_models,
        }
    }

    pub fn find(&self, category: EquipmentCategory, name: &str) -> Option<&EquipmentModel> {
        self.models(category).iter().find(|model| model.name == name)
    }

    /// The session's starting records: one ONU (id 1) and one router (id 2),
    /// each on the first catalogue model of its category.
    pub fn default_records(&self) -> Vec<EquipmentRecord> {
        [EquipmentCategory::Onu, EquipmentCategory::Router]
            .into_iter()
            .zip(1u32..)
            .map(|(category, id)| EquipmentRecord {
                id,
                category,
                model: self
                    .models(category)
                    .first()
                    .map(|model| model.name.clone())
                    .unwrap_or_default(),
                status: EquipmentStatus::Online,
                notes: String::new(),
            })
            .collect()
    }
}

/// The customer's devices for one session, plus agent-supplied photos.
///
/// Photo overrides are keyed by model name, so every record using a model
/// shows the same override.
#[derive(Debug, Clone)]
pub struct EquipmentPanel {
    catalog: ModelCatalog,
    records: Vec<EquipmentRecord>,
    custom_images: AHashMap<String, DataUri>,
}

impl EquipmentPanel {
    /// Seeds the panel with the catalogue's default record set.
    pub fn new(catalog: ModelCatalog) -> Self {
        let records = catalog.default_records();
        Self::with_records(catalog, records)
    }

    pub fn with_records(catalog: ModelCatalog, records: Vec<EquipmentRecord>) -> Self {
        Self {
            catalog,
            records,
            custom_images: AHashMap::new(),
        }
    }

    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    pub fn records(&self) -> &[EquipmentRecord] {
        &self.records
    }

    pub fn record(&self, id: u32) -> Option<&EquipmentRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    fn record_mut(&mut self, id: u32) -> Result<&mut EquipmentRecord, EquipmentError> {
        self.records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(EquipmentError::RecordNotFound(id))
    }

    pub fn set_note(&mut self, id: u32, notes: &str) -> Result<&EquipmentRecord, EquipmentError> {
        let record = self.record_mut(id)?;
        record.notes = notes.to_string();
        info!(record = id, "equipment notes updated");
        Ok(&*record)
    }

    /// Switches a record to another catalogue model of the same category.
    pub fn set_model(&mut self, id: u32, model: &str) -> Result<&EquipmentRecord, EquipmentError> {
        let category = self
            .record(id)
            .map(|record| record.category)
            .ok_or(EquipmentError::RecordNotFound(id))?;
        if self.catalog.find(category, model).is_none() {
            return Err(EquipmentError::UnknownModel {
                category: category.to_string(),
                model: model.to_string(),
            });
        }

        let record = self.record_mut(id)?;
        record.model = model.to_string();
        info!(record = id, model, "equipment model changed");
        Ok(&*record)
    }

    pub fn set_status(
        &mut self,
        id: u32,
        status: EquipmentStatus,
    ) -> Result<&EquipmentRecord, EquipmentError> {
        let record = self.record_mut(id)?;
        record.status = status;
        info!(record = id, %status, "equipment status changed");
        Ok(&*record)
    }

    /// Attaches a photo to every record using `model`, replacing any previous one.
    pub fn set_image(&mut self, model: &str, image: DataUri) {
        info!(model, mime = image.mime_type(), "equipment photo attached");
        self.custom_images.insert(model.to_string(), image);
    }

    pub fn custom_image(&self, model: &str) -> Option<&DataUri> {
        self.custom_images.get(model)
    }

    /// The picture to show for a record: the agent's photo for its model if
    /// one was attached, otherwise the catalogue picture.
    pub fn image_for(&self, id: u32) -> Option<&str> {
        let record = self.record(id)?;
        self.custom_image(&record.model)
            .map(DataUri::as_str)
            .or_else(|| {
                self.catalog
                    .find(record.category, &record.model)
                    .map(|model| model.image_url.as_str())
            })
    }
}
