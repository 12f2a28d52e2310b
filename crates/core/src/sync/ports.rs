//! Port interfaces for tracker synchronization
//!
//! These traits define the boundary between core business logic and the
//! infrastructure implementation that speaks the tracker's two API
//! surfaces.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use meritsync_domain::{FieldDescriptor, Result};
use serde::{Deserialize, Serialize};

/// Document payload for the tracker's document-creation surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

/// Identifiers returned when a document is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHandle {
    /// Opaque node id, used to attach the document to the project
    pub node_id: String,
    /// Human-facing document number
    pub number: i64,
    pub url: String,
}

/// Typed field-value payload.
///
/// Each variant maps to a structurally different mutation on the tracker;
/// the variant must match the field's declared kind or the tracker rejects
/// the call.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValuePatch {
    SingleSelect { option_id: String },
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

/// One field value as read back from a project item
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text { field_name: String, text: String },
    Number { field_name: String, number: f64 },
    SingleSelect { field_name: String, option_name: String },
    Date { field_name: String, date: NaiveDate },
}

impl FieldValue {
    /// Name of the field this value belongs to.
    pub fn field_name(&self) -> &str {
        match self {
            Self::Text { field_name, .. }
            | Self::Number { field_name, .. }
            | Self::SingleSelect { field_name, .. }
            | Self::Date { field_name, .. } => field_name,
        }
    }
}

/// Document content attached to a project item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemContent {
    pub node_id: String,
    pub number: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub state: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
}

/// One project item with its linked document and field values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSnapshot {
    pub item_id: String,
    pub content: Option<ItemContent>,
    pub field_values: Vec<FieldValue>,
}

/// Trait for driving the external tracker's two API surfaces
#[async_trait]
pub trait TrackerGateway: Send + Sync {
    /// Create a document on the tracker's document surface.
    async fn create_document(&self, document: &NewDocument) -> Result<DocumentHandle>;

    /// Attach a document to the project, returning the new item id.
    async fn add_item(&self, document_node_id: &str) -> Result<String>;

    /// Set one field value on a project item.
    async fn update_field_value(
        &self,
        item_id: &str,
        field_id: &str,
        patch: &FieldValuePatch,
    ) -> Result<()>;

    /// Fetch up to `limit` custom field definitions of the project.
    async fn fetch_fields(&self, limit: usize) -> Result<Vec<FieldDescriptor>>;

    /// Fetch up to `limit` project items with content and field values.
    async fn fetch_items(&self, limit: usize) -> Result<Vec<ItemSnapshot>>;
}
