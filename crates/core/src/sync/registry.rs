//! Custom field registry.
//!
//! The field configuration lives on the tracker and can be changed there at
//! any time, so descriptors are re-fetched for every field-touching
//! operation rather than cached across calls. The cost is one extra round
//! trip per operation; the gain is that there is no invalidation state to
//! reason about.

use std::sync::Arc;

use meritsync_domain::constants::{
    FIELDS_PAGE_SIZE, FIELD_CLASSROOM, FIELD_SCORE, FIELD_STATUS_EN, FIELD_STATUS_TH,
    FIELD_SUBMITTED_DATE, FIELD_TEACHER,
};
use meritsync_domain::{FieldDescriptor, MeritSyncError, Result};

use super::ports::TrackerGateway;

/// Field names the synchronizer manages. The status field is accepted under
/// either its English or Thai name; all other names are exact.
pub const EXPECTED_FIELD_NAMES: [&str; 6] = [
    FIELD_STATUS_EN,
    FIELD_STATUS_TH,
    FIELD_SCORE,
    FIELD_CLASSROOM,
    FIELD_TEACHER,
    FIELD_SUBMITTED_DATE,
];

/// Resolves the tracker's custom field definitions by name
pub struct FieldRegistry {
    gateway: Arc<dyn TrackerGateway>,
}

impl FieldRegistry {
    pub fn new(gateway: Arc<dyn TrackerGateway>) -> Self {
        Self { gateway }
    }

    /// Fetch the project's field definitions and keep only the managed set.
    pub async fn resolve(&self) -> Result<Vec<FieldDescriptor>> {
        let fields = self.gateway.fetch_fields(FIELDS_PAGE_SIZE).await?;
        Ok(fields
            .into_iter()
            .filter(|field| EXPECTED_FIELD_NAMES.contains(&field.name.as_str()))
            .collect())
    }

    /// The status field, under either accepted name.
    ///
    /// # Errors
    /// `FieldNotFound` when the project has no status field; the workflow
    /// cannot proceed without it.
    pub async fn find_status_field(&self) -> Result<FieldDescriptor> {
        let fields = self.resolve().await?;
        find_status(&fields).cloned().ok_or_else(|| {
            MeritSyncError::FieldNotFound(format!(
                "project has no {FIELD_STATUS_EN} or {FIELD_STATUS_TH} field"
            ))
        })
    }
}

/// Pick the status field out of a resolved set.
pub(crate) fn find_status(fields: &[FieldDescriptor]) -> Option<&FieldDescriptor> {
    fields.iter().find(|field| field.name == FIELD_STATUS_EN || field.name == FIELD_STATUS_TH)
}
