//! # MeritSync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The behavior record synchronizer and field registry
//! - Port/adapter interfaces (traits) to the external tracker
//! - CSV export of synchronized records
//!
//! ## Architecture Principles
//! - Only depends on `meritsync-domain`
//! - No HTTP or platform code; the tracker is reached through the
//!   `TrackerGateway` trait
//! - Pure, testable business logic

pub mod export;
pub mod sync;

// Re-export specific items to avoid ambiguity
pub use export::{build_rows, export_filename, serialize, ExportRow};
pub use sync::ports::{
    DocumentHandle, FieldValue, FieldValuePatch, ItemContent, ItemSnapshot, NewDocument,
    TrackerGateway,
};
pub use sync::registry::FieldRegistry;
pub use sync::service::SyncService;
