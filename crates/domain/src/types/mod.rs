//! Domain data types

pub mod field;
pub mod record;

pub use field::{FieldDescriptor, FieldKind, SelectOption};
pub use record::{BehaviorRecord, RecordDraft, RecordStatus, TrackerLink};
