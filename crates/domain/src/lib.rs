//! # MeritSync Domain
//!
//! Business domain types and models for MeritSync.
//!
//! This crate contains:
//! - Domain data types (RecordDraft, BehaviorRecord, FieldDescriptor, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Pure utilities: record text codec, Thai date formatting, validation,
//!   record statistics
//!
//! ## Architecture
//! - No dependencies on other MeritSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
// Re-export record text codec utilities
pub use utils::record_text::{
    decode_body, decode_title, encode, extract_behavior_section, score_glyph, DecodedBody,
    DecodedTitle, EncodedDocument,
};
