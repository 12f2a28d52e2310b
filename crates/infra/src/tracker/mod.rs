//! Tracker integration
//!
//! Speaks the tracker's two API surfaces: a REST-like document-creation
//! surface and a GraphQL surface for project items and typed custom fields.

mod client;
mod queries;

pub use client::TrackerClient;
