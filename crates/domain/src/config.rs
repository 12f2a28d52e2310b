//! Configuration structures
//!
//! All configuration is explicit: the tracker credentials and school
//! metadata are injected into the clients and services at construction time,
//! never read from ambient globals.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub school: SchoolConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Connection settings for the external tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Account that owns the document repository
    pub owner: String,
    /// Repository the documents are created in
    pub repo: String,
    /// Bearer token used for both API surfaces
    pub token: String,
    /// Opaque id of the project whose items and fields are managed
    pub project_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_graphql_url() -> String {
    "https://api.github.com/graphql".to_string()
}

/// One grade level and the number of rooms it has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomGroup {
    pub grade: u8,
    pub rooms: u8,
}

/// School metadata and the classroom table drafts are validated against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolConfig {
    pub name: String,
    pub classrooms: Vec<ClassroomGroup>,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            name: "โรงเรียนตัวอย่าง".to_string(),
            classrooms: vec![
                ClassroomGroup { grade: 1, rooms: 12 },
                ClassroomGroup { grade: 2, rooms: 10 },
                ClassroomGroup { grade: 3, rooms: 10 },
                ClassroomGroup { grade: 4, rooms: 12 },
                ClassroomGroup { grade: 5, rooms: 12 },
                ClassroomGroup { grade: 6, rooms: 12 },
            ],
        }
    }
}

impl SchoolConfig {
    /// Whether `"<grade>/<room>"` names a configured classroom.
    pub fn contains_classroom(&self, classroom: &str) -> bool {
        let Some((grade, room)) = classroom.split_once('/') else {
            return false;
        };
        let (Ok(grade), Ok(room)) = (grade.trim().parse::<u8>(), room.trim().parse::<u8>()) else {
            return false;
        };
        self.classrooms
            .iter()
            .any(|group| group.grade == grade && room >= 1 && room <= group.rooms)
    }
}

/// Export artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Prefix of the generated CSV filename
    pub filename_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { filename_prefix: "รายงานพฤติกรรมความดี".to_string() }
    }
}

/// Input length bounds applied during draft validation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_behavior_length: usize,
    pub max_name_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_behavior_length: 500, max_name_length: 100 }
    }
}
