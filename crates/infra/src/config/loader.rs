//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `MERITSYNC_TRACKER_OWNER`: account owning the document repository
//! - `MERITSYNC_TRACKER_REPO`: repository the documents are created in
//! - `MERITSYNC_TRACKER_TOKEN`: bearer token for both API surfaces
//! - `MERITSYNC_TRACKER_PROJECT_ID`: opaque project id
//! - `MERITSYNC_TRACKER_API_BASE`: document surface base URL (optional)
//! - `MERITSYNC_TRACKER_GRAPHQL_URL`: typed-field surface URL (optional)
//! - `MERITSYNC_SCHOOL_NAME`: school name shown in document footers (optional)
//! - `MERITSYNC_EXPORT_PREFIX`: CSV filename prefix (optional)
//!
//! The classroom table and input limits have no environment form; the
//! defaults apply unless a config file overrides them.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./meritsync.json` or `./meritsync.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use meritsync_domain::{Config, ExportConfig, MeritSyncError, Result, SchoolConfig, TrackerConfig};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `MeritSyncError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The four tracker variables are required; everything else falls back to
/// its default.
///
/// # Errors
/// Returns `MeritSyncError::Config` if a required variable is missing.
pub fn load_from_env() -> Result<Config> {
    let tracker = TrackerConfig {
        owner: env_var("MERITSYNC_TRACKER_OWNER")?,
        repo: env_var("MERITSYNC_TRACKER_REPO")?,
        token: env_var("MERITSYNC_TRACKER_TOKEN")?,
        project_id: env_var("MERITSYNC_TRACKER_PROJECT_ID")?,
        api_base: env_or("MERITSYNC_TRACKER_API_BASE", "https://api.github.com"),
        graphql_url: env_or("MERITSYNC_TRACKER_GRAPHQL_URL", "https://api.github.com/graphql"),
    };

    let mut school = SchoolConfig::default();
    if let Ok(name) = std::env::var("MERITSYNC_SCHOOL_NAME") {
        school.name = name;
    }

    let mut export = ExportConfig::default();
    if let Ok(prefix) = std::env::var("MERITSYNC_EXPORT_PREFIX") {
        export.filename_prefix = prefix;
    }

    Ok(Config { tracker, school, export, limits: Default::default() })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `MeritSyncError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MeritSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MeritSyncError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MeritSyncError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MeritSyncError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MeritSyncError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(MeritSyncError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("meritsync.json"),
            cwd.join("meritsync.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("meritsync.json"),
                exe_dir.join("meritsync.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        MeritSyncError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Environment variable with a default
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
