//! Errors raised while loading, resolving or exporting a site config.

use std::path::PathBuf;

use docnav_model::ModelError;

/// Errors that can occur while working with a site configuration.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("Config file not found: {}. Run 'docnav init' first.", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {message}", .path.display())]
    ReadError { path: PathBuf, message: String },

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid {location}: {source}")]
    Model {
        location: String,
        #[source]
        source: ModelError,
    },

    #[error("Unknown profile '{name}' (available: {available})")]
    UnknownProfile { name: String, available: String },

    #[error("Sidebar prefix '{prefix}' does not match any document or directory under {}", .docs_root.display())]
    UnresolvedPrefix { prefix: String, docs_root: PathBuf },

    #[error("Theme option '{0}' is reserved for generated navigation")]
    ReservedThemeKey(String),

    #[error("Failed to serialize site config: {0}")]
    SerializeError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}
