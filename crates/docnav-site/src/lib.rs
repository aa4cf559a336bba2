//! Site navigation configuration for documentation sites.
//!
//! Loads `docs.toml`, applies a named profile, expands generated sidebar
//! sections and exports the result as the JSON object the site theme reads.

pub mod config;
pub mod error;
pub mod export;
pub mod links;
pub mod resolver;

pub use config::{
    ExportSection, GroupSpec, NavSection, ProfileConfig, SiteConfig, SiteSection,
    DEFAULT_CONFIG_FILE,
};
pub use error::SiteError;
pub use export::{ExportResult, SiteExporter};
pub use resolver::{ResolvedSite, SiteResolver};
