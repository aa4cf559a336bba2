//! Writing the resolved site config for the site framework.

use std::path::PathBuf;
use std::time::Instant;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::resolver::SiteResolver;

/// Result of an export.
#[derive(Debug)]
pub struct ExportResult {
    /// Number of top-level nav entries
    pub nav_entries: usize,

    /// Number of sidebar prefixes
    pub sidebar_prefixes: usize,

    /// Links across nav and sidebar
    pub links: usize,

    /// Authoring warnings found while resolving
    pub warnings: Vec<String>,

    /// Total export time in milliseconds
    pub duration_ms: u64,

    /// File written
    pub output_path: PathBuf,
}

/// Resolves a site config and writes it as JSON.
pub struct SiteExporter {
    config: SiteConfig,
    profile: Option<String>,
    output: Option<PathBuf>,
    pretty: Option<bool>,
}

impl SiteExporter {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            profile: None,
            output: None,
            pretty: None,
        }
    }

    /// Apply a named profile.
    pub fn profile(mut self, name: Option<String>) -> Self {
        self.profile = name;
        self
    }

    /// Override `[export] output`. The path is used as given.
    pub fn output(mut self, path: Option<PathBuf>) -> Self {
        self.output = path;
        self
    }

    /// Override `[export] pretty`.
    pub fn pretty(mut self, pretty: Option<bool>) -> Self {
        self.pretty = pretty;
        self
    }

    /// Resolve the site and write the JSON file.
    pub async fn export(&self) -> Result<ExportResult, SiteError> {
        let start = Instant::now();

        let site = SiteResolver::new(&self.config)
            .profile(self.profile.as_deref())
            .resolve()?;

        let pretty = self.pretty.unwrap_or(self.config.export.pretty);
        let json = site.to_json(pretty)?;

        let output_path = self
            .output
            .clone()
            .unwrap_or_else(|| self.config.export_path());

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| SiteError::WriteError(e.to_string()))?;
            }
        }

        tokio::fs::write(&output_path, json)
            .await
            .map_err(|e| SiteError::WriteError(format!("{}: {}", output_path.display(), e)))?;

        Ok(ExportResult {
            nav_entries: site.nav.len(),
            sidebar_prefixes: site.sidebar.len(),
            links: site.link_count(),
            warnings: site.diagnostics.iter().map(ToString::to_string).collect(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_path,
        })
    }
}
