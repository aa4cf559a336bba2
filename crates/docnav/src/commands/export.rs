//! Site config export command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use docnav_site::{SiteConfig, SiteExporter};

/// Run the export command.
pub async fn run(
    config_path: &Path,
    profile: Option<&str>,
    output: Option<PathBuf>,
    pretty: Option<bool>,
) -> Result<()> {
    tracing::info!("Exporting site config...");

    let config = SiteConfig::load(config_path)?;

    let result = SiteExporter::new(config)
        .profile(profile.map(str::to_string))
        .output(output)
        .pretty(pretty)
        .export()
        .await?;

    for warning in &result.warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!(
        "Exported {} nav entries and {} sidebar prefixes ({} links) in {}ms",
        result.nav_entries,
        result.sidebar_prefixes,
        result.links,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_path.display());

    Ok(())
}
