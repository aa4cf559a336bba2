//! Configuration check command.

use std::path::Path;

use anyhow::Result;
use docnav_site::{SiteConfig, SiteResolver};

/// Run the check command.
pub async fn run(config_path: &Path, profile: Option<&str>, deny_warnings: bool) -> Result<()> {
    let config = SiteConfig::load(config_path)?;
    let site = SiteResolver::new(&config).profile(profile).resolve()?;

    for diagnostic in &site.diagnostics {
        tracing::warn!("{}", diagnostic);
    }

    tracing::info!(
        "{} nav entries, {} sidebar prefixes, {} links, {} warnings",
        site.nav.len(),
        site.sidebar.len(),
        site.link_count(),
        site.diagnostics.len()
    );

    if deny_warnings && !site.diagnostics.is_empty() {
        anyhow::bail!(
            "{} warnings reported (--deny-warnings)",
            site.diagnostics.len()
        );
    }

    Ok(())
}
