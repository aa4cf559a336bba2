//! Initialize navigation config in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing docnav...");

    let project_root = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::create_dir_all(project_root).context("Failed to create project directory")?;
    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    for (relative, content) in SAMPLE_PAGES {
        let path = project_root.join(relative);
        if path.exists() && !yes {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", relative))?;
        tracing::info!("Created {}", relative);
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'docnav check' to validate, then 'docnav export' to write the site config.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# docnav configuration

[site]
# Site title
title = "BTREE"

# Markdown source directory
docs_dir = "docs"

# Base URL (for deployment)
base = "/"

[nav]
# First header entry
home = { text = "导航", link = "/nav/" }

# Remaining header entries: links, or dropdowns with `items`
entries = [
  { text = "GitHub", items = [{ text = "BTREE", link = "https://github.com/ndlxp2008" }] },
  { text = "BTREE", link = "/info" },
]

# Sidebar groups shown on pages under each path prefix
[[sidebar."/info"]]
text = "案例bbb"
collapsed = true
items = [
  { text = "Markdown案例", link = "/info/markdown-examples" },
  { text = "Runtime API Examples", link = "/info/api-examples" },
]

# `generate` lists every page in a directory
[[sidebar."/test"]]
text = "案例aaaa"
collapsed = true
generate = "/docs/info/"

# Visitor counter badge
# [theme.visitor]
# badge_id = "your-badge-id"

[export]
# Where `docnav export` writes the resolved config
output = "dist/site-config.json"

# Alternative home link, selected with --profile github
[profiles.github]
home = { text = "主页", link = "https://github.com/ndlxp2008" }
"#;

const SAMPLE_PAGES: &[(&str, &str)] = &[
    ("docs/index.md", "# BTREE\n\nWelcome.\n"),
    ("docs/nav/index.md", "# 导航\n"),
    ("docs/info.md", "# BTREE\n"),
    ("docs/test.md", "# 案例\n"),
    (
        "docs/info/markdown-examples.md",
        "---\ntitle: Markdown案例\norder: 1\n---\n\n# Markdown Extension Examples\n",
    ),
    (
        "docs/info/api-examples.md",
        "---\norder: 2\n---\n\n# Runtime API Examples\n",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_site::{SiteConfig, SiteResolver};
    use tempfile::tempdir;

    #[tokio::test]
    async fn scaffold_resolves_without_warnings() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("docs.toml");

        run(&config_path, false).await.unwrap();

        let config = SiteConfig::load(&config_path).unwrap();
        let site = SiteResolver::new(&config).resolve().unwrap();

        assert!(site.diagnostics.is_empty(), "{:?}", site.diagnostics);
        assert_eq!(site.nav.len(), 3);
        assert_eq!(site.sidebar.get("/test").unwrap()[0].items.len(), 2);
    }

    #[tokio::test]
    async fn keeps_existing_config_without_yes() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("docs.toml");
        fs::write(&config_path, "# mine\n").unwrap();

        run(&config_path, false).await.unwrap();

        assert_eq!(fs::read_to_string(&config_path).unwrap(), "# mine\n");
        assert!(!temp.path().join("docs/index.md").exists());
    }
}
