//! Configuration file structure (docs.toml).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use docnav_model::{ModelError, NavEntry, NavLink, SidebarItem, ThemeConfig, VisitorConfig};

use crate::error::SiteError;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "docs.toml";

/// Theme keys filled in from `[nav]` and `[sidebar]`.
const RESERVED_THEME_KEYS: &[&str] = &["nav", "sidebar"];

/// Root of `docs.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,

    #[serde(default)]
    pub nav: NavSection,

    /// Sidebar groups keyed by path prefix
    #[serde(default)]
    pub sidebar: BTreeMap<String, Vec<GroupSpec>>,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub export: ExportSection,

    /// Named override sets, selected with `--profile`
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,

    /// Directory containing the config file (set after loading)
    #[serde(skip)]
    pub project_root: PathBuf,

    /// Path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[site]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Markdown source directory, relative to the config file
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    /// Base URL the site is deployed under
    #[serde(default = "default_base")]
    pub base: String,

    /// Reject sidebar prefixes that match no document
    #[serde(default = "default_true")]
    pub strict_prefixes: bool,

    /// Warn about internal links that match no document
    #[serde(default = "default_true")]
    pub check_links: bool,
}

/// `[nav]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavSection {
    /// Leading "home" entry
    #[serde(default)]
    pub home: Option<NavLink>,

    /// Remaining entries in presentation order
    #[serde(default)]
    pub entries: Vec<NavEntry>,
}

/// A top-level sidebar group as written in `docs.toml`.
///
/// Static `items` come first, followed by the links generated from the
/// `generate` directory, if any.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawGroupSpec")]
pub struct GroupSpec {
    pub text: String,
    pub collapsed: bool,
    pub items: Vec<SidebarItem>,
    /// Project-relative directory to scan for pages
    pub generate: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGroupSpec {
    text: String,
    #[serde(default)]
    collapsed: bool,
    #[serde(default)]
    items: Vec<SidebarItem>,
    #[serde(default)]
    generate: Option<String>,
}

impl TryFrom<RawGroupSpec> for GroupSpec {
    type Error = ModelError;

    fn try_from(raw: RawGroupSpec) -> Result<Self, Self::Error> {
        if raw.text.trim().is_empty() {
            return Err(ModelError::EmptyText);
        }
        let generate = raw.generate.filter(|dir| !dir.trim().is_empty());
        if raw.items.is_empty() && generate.is_none() {
            return Err(ModelError::EmptyGroup(raw.text));
        }
        Ok(Self {
            text: raw.text,
            collapsed: raw.collapsed,
            items: raw.items,
            generate,
        })
    }
}

/// `[export]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportSection {
    /// Output file, relative to the config file
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_true")]
    pub pretty: bool,
}

/// `[profiles.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileConfig {
    /// Replaces `nav.home`
    #[serde(default)]
    pub home: Option<NavLink>,

    /// Replaces individual sidebar prefixes
    #[serde(default)]
    pub sidebar: BTreeMap<String, Vec<GroupSpec>>,

    /// Replaces `theme.visitor`
    #[serde(default)]
    pub visitor: Option<VisitorConfig>,
}

fn default_title() -> String {
    "Documentation".to_string()
}
fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_base() -> String {
    "/".to_string()
}
fn default_output() -> String {
    "dist/site-config.json".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: None,
            docs_dir: default_docs_dir(),
            base: default_base(),
            strict_prefixes: true,
            check_links: true,
        }
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output: default_output(),
            pretty: true,
        }
    }
}

impl SiteConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        if !path.exists() {
            return Err(SiteError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| SiteError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let project_root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut config = Self::parse(&content, &path.display().to_string(), project_root)?;
        config.config_path = Some(path.to_path_buf());

        tracing::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Parse and validate config text. Relative paths resolve against `project_root`.
    pub fn from_toml(source: &str, project_root: impl Into<PathBuf>) -> Result<Self, SiteError> {
        Self::parse(source, DEFAULT_CONFIG_FILE, project_root.into())
    }

    fn parse(source: &str, origin: &str, project_root: PathBuf) -> Result<Self, SiteError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(source);
        let mut config: SiteConfig =
            serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
                ignored.push(path.to_string());
            })
            .map_err(|e| SiteError::ParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        for key in &ignored {
            tracing::warn!("Unknown key '{}' in {} ignored", key, origin);
        }

        config.project_root = project_root;
        config.validate()?;

        Ok(config)
    }

    /// Structural checks that span sections.
    fn validate(&self) -> Result<(), SiteError> {
        let profile_sidebars = self
            .profiles
            .iter()
            .map(|(name, profile)| (format!("profiles.{}.sidebar", name), &profile.sidebar));

        for (location, sidebar) in
            std::iter::once(("sidebar".to_string(), &self.sidebar)).chain(profile_sidebars)
        {
            if let Some(prefix) = sidebar.keys().find(|p| !p.starts_with('/')) {
                return Err(SiteError::Model {
                    location,
                    source: ModelError::InvalidPrefix(prefix.clone()),
                });
            }
        }

        if let Some(key) = RESERVED_THEME_KEYS
            .iter()
            .find(|key| self.theme.extra.contains_key(**key))
        {
            return Err(SiteError::ReservedThemeKey(key.to_string()));
        }

        Ok(())
    }

    /// Absolute (or project-relative) docs source directory.
    pub fn docs_root(&self) -> PathBuf {
        self.project_root.join(&self.site.docs_dir)
    }

    /// Export target from `[export]`, resolved against the project root.
    pub fn export_path(&self) -> PathBuf {
        self.project_root.join(&self.export.output)
    }

    /// Names of the configured profiles, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
[site]
title = "BTREE"
docs_dir = "docs"

[nav]
home = { text = "导航", link = "/nav/" }
entries = [
  { text = "GitHub", items = [{ text = "BTREE", link = "https://github.com/ndlxp2008" }] },
  { text = "BTREE", link = "/info" },
]

[[sidebar."/info"]]
text = "案例bbb"
collapsed = true
items = [
  { text = "Markdown案例", link = "/test" },
  { text = "Runtime API Examples", link = "/test" },
]

[[sidebar."/test"]]
text = "案例aaaa"
collapsed = true
generate = "/docs/info/"

[theme.visitor]
badge_id = "ndlxp2008.btree"

[profiles.github]
home = { text = "主页", link = "https://github.com/ndlxp2008" }
"#;

    #[test]
    fn parses_sample_config() {
        let config = SiteConfig::from_toml(SAMPLE, ".").unwrap();

        assert_eq!(config.site.title, "BTREE");
        assert_eq!(config.nav.home.as_ref().unwrap().link, "/nav/");
        assert_eq!(config.nav.entries.len(), 2);
        assert_eq!(config.sidebar.len(), 2);
        assert_eq!(
            config.sidebar["/test"][0].generate.as_deref(),
            Some("/docs/info/")
        );
        assert!(config.sidebar["/test"][0].items.is_empty());
        assert_eq!(config.theme.badge_id(), Some("ndlxp2008.btree"));
        assert_eq!(config.profile_names(), vec!["github"]);
    }

    #[test]
    fn applies_section_defaults() {
        let config = SiteConfig::from_toml("", "/project").unwrap();

        assert_eq!(config.site.title, "Documentation");
        assert_eq!(config.site.base, "/");
        assert!(config.site.strict_prefixes);
        assert!(config.nav.entries.is_empty());
        assert!(config.theme.visitor.is_none());
        assert_eq!(config.docs_root(), PathBuf::from("/project/docs"));
        assert_eq!(
            config.export_path(),
            PathBuf::from("/project/dist/site-config.json")
        );
    }

    #[test]
    fn rejects_group_without_items_or_generate() {
        let err = SiteConfig::from_toml(
            r#"
[[sidebar."/info"]]
text = "Nothing"
"#,
            ".",
        )
        .unwrap_err();

        assert!(matches!(err, SiteError::ParseError { .. }));
        assert!(err.to_string().contains("Nothing"));
    }

    #[test]
    fn rejects_malformed_nav_entry() {
        let err = SiteConfig::from_toml(
            r#"
[nav]
entries = [{ text = "Broken" }]
"#,
            ".",
        )
        .unwrap_err();

        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn rejects_prefix_without_slash() {
        let err = SiteConfig::from_toml(
            r#"
[[sidebar."info"]]
text = "A"
items = [{ text = "B", link = "/b" }]
"#,
            ".",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SiteError::Model {
                source: ModelError::InvalidPrefix(_),
                ..
            }
        ));
    }

    #[test]
    fn rejects_profile_prefix_without_slash() {
        let err = SiteConfig::from_toml(
            r#"
[[profiles.preview.sidebar."guide"]]
text = "A"
items = [{ text = "B", link = "/b" }]
"#,
            ".",
        )
        .unwrap_err();

        assert!(err.to_string().contains("profiles.preview.sidebar"));
    }

    #[test]
    fn rejects_reserved_theme_keys() {
        let err = SiteConfig::from_toml("[theme]\nnav = []\n", ".").unwrap_err();

        assert!(matches!(err, SiteError::ReservedThemeKey(key) if key == "nav"));
    }

    #[test]
    fn tolerates_unknown_section_keys() {
        let config = SiteConfig::from_toml("[site]\ntitle = \"X\"\nthemeColor = \"red\"\n", ".")
            .unwrap();

        assert_eq!(config.site.title, "X");
    }

    #[test]
    fn load_reports_missing_file() {
        let temp = tempdir().unwrap();

        let err = SiteConfig::load(&temp.path().join("docs.toml")).unwrap_err();

        assert!(matches!(err, SiteError::NotFound(_)));
        assert!(err.to_string().contains("docnav init"));
    }

    #[test]
    fn load_sets_project_root() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("docs.toml");
        fs::write(&path, SAMPLE).unwrap();

        let config = SiteConfig::load(&path).unwrap();

        assert_eq!(config.project_root, temp.path());
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }
}
