//! Resolving a loaded config into the navigation a theme consumes.

use std::collections::BTreeMap;

use serde::Serialize;

use docnav_model::{
    lint_nav, lint_sidebar, Diagnostic, NavEntry, SidebarGroup, SidebarItem, SidebarMap,
    SidebarMatch, ThemeConfig,
};
use docnav_scan::SidebarScanner;

use crate::config::{GroupSpec, ProfileConfig, SiteConfig};
use crate::error::SiteError;
use crate::links::{is_external, prefix_resolves, resolve_document};

/// Fully resolved site navigation.
#[derive(Debug, Clone)]
pub struct ResolvedSite {
    pub title: String,
    pub description: Option<String>,
    pub base: String,
    /// Header navigation, home entry first
    pub nav: Vec<NavEntry>,
    /// Sidebar with generated sections expanded
    pub sidebar: SidebarMap,
    pub theme: ThemeConfig,
    /// Profile the site was resolved with
    pub profile: Option<String>,
    /// Authoring warnings found during resolution
    pub diagnostics: Vec<Diagnostic>,
}

/// JSON shape handed to the site framework.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HostConfig<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    base: &'a str,
    theme_config: HostThemeConfig<'a>,
}

#[derive(Serialize)]
struct HostThemeConfig<'a> {
    nav: &'a [NavEntry],
    sidebar: &'a SidebarMap,
    #[serde(flatten)]
    theme: &'a ThemeConfig,
}

impl ResolvedSite {
    /// Sidebar groups shown on a page.
    pub fn sidebar_for(&self, path: &str) -> Option<SidebarMatch<'_>> {
        self.sidebar.resolve(path)
    }

    /// Number of links across the nav and sidebar.
    pub fn link_count(&self) -> usize {
        let mut links = Vec::new();
        for entry in &self.nav {
            entry.collect_links(&mut links);
        }
        links.len() + self.sidebar.link_count()
    }

    /// Serialize in the framework's config shape.
    pub fn to_json(&self, pretty: bool) -> Result<String, SiteError> {
        let host = HostConfig {
            title: &self.title,
            description: self.description.as_deref(),
            base: &self.base,
            theme_config: HostThemeConfig {
                nav: &self.nav,
                sidebar: &self.sidebar,
                theme: &self.theme,
            },
        };

        let json = if pretty {
            serde_json::to_string_pretty(&host)
        } else {
            serde_json::to_string(&host)
        };

        json.map_err(|e| SiteError::SerializeError(e.to_string()))
    }
}

/// Builds a [`ResolvedSite`] from a [`SiteConfig`].
pub struct SiteResolver<'a> {
    config: &'a SiteConfig,
    profile: Option<String>,
    scanner: SidebarScanner,
}

impl<'a> SiteResolver<'a> {
    /// Create a resolver for the base configuration.
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            scanner: SidebarScanner::new(&config.project_root, config.docs_root()),
            config,
            profile: None,
        }
    }

    /// Select a named profile to apply over the base configuration.
    pub fn profile(mut self, name: Option<&str>) -> Self {
        self.profile = name.map(str::to_string);
        self
    }

    /// Resolve navigation and sidebar, expanding generated groups.
    pub fn resolve(&self) -> Result<ResolvedSite, SiteError> {
        let profile = self.selected_profile()?;

        let nav = self.resolve_nav(profile);
        let sidebar = self.resolve_sidebar(profile)?;

        let mut theme = self.config.theme.clone();
        if let Some(visitor) = profile.and_then(|p| p.visitor.clone()) {
            theme.visitor = Some(visitor);
        }

        let mut site = ResolvedSite {
            title: self.config.site.title.clone(),
            description: self.config.site.description.clone(),
            base: self.config.site.base.clone(),
            nav,
            sidebar,
            theme,
            profile: self.profile.clone(),
            diagnostics: Vec::new(),
        };
        site.diagnostics = self.lint(&site);

        tracing::info!(
            "Resolved {} nav entries and {} sidebar prefixes{}",
            site.nav.len(),
            site.sidebar.len(),
            self.profile
                .as_deref()
                .map(|p| format!(" (profile '{}')", p))
                .unwrap_or_default()
        );

        Ok(site)
    }

    fn selected_profile(&self) -> Result<Option<&'a ProfileConfig>, SiteError> {
        let Some(name) = self.profile.as_deref() else {
            return Ok(None);
        };

        self.config
            .profiles
            .get(name)
            .map(Some)
            .ok_or_else(|| SiteError::UnknownProfile {
                name: name.to_string(),
                available: match self.config.profile_names() {
                    names if names.is_empty() => "none".to_string(),
                    names => names.join(", "),
                },
            })
    }

    fn resolve_nav(&self, profile: Option<&ProfileConfig>) -> Vec<NavEntry> {
        let home = profile
            .and_then(|p| p.home.as_ref())
            .or(self.config.nav.home.as_ref());

        home.cloned()
            .map(NavEntry::Link)
            .into_iter()
            .chain(self.config.nav.entries.iter().cloned())
            .collect()
    }

    fn resolve_sidebar(&self, profile: Option<&ProfileConfig>) -> Result<SidebarMap, SiteError> {
        let mut specs: BTreeMap<&str, &[GroupSpec]> = self
            .config
            .sidebar
            .iter()
            .map(|(prefix, groups)| (prefix.as_str(), groups.as_slice()))
            .collect();

        if let Some(profile) = profile {
            for (prefix, groups) in &profile.sidebar {
                specs.insert(prefix.as_str(), groups.as_slice());
            }
        }

        let docs_root = self.config.docs_root();
        let mut sidebar = SidebarMap::new();

        for (prefix, groups) in specs {
            if self.config.site.strict_prefixes
                && !prefix_resolves(&docs_root, &self.config.site.base, prefix)
            {
                return Err(SiteError::UnresolvedPrefix {
                    prefix: prefix.to_string(),
                    docs_root,
                });
            }

            let groups = groups.iter().map(|spec| self.build_group(spec)).collect();
            sidebar
                .insert(prefix, groups)
                .map_err(|source| SiteError::Model {
                    location: "sidebar".to_string(),
                    source,
                })?;
        }

        Ok(sidebar)
    }

    fn build_group(&self, spec: &GroupSpec) -> SidebarGroup {
        let mut items = spec.items.clone();

        if let Some(dir) = &spec.generate {
            let generated = self.scanner.scan(dir);
            tracing::debug!(
                "Generated {} links for group '{}' from {}",
                generated.len(),
                spec.text,
                dir
            );
            items.extend(generated.into_iter().map(SidebarItem::Link));
        }

        SidebarGroup::new(spec.text.clone(), spec.collapsed, items)
    }

    fn lint(&self, site: &ResolvedSite) -> Vec<Diagnostic> {
        let mut diagnostics = lint_nav(&site.nav);
        diagnostics.extend(lint_sidebar(&site.sidebar));

        if self.config.site.check_links {
            let docs_root = self.config.docs_root();
            let base = &self.config.site.base;

            let mut nav_links = Vec::new();
            for entry in &site.nav {
                entry.collect_links(&mut nav_links);
            }
            let sidebar_links = site.sidebar.iter().map(|(prefix, groups)| {
                let mut links = Vec::new();
                for group in groups {
                    group.collect_links(&mut links);
                }
                (format!("sidebar[\"{}\"]", prefix), links)
            });

            let all_links = std::iter::once(("nav".to_string(), nav_links)).chain(sidebar_links);

            for (location, links) in all_links {
                let mut reported = Vec::new();
                for link in links {
                    if is_external(link) || reported.contains(&link) {
                        continue;
                    }
                    if resolve_document(&docs_root, base, link).is_none() {
                        reported.push(link);
                        diagnostics.push(Diagnostic::new(
                            location.clone(),
                            format!("link '{}' does not match any document", link),
                        ));
                    }
                }
            }
        }

        diagnostics
    }
}
