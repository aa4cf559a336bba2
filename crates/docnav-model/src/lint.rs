//! Non-fatal authoring checks over navigation and sidebar values.

use std::collections::HashSet;
use std::fmt;

use crate::nav::NavEntry;
use crate::sidebar::SidebarMap;

/// A warning about a configuration value that loads but is probably wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the problem is, e.g. `sidebar["/info"]`
    pub location: String,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Report duplicate link targets in the header navigation.
pub fn lint_nav(nav: &[NavEntry]) -> Vec<Diagnostic> {
    let mut links = Vec::new();
    for entry in nav {
        entry.collect_links(&mut links);
    }

    duplicates(&links)
        .into_iter()
        .map(|link| Diagnostic::new("nav", format!("link '{}' appears more than once", link)))
        .collect()
}

/// Report duplicate links within each prefix and groups with no items.
pub fn lint_sidebar(sidebar: &SidebarMap) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (prefix, groups) in sidebar.iter() {
        let location = format!("sidebar[\"{}\"]", prefix);
        let mut links = Vec::new();

        for group in groups {
            let mut nested = Vec::new();
            group.walk_groups(&mut nested);
            for empty in nested.iter().filter(|g| g.items.is_empty()) {
                diagnostics.push(Diagnostic::new(
                    location.clone(),
                    format!("group '{}' has no items", empty.text),
                ));
            }
            group.collect_links(&mut links);
        }

        for link in duplicates(&links) {
            diagnostics.push(Diagnostic::new(
                location.clone(),
                format!("link '{}' appears more than once", link),
            ));
        }
    }

    diagnostics
}

/// Values seen more than once, each reported once, in first-repeat order.
fn duplicates<'a>(links: &[&'a str]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut out = Vec::new();

    for &link in links {
        if !seen.insert(link) && reported.insert(link) {
            out.push(link);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidebar::{SidebarGroup, SidebarLink};
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_nav_has_no_diagnostics() {
        let nav = vec![
            NavEntry::link("导航", "/nav/").unwrap(),
            NavEntry::link("BTREE", "/info").unwrap(),
        ];

        assert!(lint_nav(&nav).is_empty());
    }

    #[test]
    fn reports_duplicate_nav_links_once() {
        let nav = vec![
            NavEntry::link("A", "/info").unwrap(),
            NavEntry::group(
                "More",
                vec![
                    NavEntry::link("B", "/info").unwrap(),
                    NavEntry::link("C", "/info").unwrap(),
                ],
            )
            .unwrap(),
        ];

        let diagnostics = lint_nav(&nav);

        assert_eq!(
            diagnostics,
            vec![Diagnostic::new("nav", "link '/info' appears more than once")]
        );
    }

    #[test]
    fn reports_duplicate_sidebar_links_per_prefix() {
        let mut sidebar = SidebarMap::new();
        sidebar
            .insert(
                "/info",
                vec![SidebarGroup::new(
                    "案例bbb",
                    true,
                    vec![
                        SidebarLink::new("Markdown案例", "/test").unwrap().into(),
                        SidebarLink::new("Runtime API Examples", "/test").unwrap().into(),
                    ],
                )],
            )
            .unwrap();
        sidebar
            .insert(
                "/other",
                vec![SidebarGroup::new(
                    "Other",
                    false,
                    vec![SidebarLink::new("Test", "/test").unwrap().into()],
                )],
            )
            .unwrap();

        let diagnostics = lint_sidebar(&sidebar);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location, "sidebar[\"/info\"]");
        assert!(diagnostics[0].message.contains("/test"));
    }

    #[test]
    fn reports_empty_groups() {
        let mut sidebar = SidebarMap::new();
        sidebar
            .insert("/test", vec![SidebarGroup::new("案例aaaa", true, vec![])])
            .unwrap();

        let diagnostics = lint_sidebar(&sidebar);

        assert_eq!(
            diagnostics[0].to_string(),
            "sidebar[\"/test\"]: group '案例aaaa' has no items"
        );
    }
}
