//! Sidebar groups and the prefix-keyed sidebar map.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A leaf sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarLink {
    /// Display label
    pub text: String,
    /// Site-relative path or external URL
    pub link: String,
}

/// A collapsible, labeled cluster of sidebar entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSidebarItem", into = "RawSidebarItem")]
pub struct SidebarGroup {
    /// Display label
    pub text: String,
    /// Initial expand/collapse state
    pub collapsed: bool,
    /// Entries in presentation order
    pub items: Vec<SidebarItem>,
}

/// An entry inside a sidebar group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSidebarItem", into = "RawSidebarItem")]
pub enum SidebarItem {
    Link(SidebarLink),
    Group(SidebarGroup),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSidebarItem {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    collapsed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<SidebarItem>>,
}

impl SidebarLink {
    /// Create a link, rejecting an empty label or target.
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Result<Self, ModelError> {
        let text = text.into();
        let link = link.into();
        if text.trim().is_empty() {
            return Err(ModelError::EmptyText);
        }
        if link.trim().is_empty() {
            return Err(ModelError::EmptyLink(text));
        }
        Ok(Self { text, link })
    }
}

impl SidebarGroup {
    /// Create a group. An empty `items` list is allowed, as it is when
    /// deserializing; the linter reports it.
    pub fn new(text: impl Into<String>, collapsed: bool, items: Vec<SidebarItem>) -> Self {
        Self {
            text: text.into(),
            collapsed,
            items,
        }
    }

    /// Collect every link target in this group, depth-first.
    pub fn collect_links<'a>(&'a self, out: &mut Vec<&'a str>) {
        for item in &self.items {
            match item {
                SidebarItem::Link(link) => out.push(&link.link),
                SidebarItem::Group(group) => group.collect_links(out),
            }
        }
    }

    /// Iterate over nested groups (including this one), depth-first.
    pub fn walk_groups<'a>(&'a self, out: &mut Vec<&'a SidebarGroup>) {
        out.push(self);
        for item in &self.items {
            if let SidebarItem::Group(group) = item {
                group.walk_groups(out);
            }
        }
    }
}

impl SidebarItem {
    pub fn text(&self) -> &str {
        match self {
            SidebarItem::Link(link) => &link.text,
            SidebarItem::Group(group) => &group.text,
        }
    }
}

impl From<SidebarLink> for SidebarItem {
    fn from(link: SidebarLink) -> Self {
        SidebarItem::Link(link)
    }
}

impl From<SidebarGroup> for SidebarItem {
    fn from(group: SidebarGroup) -> Self {
        SidebarItem::Group(group)
    }
}

impl TryFrom<RawSidebarItem> for SidebarItem {
    type Error = ModelError;

    fn try_from(raw: RawSidebarItem) -> Result<Self, Self::Error> {
        let RawSidebarItem {
            text,
            link,
            collapsed,
            items,
        } = raw;

        if text.trim().is_empty() {
            return Err(ModelError::EmptyText);
        }

        match (link, items) {
            (Some(_), Some(_)) => Err(ModelError::Ambiguous(text)),
            (None, None) => Err(ModelError::MissingTarget(text)),
            (Some(link), None) => {
                if collapsed.is_some() {
                    return Err(ModelError::CollapsedLink(text));
                }
                SidebarLink::new(text, link).map(SidebarItem::Link)
            }
            // Empty groups are kept; the linter reports them.
            (None, Some(items)) => Ok(SidebarItem::Group(SidebarGroup {
                text,
                collapsed: collapsed.unwrap_or(false),
                items,
            })),
        }
    }
}

impl TryFrom<RawSidebarItem> for SidebarGroup {
    type Error = ModelError;

    fn try_from(raw: RawSidebarItem) -> Result<Self, Self::Error> {
        match SidebarItem::try_from(raw)? {
            SidebarItem::Group(group) => Ok(group),
            SidebarItem::Link(link) => Err(ModelError::NotAGroup(link.text)),
        }
    }
}

impl From<SidebarItem> for RawSidebarItem {
    fn from(item: SidebarItem) -> Self {
        match item {
            SidebarItem::Link(link) => RawSidebarItem {
                text: link.text,
                link: Some(link.link),
                collapsed: None,
                items: None,
            },
            SidebarItem::Group(group) => group.into(),
        }
    }
}

impl From<SidebarGroup> for RawSidebarItem {
    fn from(group: SidebarGroup) -> Self {
        RawSidebarItem {
            text: group.text,
            link: None,
            collapsed: Some(group.collapsed),
            items: Some(group.items),
        }
    }
}

/// Sidebar groups keyed by the URL path prefix they apply to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<SidebarGroup>>",
    into = "BTreeMap<String, Vec<SidebarGroup>>"
)]
pub struct SidebarMap {
    entries: BTreeMap<String, Vec<SidebarGroup>>,
}

/// The sidebar entry selected for a page path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarMatch<'a> {
    /// Prefix key that matched
    pub prefix: &'a str,
    /// Groups shown for that prefix
    pub groups: &'a [SidebarGroup],
}

impl SidebarMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the groups for a prefix, replacing any previous value.
    pub fn insert(
        &mut self,
        prefix: impl Into<String>,
        groups: Vec<SidebarGroup>,
    ) -> Result<Option<Vec<SidebarGroup>>, ModelError> {
        let prefix = prefix.into();
        if !prefix.starts_with('/') {
            return Err(ModelError::InvalidPrefix(prefix));
        }
        Ok(self.entries.insert(prefix, groups))
    }

    pub fn get(&self, prefix: &str) -> Option<&[SidebarGroup]> {
        self.entries.get(prefix).map(Vec::as_slice)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SidebarGroup])> {
        self.entries
            .iter()
            .map(|(prefix, groups)| (prefix.as_str(), groups.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of links across every prefix.
    pub fn link_count(&self) -> usize {
        let mut links = Vec::new();
        for groups in self.entries.values() {
            for group in groups {
                group.collect_links(&mut links);
            }
        }
        links.len()
    }

    /// Find the groups shown for a page path.
    ///
    /// The longest prefix key that is a string prefix of `path` wins, so
    /// `/knowledge/foo` selects `/knowledge/` over `/`. A missing leading
    /// slash on `path` is tolerated.
    pub fn resolve(&self, path: &str) -> Option<SidebarMatch<'_>> {
        let path = with_leading_slash(path);

        self.entries
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(prefix, groups)| SidebarMatch {
                prefix: prefix.as_str(),
                groups: groups.as_slice(),
            })
    }
}

impl TryFrom<BTreeMap<String, Vec<SidebarGroup>>> for SidebarMap {
    type Error = ModelError;

    fn try_from(entries: BTreeMap<String, Vec<SidebarGroup>>) -> Result<Self, Self::Error> {
        if let Some(bad) = entries.keys().find(|prefix| !prefix.starts_with('/')) {
            return Err(ModelError::InvalidPrefix(bad.clone()));
        }
        Ok(Self { entries })
    }
}

impl From<SidebarMap> for BTreeMap<String, Vec<SidebarGroup>> {
    fn from(map: SidebarMap) -> Self {
        map.entries
    }
}

fn with_leading_slash(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Result<SidebarMap, toml::de::Error> {
        toml::from_str(source)
    }

    fn knowledge_map() -> SidebarMap {
        parse(
            r#"
[["/knowledge/"]]
text = "前端开发"
collapsed = false
items = [
  { text = "HTML", link = "/knowledge/html" },
  { text = "CSS", link = "/knowledge/css" },
]

[["/knowledge/"]]
text = "后端开发"
collapsed = true
items = [
  { text = "Rust", link = "/knowledge/rust" },
  { text = "数据库", items = [{ text = "SQLite", link = "/knowledge/db/sqlite" }] },
]

[["/"]]
text = "Home"
items = [{ text = "Start", link = "/start" }]
"#,
        )
        .unwrap()
    }

    #[test]
    fn resolves_longest_matching_prefix() {
        let map = knowledge_map();

        let found = map.resolve("/knowledge/foo").unwrap();
        assert_eq!(found.prefix, "/knowledge/");
        assert_eq!(found.groups.len(), 2);

        let root = map.resolve("/elsewhere").unwrap();
        assert_eq!(root.prefix, "/");
    }

    #[test]
    fn resolves_path_without_leading_slash() {
        let map = knowledge_map();

        assert_eq!(map.resolve("knowledge/css").unwrap().prefix, "/knowledge/");
    }

    #[test]
    fn no_match_returns_none() {
        let map = parse(
            r#"
[["/info"]]
text = "案例bbb"
items = [{ text = "Markdown案例", link = "/test" }]
"#,
        )
        .unwrap();

        assert!(map.resolve("/guide/").is_none());
    }

    #[test]
    fn collapsed_state_is_per_group() {
        let map = knowledge_map();
        let groups = map.get("/knowledge/").unwrap();

        assert_eq!(groups[0].text, "前端开发");
        assert!(!groups[0].collapsed);
        assert_eq!(groups[1].text, "后端开发");
        assert!(groups[1].collapsed);
    }

    #[test]
    fn collapsed_defaults_to_expanded() {
        let map = knowledge_map();

        assert!(!map.get("/").unwrap()[0].collapsed);
    }

    #[test]
    fn preserves_item_order() {
        let map = knowledge_map();
        let groups = map.get("/knowledge/").unwrap();

        let labels: Vec<_> = groups[1].items.iter().map(SidebarItem::text).collect();
        assert_eq!(labels, vec!["Rust", "数据库"]);

        let json = serde_json::to_value(&map).unwrap();
        let reparsed: SidebarMap = serde_json::from_value(json).unwrap();
        assert_eq!(reparsed, map);
    }

    #[test]
    fn empty_generated_group_survives_a_round_trip() {
        let mut map = SidebarMap::new();
        map.insert("/test", vec![SidebarGroup::new("案例aaaa", true, vec![])])
            .unwrap();

        let json = serde_json::to_value(&map).unwrap();
        let reparsed: SidebarMap = serde_json::from_value(json).unwrap();

        assert_eq!(reparsed, map);
    }

    #[test]
    fn accepts_empty_nested_group() {
        let map = parse(
            r#"
[["/info"]]
text = "案例bbb"
items = [{ text = "Drafts", items = [] }]
"#,
        )
        .unwrap();

        let groups = map.get("/info").unwrap();
        assert_eq!(
            groups[0].items,
            vec![SidebarItem::Group(SidebarGroup::new("Drafts", false, vec![]))]
        );
    }

    #[test]
    fn rejects_prefix_without_slash() {
        let err = parse(
            r#"
[["knowledge/"]]
text = "A"
items = [{ text = "B", link = "/b" }]
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn rejects_top_level_link() {
        let err = parse(
            r#"
[["/info"]]
text = "Loose"
link = "/loose"
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("must be a group"));
    }

    #[test]
    fn rejects_collapsed_on_link() {
        let err = parse(
            r#"
[["/info"]]
text = "Group"
items = [{ text = "Leaf", link = "/leaf", collapsed = true }]
"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("sets `collapsed`"));
    }

    #[test]
    fn insert_validates_prefix() {
        let mut map = SidebarMap::new();

        assert_eq!(
            map.insert("info", vec![]),
            Err(ModelError::InvalidPrefix("info".to_string()))
        );
        assert!(map.insert("/info", vec![]).unwrap().is_none());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn serializes_groups_with_collapsed_flag() {
        let group = SidebarGroup::new(
            "案例aaaa",
            true,
            vec![SidebarLink::new("Intro", "/info/intro").unwrap().into()],
        );

        let json = serde_json::to_value(&group).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "text": "案例aaaa",
                "collapsed": true,
                "items": [{ "text": "Intro", "link": "/info/intro" }]
            })
        );
    }

    #[test]
    fn counts_nested_links() {
        assert_eq!(knowledge_map().link_count(), 5);
    }
}
