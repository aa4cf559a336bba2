//! Header navigation entries.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A top-level header navigation entry.
///
/// An entry is either a direct link or a labeled dropdown holding further
/// entries. Both forms share the `text` field; which one an entry is
/// depends on whether it carries `link` or `items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNavEntry", into = "RawNavEntry")]
pub enum NavEntry {
    Link(NavLink),
    Group(NavGroup),
}

/// A direct navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNavEntry", into = "RawNavEntry")]
pub struct NavLink {
    /// Display label
    pub text: String,
    /// Target path or URL
    pub link: String,
    /// Pattern the theme uses to highlight this entry as active
    pub active_match: Option<String>,
}

/// A dropdown group of navigation entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavGroup {
    /// Display label
    pub text: String,
    /// Entries in presentation order (never empty)
    pub items: Vec<NavEntry>,
    /// Pattern the theme uses to highlight this group as active
    pub active_match: Option<String>,
}

/// Wire shape shared by links and groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawNavEntry {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "active_match")]
    active_match: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<NavEntry>>,
}

impl NavEntry {
    /// Build a link entry, validating its fields.
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Result<Self, ModelError> {
        NavLink::new(text, link).map(NavEntry::Link)
    }

    /// Build a dropdown group, validating that it has a label and items.
    pub fn group(text: impl Into<String>, items: Vec<NavEntry>) -> Result<Self, ModelError> {
        Self::try_from(RawNavEntry {
            text: text.into(),
            link: None,
            active_match: None,
            items: Some(items),
        })
    }

    /// Display label of the entry.
    pub fn text(&self) -> &str {
        match self {
            NavEntry::Link(link) => &link.text,
            NavEntry::Group(group) => &group.text,
        }
    }

    /// Link target, if this entry is a direct link.
    pub fn target(&self) -> Option<&str> {
        match self {
            NavEntry::Link(link) => Some(&link.link),
            NavEntry::Group(_) => None,
        }
    }

    /// Child entries; empty for links.
    pub fn items(&self) -> &[NavEntry] {
        match self {
            NavEntry::Link(_) => &[],
            NavEntry::Group(group) => &group.items,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, NavEntry::Group(_))
    }

    /// Collect every link target below (and including) this entry, depth-first.
    pub fn collect_links<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            NavEntry::Link(link) => out.push(&link.link),
            NavEntry::Group(group) => {
                for item in &group.items {
                    item.collect_links(out);
                }
            }
        }
    }
}

impl NavLink {
    /// Create a link, rejecting an empty label or target.
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Result<Self, ModelError> {
        Self::try_from(RawNavEntry {
            text: text.into(),
            link: Some(link.into()),
            active_match: None,
            items: None,
        })
    }
}

impl From<NavLink> for NavEntry {
    fn from(link: NavLink) -> Self {
        NavEntry::Link(link)
    }
}

impl TryFrom<RawNavEntry> for NavEntry {
    type Error = ModelError;

    fn try_from(raw: RawNavEntry) -> Result<Self, Self::Error> {
        let RawNavEntry {
            text,
            link,
            active_match,
            items,
        } = raw;

        if text.trim().is_empty() {
            return Err(ModelError::EmptyText);
        }

        match (link, items) {
            (Some(_), Some(_)) => Err(ModelError::Ambiguous(text)),
            (None, None) => Err(ModelError::MissingTarget(text)),
            (Some(link), None) => {
                if link.trim().is_empty() {
                    return Err(ModelError::EmptyLink(text));
                }
                Ok(NavEntry::Link(NavLink {
                    text,
                    link,
                    active_match,
                }))
            }
            (None, Some(items)) => {
                if items.is_empty() {
                    return Err(ModelError::EmptyGroup(text));
                }
                Ok(NavEntry::Group(NavGroup {
                    text,
                    items,
                    active_match,
                }))
            }
        }
    }
}

impl TryFrom<RawNavEntry> for NavLink {
    type Error = ModelError;

    fn try_from(raw: RawNavEntry) -> Result<Self, Self::Error> {
        match NavEntry::try_from(raw)? {
            NavEntry::Link(link) => Ok(link),
            NavEntry::Group(group) => Err(ModelError::NotALink(group.text)),
        }
    }
}

impl From<NavEntry> for RawNavEntry {
    fn from(entry: NavEntry) -> Self {
        match entry {
            NavEntry::Link(link) => link.into(),
            NavEntry::Group(group) => RawNavEntry {
                text: group.text,
                link: None,
                active_match: group.active_match,
                items: Some(group.items),
            },
        }
    }
}

impl From<NavLink> for RawNavEntry {
    fn from(link: NavLink) -> Self {
        RawNavEntry {
            text: link.text,
            link: Some(link.link),
            active_match: link.active_match,
            items: None,
        }
    }
}
