//! Theme options handed to the site theme alongside navigation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Theme configuration block.
///
/// `visitor` is the one option this crate knows about; every other key is
/// carried through `extra` unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Visitor counter badge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visitor: Option<VisitorConfig>,

    /// Remaining theme options, passed to the theme as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Visitor counter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorConfig {
    /// Badge identifier registered with the counter service
    #[serde(rename = "badgeId", alias = "badge_id")]
    pub badge_id: String,
}

impl ThemeConfig {
    /// Badge identifier, if a visitor counter is configured.
    pub fn badge_id(&self) -> Option<&str> {
        self.visitor.as_ref().map(|v| v.badge_id.as_str())
    }
}
