//! Frontmatter extraction and parsing.

use serde::{Deserialize, Deserializer};

/// Sidebar-relevant fields from a page's frontmatter.
///
/// Other keys (layout, outline, `sidebar`, ...) belong to the theme and
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PageMeta {
    /// Sidebar label override. Numbers and booleans are taken as text.
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,

    /// Position in the generated sidebar (lower = first)
    #[serde(default)]
    pub order: Option<i32>,

    /// Leave the page out of generated sidebar groups
    #[serde(default, rename = "sidebar_exclude")]
    pub exclude: bool,
}

/// Accept any YAML scalar as text; sequences, maps and null become `None`.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

/// Extract frontmatter from markdown content.
///
/// The block opens with a `---` line at the start of the file and closes
/// at the next line that is exactly `---`. Returns the parsed frontmatter
/// and the content after the block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<PageMeta>, &str), FrontmatterError> {
    let Some(block) = strip_fence(source.trim_start()) else {
        return Ok((None, source));
    };

    let (yaml, remaining) = split_at_fence(block).ok_or(FrontmatterError::Unclosed)?;

    let meta = if yaml.trim().is_empty() {
        PageMeta::default()
    } else {
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    Ok((Some(meta), remaining.trim_start()))
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Content after the opening fence line, if `source` starts with one.
fn strip_fence(source: &str) -> Option<&str> {
    let (first, rest) = source.split_once('\n').unwrap_or((source, ""));
    is_fence(first).then_some(rest)
}

/// Split a block at its closing fence line into (yaml, remaining).
fn split_at_fence(block: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in block.split_inclusive('\n') {
        if is_fence(line) {
            return Some((&block[..offset], &block[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_valid_frontmatter() {
        let source = r#"---
title: Markdown案例
order: 2
layout: doc
---

# Markdown Extension Examples
"#;

        let (meta, content) = extract_frontmatter(source).unwrap();
        let meta = meta.unwrap();

        assert_eq!(meta.title.as_deref(), Some("Markdown案例"));
        assert_eq!(meta.order, Some(2));
        assert!(!meta.exclude);
        assert!(content.starts_with("# Markdown Extension Examples"));
    }

    #[test]
    fn reads_sidebar_exclusion() {
        let (meta, _) = extract_frontmatter("---\nsidebar_exclude: true\n---\nbody").unwrap();

        assert!(meta.unwrap().exclude);
    }

    #[test]
    fn theme_sidebar_key_does_not_exclude() {
        let (meta, _) = extract_frontmatter("---\nsidebar: false\n---\nbody").unwrap();

        assert_eq!(meta, Some(PageMeta::default()));
    }

    #[test]
    fn accepts_scalar_titles() {
        let (meta, _) = extract_frontmatter("---\ntitle: 2024\norder: 3\n---\n").unwrap();
        let meta = meta.unwrap();

        assert_eq!(meta.title.as_deref(), Some("2024"));
        assert_eq!(meta.order, Some(3));
    }

    #[test]
    fn ignores_structured_title_but_keeps_order() {
        let (meta, _) = extract_frontmatter("---\ntitle: [a, b]\norder: 3\n---\n").unwrap();
        let meta = meta.unwrap();

        assert_eq!(meta.title, None);
        assert_eq!(meta.order, Some(3));
    }

    #[test]
    fn closing_fence_must_be_a_whole_line() {
        let result = extract_frontmatter("---\ntitle: Setup\n----\n# Body");

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn handles_crlf_and_fence_at_end_of_input() {
        let (meta, content) =
            extract_frontmatter("---\r\ntitle: Windows\r\n---\r\n# Body").unwrap();
        assert_eq!(meta.unwrap().title.as_deref(), Some("Windows"));
        assert_eq!(content, "# Body");

        let (meta, content) = extract_frontmatter("---\ntitle: Only\n---").unwrap();
        assert_eq!(meta.unwrap().title.as_deref(), Some("Only"));
        assert_eq!(content, "");
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter here.";

        let (meta, content) = extract_frontmatter(source).unwrap();

        assert!(meta.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn handles_empty_frontmatter() {
        let (meta, content) = extract_frontmatter("---\n---\n# Title").unwrap();

        assert_eq!(meta, Some(PageMeta::default()));
        assert_eq!(content, "# Title");
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let result = extract_frontmatter("---\ntitle: Test\n# No closing");

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let result = extract_frontmatter("---\ntitle: [invalid yaml\n---\n");

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }
}
