//! Structural errors raised while building model values.

/// Errors that can occur when a navigation or sidebar value is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Entry has an empty `text` label")]
    EmptyText,

    #[error("Entry '{0}' has an empty `link`")]
    EmptyLink(String),

    #[error("Entry '{0}' has both `link` and `items` - use one or the other")]
    Ambiguous(String),

    #[error("Entry '{0}' needs either a `link` or a non-empty `items` list")]
    MissingTarget(String),

    #[error("Group '{0}' has an empty `items` list")]
    EmptyGroup(String),

    #[error("Entry '{0}' must be a direct link, not a group")]
    NotALink(String),

    #[error("Sidebar entry '{0}' must be a group with `items`")]
    NotAGroup(String),

    #[error("Sidebar entry '{0}' sets `collapsed` but is a link, not a group")]
    CollapsedLink(String),

    #[error("Sidebar prefix '{0}' must start with '/'")]
    InvalidPrefix(String),
}
