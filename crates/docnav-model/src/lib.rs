//! Navigation, sidebar and theme configuration model.
//!
//! This crate defines the data shapes a documentation site hands to its
//! theme: header navigation entries, a sidebar map keyed by URL path
//! prefix, and the theme options block. Deserializing any of these types
//! validates its structure, so a value that exists is well-formed.

pub mod error;
pub mod lint;
pub mod nav;
pub mod sidebar;
pub mod theme;

pub use error::ModelError;
pub use lint::{lint_nav, lint_sidebar, Diagnostic};
pub use nav::{NavEntry, NavGroup, NavLink};
pub use sidebar::{SidebarGroup, SidebarItem, SidebarLink, SidebarMap, SidebarMatch};
pub use theme::{ThemeConfig, VisitorConfig};
