//! Sidebar generation from a directory of markdown documents.
//!
//! Scans one directory, reads each page's YAML frontmatter and first
//! heading for a title, and produces ordered sidebar links.

pub mod frontmatter;
pub mod scanner;
pub mod title;

pub use frontmatter::{extract_frontmatter, FrontmatterError, PageMeta};
pub use scanner::{generate_sidebar, ScanError, ScanOptions, ScannedPage, SidebarScanner};
pub use title::{first_heading, title_from_stem};
