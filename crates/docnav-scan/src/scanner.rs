//! Directory scanner producing sidebar links.

use std::cmp::Ordering;
use std::fs;
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use docnav_model::{ModelError, SidebarLink};

use crate::frontmatter::extract_frontmatter;
use crate::title::{first_heading, title_from_stem};

/// Options controlling which files a scan picks up.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// File extensions treated as documents
    pub extensions: Vec<String>,

    /// Skip `index.*` (the directory's own landing page)
    pub skip_index: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "mdx".to_string()],
            skip_index: true,
        }
    }
}

/// A document found by a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedPage {
    /// Source file path
    pub path: PathBuf,

    /// Sidebar label
    pub title: String,

    /// Site-relative link
    pub link: String,

    /// Frontmatter `order`
    pub order: Option<i32>,

    /// Numeric prefix of the file name (`01-intro` -> 1)
    pub prefix: Option<u32>,

    file_name: String,
}

impl ScannedPage {
    fn sort_cmp(&self, other: &Self) -> Ordering {
        // Explicit order first, then numbered files, then by name.
        rank(self.order)
            .cmp(&rank(other.order))
            .then_with(|| rank(self.prefix).cmp(&rank(other.prefix)))
            .then_with(|| self.file_name.cmp(&other.file_name))
    }

    /// Convert into a sidebar link, rejecting an empty label.
    pub fn into_link(self) -> Result<SidebarLink, ModelError> {
        SidebarLink::new(self.title, self.link)
    }
}

/// `Some` values sort before `None`, in ascending order.
fn rank<T: Ord + Copy>(value: Option<T>) -> (bool, Option<T>) {
    (value.is_none(), value)
}

/// Errors that can occur while scanning a directory.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to read directory {path}: {message}")]
    ReadError { path: PathBuf, message: String },
}

/// Generates sidebar links from document directories.
#[derive(Debug, Clone)]
pub struct SidebarScanner {
    project_root: PathBuf,
    docs_root: PathBuf,
    options: ScanOptions,
}

impl SidebarScanner {
    /// Create a scanner.
    ///
    /// Scan directories are resolved against `project_root`; links are
    /// made relative to `docs_root`, the site's source directory.
    pub fn new(project_root: impl Into<PathBuf>, docs_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            docs_root: docs_root.into(),
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve a project-relative directory such as `/docs/info/`.
    pub fn resolve_dir(&self, dir: &str) -> PathBuf {
        self.project_root.join(dir.trim_start_matches(['/', '\\']))
    }

    /// Scan `dir` and return its pages as sidebar links.
    ///
    /// Never fails: a missing or unreadable directory yields an empty list
    /// and a warning.
    pub fn scan(&self, dir: &str) -> Vec<SidebarLink> {
        match self.scan_pages(dir) {
            Ok(pages) => pages
                .into_iter()
                .filter_map(|page| {
                    let path = page.path.clone();
                    page.into_link()
                        .inspect_err(|e| tracing::warn!("Skipping {}: {}", path.display(), e))
                        .ok()
                })
                .collect(),
            Err(e) => {
                tracing::warn!("Sidebar scan of '{}' produced no links: {}", dir, e);
                Vec::new()
            }
        }
    }

    /// Scan `dir` and return the pages found, sorted for presentation.
    pub fn scan_pages(&self, dir: &str) -> Result<Vec<ScannedPage>, ScanError> {
        let root = self.resolve_dir(dir);

        if !root.exists() {
            return Err(ScanError::DirectoryNotFound(root));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry.map_err(|e| ScanError::ReadError {
                path: root.clone(),
                message: e.to_string(),
            })?;
            let path = entry.path();

            if path.is_file() && self.is_document(path) {
                files.push(path.to_path_buf());
            }
        }

        let mut pages: Vec<ScannedPage> = files
            .par_iter()
            .filter_map(|path| self.read_page(path))
            .collect();

        pages.sort_by(ScannedPage::sort_cmp);

        tracing::debug!("Scanned {} pages from {}", pages.len(), root.display());

        Ok(pages)
    }

    fn is_document(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !self.options.extensions.iter().any(|e| e == ext) {
            return false;
        }

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        !(self.options.skip_index && stem == "index")
    }

    /// Read one page. Returns `None` for pages opted out of the sidebar
    /// or that cannot be read.
    fn read_page(&self, path: &Path) -> Option<ScannedPage> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                return None;
            }
        };

        let (meta, body) = match extract_frontmatter(&content) {
            Ok((meta, body)) => (meta.unwrap_or_default(), body),
            Err(e) => {
                tracing::warn!("Ignoring frontmatter in {}: {}", path.display(), e);
                (Default::default(), content.as_str())
            }
        };

        if meta.exclude {
            tracing::debug!("{} excluded from the sidebar", path.display());
            return None;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        let (prefix, stem_title) = title_from_stem(&stem);

        let title = meta
            .title
            .filter(|t| !t.trim().is_empty())
            .or_else(|| first_heading(body))
            .unwrap_or(stem_title);

        Some(ScannedPage {
            path: path.to_path_buf(),
            title,
            link: self.page_link(path),
            order: meta.order,
            prefix,
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })
    }

    /// Site-relative link for a document, without its extension.
    fn page_link(&self, path: &Path) -> String {
        let relative = path
            .strip_prefix(&self.docs_root)
            .or_else(|_| path.strip_prefix(&self.project_root))
            .unwrap_or(path)
            .with_extension("");

        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        format!("/{}", segments.join("/"))
    }
}

/// Generate sidebar links for `dir` with default options.
pub fn generate_sidebar(
    project_root: impl Into<PathBuf>,
    docs_root: impl Into<PathBuf>,
    dir: &str,
) -> Vec<SidebarLink> {
    SidebarScanner::new(project_root, docs_root).scan(dir)
}
