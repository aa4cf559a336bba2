//! Mapping site links back to documents on disk.

use std::path::{Component, Path, PathBuf};

const DOC_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Whether a link points off-site (`https:`, `mailto:`, `//host`).
pub fn is_external(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }

    match link.split_once(':') {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Find the document a site-relative link renders from.
///
/// `/a/` maps to `a/index.md`; `/a` maps to `a.md` or `a/index.md`. The
/// site `base`, a `.html` suffix, query and fragment are stripped first.
/// Links to existing non-document files (images, downloads) resolve to
/// that file. Links with `..` segments never resolve.
pub fn resolve_document(docs_root: &Path, base: &str, link: &str) -> Option<PathBuf> {
    let path = strip_base(link, base);
    let path = path.split(['#', '?']).next().unwrap_or_default();
    let path = path.strip_suffix(".html").unwrap_or(path);
    let relative = path.trim_start_matches('/');

    if climbs_out(relative) {
        return None;
    }

    if relative.is_empty() || path.ends_with('/') {
        return find_index(&docs_root.join(relative));
    }

    let target = docs_root.join(relative);
    if target.is_file() {
        return Some(target);
    }

    DOC_EXTENSIONS
        .iter()
        .map(|ext| docs_root.join(format!("{relative}.{ext}")))
        .find(|candidate| candidate.is_file())
        .or_else(|| find_index(&target))
}

/// Whether a sidebar prefix corresponds to something under `docs_root`.
pub fn prefix_resolves(docs_root: &Path, base: &str, prefix: &str) -> bool {
    let relative = strip_base(prefix, base).trim_start_matches('/');
    if climbs_out(relative) {
        return false;
    }
    if relative.is_empty() {
        return true;
    }
    docs_root.join(relative.trim_end_matches('/')).is_dir()
        || resolve_document(docs_root, base, prefix).is_some()
}

fn climbs_out(relative: &str) -> bool {
    Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
}

fn find_index(dir: &Path) -> Option<PathBuf> {
    DOC_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("index.{ext}")))
        .find(|candidate| candidate.is_file())
}

fn strip_base<'a>(link: &'a str, base: &str) -> &'a str {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return link;
    }
    match link.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => link,
    }
}
