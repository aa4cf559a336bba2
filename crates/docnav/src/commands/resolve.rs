//! Show which sidebar applies to a page.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use docnav_model::{SidebarGroup, SidebarItem};
use docnav_site::{SiteConfig, SiteResolver};

/// Run the resolve command.
pub async fn run(config_path: &Path, profile: Option<&str>, page: &str) -> Result<()> {
    let config = SiteConfig::load(config_path)?;
    let site = SiteResolver::new(&config).profile(profile).resolve()?;

    match site.sidebar_for(page) {
        Some(found) => {
            tracing::info!("{} -> sidebar \"{}\"", page, found.prefix);
            print!("{}", render_tree(found.groups));
        }
        None => {
            tracing::info!("{} has no sidebar", page);
        }
    }

    Ok(())
}

/// Indented outline of groups; `[+]` marks a collapsed group, `[-]` an expanded one.
fn render_tree(groups: &[SidebarGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        write_group(&mut out, group, 0);
    }
    out
}

fn write_group(out: &mut String, group: &SidebarGroup, depth: usize) {
    let marker = if group.collapsed { "[+]" } else { "[-]" };
    let _ = writeln!(out, "{}{} {}", "  ".repeat(depth), marker, group.text);

    for item in &group.items {
        match item {
            SidebarItem::Link(link) => {
                let _ = writeln!(out, "{}{} ({})", "  ".repeat(depth + 1), link.text, link.link);
            }
            SidebarItem::Group(nested) => write_group(out, nested, depth + 1),
        }
    }
}
