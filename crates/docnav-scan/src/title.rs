//! Page title fallbacks: first heading, then file name.

use std::sync::OnceLock;

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use regex::Regex;

/// Text of the first level-1 heading in a markdown body.
pub fn first_heading(content: &str) -> Option<String> {
    let mut in_heading = false;
    let mut title = String::new();

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => {
                in_heading = true;
                title.clear();
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let text = title.trim();
                if !text.is_empty() {
                    return Some(text.to_string());
                }
                in_heading = false;
            }
            Event::Text(text) | Event::Code(text) if in_heading => {
                title.push_str(&text);
            }
            _ => {}
        }
    }

    None
}

/// Split a numeric ordering prefix off a file stem.
///
/// `01-intro` becomes `(Some(1), "intro")`; stems without a prefix, or made
/// only of digits, are returned unchanged.
pub fn title_from_stem(stem: &str) -> (Option<u32>, String) {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = PREFIX.get_or_init(|| Regex::new(r"^(\d+)[-_. ]+(.+)$").expect("valid regex"));

    match re.captures(stem) {
        Some(caps) => {
            let number = caps[1].parse().ok();
            (number, caps[2].to_string())
        }
        None => (None, stem.to_string()),
    }
}
