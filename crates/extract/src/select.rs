// ABOUTME: DOM query helpers for meta tags, element text, links and visible text nodes.
// ABOUTME: Thin wrappers over scraper selectors; invalid selectors simply match nothing.

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text content is never visible page text.
const NON_VISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Text of an element: each text piece trimmed, empty pieces dropped, joined with spaces.
pub fn element_text(el: &ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the `content` attribute of the first element matching `selector`.
///
/// Only the first element is considered; an empty attribute counts as absent.
pub fn meta_content(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let elem = doc.select(&sel).next()?;
    let content = elem.value().attr("content")?;
    if content.trim().is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

/// Non-empty texts of every element matching `selector`, in document order.
pub fn all_texts(doc: &Html, selector: &str) -> Vec<String> {
    let sel = match Selector::parse(selector) {
        Ok(s) => s,
        Err(_) => return vec![],
    };
    doc.select(&sel)
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Text of the first element matched by the first selector that matches anything.
///
/// Stops at the first matching selector even when that element has no text.
pub fn first_text(doc: &Html, selectors: &[&str]) -> Option<String> {
    for &sel_str in selectors {
        let sel = match Selector::parse(sel_str) {
            Ok(s) => s,
            Err(_) => continue,
        };
        if let Some(el) = doc.select(&sel).next() {
            return Some(element_text(&el));
        }
    }
    None
}

/// `href` of the first anchor whose target matches `pattern`.
pub fn first_href_matching(doc: &Html, pattern: &Regex) -> Option<String> {
    let sel = Selector::parse("a[href]").ok()?;
    doc.select(&sel)
        .filter_map(|el| el.value().attr("href"))
        .find(|href| pattern.is_match(href))
        .map(str::to_string)
}

/// Every text node outside script-like elements, in document order.
pub fn visible_text_nodes(doc: &Html) -> Vec<&str> {
    doc.tree
        .root()
        .descendants()
        .filter_map(|node| {
            let text = match node.value() {
                Node::Text(t) => t,
                _ => return None,
            };
            let hidden = node
                .parent()
                .and_then(|p| p.value().as_element().map(|e| e.name().to_ascii_lowercase()))
                .map_or(false, |name| NON_VISIBLE_TAGS.contains(&name.as_str()));
            if hidden {
                None
            } else {
                Some(&**text)
            }
        })
        .collect()
}
