// src/core/html.rs
//
// Small helpers over `scraper` shared by the page specs.

use scraper::{ElementRef, Html};

use super::sanitize::normalize_ws;

/// Parse a fetched page. Never fails; non-HTML input yields a near-empty tree.
pub fn parse(doc: &str) -> Html {
    Html::parse_document(doc)
}

/// Visible text of an element, whitespace-normalized.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Trimmed, non-empty attribute value.
pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name).map(str::trim).filter(|v| !v.is_empty())
}

/// First element after `el` among its siblings, skipping text and comments.
pub fn next_element_sibling(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}
