// src/specs/update_marker.rs
//! The "last updated" heading on `/trasee`:
//!
//! ```html
//! <h2 style="color:#900;">Program de circulatie incepand cu data de 23 martie 2015</h2>
//! ```

use crate::config::consts::UPDATE_MARKER_STYLE;
use crate::core::html::{self, text_of};
use crate::core::sanitize::normalize_style;

/// Text of the first marker heading, or `""` when the page has none.
pub fn extract(doc: &str) -> String {
    let page = html::parse(doc);
    page.select(sel!("h2[style]"))
        .find(|h2| {
            h2.value()
                .attr("style")
                .is_some_and(|style| normalize_style(style) == UPDATE_MARKER_STYLE)
        })
        .map(text_of)
        .unwrap_or_default()
}
