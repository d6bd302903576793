// src/specs/routes.rs
//! Route catalog on `/trasee`.
//!
//! Routes are grouped by category (main, secondary, professional, touristic),
//! each group a table right after an `<h3>` naming it:
//!
//! ```html
//! <h3>Trasee principale</h3>
//! <table>
//!   <tr><td class="denumire">
//!     <a href="http://tursib.ro/traseu/14"><strong>Valea Aurie - Hotel Libra</strong></a>
//!   </td></tr>
//! </table>
//! ```
//!
//! Route number is the last path segment of the link. Rows lacking a link, a
//! number or a name are skipped.

use scraper::ElementRef;

use crate::config::consts::ROUTE_SECTION_MARKER;
use crate::core::html::{self, attr, next_element_sibling, text_of};
use crate::core::sanitize::last_path_segment;
use crate::model::RouteStub;

pub fn extract(doc: &str) -> Vec<RouteStub> {
    let page = html::parse(doc);
    let mut out = Vec::new();

    for heading in page.select(sel!("h3")) {
        if !text_of(heading).contains(ROUTE_SECTION_MARKER) {
            continue;
        }
        let Some(table) = next_element_sibling(heading) else {
            logd!("Routes: heading {:?} has no table after it", text_of(heading));
            continue;
        };
        out.extend(table.select(sel!("td.denumire")).filter_map(read_cell));
    }

    out
}

fn read_cell(cell: ElementRef<'_>) -> Option<RouteStub> {
    let link = cell.select(sel!("a[href]")).find_map(|a| attr(a, "href"))?;
    let number = last_path_segment(link)?;
    let name = cell
        .select(sel!("strong"))
        .map(text_of)
        .find(|n| !n.is_empty())?;

    Some(RouteStub { number, name, source_ref: s!(link) })
}
