// src/specs/stations.rs
//! Station lists on `/traseu/<n>`.
//!
//! The page has exactly two `table.statii` blocks, direct first, then reverse;
//! stations are `a.statie-link` anchors in stop order. Any other number of
//! blocks means this isn't a route page, and both lists come back empty.

use scraper::ElementRef;

use crate::core::html::{self, attr, text_of};
use crate::model::{StationLists, StationStub};

pub fn extract(doc: &str) -> StationLists {
    let page = html::parse(doc);
    let blocks: Vec<ElementRef<'_>> = page.select(sel!("table.statii")).collect();

    let [direct, reverse] = blocks.as_slice() else {
        if !blocks.is_empty() {
            logd!("Stations: expected 2 station tables, found {}", blocks.len());
        }
        return StationLists::default();
    };

    StationLists { direct: read_block(*direct), reverse: read_block(*reverse) }
}

fn read_block(block: ElementRef<'_>) -> Vec<StationStub> {
    block
        .select(sel!("a.statie-link"))
        .filter_map(|a| {
            let source_ref = attr(a, "href")?;
            let name = text_of(a);
            (!name.is_empty()).then(|| StationStub { name, source_ref: s!(source_ref) })
        })
        .collect()
}
