// src/specs/timetable.rs
//! Station schedule on `/traseu/<n>/program?statie=<i>&dir=<dus|intors>`.
//!
//! Departures are rendered as `div.plecari` blocks, one per day class, each
//! holding one `div` per departure. The second class token is the routing
//! class (`p0`, `p1`, …):
//!
//! ```html
//! <h3>Luni - Vineri</h3>
//! <div class="plecari">
//!   <div class="p p0">05:26</div>
//!   <div class="p p1">05:40</div>
//!   <div class="clear"></div>
//! </div>
//! ```
//!
//! Block count decides the layout:
//!
//! | blocks | weekdays | saturday | sunday | comment   |
//! |--------|----------|----------|--------|-----------|
//! | 1      | block 1  | –        | –      | –         |
//! | 2      | block 1  | block 2  | –      | –         |
//! | 3      | block 1  | block 2  | block 3| –         |
//! | 4      | block 1  | block 2  | block 3| block 4   |
//!
//! A single block covers the whole week (e.g. route 22) and lands in
//! `weekdays`. The fourth block is the legend explaining which departures take
//! an alternate path ("La orele marcate cu p1 se circula pana la …"); it never
//! contributes departures. Anything else yields an empty timetable.

use scraper::ElementRef;

use crate::core::html::{self, text_of};
use crate::core::sanitize::normalize_ws;
use crate::model::{DayClass, DepartureTime, Timetable, collapse_routing_classes};

use DayClass::*;

const LEGEND_BLOCK: usize = 3;

pub fn extract(doc: &str) -> Timetable {
    let page = html::parse(doc);
    let blocks: Vec<ElementRef<'_>> = page.select(sel!("div.plecari")).collect();

    let Some(days) = layout(blocks.len()) else {
        if !blocks.is_empty() {
            logd!("Timetable: unexpected block count {}", blocks.len());
        }
        return Timetable::default();
    };

    let mut timetable = Timetable::default();
    for (block, day) in blocks.iter().zip(days) {
        *timetable.day_mut(*day) = collapse_routing_classes(read_departures(*block));
    }
    if let Some(legend) = blocks.get(LEGEND_BLOCK) {
        timetable.comment = read_legend(*legend);
    }
    timetable
}

/// Day classes filled by the first blocks, for a page with `count` blocks.
fn layout(count: usize) -> Option<&'static [DayClass]> {
    match count {
        1 => Some(&[Weekdays]),
        2 => Some(&[Weekdays, Saturday]),
        3 | 4 => Some(&[Weekdays, Saturday, Sunday]),
        _ => None,
    }
}

fn read_departures(block: ElementRef<'_>) -> Vec<DepartureTime> {
    block
        .select(sel!("div"))
        .filter_map(|entry| DepartureTime::parse(&text_of(entry), routing_class(entry)).ok())
        .collect()
}

/// `p<digits>` class token, if any.
fn routing_class<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    el.value().classes().find(|c| is_routing_class(c))
}

fn is_routing_class(token: &str) -> bool {
    token
        .strip_prefix('p')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Legend text, with empty marker swatches rendered as their class name.
fn read_legend(block: ElementRef<'_>) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for child in block.children() {
        if let Some(el) = ElementRef::wrap(child) {
            let text = text_of(el);
            match routing_class(el) {
                Some(class) if text.is_empty() => parts.push(s!(class)),
                _ => parts.push(text),
            }
        } else if let Some(text) = child.value().as_text() {
            parts.push(s!(&**text));
        }
    }
    let legend = normalize_ws(&parts.join(" "));
    (!legend.is_empty()).then_some(legend)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(entries: &[(&str, &str)]) -> String {
        let mut out = s!(r#"<div class="plecari">"#);
        for (class, time) in entries {
            out.push_str(&format!(r#"<div class="p {class}">{time}</div>"#));
        }
        out.push_str(r#"<div class="clear"></div></div>"#);
        out
    }

    fn times(seq: &[DepartureTime]) -> Vec<&str> {
        seq.iter().map(DepartureTime::time).collect()
    }

    #[test]
    fn layouts_by_block_count() {
        assert_eq!(layout(0), None);
        assert_eq!(layout(1), Some(&[Weekdays][..]));
        assert_eq!(layout(2), Some(&[Weekdays, Saturday][..]));
        assert_eq!(layout(4), Some(&[Weekdays, Saturday, Sunday][..]));
        assert_eq!(layout(5), None);
    }

    #[test]
    fn two_blocks_leave_sunday_empty() {
        let doc = format!(
            "{}{}",
            block(&[("p0", "06:00"), ("p0", "14:00")]),
            block(&[("p0", "08:00")])
        );
        let tt = extract(&doc);
        assert_eq!(times(&tt.weekdays), ["06:00", "14:00"]);
        assert_eq!(times(&tt.saturday), ["08:00"]);
        assert!(tt.sunday.is_empty());
        assert_eq!(tt.comment, None);
    }

    #[test]
    fn five_blocks_is_unknown_layout() {
        let one = block(&[("p0", "06:00")]);
        let doc = one.repeat(5);
        assert!(extract(&doc).is_empty());
    }

    #[test]
    fn non_time_entries_are_skipped() {
        let doc = block(&[("p0", "06:00"), ("p0", "--"), ("p1", "")]);
        let tt = extract(&doc);
        assert_eq!(times(&tt.weekdays), ["06:00"]);
        assert_eq!(tt.weekdays[0].routing_class(), None);
    }

    #[test]
    fn routing_class_tokens() {
        assert!(is_routing_class("p0"));
        assert!(is_routing_class("p12"));
        assert!(!is_routing_class("p"));
        assert!(!is_routing_class("plecari"));
        assert!(!is_routing_class("clear"));
    }

    #[test]
    fn legend_renders_swatches() {
        let doc = format!(
            "{}{}{}{}",
            block(&[("p0", "06:00"), ("p1", "06:30")]),
            block(&[("p0", "07:00")]),
            block(&[("p0", "08:00")]),
            r#"<div class="plecari">
                 <div style="float:left">La orele marcate cu</div>
                 <div class="p p1"></div>
                 <div>se circula pana la VIILE SIBIULUI</div>
               </div>"#
        );
        let tt = extract(&doc);
        assert_eq!(tt.comment.as_deref(), Some("La orele marcate cu p1 se circula pana la VIILE SIBIULUI"));
        assert_eq!(tt.weekdays.len(), 2);
        assert_eq!(tt.weekdays[1].routing_class(), Some("p1"));
    }
}
