// src/specs/news.rs
//! News on the front page and on `/news/show/<id>`.
//!
//! Front page teasers end with `<p class="more"><a href="…">Detalii</a></p>`.
//! An article page is recognised by its title ("Anunturi …"); its body sits in
//! the `div.section` that holds a `div.continut`, with the publish date as the
//! section's `<h2>`.

use scraper::ElementRef;

use crate::config::consts::{NEWS_DETAILS_LABEL, NEWS_PAGE_MARKER};
use crate::core::html::{self, attr, text_of};
use crate::core::sanitize::printable_ascii;
use crate::model::NewsItem;

/// Article links from the front page, in page order.
pub fn links(doc: &str) -> Vec<String> {
    let page = html::parse(doc);
    page.select(sel!("p.more a[href]"))
        .filter(|a| text_of(*a) == NEWS_DETAILS_LABEL)
        .filter_map(|a| attr(a, "href").map(str::to_string))
        .collect()
}

/// One article. Both fields are `None` unless the page is an announcements
/// page; otherwise each is present only if found.
pub fn item(doc: &str) -> NewsItem {
    let page = html::parse(doc);

    let is_news_page = page
        .select(sel!("title"))
        .next()
        .is_some_and(|t| text_of(t).contains(NEWS_PAGE_MARKER));
    if !is_news_page {
        return NewsItem::default();
    }

    let Some((section, body)) = page.select(sel!("div.section")).find_map(|section| {
        section.select(sel!("div.continut")).next().map(|body| (section, body))
    }) else {
        logd!("News: announcements page without an article body");
        return NewsItem::default();
    };

    NewsItem { publish_date: publish_date(section), content: content(body) }
}

fn publish_date(section: ElementRef<'_>) -> Option<String> {
    section.select(sel!("h2")).next().map(text_of).filter(|d| !d.is_empty())
}

fn content(body: ElementRef<'_>) -> Option<String> {
    let text = printable_ascii(&body.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}
