// tests/common/mod.rs
//
// Shared helpers: fixture loading and a map-backed fetcher.
//
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tsb_scrape::config::ScrapeOptions;
use tsb_scrape::core::Fetcher;
use tsb_scrape::error::FetchError;

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

/// Fresh, empty directory under the system temp dir.
pub fn tmp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tsb_scrape_{tag}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn opts(workers: usize) -> ScrapeOptions {
    ScrapeOptions { workers, ..ScrapeOptions::default() }.unthrottled()
}

/// Serves pages from memory; unknown references are a 404.
#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, reference: &str, body: impl Into<String>) -> Self {
        self.pages.insert(reference.to_string(), body.into());
        self
    }

    /// References requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetcher for MapFetcher {
    fn fetch(&self, reference: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(reference.to_string());
        self.pages.get(reference).cloned().ok_or_else(|| FetchError::Status {
            url: reference.to_string(),
            status: 404,
        })
    }
}

/// Index page listing `routes` as (number, name), with an update marker.
pub fn index_page(marker: &str, routes: &[(&str, &str)]) -> String {
    let mut rows = String::new();
    for (number, name) in routes {
        rows.push_str(&format!(
            r#"<tr><td class="denumire"><a href="http://tursib.ro/traseu/{number}"><strong>{name}</strong></a></td></tr>"#
        ));
    }
    format!(
        r#"<html><body><h2 style="color:#900;">{marker}</h2><h3>Trasee principale</h3><table>{rows}</table></body></html>"#
    )
}

/// Route page with the given station names per direction. Station refs are
/// `station_ref(route, dir, i)`.
pub fn route_page(route: &str, direct: &[&str], reverse: &[&str]) -> String {
    let table = |dir: &str, names: &[&str]| {
        let mut out = String::from(r#"<table class="statii">"#);
        for (i, name) in names.iter().enumerate() {
            out.push_str(&format!(
                r#"<tr><td><a class="statie-link" href="{}">{name}</a></td></tr>"#,
                station_ref(route, dir, i).replace('&', "&amp;")
            ));
        }
        out.push_str("</table>");
        out
    };
    format!("<html><body>{}{}</body></html>", table("dus", direct), table("intors", reverse))
}

pub fn station_ref(route: &str, dir: &str, i: usize) -> String {
    format!("http://tursib.ro/traseu/{route}/program?statie={i}&dir={dir}")
}

pub fn route_ref(route: &str) -> String {
    format!("http://tursib.ro/traseu/{route}")
}

/// One-block schedule page.
pub fn schedule_page(times: &[&str]) -> String {
    let mut out = String::from(r#"<html><body><div class="plecari">"#);
    for t in times {
        out.push_str(&format!(r#"<div class="p p0">{t}</div>"#));
    }
    out.push_str("</div></body></html>");
    out
}
