// src/scrape/mod.rs
//! Orchestration: walk the site through a `Fetcher`, feed pages to `specs`.

pub mod network;
pub mod news;
pub mod pool;
mod types;

pub use network::{assemble, assemble_from_index};
pub use news::collect as collect_news;
pub use types::{Assembly, CancelToken, NewsDigest, ScrapeWarning, WarningKind, WarningTarget};
