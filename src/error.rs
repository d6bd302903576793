// src/error.rs
//! Error types.
//!
//! Malformed or foreign pages are *not* errors anywhere in this crate: the
//! extractors in `specs` return empty results for them. What remains are
//! transport failures, store failures and a few orchestration outcomes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid reference {reference:?}: {source}")]
    InvalidReference {
        reference: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// The persisted snapshot could not be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("store JSON error at {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("not a 24-hour HH:MM time: {0:?}")]
    InvalidTime(String),

    #[error("duplicate route number {0:?}")]
    DuplicateRoute(String),

    #[error("{0} departures mix bare and tagged entries, or tag all with one class")]
    MixedRoutingClasses(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("page {reference:?} unavailable: {source}")]
    PageUnavailable {
        reference: String,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("no stored bus network")]
    NotFound,

    #[error("scrape produced no routes")]
    EmptyNetwork,

    #[error("scrape cancelled")]
    Cancelled,

    #[error("no network source strategies given")]
    NoStrategies,

    #[error("{0}")]
    Usage(String),
}
