// src/scrape/types.rs
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::model::{BusNetwork, Direction, NewsItem};

/// Shared flag checked by the workers between pages.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What a warning is about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningTarget {
    Route { number: String },
    Station { route: String, direction: Direction, name: String },
    News { reference: String },
}

impl fmt::Display for WarningTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route { number } => write!(f, "route {number}"),
            Self::Station { route, direction, name } => {
                write!(f, "route {route} {direction:?} station {name:?}")
            }
            Self::News { reference } => write!(f, "news {reference}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningKind {
    /// Fetch failed; the item was dropped.
    Transport(String),
    /// Route repeated in the catalog; the later row was dropped.
    DuplicateRoute,
    /// Detail page had no station tables; the route is kept with empty lists.
    NoStations,
}

/// A recorded, non-fatal problem from one scrape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeWarning {
    pub target: WarningTarget,
    pub kind: WarningKind,
}

impl ScrapeWarning {
    pub fn new(target: WarningTarget, kind: WarningKind) -> Self {
        Self { target, kind }
    }

    /// True when the item named by `target` is missing from the output.
    pub fn dropped_item(&self) -> bool {
        !matches!(self.kind, WarningKind::NoStations)
    }
}

impl fmt::Display for ScrapeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::Transport(msg) => write!(f, "{}: dropped, {msg}", self.target),
            WarningKind::DuplicateRoute => write!(f, "{}: duplicate, dropped", self.target),
            WarningKind::NoStations => write!(f, "{}: no stations found", self.target),
        }
    }
}

/// Result of one assembler run.
#[derive(Clone, Debug)]
pub struct Assembly {
    pub network: BusNetwork,
    pub warnings: Vec<ScrapeWarning>,
}

#[derive(Clone, Debug, Default)]
pub struct NewsDigest {
    pub items: Vec<NewsItem>,
    pub warnings: Vec<ScrapeWarning>,
}
