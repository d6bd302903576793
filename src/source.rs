// src/source.rs
//! Where a `BusNetwork` comes from: an ordered list of strategies, first
//! success wins.

use std::fmt;

use crate::{
    config::ScrapeOptions,
    core::Fetcher,
    error::Error,
    model::BusNetwork,
    progress::Progress,
    scrape::{self, CancelToken},
    store::Store,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Last persisted snapshot.
    Stored,
    /// Fresh scrape, persisted on success.
    Scrape,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stored => "stored",
            Self::Scrape => "scrape",
        })
    }
}

pub const DEFAULT_STRATEGIES: &[Strategy] = &[Strategy::Stored, Strategy::Scrape];

/// Everything a strategy may need.
pub struct SourceContext<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub store: &'a dyn Store,
    pub opts: &'a ScrapeOptions,
    pub cancel: &'a CancelToken,
    pub progress: Option<&'a mut dyn Progress>,
}

/// Try each strategy in order. All failing returns the last failure.
pub fn load_network(strategies: &[Strategy], ctx: &mut SourceContext<'_>) -> Result<BusNetwork, Error> {
    let mut last = Error::NoStrategies;
    for &strategy in strategies {
        match attempt(strategy, ctx) {
            Ok(network) => {
                logf!("Source: {strategy} → {} routes", network.routes().len());
                return Ok(network);
            }
            Err(e) => {
                logw!("Source: {strategy} failed: {e}");
                last = e;
            }
        }
    }
    Err(last)
}

fn attempt(strategy: Strategy, ctx: &mut SourceContext<'_>) -> Result<BusNetwork, Error> {
    match strategy {
        Strategy::Stored => ctx.store.load()?.ok_or(Error::NotFound),
        Strategy::Scrape => {
            let progress = ctx.progress.as_mut().map(|p| &mut **p as &mut dyn Progress);
            let assembly = scrape::assemble(ctx.fetcher, ctx.opts, ctx.cancel, progress)?;
            if assembly.network.is_empty() {
                return Err(Error::EmptyNetwork);
            }
            ctx.store.save(&assembly.network)?;
            Ok(assembly.network)
        }
    }
}
