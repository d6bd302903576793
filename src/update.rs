// src/update.rs
//! Re-scrape only when the site says the schedule changed.

use crate::{
    config::{ScrapeOptions, consts::INDEX_REF},
    core::Fetcher,
    error::{Error, StoreError},
    progress::Progress,
    scrape::{self, CancelToken, ScrapeWarning},
    store::Store,
};

#[derive(Debug)]
pub enum UpdateOutcome {
    /// Stored marker matches the site; nothing fetched beyond the index.
    UpToDate,
    /// A new snapshot was assembled and saved.
    Updated {
        marker: String,
        routes: usize,
        warnings: Vec<ScrapeWarning>,
    },
    Skipped(SkipReason),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Index page could not be fetched.
    MarkerUnavailable,
    Cancelled,
    /// Scrape found no routes; the stored snapshot is left alone.
    EmptyNetwork,
    /// Assembly failed for any other reason.
    Failed(String),
}

/// Compare the site's update marker with the stored one and rebuild on change.
///
/// Only store failures are errors; everything else is an outcome.
pub fn check_for_updates(
    fetcher: &dyn Fetcher,
    store: &dyn Store,
    opts: &ScrapeOptions,
    cancel: &CancelToken,
    progress: Option<&mut dyn Progress>,
) -> Result<UpdateOutcome, StoreError> {
    let index = match fetcher.fetch(INDEX_REF) {
        Ok(page) => page,
        Err(e) => {
            logw!("Update: index unavailable: {e}");
            return Ok(UpdateOutcome::Skipped(SkipReason::MarkerUnavailable));
        }
    };
    let marker = crate::specs::update_marker::extract(&index);

    let stored = store.load()?;
    if let Some(current) = &stored {
        if current.update_marker() == marker {
            logf!("Update: up to date ({marker:?})");
            return Ok(UpdateOutcome::UpToDate);
        }
    }
    logf!(
        "Update: marker {:?} → {marker:?}, rebuilding",
        stored.as_ref().map(|n| n.update_marker())
    );

    let assembly = match scrape::assemble_from_index(&index, fetcher, opts, cancel, progress) {
        Ok(assembly) => assembly,
        Err(Error::Cancelled) => return Ok(UpdateOutcome::Skipped(SkipReason::Cancelled)),
        Err(e) => {
            loge!("Update: assembly failed: {e}");
            return Ok(UpdateOutcome::Skipped(SkipReason::Failed(e.to_string())));
        }
    };
    if assembly.network.is_empty() {
        logw!("Update: scrape found no routes, keeping stored snapshot");
        return Ok(UpdateOutcome::Skipped(SkipReason::EmptyNetwork));
    }

    store.save(&assembly.network)?;
    Ok(UpdateOutcome::Updated {
        marker: assembly.network.update_marker().to_string(),
        routes: assembly.network.routes().len(),
        warnings: assembly.warnings,
    })
}
