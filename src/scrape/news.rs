// src/scrape/news.rs
use crate::{
    config::{ScrapeOptions, consts::HOME_REF},
    core::Fetcher,
    error::Error,
    progress::Progress,
    specs,
};

use super::pool;
use super::types::*;

/// Front page → article links → one `NewsItem` per article, in link order.
///
/// Articles that fail to fetch are dropped with a warning. Pages that fetch
/// but hold no article still yield an (empty) item.
pub fn collect(
    fetcher: &dyn Fetcher,
    opts: &ScrapeOptions,
    cancel: &CancelToken,
    mut progress: Option<&mut dyn Progress>,
) -> Result<NewsDigest, Error> {
    let home = fetcher.fetch(HOME_REF).map_err(|source| Error::PageUnavailable {
        reference: s!(HOME_REF),
        source,
    })?;
    let links = specs::news::links(&home);
    logf!("News: {} articles linked", links.len());

    if let Some(p) = progress.as_deref_mut() {
        p.begin(links.len());
        p.log("Fetching news…");
    }
    let pages = pool::run(
        &links,
        opts,
        cancel,
        |link| fetcher.fetch(link).map(|page| specs::news::item(&page)),
        |i, res| {
            if let Some(p) = progress.as_deref_mut() {
                if res.is_ok() { p.item_done(&links[i]) } else { p.item_failed(&links[i]) }
            }
        },
    );
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    if cancel.is_cancelled() {
        logf!("News: cancelled");
        return Err(Error::Cancelled);
    }

    let mut digest = NewsDigest::default();
    for (link, res) in links.iter().zip(pages) {
        match res {
            Some(Ok(item)) => digest.items.push(item),
            Some(Err(e)) => {
                let w = ScrapeWarning::new(
                    WarningTarget::News { reference: link.clone() },
                    WarningKind::Transport(e.to_string()),
                );
                logw!("News: {w}");
                digest.warnings.push(w);
            }
            None => return Err(Error::Cancelled),
        }
    }
    Ok(digest)
}
