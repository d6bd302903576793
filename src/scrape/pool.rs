// src/scrape/pool.rs
use std::{
    thread, time::Duration,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }},
};

use crate::config::ScrapeOptions;
use super::types::CancelToken;

/// Run `work` over `jobs` on at most `opts.workers` threads.
///
/// Workers pull the next job index from a shared counter and pause politely
/// between requests. Results are handed to `on_result` on the calling thread
/// as they arrive, then returned in job order. A job that never ran (because
/// of cancellation) is `None`.
pub fn run<J, T, W, R>(
    jobs: &[J],
    opts: &ScrapeOptions,
    cancel: &CancelToken,
    work: W,
    mut on_result: R,
) -> Vec<Option<T>>
where
    J: Sync,
    T: Send,
    W: Fn(&J) -> T + Sync,
    R: FnMut(usize, &T),
{
    let mut results: Vec<Option<T>> = jobs.iter().map(|_| None).collect();
    if jobs.is_empty() {
        return results;
    }

    let counter = AtomicUsize::new(0);
    let workers = opts.workers.min(jobs.len()).max(1);
    let (res_tx, res_rx) = mpsc::channel::<(usize, T)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let (counter, work) = (&counter, &work);

            scope.spawn(move || {
                loop {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    let Some(job) = jobs.get(i) else { break };

                    if tx.send((i, work(job))).is_err() {
                        break;
                    }
                    let jitter = (i as u64) % opts.jitter_ms.max(1);
                    let pause = opts.pause_ms + jitter;
                    if pause > 0 {
                        thread::sleep(Duration::from_millis(pause)); // be polite
                    }
                }
            });
        }
        drop(res_tx); // this thread is the sole receiver now

        for (i, out) in res_rx {
            on_result(i, &out);
            results[i] = Some(out);
        }
    });

    results
}
