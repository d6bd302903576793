// src/progress.rs
/// Lightweight progress reporting used by long-running operations (scrape/update).
/// Frontends implement this to surface status to users.
///
/// All calls happen on the thread that started the operation, never on a worker.
pub trait Progress {
    /// Called at the start of each phase with the number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page (route detail or station schedule) was fetched and extracted.
    fn item_done(&mut self, _label: &str) {}

    /// One page failed; the item is dropped from the result.
    fn item_failed(&mut self, _label: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
