use std::sync::{Arc, Mutex};

use crate::analysis::domain::illumination_result::IlluminationResult;

/// Receives each completed cycle's illumination result.
///
/// Delivery is fire-and-forget: no acknowledgement, and each result
/// supersedes the previous one wholesale.
pub trait ResultSink: Send {
    fn publish(&mut self, result: IlluminationResult);
}

/// Forwards results over a channel to a consumer thread.
///
/// A vanished consumer must not take the analysis loop down with it, so
/// send failures are logged and swallowed.
pub struct ChannelResultSink {
    tx: crossbeam_channel::Sender<IlluminationResult>,
}

impl ChannelResultSink {
    pub fn new(tx: crossbeam_channel::Sender<IlluminationResult>) -> Self {
        Self { tx }
    }
}

impl ResultSink for ChannelResultSink {
    fn publish(&mut self, result: IlluminationResult) {
        if self.tx.send(result).is_err() {
            log::debug!("illumination result dropped: receiver disconnected");
        }
    }
}

/// Single authoritative holder of the most recent result.
///
/// Readers take an atomically swapped immutable snapshot; there is no
/// second mutable copy to drift out of sync with it. Clones share the
/// same slot.
#[derive(Clone, Default)]
pub struct LatestResultCell {
    slot: Arc<Mutex<Option<Arc<IlluminationResult>>>>,
}

impl LatestResultCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published result, if any cycle has produced one.
    pub fn latest(&self) -> Option<Arc<IlluminationResult>> {
        self.slot.lock().unwrap().clone()
    }
}

impl ResultSink for LatestResultCell {
    fn publish(&mut self, result: IlluminationResult) {
        *self.slot.lock().unwrap() = Some(Arc::new(result));
    }
}
