//! Cooperative frame scheduling.
//!
//! A backdrop asks for one frame at a time. The host drains every pending
//! request once per display refresh with [`FrameScheduler::take_due`] and
//! hands the batch to its backdrops, each of which draws and asks again.

use std::collections::BTreeSet;

/// A pending request for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

/// Frames due in the current refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameBatch {
    tokens: BTreeSet<FrameToken>,
}

impl FrameBatch {
    pub fn contains(&self, token: FrameToken) -> bool {
        self.tokens.contains(&token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Registry of pending frame requests.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next: u64,
    pending: BTreeSet<FrameToken>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame.
    pub fn request(&mut self) -> FrameToken {
        let token = FrameToken(self.next);
        self.next += 1;
        self.pending.insert(token);
        token
    }

    /// Cancel a pending request. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, token: FrameToken) -> bool {
        self.pending.remove(&token)
    }

    /// Number of frames waiting to run.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drain every pending request into a batch.
    pub fn take_due(&mut self) -> FrameBatch {
        FrameBatch {
            tokens: std::mem::take(&mut self.pending),
        }
    }
}
