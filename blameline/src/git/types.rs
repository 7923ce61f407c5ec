//! Messages exchanged with the git background thread.
//!
//! Everything here is owned and `Send` so it can move between the async
//! caller and the thread that owns the `git2::Repository`.

use blameline_core::Hunk;
use tokio::sync::oneshot;

/// Result of one blame run, sent back to the awaiting lookup.
pub type BlameReply = Result<Vec<Hunk>, git2::Error>;

/// A request to blame one file.
///
/// Sent over a `crossbeam_channel::Sender<BlameRequest>` owned by
/// `GitBlameLookup`. The worker answers on `reply` exactly once; if the worker
/// is gone, dropping `reply` wakes the caller with a receive error instead.
#[derive(Debug)]
pub struct BlameRequest {
    /// Repository-relative path of the file to blame.
    pub path: String,
    pub reply: oneshot::Sender<BlameReply>,
}

/// Author and message of a commit, cached per blame run since many hunks
/// usually share a commit.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub author_name: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub summary: String,
}
