//! Background thread that owns git2::Repository for its lifetime.
//!
//! git2::Repository is !Send, so it is opened inside the thread, not passed in.
//! All communication is via channels: BlameRequest in, a oneshot reply out.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use blameline_core::{Author, BoxError, Commit, Hunk, HunkLookup, Person};
use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender};
use git2::{BlameOptions, Oid, Repository};
use tokio::sync::oneshot;

use crate::git::types::{BlameReply, BlameRequest, CommitInfo};

/// Hunk lookup backed by `git blame` on a local repository.
///
/// Document URIs are repository-relative paths. Commit URLs are emitted as
/// `commit/<rev>` so they resolve under a configured code-host base.
pub struct GitBlameLookup {
    tx: Sender<BlameRequest>,
}

impl GitBlameLookup {
    /// Starts the worker thread for the repository at `repo_path`.
    ///
    /// Blocks until the worker has opened the repository so a bad path is
    /// reported here rather than on the first lookup.
    ///
    /// # Errors
    ///
    /// Returns `git2::Error` if the repository cannot be opened.
    pub fn spawn(repo_path: &Path) -> Result<Self, git2::Error> {
        let (tx, rx) = crossbeam_channel::unbounded::<BlameRequest>();
        let (ready_tx, ready_rx) = crossbeam_channel::bounded::<Result<(), git2::Error>>(1);
        let path = repo_path.to_path_buf();
        std::thread::spawn(move || blame_worker_loop(path, rx, ready_tx));

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self { tx }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(git2::Error::from_str("git worker exited during startup")),
        }
    }
}

impl HunkLookup for GitBlameLookup {
    async fn hunks(&self, uri: &str) -> Result<Vec<Hunk>, BoxError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(BlameRequest { path: uri.to_owned(), reply })
            .map_err(|_| "git worker is not running")?;
        let hunks = rx.await.map_err(|_| "git worker dropped the request")??;
        Ok(hunks)
    }
}

/// Entry point for the background thread that owns the git Repository.
///
/// Reports the outcome of opening the repository on `ready`, then serves
/// `BlameRequest`s until the channel is closed (lookup dropped).
fn blame_worker_loop(
    path: PathBuf,
    rx: Receiver<BlameRequest>,
    ready: Sender<Result<(), git2::Error>>,
) {
    let repo = match Repository::open(&path) {
        Ok(r) => {
            let _ = ready.send(Ok(()));
            r
        }
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    for request in rx {
        let reply = blame_file(&repo, &request.path);
        if let Err(e) = &reply {
            tracing::debug!(path = %request.path, error = %e, "blame failed");
        }
        let _ = request.reply.send(reply);
    }
}

/// Blames `path` and converts every blame hunk into an owned [`Hunk`].
///
/// When the file exists in the working tree, its current contents are
/// blamed so line numbers match what is on disk; lines not committed yet are
/// attributed to a placeholder author at the current time.
fn blame_file(repo: &Repository, path: &str) -> BlameReply {
    let mut opts = BlameOptions::new();
    let committed = repo.blame_file(Path::new(path), Some(&mut opts))?;
    let on_disk = repo
        .workdir()
        .and_then(|dir| std::fs::read(dir.join(path)).ok());
    let blame = match &on_disk {
        Some(buf) => committed.blame_buffer(buf)?,
        None => committed,
    };

    let mut commits: HashMap<Oid, CommitInfo> = HashMap::new();
    let mut hunks = Vec::with_capacity(blame.len());
    for h in blame.iter() {
        let oid = h.final_commit_id();
        let info = match commits.entry(oid) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(commit_info(repo, oid)?),
        };
        let start_line = line_number(h.final_start_line())?;
        let end_line = line_number(h.final_start_line() + h.lines_in_hunk())?;
        hunks.push(Hunk {
            start_line,
            end_line,
            author: Author {
                person: Person { display_name: info.author_name.clone() },
                date: info.date,
            },
            rev: oid.to_string(),
            message: info.summary.clone(),
            commit: Commit { url: format!("commit/{oid}") },
        });
    }
    Ok(hunks)
}

fn line_number(n: usize) -> Result<u32, git2::Error> {
    u32::try_from(n).map_err(|_| git2::Error::from_str("blame line number out of range"))
}

/// Looks up author, date and summary for `oid`.
///
/// The zero OID marks uncommitted lines in a buffer blame.
fn commit_info(repo: &Repository, oid: Oid) -> Result<CommitInfo, git2::Error> {
    if oid.is_zero() {
        return Ok(CommitInfo {
            author_name: "Not Committed Yet".to_owned(),
            date: Utc::now(),
            summary: "Working tree changes".to_owned(),
        });
    }
    let commit = repo.find_commit(oid)?;
    let author = commit.author();
    let date = DateTime::from_timestamp(author.when().seconds(), 0).unwrap_or_default();
    Ok(CommitInfo {
        author_name: author.name().unwrap_or("unknown").to_owned(),
        date,
        summary: commit.summary().unwrap_or_default().to_owned(),
    })
}
