//! Git integration for blameline.
//!
//! [`worker::GitBlameLookup`] is the production hunk lookup. It owns a
//! background `std::thread::spawn` thread that holds the `git2::Repository`
//! for its lifetime; Repository is !Send, so it never crosses a thread
//! boundary.
pub mod types;
pub mod worker;
