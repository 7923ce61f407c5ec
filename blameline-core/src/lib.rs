//! Inline blame annotations.
//!
//! Given the blame hunks of a document and the viewer's selections,
//! [`matcher`] picks the hunks that need an annotation and the line each one
//! goes on, and [`render`] turns each pick into an [`AnnotationDescriptor`]:
//! a label such as `"a, 3 months ago: • fix parser"`, hover text, a commit
//! link and a fixed color palette. [`decorate`] wires both behind the blame
//! settings and an injected async hunk lookup.
//!
//! Hosts plug in through the traits in [`host`].

pub mod decorate;
pub mod error;
pub mod host;
pub mod matcher;
pub mod render;
pub mod settings;
pub mod theme;
pub mod types;

pub use decorate::{blame_decorations, decorate, DecorationRequest};
pub use error::{BoxError, Error};
pub use host::{CodeEditor, ConfigStore, HunkLookup, InMemoryConfig, InMemoryEditor};
pub use matcher::{match_hunks, HunkMatch};
pub use render::{relative_time, render_hunk, render_hunks, truncate, RenderOptions};
pub use settings::{migrate_settings, DecorationMode, Settings};
pub use types::{AnnotationDescriptor, Author, Commit, Hunk, LineRange, Person, Position, Rgba, Selection, Swatch};
