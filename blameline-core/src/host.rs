//! Narrow interfaces to the host: editor, configuration store, hunk lookup.
//!
//! Each trait has one production adapter in the `blameline` binary and one
//! in-memory implementation here for tests and embedding.

use std::collections::BTreeMap;
use std::future::Future;

use crate::error::{BoxError, Error};
use crate::settings::{DecorationMode, Settings, DECORATIONS_KEY};
use crate::types::{AnnotationDescriptor, Hunk, Selection};

/// An open document the viewer is looking at.
pub trait CodeEditor {
    /// Identifier passed to the hunk lookup.
    fn document_uri(&self) -> &str;

    /// Current selections, or `None` when the host cannot report them.
    fn selections(&self) -> Option<Vec<Selection>>;

    /// Replaces the annotations shown in this editor.
    fn set_decorations(&mut self, decorations: Vec<AnnotationDescriptor>);
}

/// Read/write access to the host's settings.
pub trait ConfigStore {
    fn settings(&self) -> Settings;

    /// Persists `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigUpdate`] if the key is unknown or cannot be
    /// written.
    fn update(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// Asynchronous source of blame hunks for a document.
///
/// Implemented for any `Fn(String) -> impl Future<Output = Result<Vec<Hunk>, BoxError>>`
/// so tests can pass a closure.
pub trait HunkLookup {
    fn hunks(&self, uri: &str) -> impl Future<Output = Result<Vec<Hunk>, BoxError>>;
}

impl<F, Fut> HunkLookup for F
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<Hunk>, BoxError>>,
{
    fn hunks(&self, uri: &str) -> impl Future<Output = Result<Vec<Hunk>, BoxError>> {
        self(uri.to_owned())
    }
}

/// Editor that records the decorations it is given.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEditor {
    pub uri: String,
    pub selections: Option<Vec<Selection>>,
    /// Last decorations set, `None` until the first call.
    pub decorations: Option<Vec<AnnotationDescriptor>>,
    /// Number of `set_decorations` calls.
    pub updates: usize,
}

impl InMemoryEditor {
    pub fn new(uri: impl Into<String>, selections: Option<Vec<Selection>>) -> Self {
        Self { uri: uri.into(), selections, ..Self::default() }
    }
}

impl CodeEditor for InMemoryEditor {
    fn document_uri(&self) -> &str {
        &self.uri
    }

    fn selections(&self) -> Option<Vec<Selection>> {
        self.selections.clone()
    }

    fn set_decorations(&mut self, decorations: Vec<AnnotationDescriptor>) {
        self.decorations = Some(decorations);
        self.updates += 1;
    }
}

/// Settings held in memory, with an optional forced write failure.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfig {
    pub settings: Settings,
    /// `(key, value)` pairs written through [`ConfigStore::update`].
    pub writes: BTreeMap<String, String>,
    pub fail_updates: bool,
}

impl InMemoryConfig {
    pub fn new(settings: Settings) -> Self {
        Self { settings, ..Self::default() }
    }
}

impl ConfigStore for InMemoryConfig {
    fn settings(&self) -> Settings {
        self.settings.clone()
    }

    fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if self.fail_updates {
            return Err(Error::ConfigUpdate {
                key: key.to_owned(),
                message: "store is read-only".to_owned(),
            });
        }
        if key != DECORATIONS_KEY {
            return Err(Error::ConfigUpdate {
                key: key.to_owned(),
                message: "unknown setting".to_owned(),
            });
        }
        let mode: DecorationMode = value.parse().map_err(|message| Error::ConfigUpdate {
            key: key.to_owned(),
            message,
        })?;
        self.settings.decorations = Some(mode);
        self.writes.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
