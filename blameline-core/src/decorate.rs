//! Orchestration: settings gate, hunk lookup, matcher, renderer.
//!
//! This is the only async code in the crate. It awaits a single lookup per
//! call; matching and rendering are synchronous. There is no supersession
//! token, so when calls overlap the last one to resolve wins.

use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::host::{CodeEditor, HunkLookup};
use crate::matcher::match_hunks;
use crate::render::{render_hunks, RenderOptions};
use crate::settings::{DecorationMode, Settings};
use crate::types::{AnnotationDescriptor, Selection};

/// Everything one decoration cycle needs besides the lookup.
#[derive(Debug, Clone)]
pub struct DecorationRequest<'a> {
    pub uri: &'a str,
    pub settings: &'a Settings,
    /// `None` when the host cannot report selections.
    pub selections: Option<&'a [Selection]>,
    pub now: DateTime<Utc>,
    pub options: &'a RenderOptions,
}

/// Computes the annotations for one document.
///
/// Returns an empty list without calling `lookup` when decorations are off.
/// Otherwise `lookup` is awaited exactly once. In `file` mode selections are
/// ignored and every hunk is annotated.
///
/// # Errors
///
/// Returns [`Error::Lookup`] if the lookup fails. Nothing is retried.
pub async fn blame_decorations<L: HunkLookup>(
    request: DecorationRequest<'_>,
    lookup: &L,
) -> Result<Vec<AnnotationDescriptor>, Error> {
    let mode = request.settings.decoration_mode();
    if mode == DecorationMode::None {
        return Ok(Vec::new());
    }

    let hunks = lookup.hunks(request.uri).await.map_err(|source| Error::Lookup {
        uri: request.uri.to_owned(),
        source,
    })?;
    tracing::debug!(uri = request.uri, hunks = hunks.len(), mode = mode.as_str(), "fetched blame hunks");

    let selections = match mode {
        DecorationMode::File => None,
        _ => request.selections,
    };
    let matches = match_hunks(&hunks, selections);
    Ok(render_hunks(&matches, request.now, request.options))
}

/// Runs one decoration cycle against `editor`.
///
/// Reads the editor's document and selections, computes annotations, and
/// hands them back to the editor. A failed lookup is logged and the editor is
/// left as it was; the next cycle tries again.
pub async fn decorate<E, L>(
    editor: &mut E,
    settings: &Settings,
    options: &RenderOptions,
    lookup: &L,
    now: DateTime<Utc>,
) where
    E: CodeEditor + ?Sized,
    L: HunkLookup,
{
    let selections = editor.selections();
    let request = DecorationRequest {
        uri: editor.document_uri(),
        settings,
        selections: selections.as_deref(),
        now,
        options,
    };
    let result = blame_decorations(request, lookup).await;
    match result {
        Ok(decorations) => editor.set_decorations(decorations),
        Err(e) => tracing::error!(error = %e, "decoration error"),
    }
}
