//! Blame settings and the one-time migration off the deprecated flags.
//!
//! Settings are a flat mapping with dotted keys, the same shape the host's
//! configuration store exposes. In TOML the keys are quoted:
//!
//! ```toml
//! "git.blame.decorations" = "line"
//! ```

use serde::{Deserialize, Serialize};

use crate::host::ConfigStore;

/// Key of the current decoration setting.
pub const DECORATIONS_KEY: &str = "git.blame.decorations";

/// Which hunks get an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationMode {
    /// No annotations; the hunk lookup is skipped entirely.
    None,
    /// Annotate hunks under the viewer's selections.
    Line,
    /// Annotate every hunk in the file.
    File,
}

impl DecorationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DecorationMode::None => "none",
            DecorationMode::Line => "line",
            DecorationMode::File => "file",
        }
    }
}

impl std::str::FromStr for DecorationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(DecorationMode::None),
            "line" => Ok(DecorationMode::Line),
            "file" => Ok(DecorationMode::File),
            other => Err(format!("invalid decoration mode '{other}'")),
        }
    }
}

/// Snapshot of the blame settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "git.blame.decorations", default, skip_serializing_if = "Option::is_none")]
    pub decorations: Option<DecorationMode>,
    /// Deprecated; superseded by `git.blame.decorations`.
    #[serde(rename = "git.blame.lineDecorations", default, skip_serializing_if = "Option::is_none")]
    pub line_decorations: Option<bool>,
    /// Deprecated; superseded by `git.blame.decorations`.
    #[serde(rename = "git.blame.decorateWholeFile", default, skip_serializing_if = "Option::is_none")]
    pub decorate_whole_file: Option<bool>,
}

impl Settings {
    /// Effective decoration mode.
    ///
    /// An explicit `git.blame.decorations` wins. Otherwise the deprecated
    /// flags are honored: `lineDecorations = true` enables decorations, and
    /// `decorateWholeFile = true` widens them to the whole file. With nothing
    /// set, decorations are off.
    pub fn decoration_mode(&self) -> DecorationMode {
        if let Some(mode) = self.decorations {
            return mode;
        }
        match (self.line_decorations, self.decorate_whole_file) {
            (Some(true), Some(true)) => DecorationMode::File,
            (Some(true), _) => DecorationMode::Line,
            _ => DecorationMode::None,
        }
    }

    /// Value `git.blame.decorations` should be migrated to, or `None` when
    /// it is already set.
    pub fn migrated_mode(&self) -> Option<DecorationMode> {
        if self.decorations.is_some() {
            return None;
        }
        Some(match self.line_decorations {
            Some(false) => DecorationMode::None,
            Some(true) if self.decorate_whole_file == Some(true) => DecorationMode::File,
            Some(true) => DecorationMode::Line,
            None => DecorationMode::Line,
        })
    }
}

/// Writes `git.blame.decorations` from the deprecated flags if it is unset.
///
/// Idempotent: once the key exists this is a no-op. Failures are logged at
/// debug level and otherwise ignored; the deprecated flags keep working
/// through [`Settings::decoration_mode`] until a later startup succeeds.
///
/// Returns the mode written, if any.
pub fn migrate_settings<S: ConfigStore + ?Sized>(store: &mut S) -> Option<DecorationMode> {
    let mode = store.settings().migrated_mode()?;
    match store.update(DECORATIONS_KEY, mode.as_str()) {
        Ok(()) => {
            tracing::info!(mode = mode.as_str(), "migrated blame decoration setting");
            Some(mode)
        }
        Err(e) => {
            tracing::debug!(error = %e, "blame settings migration failed");
            None
        }
    }
}
