//! Value types shared by the matcher, the renderer, and host adapters.
//!
//! Two line-numbering conventions meet here. Hunks carry the numbers git blame
//! reports (1-based, `end_line` exclusive). Selections and annotation targets
//! use editor lines (0-based). [`Hunk::first_line`] and [`Hunk::last_line`]
//! are the only place the conversion happens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The person a hunk is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub display_name: String,
}

/// Author signature of the revision that last touched a hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub person: Person,
    /// Authoring time. Deserialized from an RFC 3339 string with any offset.
    pub date: DateTime<Utc>,
}

/// Commit metadata needed to build an annotation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Absolute URL, or a path relative to the configured code-host base.
    pub url: String,
}

/// A contiguous range of lines attributed to one revision.
///
/// `start_line` and `end_line` are 1-based and `end_line` is exclusive, so a
/// hunk covering only the first line of a file is `[1, 2)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    pub start_line: u32,
    pub end_line: u32,
    pub author: Author,
    pub rev: String,
    pub message: String,
    pub commit: Commit,
}

impl Hunk {
    /// First editor line (0-based) covered by this hunk.
    pub fn first_line(&self) -> u32 {
        self.start_line.saturating_sub(1)
    }

    /// Last editor line (0-based, inclusive) covered by this hunk.
    ///
    /// Returns `None` for an empty or inverted hunk, which covers no lines.
    pub fn last_line(&self) -> Option<u32> {
        if self.end_line <= self.start_line {
            return None;
        }
        Some(self.end_line.saturating_sub(2))
    }
}

/// A 0-based position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A viewer-chosen range of a document. `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Selection spanning whole lines `start..=end` (0-based).
    pub fn lines(start: u32, end: u32) -> Self {
        Self::new(Position::new(start, 0), Position::new(end, 0))
    }

    /// Zero-width selection at the start of `line`.
    pub fn caret(line: u32) -> Self {
        Self::lines(line, line)
    }
}

/// A range of editor lines. Annotations use a zero-width one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

/// An RGBA color that displays in CSS `rgba(r, g, b, a)` form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Composites this color over an opaque `base`, returning opaque RGB.
    pub fn over(self, base: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (f32::from(fg) * a + f32::from(bg) * (1.0 - a)).round() as u8;
        (mix(self.r, base.0), mix(self.g, base.1), mix(self.b, base.2))
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Foreground and background colors for one background variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swatch {
    pub background_color: Rgba,
    pub color: Rgba,
}

/// A render-agnostic annotation for the host to draw at the end of a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationDescriptor {
    /// Zero-width range at the target line.
    pub range: LineRange,
    /// Always `true`: annotations are end-of-line decorations.
    pub is_whole_line: bool,
    pub label: String,
    pub hover_text: String,
    #[serde(rename = "linkURL")]
    pub link_url: String,
    pub light_style: Swatch,
    pub dark_style: Swatch,
}

impl AnnotationDescriptor {
    /// The editor line (0-based) this annotation is anchored to.
    pub fn target_line(&self) -> u32 {
        self.range.start
    }
}
