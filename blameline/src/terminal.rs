//! Terminal host: a read-only editor that prints a file with annotations.
//!
//! The translucent palette swatches are composited over a fixed backdrop per
//! theme variant, since terminals cannot blend alpha. Styling is skipped when
//! the output is not a terminal so piped output stays plain text.

use std::io::Write;

use blameline_core::theme::Variant;
use blameline_core::{AnnotationDescriptor, CodeEditor, Rgba, Selection};
use crossterm::style::{style, Color, Stylize};

/// Width reserved for line numbers in the gutter.
const GUTTER_WIDTH: usize = 5;

/// A file opened for annotation on the command line.
#[derive(Debug)]
pub struct TerminalEditor {
    uri: String,
    lines: Vec<String>,
    selections: Option<Vec<Selection>>,
    decorations: Vec<AnnotationDescriptor>,
}

impl TerminalEditor {
    pub fn new(uri: String, contents: &str, selections: Option<Vec<Selection>>) -> Self {
        Self {
            uri,
            lines: contents.lines().map(str::to_owned).collect(),
            selections,
            decorations: Vec::new(),
        }
    }

    pub fn decorations(&self) -> &[AnnotationDescriptor] {
        &self.decorations
    }

    /// Whether editor line `line` falls inside a selection. Everything is
    /// visible when there are no selections.
    fn is_visible(&self, line: u32) -> bool {
        match &self.selections {
            None => true,
            Some(selections) => selections.iter().any(|s| {
                let (lo, hi) = (s.start.line.min(s.end.line), s.start.line.max(s.end.line));
                lo <= line && line <= hi
            }),
        }
    }

    /// Prints the visible lines with a gutter, appending each line's
    /// annotations after the text.
    ///
    /// # Errors
    ///
    /// Returns `Err` if writing to `out` fails.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        variant: Variant,
        styled: bool,
        show_links: bool,
    ) -> std::io::Result<()> {
        let swatch = variant.swatch();
        let fg = to_color(swatch.color, variant);
        let bg = to_color(swatch.background_color, variant);

        // Editor lines are u32; anything past u32::MAX is not addressable.
        for (line, text) in (0..=u32::MAX).zip(&self.lines) {
            if !self.is_visible(line) {
                continue;
            }
            write!(out, "{:>width$} │ {text}", u64::from(line) + 1, width = GUTTER_WIDTH)?;
            for d in self.decorations.iter().filter(|d| d.target_line() == line) {
                let label = format!(" {} ", d.label);
                if styled {
                    write!(out, "  {}", style(label.as_str()).with(fg).on(bg))?;
                } else {
                    write!(out, "  {label}")?;
                }
                if show_links {
                    write!(out, " {}", d.link_url)?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl CodeEditor for TerminalEditor {
    fn document_uri(&self) -> &str {
        &self.uri
    }

    fn selections(&self) -> Option<Vec<Selection>> {
        self.selections.clone()
    }

    fn set_decorations(&mut self, decorations: Vec<AnnotationDescriptor>) {
        self.decorations = decorations;
    }
}

fn to_color(rgba: Rgba, variant: Variant) -> Color {
    let (r, g, b) = rgba.over(variant.backdrop());
    Color::Rgb { r, g, b }
}
