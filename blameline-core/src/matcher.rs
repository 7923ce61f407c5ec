//! Hunk matcher: decides which hunks need an annotation and on which line.

use crate::types::{Hunk, Selection};

/// A hunk paired with the editor line its annotation is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkMatch<'a> {
    pub hunk: &'a Hunk,
    pub target_line: u32,
}

/// Matches `hunks` against the viewer's selections.
///
/// With `None`, every hunk is matched once at its own first line, in input
/// order. With `Some`, selections are processed in the order given and each
/// emits the hunks that share at least one line with it, in hunk order. The
/// annotation lands on the hunk's first line when that line is selected and on
/// the selection's first line otherwise, so it never sits above the viewport.
///
/// Overlapping selections yield duplicate matches; nothing is deduplicated.
pub fn match_hunks<'a>(hunks: &'a [Hunk], selections: Option<&[Selection]>) -> Vec<HunkMatch<'a>> {
    let Some(selections) = selections else {
        return hunks
            .iter()
            .map(|hunk| HunkMatch { hunk, target_line: hunk.first_line() })
            .collect();
    };

    let mut matches = Vec::new();
    for selection in selections {
        let sel_start = selection.start.line.min(selection.end.line);
        let sel_end = selection.start.line.max(selection.end.line);
        for hunk in hunks {
            let Some(last) = hunk.last_line() else {
                continue;
            };
            let first = hunk.first_line();
            if sel_start > last || sel_end < first {
                continue;
            }
            matches.push(HunkMatch { hunk, target_line: first.max(sel_start) });
        }
    }
    tracing::debug!(
        hunks = hunks.len(),
        selections = selections.len(),
        matches = matches.len(),
        "matched hunks to selections"
    );
    matches
}
