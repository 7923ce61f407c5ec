//! Annotation renderer: turns one hunk into a display-ready descriptor.
//!
//! Rendering is total. Every input hunk produces a descriptor; bad commit
//! URLs fall back to the raw string and future dates read as "just now".

use chrono::{DateTime, Utc};
use unicode_segmentation::UnicodeSegmentation;
use url::Url;

use crate::matcher::HunkMatch;
use crate::theme;
use crate::types::{AnnotationDescriptor, Hunk, LineRange};

/// Maximum characters of the author display name kept in a label.
pub const MAX_AUTHOR_CHARS: usize = 25;

/// Maximum characters of the commit message kept in a label.
pub const MAX_MESSAGE_CHARS: usize = 45;

const ELLIPSIS: char = '…';

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// A relative-time unit.
struct Unit {
    name: &'static str,
    secs: i64,
    /// Count at which this unit rolls over into the next coarser one.
    carry: Option<i64>,
}

/// Units from coarsest to finest.
const UNITS: [Unit; 7] = [
    Unit { name: "year", secs: 365 * DAY, carry: None },
    Unit { name: "month", secs: 30 * DAY, carry: Some(12) },
    Unit { name: "week", secs: 7 * DAY, carry: Some(4) },
    Unit { name: "day", secs: DAY, carry: Some(7) },
    Unit { name: "hour", secs: HOUR, carry: Some(24) },
    Unit { name: "minute", secs: MINUTE, carry: Some(60) },
    Unit { name: "second", secs: 1, carry: Some(60) },
];

/// Host-supplied knobs that affect rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Base that relative commit URLs are resolved against. When `None`,
    /// `commit.url` is used verbatim.
    pub base_url: Option<Url>,
}

impl RenderOptions {
    pub fn with_base_url(base_url: Url) -> Self {
        Self { base_url: Some(base_url) }
    }
}

/// Renders `hunk` as an annotation anchored at `target_line`.
pub fn render_hunk(
    hunk: &Hunk,
    now: DateTime<Utc>,
    target_line: u32,
    options: &RenderOptions,
) -> AnnotationDescriptor {
    let label = format!(
        "{}, {}: • {}",
        truncate(&hunk.author.person.display_name, MAX_AUTHOR_CHARS),
        relative_time(hunk.author.date, now),
        truncate(&hunk.message, MAX_MESSAGE_CHARS),
    );

    AnnotationDescriptor {
        range: LineRange { start: target_line, end: target_line },
        is_whole_line: true,
        label,
        hover_text: hunk.message.clone(),
        link_url: resolve_link(&hunk.commit.url, options.base_url.as_ref()),
        light_style: theme::LIGHT,
        dark_style: theme::DARK,
    }
}

/// Renders every match in order.
pub fn render_hunks(
    matches: &[HunkMatch<'_>],
    now: DateTime<Utc>,
    options: &RenderOptions,
) -> Vec<AnnotationDescriptor> {
    matches
        .iter()
        .map(|m| render_hunk(m.hunk, now, m.target_line, options))
        .collect()
}

/// Formats the time between `date` and `now` as e.g. `"3 months ago"`.
///
/// Picks the coarsest unit no longer than the elapsed time and rounds the
/// count half-up within it, so 82 days is `"3 months ago"`. A rounded count
/// that reaches the next unit rolls over into it: 6 days 20 hours is
/// `"1 week ago"`, never `"7 days ago"`, and 12 months is `"1 year ago"`.
/// Anything under a second, including dates after `now`, is `"just now"`.
pub fn relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(date).num_seconds();
    let Some(mut idx) = UNITS.iter().position(|u| elapsed >= u.secs) else {
        return "just now".to_owned();
    };
    let mut count = round_half_up(elapsed, UNITS[idx].secs);
    while UNITS[idx].carry.is_some_and(|carry| count >= carry) {
        idx -= 1;
        count = round_half_up(elapsed, UNITS[idx].secs).max(1);
    }
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {}{plural} ago", UNITS[idx].name)
}

fn round_half_up(elapsed: i64, secs: i64) -> i64 {
    (elapsed + secs / 2) / secs
}

/// Shortens `text` to at most `max_chars` characters plus an ellipsis.
///
/// Characters are extended grapheme clusters, so an accent or other
/// combining mark stays with its base character. Whitespace left dangling at
/// the cut is dropped before the ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.grapheme_indices(true).nth(max_chars) {
        None => text.to_owned(),
        Some((cut, _)) => {
            let mut kept = text[..cut].trim_end().to_owned();
            kept.push(ELLIPSIS);
            kept
        }
    }
}

/// Resolves `commit_url` against `base`, keeping it verbatim when there is no
/// base or the join fails.
fn resolve_link(commit_url: &str, base: Option<&Url>) -> String {
    let Some(base) = base else {
        return commit_url.to_owned();
    };
    match base.join(commit_url) {
        Ok(url) => url.into(),
        Err(e) => {
            tracing::debug!(commit_url, base = %base, error = %e, "could not resolve commit link");
            commit_url.to_owned()
        }
    }
}
