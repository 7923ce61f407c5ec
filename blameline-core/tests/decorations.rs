//! End-to-end decoration cycles: settings gate, lookup, matcher, renderer,
//! host fakes, and the settings migration.

mod common;

use std::cell::Cell;

use blameline_core::{
    blame_decorations, decorate, migrate_settings, render_hunk, BoxError, DecorationMode,
    DecorationRequest, Error, Hunk, InMemoryConfig, InMemoryEditor, Selection, Settings,
};
use common::{hunk_1, hunk_2, hunk_3, now, options, three_hunks};

/// Lookup that counts its calls and always returns the three fixture hunks.
struct CountingLookup {
    calls: Cell<usize>,
}

impl CountingLookup {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl blameline_core::HunkLookup for CountingLookup {
    async fn hunks(&self, _uri: &str) -> Result<Vec<Hunk>, BoxError> {
        self.calls.set(self.calls.get() + 1);
        Ok(three_hunks())
    }
}

fn line_decorations(enabled: bool) -> Settings {
    Settings { line_decorations: Some(enabled), ..Settings::default() }
}

fn mode(mode: DecorationMode) -> Settings {
    Settings { decorations: Some(mode), ..Settings::default() }
}

async fn run(settings: &Settings, selections: Option<&[Selection]>, lookup: &CountingLookup) -> Vec<blameline_core::AnnotationDescriptor> {
    let options = options();
    let request = DecorationRequest { uri: "a", settings, selections, now: now(), options: &options };
    blame_decorations(request, lookup).await.unwrap()
}

#[tokio::test]
async fn disabled_decorations_skip_the_lookup() {
    let lookup = CountingLookup::new();
    assert!(run(&line_decorations(false), None, &lookup).await.is_empty());
    assert!(run(&mode(DecorationMode::None), Some(&[Selection::caret(1)][..]), &lookup).await.is_empty());
    assert!(run(&Settings::default(), None, &lookup).await.is_empty());
    assert_eq!(lookup.calls.get(), 0);
}

#[tokio::test]
async fn all_hunks_when_no_selections() {
    let lookup = CountingLookup::new();
    let decorations = run(&line_decorations(true), None, &lookup).await;
    let o = options();
    assert_eq!(
        decorations,
        vec![
            render_hunk(&hunk_1(), now(), 0, &o),
            render_hunk(&hunk_2(), now(), 1, &o),
            render_hunk(&hunk_3(), now(), 2, &o),
        ]
    );
    assert_eq!(lookup.calls.get(), 1);
}

#[tokio::test]
async fn selected_hunks_when_selections_passed() {
    let lookup = CountingLookup::new();
    let selections = [Selection::caret(2)];
    let decorations = run(&line_decorations(true), Some(&selections[..]), &lookup).await;
    assert_eq!(decorations, vec![render_hunk(&hunk_3(), now(), 2, &options())]);
    assert_eq!(lookup.calls.get(), 1);
}

#[tokio::test]
async fn lookup_runs_once_regardless_of_selection_count() {
    let lookup = CountingLookup::new();
    let selections = [Selection::caret(0), Selection::caret(1), Selection::caret(2)];
    let decorations = run(&mode(DecorationMode::Line), Some(&selections[..]), &lookup).await;
    assert_eq!(decorations.len(), 3);
    assert_eq!(lookup.calls.get(), 1);
}

#[tokio::test]
async fn file_mode_ignores_selections() {
    let lookup = CountingLookup::new();
    let selections = [Selection::caret(2)];
    let decorations = run(&mode(DecorationMode::File), Some(&selections[..]), &lookup).await;
    assert_eq!(
        decorations.iter().map(|d| d.target_line()).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );

    let legacy = Settings {
        line_decorations: Some(true),
        decorate_whole_file: Some(true),
        ..Settings::default()
    };
    assert_eq!(run(&legacy, Some(&selections[..]), &lookup).await.len(), 3);
}

#[tokio::test]
async fn closures_work_as_lookups() {
    let seen = Cell::new(String::new());
    let lookup = |uri: String| {
        seen.set(uri);
        async { Ok::<_, BoxError>(vec![hunk_2()]) }
    };
    let settings = mode(DecorationMode::Line);
    let o = options();
    let request = DecorationRequest { uri: "git://repo?rev#file.rs", settings: &settings, selections: None, now: now(), options: &o };
    let decorations = blame_decorations(request, &lookup).await.unwrap();
    assert_eq!(decorations, vec![render_hunk(&hunk_2(), now(), 1, &o)]);
    assert_eq!(seen.take(), "git://repo?rev#file.rs");
}

#[tokio::test]
async fn lookup_failure_is_returned() {
    let lookup = |_uri: String| async { Err::<Vec<Hunk>, BoxError>("backend unavailable".into()) };
    let settings = mode(DecorationMode::Line);
    let o = options();
    let request = DecorationRequest { uri: "a", settings: &settings, selections: None, now: now(), options: &o };
    let err = blame_decorations(request, &lookup).await.unwrap_err();
    assert!(matches!(err, Error::Lookup { ref uri, .. } if uri == "a"));
    assert_eq!(err.to_string(), "blame lookup failed for a: backend unavailable");
}

#[tokio::test]
async fn decorate_hands_results_to_the_editor() {
    let lookup = CountingLookup::new();
    let mut editor = InMemoryEditor::new("a", Some(vec![Selection::lines(1, 2)]));
    decorate(&mut editor, &mode(DecorationMode::Line), &options(), &lookup, now()).await;
    let o = options();
    assert_eq!(
        editor.decorations,
        Some(vec![render_hunk(&hunk_2(), now(), 1, &o), render_hunk(&hunk_3(), now(), 2, &o)])
    );
    assert_eq!(editor.updates, 1);
}

#[tokio::test]
async fn decorate_leaves_editor_untouched_on_failure() {
    let lookup = |_uri: String| async { Err::<Vec<Hunk>, BoxError>("boom".into()) };
    let mut editor = InMemoryEditor::new("a", None);
    decorate(&mut editor, &mode(DecorationMode::File), &options(), &lookup, now()).await;
    assert_eq!(editor.decorations, None);
    assert_eq!(editor.updates, 0);
}

#[test]
fn migration_maps_deprecated_flags() {
    let cases = [
        (Settings::default(), DecorationMode::Line),
        (line_decorations(false), DecorationMode::None),
        (line_decorations(true), DecorationMode::Line),
        (
            Settings { line_decorations: Some(true), decorate_whole_file: Some(true), ..Settings::default() },
            DecorationMode::File,
        ),
        (
            Settings { line_decorations: Some(false), decorate_whole_file: Some(true), ..Settings::default() },
            DecorationMode::None,
        ),
    ];
    for (settings, expected) in cases {
        let mut store = InMemoryConfig::new(settings.clone());
        assert_eq!(migrate_settings(&mut store), Some(expected), "{settings:?}");
        assert_eq!(store.settings.decorations, Some(expected));
        assert_eq!(store.writes.get("git.blame.decorations").map(String::as_str), Some(expected.as_str()));
    }
}

#[test]
fn migration_is_idempotent() {
    let mut store = InMemoryConfig::new(line_decorations(true));
    assert_eq!(migrate_settings(&mut store), Some(DecorationMode::Line));
    assert_eq!(migrate_settings(&mut store), None);
    assert_eq!(store.writes.len(), 1);

    let mut explicit = InMemoryConfig::new(mode(DecorationMode::File));
    assert_eq!(migrate_settings(&mut explicit), None);
    assert!(explicit.writes.is_empty());
}

#[test]
fn migration_failure_is_swallowed() {
    let mut store = InMemoryConfig::new(Settings::default());
    store.fail_updates = true;
    assert_eq!(migrate_settings(&mut store), None);
    assert_eq!(store.settings.decoration_mode(), DecorationMode::None);
}

#[test]
fn explicit_mode_wins_over_deprecated_flags() {
    let settings = Settings {
        decorations: Some(DecorationMode::None),
        line_decorations: Some(true),
        decorate_whole_file: Some(true),
    };
    assert_eq!(settings.decoration_mode(), DecorationMode::None);
}

#[test]
fn settings_deserialize_from_dotted_keys() {
    let settings: Settings = serde_json::from_value(serde_json::json!({
        "git.blame.decorations": "file",
        "git.blame.lineDecorations": false,
        "unrelated.key": 1
    }))
    .unwrap();
    assert_eq!(settings.decorations, Some(DecorationMode::File));
    assert_eq!(settings.line_decorations, Some(false));
    assert_eq!(settings.decorate_whole_file, None);
}

#[test]
fn hunks_deserialize_from_camel_case_json() {
    let hunk: Hunk = serde_json::from_value(serde_json::json!({
        "startLine": 1,
        "endLine": 2,
        "author": { "person": { "displayName": "a" }, "date": "2018-09-10T21:52:45Z" },
        "rev": "b",
        "message": "c",
        "commit": { "url": "d" }
    }))
    .unwrap();
    assert_eq!(hunk, hunk_1());
}
