//! `JsonLibrary` through the `Library` capability, on real files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use ref_core::enums::TrailOp;
use ref_fix::{
    ChoicePresenter, Diagnostics, FixActionType, FixOption, Library, RecordUpdate,
    run_fix_interaction,
};
use ref_schema::SchemaRegistry;
use ref_store::{JsonLibrary, MutationTrail, read_check_results};

fn seed(dir: &Path) -> PathBuf {
    let path = dir.join("library.json");
    let library = serde_json::json!([
        {
            "id": "he2016deep",
            "type": "paper-conference",
            "title": "Deep Residual Learning for Image Recognition",
            "author": [{ "family": "He", "given": "Kaiming" }],
            "page": "1-9",
            "custom": { "uuid": "u-he", "attachments": ["he2016.pdf"] },
            "note": "keep me"
        },
        {
            "id": "wakefield1998",
            "type": "article-journal",
            "title": "Ileal-lymphoid-nodular hyperplasia",
            "custom": { "uuid": "u-wake" }
        }
    ]);
    std::fs::write(&path, serde_json::to_string_pretty(&library).unwrap()).unwrap();
    path
}

#[tokio::test]
async fn mutations_persist_and_unknown_keys_survive() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed(dir.path());

    let mut library = JsonLibrary::open(&path).unwrap();
    let outcome = library
        .update(
            "he2016deep",
            RecordUpdate {
                page: Some("770-778".into()),
                ..RecordUpdate::default()
            },
        )
        .await
        .unwrap();
    assert!(outcome.updated);
    assert!(library.remove("wakefield1998").await.unwrap().removed);
    assert!(library.has_pending());
    library.save().await.unwrap();
    assert!(!library.has_pending());

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw.as_array().unwrap().len(), 1);
    assert_eq!(raw[0]["page"], "770-778");
    assert_eq!(raw[0]["note"], "keep me");
    assert_eq!(raw[0]["custom"]["attachments"][0], "he2016.pdf");
}

#[tokio::test]
async fn unknown_ids_are_not_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = JsonLibrary::open(seed(dir.path())).unwrap();

    assert!(library.find("ghost").await.unwrap().is_none());
    assert!(
        !library
            .update("ghost", RecordUpdate::tag("x"))
            .await
            .unwrap()
            .updated
    );
    assert!(!library.remove("ghost").await.unwrap().removed);
    assert!(!library.has_pending());
}

#[tokio::test]
async fn trail_is_written_only_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let trail_path = dir.path().join("trail/library.jsonl");
    let trail = MutationTrail::new(&trail_path).unwrap();
    let mut library = JsonLibrary::open(seed(dir.path()))
        .unwrap()
        .with_trail(trail.clone());

    library
        .update("he2016deep", RecordUpdate::tag("needs-review"))
        .await
        .unwrap();
    // Re-applying the same tag changes nothing and logs nothing.
    library
        .update("he2016deep", RecordUpdate::tag("needs-review"))
        .await
        .unwrap();
    library.remove("wakefield1998").await.unwrap();
    assert!(trail.read().unwrap().is_empty());

    library.save().await.unwrap();

    let entries = trail.read().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].op, TrailOp::Update);
    assert_eq!(entries[0].uuid.as_deref(), Some("u-he"));
    assert_eq!(entries[0].fields, vec!["tags"]);
    assert_eq!(entries[1].op, TrailOp::Remove);
    assert_eq!(entries[1].id, "wakefield1998");

    let registry = SchemaRegistry::new();
    for entry in &entries {
        registry
            .validate("trail_entry", &serde_json::to_value(entry).unwrap())
            .unwrap();
    }
}

struct Always(FixActionType);

#[async_trait]
impl ChoicePresenter for Always {
    async fn present_choice(
        &mut self,
        _prompt: &str,
        options: &[FixOption],
    ) -> Option<FixActionType> {
        options
            .iter()
            .any(|option| option.action == self.0)
            .then_some(self.0)
    }
}

struct Quiet;

impl Diagnostics for Quiet {
    fn info(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

#[tokio::test]
async fn fix_run_against_file_library() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed(dir.path());
    let results_path = dir.path().join("results.jsonl");
    std::fs::write(
        &results_path,
        concat!(
            r#"{"id":"wakefield1998","uuid":"u-wake","status":"warning","findings":[{"type":"retracted","message":"Retracted 2010"}],"checkedAt":"2026-01-05T10:00:00Z"}"#,
            "\n",
            r#"{"id":"he2016deep","uuid":"u-he","status":"ok","checkedAt":"2026-01-05T10:00:00Z"}"#,
            "\n",
        ),
    )
    .unwrap();

    let results = read_check_results(&results_path, &SchemaRegistry::new()).unwrap();
    let mut library = JsonLibrary::open(&path).unwrap();

    let summary = run_fix_interaction(
        &results,
        &mut library,
        &mut Always(FixActionType::Remove),
        &Quiet,
    )
    .await
    .unwrap();

    assert_eq!(summary.total_findings, 1);
    assert_eq!(summary.removed, vec!["wakefield1998"]);

    let reopened = JsonLibrary::open(&path).unwrap();
    let ids: Vec<&str> = reopened.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["he2016deep"]);
}

#[tokio::test]
async fn save_keeps_csl_name_and_date_keys_on_every_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let seeded = serde_json::json!([
        {
            "id": "who2020",
            "type": "report",
            "title": "Global Tuberculosis Report",
            "author": [{ "literal": "World Health Organization" }],
            "issued": { "date-parts": [[2020]], "season": "Spring" },
            "custom": { "uuid": "u-who" }
        },
        {
            "id": "other",
            "type": "article-journal",
            "title": "Uber die Theorie",
            "author": [{ "family": "Neumann", "given": "John", "dropping-particle": "von" }],
            "custom": { "uuid": "u-other" }
        }
    ]);
    std::fs::write(&path, serde_json::to_string_pretty(&seeded).unwrap()).unwrap();

    let results_path = dir.path().join("results.jsonl");
    std::fs::write(
        &results_path,
        concat!(
            r#"{"id":"other","uuid":"u-other","status":"warning","findings":[{"type":"concern","message":"Expression of concern"}],"checkedAt":"2026-01-05T10:00:00Z"}"#,
            "\n",
        ),
    )
    .unwrap();

    let results = read_check_results(&results_path, &SchemaRegistry::new()).unwrap();
    let mut library = JsonLibrary::open(&path).unwrap();
    let summary = run_fix_interaction(
        &results,
        &mut library,
        &mut Always(FixActionType::TagConcern),
        &Quiet,
    )
    .await
    .unwrap();
    assert_eq!(summary.applied, 1);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[0]["author"][0]["literal"], "World Health Organization");
    assert_eq!(raw[0]["issued"]["season"], "Spring");
    assert_eq!(raw[1]["author"][0]["dropping-particle"], "von");
    assert_eq!(raw[1]["custom"]["tags"][0], "concern");
}

#[tokio::test]
async fn numeric_volume_and_issue_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    std::fs::write(&path, r#"[{"id":"a","title":"T","volume":12,"issue":3}]"#).unwrap();

    let mut library = JsonLibrary::open(&path).unwrap();
    let record = library.require("a").unwrap();
    assert_eq!(record.volume.as_deref(), Some("12"));
    assert_eq!(record.issue.as_deref(), Some("3"));

    library
        .update("a", RecordUpdate::tag("needs-review"))
        .await
        .unwrap();
    library.save().await.unwrap();

    let reopened = JsonLibrary::open(&path).unwrap();
    assert_eq!(reopened.require("a").unwrap().volume.as_deref(), Some("12"));
}

#[tokio::test]
async fn trail_failure_does_not_fail_the_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = seed(dir.path());
    // A directory where the trail file should be makes every append fail.
    let trail_path = dir.path().join("trail.jsonl");
    std::fs::create_dir(&trail_path).unwrap();
    let mut library = JsonLibrary::open(&path)
        .unwrap()
        .with_trail(MutationTrail::new(&trail_path).unwrap());

    library.remove("wakefield1998").await.unwrap();
    library.save().await.unwrap();

    assert!(library.has_pending());
    let reopened = JsonLibrary::open(&path).unwrap();
    assert_eq!(reopened.records().len(), 1);
}

#[tokio::test]
async fn tagging_a_non_list_tag_value_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    std::fs::write(&path, r#"[{"id":"a","custom":{"tags":"important"}}]"#).unwrap();

    let mut library = JsonLibrary::open(&path).unwrap();
    let err = library
        .update("a", RecordUpdate::tag("retracted"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("custom.tags is not a list"));
    assert!(!library.has_pending());
    assert_eq!(
        library.require("a").unwrap().custom["tags"],
        serde_json::json!("important")
    );
}
