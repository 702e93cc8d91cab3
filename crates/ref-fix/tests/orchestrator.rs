//! End-to-end accounting of the remediation loop.

mod common;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use ref_core::entities::{CheckFinding, FindingDetails, RemoteMetadata};
use ref_core::enums::{CheckStatus, FindingKind};
use ref_core::responses::FixInteractionResult;
use ref_fix::{
    DeclineAll, DefaultFixRegistry, FixActionRegistry, FixActionType, FixError, FixOption,
    FixSession, run_fix_interaction,
};

use common::{MemoryLibrary, RecordingDiagnostics, ScriptedPresenter, check, record, warning};

fn finding(kind: FindingKind) -> CheckFinding {
    CheckFinding::new(kind, format!("{kind} detected"))
}

#[tokio::test]
async fn unactionable_finding_counts_toward_total_only() {
    let mut library = MemoryLibrary::with(vec![record("a"), record("b")]);
    let mut presenter = ScriptedPresenter::answering([Some(FixActionType::TagRetracted)]);
    let diagnostics = RecordingDiagnostics::default();

    let results = vec![
        warning("a", vec![finding(FindingKind::SourceUnavailable)]),
        warning("b", vec![finding(FindingKind::Retracted)]),
    ];

    let summary = run_fix_interaction(&results, &mut library, &mut presenter, &diagnostics)
        .await
        .unwrap();

    assert_eq!(
        summary,
        FixInteractionResult {
            total_findings: 2,
            applied: 1,
            skipped: 0,
            failed: 0,
            removed: Vec::new(),
        }
    );
    assert_eq!(presenter.prompts.len(), 1);
    assert_eq!(library.get("b").unwrap().tags(), vec!["retracted"]);
    assert_eq!(library.saves, 1);
}

#[tokio::test]
async fn failed_re_read_keeps_the_run_going() {
    let mut library = MemoryLibrary::with(vec![record("a")]);
    library.fail_finds_after = Some(1);
    let mut presenter = ScriptedPresenter::answering([
        Some(FixActionType::TagRetracted),
        Some(FixActionType::TagConcern),
    ]);
    let diagnostics = RecordingDiagnostics::default();

    let results = vec![warning(
        "a",
        vec![finding(FindingKind::Retracted), finding(FindingKind::Concern)],
    )];

    let summary = run_fix_interaction(&results, &mut library, &mut presenter, &diagnostics)
        .await
        .unwrap();

    assert_eq!(summary.applied, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(library.finds.load(std::sync::atomic::Ordering::SeqCst), 3);
    assert_eq!(library.get("a").unwrap().tags(), vec!["retracted", "concern"]);
    assert_eq!(library.saves, 1);
}

#[tokio::test]
async fn vanished_record_contributes_nothing() {
    let mut library = MemoryLibrary::with(vec![record("present")]);
    let mut presenter = ScriptedPresenter::default();
    let diagnostics = RecordingDiagnostics::default();

    let results = vec![warning(
        "gone",
        vec![finding(FindingKind::Retracted), finding(FindingKind::Concern)],
    )];

    let summary = run_fix_interaction(&results, &mut library, &mut presenter, &diagnostics)
        .await
        .unwrap();

    assert_eq!(summary, FixInteractionResult::default());
    assert!(presenter.prompts.is_empty());
    assert!(diagnostics.errors().is_empty());
    assert_eq!(library.saves, 0);
}

#[tokio::test]
async fn ok_and_skipped_results_are_ignored() {
    let mut library = MemoryLibrary::with(vec![record("a"), record("b")]);
    let mut presenter = ScriptedPresenter::default();
    let diagnostics = RecordingDiagnostics::default();

    // Findings on non-warning results are never expanded.
    let results = vec![
        check("a", CheckStatus::Ok, vec![finding(FindingKind::Retracted)]),
        check("b", CheckStatus::Skipped, vec![finding(FindingKind::Concern)]),
    ];

    let summary = run_fix_interaction(&results, &mut library, &mut presenter, &diagnostics)
        .await
        .unwrap();

    assert_eq!(summary.total_findings, 0);
    assert!(presenter.prompts.is_empty());
}

#[tokio::test]
async fn declined_prompt_and_skip_action_both_count_as_skipped() {
    let mut library = MemoryLibrary::with(vec![record("a")]);
    let mut presenter = ScriptedPresenter::answering([None, Some(FixActionType::Skip)]);
    let diagnostics = RecordingDiagnostics::default();

    let results = vec![warning(
        "a",
        vec![finding(FindingKind::Concern), finding(FindingKind::VersionChanged)],
    )];

    let summary = run_fix_interaction(&results, &mut library, &mut presenter, &diagnostics)
        .await
        .unwrap();

    assert_eq!(summary.total_findings, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.applied, 0);
    assert_eq!(library.saves, 0, "nothing applied, nothing saved");
}

#[tokio::test]
async fn failed_mutation_is_reported_and_run_continues() {
    let mut library = MemoryLibrary::with(vec![record("a"), record("b")]);
    let mut presenter = ScriptedPresenter::answering([
        Some(FixActionType::UpdateToPublished),
        Some(FixActionType::Remove),
    ]);
    let diagnostics = RecordingDiagnostics::default();

    // No newDoi in details: the update cannot be applied.
    let results = vec![
        warning("a", vec![finding(FindingKind::VersionChanged)]),
        warning("b", vec![finding(FindingKind::Retracted)]),
    ];

    let summary = run_fix_interaction(&results, &mut library, &mut presenter, &diagnostics)
        .await
        .unwrap();

    assert_eq!(
        summary,
        FixInteractionResult {
            total_findings: 2,
            applied: 1,
            skipped: 0,
            failed: 1,
            removed: vec!["b".to_string()],
        }
    );
    assert_eq!(
        diagnostics.errors(),
        vec!["a: update_to_published failed: finding carries no published DOI"]
    );
    assert!(library.get("b").is_none());
}

#[tokio::test]
async fn library_errors_become_failed_findings() {
    let mut library = MemoryLibrary::with(vec![record("a")]);
    library.fail_updates = true;
    let mut presenter = ScriptedPresenter::answering([Some(FixActionType::TagConcern)]);
    let diagnostics = RecordingDiagnostics::default();

    let results = vec![warning("a", vec![finding(FindingKind::Concern)])];
    let summary = run_fix_interaction(&results, &mut library, &mut presenter, &diagnostics)
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.applied, 0);
    assert!(diagnostics.errors()[0].contains("read-only"));
}

#[tokio::test]
async fn removed_record_is_not_presented_again() {
    let mut library = MemoryLibrary::with(vec![record("a")]);
    let mut presenter = ScriptedPresenter::answering([Some(FixActionType::Remove)]);
    let diagnostics = RecordingDiagnostics::default();

    let results = vec![warning(
        "a",
        vec![
            finding(FindingKind::Retracted),
            finding(FindingKind::MetadataMismatch),
        ],
    )];

    let summary = run_fix_interaction(&results, &mut library, &mut presenter, &diagnostics)
        .await
        .unwrap();

    assert_eq!(summary.total_findings, 2);
    assert_eq!(summary.applied, 1);
    assert_eq!(summary.removed, vec!["a"]);
    assert_eq!(presenter.prompts.len(), 1);
}

#[tokio::test]
async fn findings_are_presented_in_input_order_with_labels() {
    let mut library = MemoryLibrary::with(vec![record("x"), record("y")]);
    let mut presenter = DeclineAll;
    let mut scripted = ScriptedPresenter::default();
    let diagnostics = RecordingDiagnostics::default();

    let results = vec![
        warning("x", vec![finding(FindingKind::MetadataOutdated)]),
        warning(
            "y",
            vec![
                CheckFinding::new(FindingKind::VersionChanged, "Published in Nature"),
                finding(FindingKind::Retracted),
            ],
        ),
    ];

    let summary = run_fix_interaction(&results, &mut library, &mut scripted, &diagnostics)
        .await
        .unwrap();
    assert_eq!(summary.skipped, 3);

    let prompts: Vec<&str> = scripted.prompts.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(
        prompts,
        vec![
            "[Metadata outdated] x: metadata_outdated detected",
            "[Published version available] y: Published in Nature",
            "[Retracted] y: retracted detected",
        ]
    );
    assert_eq!(
        scripted.prompts[0].1,
        vec![FixActionType::UpdateMetadata, FixActionType::Skip]
    );

    let declined = run_fix_interaction(&results, &mut library, &mut presenter, &diagnostics)
        .await
        .unwrap();
    assert_eq!(declined, summary);
}

#[tokio::test]
async fn later_findings_see_earlier_mutations() {
    let mut library = MemoryLibrary::with(vec![record("a")]);
    let mut presenter = ScriptedPresenter::answering([
        Some(FixActionType::TagRetracted),
        Some(FixActionType::TagRetracted),
    ]);
    let diagnostics = RecordingDiagnostics::default();

    let results = vec![warning(
        "a",
        vec![finding(FindingKind::Retracted), finding(FindingKind::Retracted)],
    )];
    let summary = run_fix_interaction(&results, &mut library, &mut presenter, &diagnostics)
        .await
        .unwrap();

    assert_eq!(summary.applied, 2);
    let infos = diagnostics.infos.lock().unwrap().clone();
    assert_eq!(infos, vec!["a: tagged 'retracted'", "a: already tagged 'retracted'"]);
    assert_eq!(library.get("a").unwrap().tags(), vec!["retracted"]);
}

#[tokio::test]
async fn metadata_update_writes_remote_values() {
    let mut local = record("he2016");
    local.page = Some("1-9".into());
    let mut library = MemoryLibrary::with(vec![local]);
    let mut presenter = ScriptedPresenter::answering([Some(FixActionType::UpdateMetadata)]);
    let diagnostics = RecordingDiagnostics::default();

    let outdated = CheckFinding::new(FindingKind::MetadataOutdated, "page differs").with_details(
        FindingDetails {
            changed_fields: vec!["page".into()],
            remote: Some(RemoteMetadata {
                page: Some("770-778".into()),
                ..RemoteMetadata::default()
            }),
            ..FindingDetails::default()
        },
    );

    let summary = run_fix_interaction(
        &[warning("he2016", vec![outdated])],
        &mut library,
        &mut presenter,
        &diagnostics,
    )
    .await
    .unwrap();

    assert_eq!(summary.applied, 1);
    let stored = library.get("he2016").unwrap();
    assert_eq!(stored.page.as_deref(), Some("770-778"));
    assert_eq!(stored.title.as_deref(), Some("Title of he2016"));
}

#[tokio::test]
async fn save_failure_is_the_only_run_error() {
    let mut library = MemoryLibrary::with(vec![record("a")]);
    library.fail_save = true;
    let mut presenter = ScriptedPresenter::answering([Some(FixActionType::TagConcern)]);
    let diagnostics = RecordingDiagnostics::default();

    let err = run_fix_interaction(
        &[warning("a", vec![finding(FindingKind::Concern)])],
        &mut library,
        &mut presenter,
        &diagnostics,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, FixError::Save(_)));
    assert!(err.to_string().contains("disk full"));
}

/// Offers only `remove`, whatever the finding.
struct RemoveOnly;

#[async_trait]
impl FixActionRegistry for RemoveOnly {
    fn actions_for(&self, _finding: &CheckFinding) -> Vec<FixOption> {
        vec![FixOption::from(FixActionType::Remove)]
    }
}

#[tokio::test]
async fn custom_registry_drives_the_options() {
    let mut library = MemoryLibrary::with(vec![record("a")]);
    let mut presenter = ScriptedPresenter::answering([Some(FixActionType::Remove)]);
    let diagnostics = RecordingDiagnostics::default();
    let results = vec![warning("a", vec![finding(FindingKind::SourceUnavailable)])];

    let default_summary = FixSession::new(
        &mut library,
        &DefaultFixRegistry,
        &mut DeclineAll,
        &diagnostics,
    )
    .run(&results)
    .await
    .unwrap();
    assert_eq!(default_summary.applied, 0);

    let summary = FixSession::new(&mut library, &RemoveOnly, &mut presenter, &diagnostics)
        .run(&results)
        .await
        .unwrap();

    assert_eq!(summary.removed, vec!["a"]);
    assert_eq!(presenter.prompts[0].1, vec![FixActionType::Remove]);
    assert!(library.records.is_empty());
}
