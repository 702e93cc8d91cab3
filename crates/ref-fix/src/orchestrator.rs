//! The remediation loop.
//!
//! ```text
//! warning result ─▶ find(id) ─┬─ absent ─▶ dropped (nothing counted)
//!                             └─ record ─▶ for each finding:
//!                                           total += 1
//!                                           no actions    ─▶ next finding
//!                                           declined      ─▶ skipped
//!                                           apply failed  ─▶ failed, reported
//!                                           skip applied  ─▶ skipped
//!                                           other applied ─▶ applied (+ removed id)
//! ```
//!
//! Findings are handled strictly one at a time in input order. The library
//! is saved once, after the last finding, if anything was applied.

use ref_core::entities::{BibliographicRecord, CheckFinding, CheckResult};
use ref_core::responses::FixInteractionResult;

use crate::error::FixError;
use crate::library::Library;
use crate::presenter::{ChoicePresenter, Diagnostics};
use crate::registry::{DefaultFixRegistry, FixActionRegistry};

/// One remediation run over a batch of check results.
pub struct FixSession<'a> {
    library: &'a mut dyn Library,
    registry: &'a dyn FixActionRegistry,
    presenter: &'a mut dyn ChoicePresenter,
    diagnostics: &'a dyn Diagnostics,
    result: FixInteractionResult,
    dirty: bool,
}

impl<'a> FixSession<'a> {
    pub fn new(
        library: &'a mut dyn Library,
        registry: &'a dyn FixActionRegistry,
        presenter: &'a mut dyn ChoicePresenter,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            library,
            registry,
            presenter,
            diagnostics,
            result: FixInteractionResult::default(),
            dirty: false,
        }
    }

    /// Walk every finding of every resolvable warning result.
    ///
    /// # Errors
    ///
    /// Only a failed final save is an error. Lookup and mutation failures
    /// are reported through [`Diagnostics`] and the run continues.
    pub async fn run(mut self, results: &[CheckResult]) -> Result<FixInteractionResult, FixError> {
        for check in results.iter().filter(|check| check.is_actionable()) {
            let Some(mut record) = self.resolve_record(&check.id).await else {
                continue;
            };

            let mut removed = false;
            for finding in &check.findings {
                self.result.total_findings += 1;
                if removed {
                    tracing::debug!(
                        id = %record.id,
                        kind = %finding.kind,
                        "record already removed; finding not presented"
                    );
                    continue;
                }
                removed = self.handle_finding(&mut record, finding).await;
            }
        }

        if self.dirty {
            self.library.save().await.map_err(FixError::Save)?;
            tracing::debug!("library saved");
        }

        tracing::info!(
            total = self.result.total_findings,
            applied = self.result.applied,
            skipped = self.result.skipped,
            failed = self.result.failed,
            removed = self.result.removed.len(),
            "fix run finished"
        );
        Ok(self.result)
    }

    async fn resolve_record(&self, id: &str) -> Option<BibliographicRecord> {
        match self.library.find(id).await {
            Ok(Some(record)) => Some(record),
            Ok(None) => {
                tracing::debug!(%id, "record no longer in library; result dropped");
                None
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "record lookup failed; result dropped");
                self.diagnostics.error(&format!("{id}: lookup failed: {err}"));
                None
            }
        }
    }

    /// Present one finding and account for the outcome. Returns whether the
    /// record was removed from the library.
    async fn handle_finding(
        &mut self,
        record: &mut BibliographicRecord,
        finding: &CheckFinding,
    ) -> bool {
        let options = self.registry.actions_for(finding);
        if options.is_empty() {
            tracing::debug!(id = %record.id, kind = %finding.kind, "no actions available");
            return false;
        }

        let prompt = format!(
            "[{}] {}: {}",
            finding.kind.label(),
            record.id,
            finding.message
        );
        let Some(action) = self.presenter.present_choice(&prompt, &options).await else {
            tracing::debug!(id = %record.id, kind = %finding.kind, "no selection");
            self.result.skipped += 1;
            return false;
        };

        let outcome = self
            .registry
            .apply_action(&mut *self.library, record, finding, action)
            .await;

        if !outcome.applied {
            tracing::warn!(
                id = %record.id,
                %action,
                reason = %outcome.message,
                "fix action failed"
            );
            self.diagnostics.error(&format!(
                "{}: {action} failed: {}",
                record.id, outcome.message
            ));
            self.result.failed += 1;
            return false;
        }

        if action.is_skip() {
            self.result.skipped += 1;
            return false;
        }

        tracing::info!(id = %record.id, %action, "fix action applied");
        self.diagnostics
            .info(&format!("{}: {}", record.id, outcome.message));
        self.result.applied += 1;
        self.dirty = true;

        if outcome.removed {
            self.result.removed.push(record.id.clone());
            return true;
        }

        // Later findings for the same record see the mutated state.
        match self.library.find(&record.id).await {
            Ok(Some(fresh)) => *record = fresh,
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    id = %record.id,
                    error = %err,
                    "record re-read failed; later findings see the previous state"
                );
            }
        }
        false
    }
}

/// Run a remediation loop with the [`DefaultFixRegistry`].
///
/// # Errors
///
/// See [`FixSession::run`].
pub async fn run_fix_interaction(
    results: &[CheckResult],
    library: &mut dyn Library,
    presenter: &mut dyn ChoicePresenter,
    diagnostics: &dyn Diagnostics,
) -> Result<FixInteractionResult, FixError> {
    FixSession::new(library, &DefaultFixRegistry, presenter, diagnostics)
        .run(results)
        .await
}
