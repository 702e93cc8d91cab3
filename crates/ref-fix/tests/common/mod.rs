//! In-memory test doubles for the fix capabilities.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use ref_core::entities::{BibliographicRecord, CheckFinding, CheckResult};
use ref_core::enums::CheckStatus;
use ref_fix::{
    ChoicePresenter, Diagnostics, FixActionType, FixOption, Library, LibraryError, RecordUpdate,
    RemoveOutcome, UpdateOutcome,
};

#[derive(Debug, Default)]
pub struct MemoryLibrary {
    pub records: Vec<BibliographicRecord>,
    pub saves: usize,
    pub fail_updates: bool,
    pub fail_save: bool,
    /// Lookups from this call count on fail.
    pub fail_finds_after: Option<usize>,
    pub finds: AtomicUsize,
}

impl MemoryLibrary {
    pub fn with(records: Vec<BibliographicRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn get(&self, id: &str) -> Option<&BibliographicRecord> {
        self.records.iter().find(|record| record.id == id)
    }
}

#[async_trait]
impl Library for MemoryLibrary {
    async fn find(&self, id: &str) -> Result<Option<BibliographicRecord>, LibraryError> {
        let calls = self.finds.fetch_add(1, Ordering::SeqCst);
        if self.fail_finds_after.is_some_and(|limit| calls >= limit) {
            return Err(LibraryError::Io(std::io::Error::other("lookup offline")));
        }
        Ok(self.get(id).cloned())
    }

    async fn update(
        &mut self,
        id: &str,
        update: RecordUpdate,
    ) -> Result<UpdateOutcome, LibraryError> {
        if self.fail_updates {
            return Err(LibraryError::Conflict("library is read-only".into()));
        }
        match self.records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                update.apply_to(record)?;
                Ok(UpdateOutcome { updated: true })
            }
            None => Ok(UpdateOutcome { updated: false }),
        }
    }

    async fn remove(&mut self, id: &str) -> Result<RemoveOutcome, LibraryError> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        Ok(RemoveOutcome {
            removed: self.records.len() < before,
        })
    }

    async fn save(&mut self) -> Result<(), LibraryError> {
        if self.fail_save {
            return Err(LibraryError::Io(std::io::Error::other("disk full")));
        }
        self.saves += 1;
        Ok(())
    }
}

/// Answers prompts from a script; declines once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    pub answers: VecDeque<Option<FixActionType>>,
    pub prompts: Vec<(String, Vec<FixActionType>)>,
}

impl ScriptedPresenter {
    pub fn answering(answers: impl IntoIterator<Item = Option<FixActionType>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }
}

#[async_trait]
impl ChoicePresenter for ScriptedPresenter {
    async fn present_choice(
        &mut self,
        prompt: &str,
        options: &[FixOption],
    ) -> Option<FixActionType> {
        self.prompts.push((
            prompt.to_string(),
            options.iter().map(|option| option.action).collect(),
        ));
        self.answers.pop_front().flatten()
    }
}

#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    pub infos: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

pub fn record(id: &str) -> BibliographicRecord {
    let mut record = BibliographicRecord::new(id).with_uuid(format!("uuid-{id}"));
    record.title = Some(format!("Title of {id}"));
    record
}

pub fn warning(id: &str, findings: Vec<CheckFinding>) -> CheckResult {
    check(id, CheckStatus::Warning, findings)
}

pub fn check(id: &str, status: CheckStatus, findings: Vec<CheckFinding>) -> CheckResult {
    CheckResult {
        id: id.to_string(),
        uuid: format!("uuid-{id}"),
        status,
        findings,
        checked_at: Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap(),
        checked_sources: vec!["crossref".to_string()],
    }
}
