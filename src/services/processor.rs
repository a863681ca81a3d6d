use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::modules::deletion::model::Deletion;
use crate::services::store::DeletionStore;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] mongodb::error::Error),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Work done for a single deletion record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub users_updated: usize,
    pub shares_removed: usize,
    pub record_removed: bool,
}

/// Totals for one run. `shares_removed` is counted from the user documents as
/// read before each `$pull`, so it can drift if a document changes between
/// the find and the update.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub deletions_processed: usize,
    pub users_updated: usize,
    pub shares_removed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ProcessReport {
    fn start() -> Self {
        let now = Utc::now();
        Self {
            deletions_processed: 0,
            users_updated: 0,
            shares_removed: 0,
            started_at: now,
            finished_at: now,
        }
    }

    fn record(&mut self, outcome: DeletionOutcome) {
        self.deletions_processed += 1;
        self.users_updated += outcome.users_updated;
        self.shares_removed += outcome.shares_removed;
    }

    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    pub fn is_noop(&self) -> bool {
        self.deletions_processed == 0
    }
}

/// Revokes the shares named by each pending deletion record, then drops the
/// record. Nothing is transactional: an interrupted run leaves the record in
/// place and the next run repeats the work harmlessly.
pub struct DeletionProcessor<S> {
    store: S,
}

impl<S: DeletionStore> DeletionProcessor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub async fn run(&self) -> Result<ProcessReport, ProcessError> {
        let mut report = ProcessReport::start();

        let deletions = self.store.pending_deletions().await?;
        tracing::debug!(pending = deletions.len(), "loaded deletion records");

        for deletion in &deletions {
            let outcome = self.process_one(deletion).await?;
            report.record(outcome);
        }

        report.finished_at = Utc::now();
        Ok(report)
    }

    /// Pulls every share of the deletion's secret from each holder, one
    /// update per user, then removes the record even if nobody matched.
    pub async fn process_one(&self, deletion: &Deletion) -> Result<DeletionOutcome, ProcessError> {
        let deletion_id = deletion.id.ok_or_else(|| {
            ProcessError::InvalidRecord(format!("deletion for secret {} has no _id", deletion.secret_id))
        })?;
        let secret_id = deletion.secret_id.as_str();
        tracing::info!("Processing deletion {}.", secret_id);

        let mut outcome = DeletionOutcome::default();

        let holders = self.store.users_holding_secret(secret_id).await?;
        for user in &holders {
            let user_id = user.id.ok_or_else(|| {
                ProcessError::InvalidRecord(format!("user {} has no _id", user.label()))
            })?;

            if self.store.pull_shares(&user_id, secret_id).await? {
                outcome.users_updated += 1;
                outcome.shares_removed += user.count_shares_of(secret_id);
            }
            tracing::info!("Deleted shares for user {}.", user.label());
        }

        outcome.record_removed = self.store.remove_deletion(&deletion_id).await?;
        tracing::info!("Deleted deletion {}.", deletion_id.to_hex());

        Ok(outcome)
    }
}
