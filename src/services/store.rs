use async_trait::async_trait;
use bson::oid::ObjectId;
use mongodb::Database;

use crate::modules::deletion::{crud::DeletionCrud, model::Deletion};
use crate::modules::user::{crud::UserCrud, model::User};
use crate::services::processor::ProcessError;

/// The four calls the deletion processor needs from the database.
#[async_trait]
pub trait DeletionStore: Send + Sync {
    async fn pending_deletions(&self) -> Result<Vec<Deletion>, ProcessError>;

    async fn users_holding_secret(&self, secret_id: &str) -> Result<Vec<User>, ProcessError>;

    /// Returns whether the user document changed.
    async fn pull_shares(&self, user_id: &ObjectId, secret_id: &str) -> Result<bool, ProcessError>;

    /// Returns whether a record was removed.
    async fn remove_deletion(&self, deletion_id: &ObjectId) -> Result<bool, ProcessError>;
}

pub struct MongoStore {
    deletions: DeletionCrud,
    users: UserCrud,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            deletions: DeletionCrud::new(db),
            users: UserCrud::new(db),
        }
    }
}

#[async_trait]
impl DeletionStore for MongoStore {
    async fn pending_deletions(&self) -> Result<Vec<Deletion>, ProcessError> {
        Ok(self.deletions.find_all().await?)
    }

    async fn users_holding_secret(&self, secret_id: &str) -> Result<Vec<User>, ProcessError> {
        Ok(self.users.find_with_secret(secret_id).await?)
    }

    async fn pull_shares(&self, user_id: &ObjectId, secret_id: &str) -> Result<bool, ProcessError> {
        Ok(self.users.pull_shares(user_id, secret_id).await?)
    }

    async fn remove_deletion(&self, deletion_id: &ObjectId) -> Result<bool, ProcessError> {
        Ok(self.deletions.delete(deletion_id).await?)
    }
}
