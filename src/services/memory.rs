use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::Mutex;

use crate::modules::deletion::model::Deletion;
use crate::modules::user::model::User;
use crate::services::processor::ProcessError;
use crate::services::store::DeletionStore;

/// In-memory `DeletionStore` with the same matching and update rules as the
/// MongoDB queries.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    deletions: Mutex<Vec<Deletion>>,
    users: Mutex<Vec<User>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns an id when the user has none, like an insert would.
    pub async fn insert_user(&self, mut user: User) -> ObjectId {
        let id = *user.id.get_or_insert_with(ObjectId::new);
        self.users.lock().await.push(user);
        id
    }

    pub async fn insert_deletion(&self, mut deletion: Deletion) -> ObjectId {
        let id = *deletion.id.get_or_insert_with(ObjectId::new);
        self.deletions.lock().await.push(deletion);
        id
    }

    pub async fn users(&self) -> Vec<User> {
        self.users.lock().await.clone()
    }

    pub async fn deletions(&self) -> Vec<Deletion> {
        self.deletions.lock().await.clone()
    }

    pub async fn user(&self, id: &ObjectId) -> Option<User> {
        self.users
            .lock()
            .await
            .iter()
            .find(|u| u.id.as_ref() == Some(id))
            .cloned()
    }
}

#[async_trait]
impl DeletionStore for InMemoryStore {
    async fn pending_deletions(&self) -> Result<Vec<Deletion>, ProcessError> {
        Ok(self.deletions.lock().await.clone())
    }

    async fn users_holding_secret(&self, secret_id: &str) -> Result<Vec<User>, ProcessError> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .filter(|u| u.holds_secret(secret_id))
            .cloned()
            .collect())
    }

    async fn pull_shares(&self, user_id: &ObjectId, secret_id: &str) -> Result<bool, ProcessError> {
        let mut users = self.users.lock().await;
        let Some(user) = users.iter_mut().find(|u| u.id.as_ref() == Some(user_id)) else {
            return Ok(false);
        };

        let before = user.shares.len();
        user.shares.retain(|s| s.secret_id != secret_id);
        Ok(user.shares.len() != before)
    }

    async fn remove_deletion(&self, deletion_id: &ObjectId) -> Result<bool, ProcessError> {
        let mut deletions = self.deletions.lock().await;
        let before = deletions.len();
        deletions.retain(|d| d.id.as_ref() != Some(deletion_id));
        Ok(deletions.len() != before)
    }
}
