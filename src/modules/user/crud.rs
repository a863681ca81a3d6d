use crate::modules::user::model::User;
use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

pub const COLLECTION_NAME: &str = "users";

pub struct UserCrud {
    collection: Collection<User>,
}

impl UserCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn create(&self, user: User) -> Result<Option<ObjectId>, mongodb::error::Error> {
        let result = self.collection.insert_one(user).await?;
        Ok(result.inserted_id.as_object_id())
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, mongodb::error::Error> {
        self.collection.find_one(doc! { "_id": id }).await
    }

    /// Users holding at least one share of `secret_id`.
    pub async fn find_with_secret(&self, secret_id: &str) -> Result<Vec<User>, mongodb::error::Error> {
        use futures::TryStreamExt;

        let cursor = self
            .collection
            .find(doc! { "shares": { "$elemMatch": { "secretID": secret_id } } })
            .await?;

        cursor.try_collect().await
    }

    /// Removes every share of `secret_id` from one user in a single update.
    pub async fn pull_shares(&self, id: &ObjectId, secret_id: &str) -> Result<bool, mongodb::error::Error> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$pull": { "shares": { "secretID": secret_id } } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }
}
