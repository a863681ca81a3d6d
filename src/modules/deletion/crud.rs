use crate::modules::deletion::model::Deletion;
use bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

pub const COLLECTION_NAME: &str = "deletions";

pub struct DeletionCrud {
    collection: Collection<Deletion>,
}

impl DeletionCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn create(&self, deletion: Deletion) -> Result<Option<ObjectId>, mongodb::error::Error> {
        let result = self.collection.insert_one(deletion).await?;
        Ok(result.inserted_id.as_object_id())
    }

    pub async fn find_all(&self) -> Result<Vec<Deletion>, mongodb::error::Error> {
        use futures::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;

        cursor.try_collect().await
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, mongodb::error::Error> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
