use bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};

/// A pending request to revoke every share of one secret.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Deletion {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "secretID")]
    pub secret_id: String,
    /// How many shares had been handed out when the owner left. Informational
    /// only, kept as raw BSON since writers store it as int or double.
    #[serde(rename = "numShares", default, skip_serializing_if = "Option::is_none")]
    pub num_shares: Option<Bson>,
}

impl Deletion {
    pub fn new(secret_id: impl Into<String>) -> Self {
        Self {
            id: None,
            secret_id: secret_id.into(),
            num_shares: None,
        }
    }

    pub fn with_num_shares(mut self, num_shares: i64) -> Self {
        self.num_shares = Some(Bson::Int64(num_shares));
        self
    }
}
