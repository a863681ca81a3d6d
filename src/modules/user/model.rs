use bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};

/// One piece of a split secret held on behalf of another user.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Share {
    #[serde(rename = "secretID")]
    pub secret_id: String,
    /// Opaque payload; never read here, so any BSON value is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share: Option<Bson>,
}

impl Share {
    pub fn new(secret_id: impl Into<String>, share: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            share: Some(Bson::String(share.into())),
        }
    }
}

/// The parts of a user document this crate reads. Any other fields stored on
/// the document are left alone by updates.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub shares: Vec<Share>,
}

impl User {
    pub fn new(email: impl Into<String>, shares: Vec<Share>) -> Self {
        Self {
            id: None,
            email: Some(email.into()),
            shares,
        }
    }

    pub fn holds_secret(&self, secret_id: &str) -> bool {
        self.shares.iter().any(|s| s.secret_id == secret_id)
    }

    pub fn count_shares_of(&self, secret_id: &str) -> usize {
        self.shares.iter().filter(|s| s.secret_id == secret_id).count()
    }

    /// Hex id when present, otherwise the email, for progress output.
    pub fn label(&self) -> String {
        match (&self.id, &self.email) {
            (Some(id), _) => id.to_hex(),
            (None, Some(email)) => email.clone(),
            (None, None) => "<unknown>".to_string(),
        }
    }
}
