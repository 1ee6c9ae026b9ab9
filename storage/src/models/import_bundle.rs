//! Bulk-import document: social profiles and posts loaded together (e.g. from a JSON export).

use guard_core::{Author, Post};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportBundle {
    #[serde(default)]
    pub users: Vec<Author>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl ImportBundle {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
