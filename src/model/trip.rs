use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection of entries owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub title: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    pub fn new(title: impl Into<String>, created_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created_by,
            created_at: Utc::now(),
        }
    }
}
