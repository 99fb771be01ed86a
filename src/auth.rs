//! Authenticated-identity context.
//!
//! Sign-in itself (magic links, OAuth, session cookies) belongs to the
//! external identity provider. This crate only consumes the result: an
//! `Identity` resolved by the embedding application and passed explicitly
//! into every operation that persists data on behalf of a user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            email: None,
        }
    }
}
