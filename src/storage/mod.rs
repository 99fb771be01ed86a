//! Object storage seam for uploaded recordings.
//!
//! One write (upload the blob at a generated key) and one read (resolve a
//! public URL for that key) per saved recording; the storage service
//! itself is external.

mod http;
mod memory;

pub use http::HttpObjectStore;
pub use memory::{MemoryObjectStore, StoredObject};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `body` at `key` with the given content type.
    async fn upload(&self, key: &str, body: Bytes, content_type: &str)
        -> Result<(), StorageError>;

    /// Publicly resolvable URL for an uploaded key.
    fn public_url(&self, key: &str) -> String;
}
