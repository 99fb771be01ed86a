use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use tracing::info;

use super::ObjectStore;
use crate::config::StorageConfig;
use crate::error::StorageError;

/// Object store speaking plain HTTP: `PUT {base_url}/{bucket}/{key}` to
/// upload, with the same URL serving as the public address.
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
}

impl HttpObjectStore {
    pub fn new(client: reqwest::Client, config: &StorageConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.bucket, key)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn upload(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = self.object_url(key);
        let size = body.len();

        let response = self
            .client
            .put(&url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(StorageError::Upload(format!("status {status}: {detail}")));
        }

        info!("uploaded {} bytes to {}", size, url);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        self.object_url(key)
    }
}
