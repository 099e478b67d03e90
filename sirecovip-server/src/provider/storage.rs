//! Provider object storage API
//!
//! Uploads go straight through as raw bytes; the provider serves them
//! back from a public bucket URL. There is no compensation path: if a
//! database write fails after an upload, the object stays in the bucket.

use super::error::{ProviderResult, error_from_response};
use super::ProviderClient;

/// Storage sub-API, borrowed from a [`ProviderClient`]
pub struct StorageApi<'a> {
    client: &'a ProviderClient,
}

impl<'a> StorageApi<'a> {
    pub(super) fn new(client: &'a ProviderClient) -> Self {
        Self { client }
    }

    /// Upload an object into `bucket` at `path`
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ProviderResult<()> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.client.base_url(),
            bucket,
            path
        );

        let req = self
            .client
            .service_headers(self.client.http().post(&url))
            .header(http::header::CONTENT_TYPE, content_type)
            .body(bytes);

        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(())
    }

    /// Public URL for an object in a public bucket
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.client.base_url(),
            bucket,
            path
        )
    }
}
