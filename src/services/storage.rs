use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;

/// Issues time-limited signed references against an object store.
/// Production uses S3; tests inject an in-memory fake.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Signed URL permitting a single PUT of the object `key` until expiry.
    async fn issue_upload_url(&self, key: &str, expires_in_secs: u64) -> Result<String>;

    /// Signed URL permitting GET of the object `key` until expiry.
    async fn issue_download_url(&self, key: &str, expires_in_secs: u64) -> Result<String>;
}

pub struct S3StorageService {
    client: Client,
    bucket: String,
}

impl S3StorageService {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn issue_upload_url(&self, key: &str, expires_in_secs: u64) -> Result<String> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(expires_in_secs))?;
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await?;
        Ok(presigned.uri().to_string())
    }

    async fn issue_download_url(&self, key: &str, expires_in_secs: u64) -> Result<String> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(expires_in_secs))?;
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await?;
        Ok(presigned.uri().to_string())
    }
}
