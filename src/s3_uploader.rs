use std::path::Path;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use log::info;

use crate::error::ScrapeError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Uploads `local_path` to `bucket` as `remote_name`, or as the file's
    /// base name when no remote name is given.
    async fn upload_file(
        &self,
        local_path: &Path,
        bucket: &str,
        remote_name: Option<String>,
    ) -> Result<(), ScrapeError>;
}

pub fn default_remote_name(local_path: &Path) -> String {
    local_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| local_path.to_string_lossy().into_owned())
}

/// Uploads to S3 with credentials from the standard AWS environment.
pub struct S3Uploader {
    client: aws_sdk_s3::Client,
}

impl S3Uploader {
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
        }
    }
}

#[async_trait]
impl Uploader for S3Uploader {
    async fn upload_file(
        &self,
        local_path: &Path,
        bucket: &str,
        remote_name: Option<String>,
    ) -> Result<(), ScrapeError> {
        let key = remote_name.unwrap_or_else(|| default_remote_name(local_path));
        let upload_error = |source: Box<dyn std::error::Error + Send + Sync>| ScrapeError::Upload {
            bucket: bucket.to_string(),
            key: key.clone(),
            source,
        };

        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| upload_error(Box::new(e)))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(&key)
            .body(body)
            .content_type("text/csv")
            .send()
            .await
            .map_err(|e| upload_error(Box::new(e)))?;

        info!("{} successfully uploaded to s3 bucket: {}", key, bucket);
        Ok(())
    }
}

/// Uploads the run's output file under its base name.
pub async fn upload_output<U: Uploader + ?Sized>(
    uploader: &U,
    bucket: Option<&str>,
    path: &Path,
) -> Result<(), ScrapeError> {
    let bucket = bucket.ok_or(ScrapeError::MissingBucket)?;
    uploader.upload_file(path, bucket, None).await
}
