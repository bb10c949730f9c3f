use crate::services::storage::S3StorageService;
use aws_sdk_s3::config::Region;
use std::env;
use std::sync::Arc;
use tracing::info;

/// Builds the S3 client from the environment. `S3_ENDPOINT` and static
/// credentials are optional; without them the SDK's default provider chain
/// and region resolution apply (real AWS). With an endpoint set we assume an
/// S3-compatible store like MinIO and switch to path-style addressing.
pub async fn setup_storage(bucket: String) -> Arc<S3StorageService> {
    let endpoint_url = env::var("S3_ENDPOINT").ok();
    let region = env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string());

    info!(
        "☁️  S3 Storage: {} (Bucket: {})",
        endpoint_url.as_deref().unwrap_or("aws default"),
        bucket
    );

    let mut loader = aws_config::from_env().region(Region::new(region));
    if let Some(url) = &endpoint_url {
        loader = loader.endpoint_url(url);
    }
    if let (Ok(access_key), Ok(secret_key)) =
        (env::var("S3_ACCESS_KEY"), env::var("S3_SECRET_KEY"))
    {
        loader = loader.credentials_provider(aws_sdk_s3::config::Credentials::new(
            access_key, secret_key, None, None, "static",
        ));
    }
    let aws_config = loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(endpoint_url.is_some())
        .build();

    let s3_client = aws_sdk_s3::Client::from_conf(s3_config);
    Arc::new(S3StorageService::new(s3_client, bucket))
}
