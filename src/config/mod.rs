use std::env;

/// Service configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port (default: 3000)
    pub port: u16,

    /// Target S3 bucket for all asset objects (default: "assets")
    pub bucket: String,

    /// Lifetime of signed upload URLs in seconds (default: 900, S3's own default)
    pub upload_url_ttl_secs: u64,

    /// Lifetime of signed download URLs when the client sends no timeout (default: 60)
    pub download_url_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            bucket: "assets".to_string(),
            upload_url_ttl_secs: 900,
            download_url_ttl_secs: 60,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            bucket: env::var("S3_BUCKET").unwrap_or(default.bucket),

            upload_url_ttl_secs: env::var("UPLOAD_URL_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.upload_url_ttl_secs),

            download_url_ttl_secs: env::var("DOWNLOAD_URL_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.download_url_ttl_secs),
        }
    }
}
