//! Integration tests for the SiteStack deploy engine.
//!
//! These tests require an AWS emulator (LocalStack or compatible) at
//! `localhost:4566`. They are marked `#[ignore]` so they don't run during
//! normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p sitestack-integration -- --ignored
//! ```

use std::path::Path;
use std::sync::Once;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use sitestack_core::SiteConfig;
use sitestack_deploy::AwsClients;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the emulator.
fn endpoint_url() -> String {
    std::env::var("AWS_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

fn credentials() -> Credentials {
    Credentials::new("test", "test", None, None, "integration-test")
}

/// Create a configured S3 client pointing at the emulator.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    init_tracing();

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials())
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// Create a configured CloudFront client pointing at the emulator.
#[must_use]
pub fn cloudfront_client() -> aws_sdk_cloudfront::Client {
    init_tracing();

    let config = aws_sdk_cloudfront::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials())
        .endpoint_url(endpoint_url())
        .build();

    aws_sdk_cloudfront::Client::from_conf(config)
}

/// Create a configured Budgets client pointing at the emulator.
#[must_use]
pub fn budgets_client() -> aws_sdk_budgets::Client {
    init_tracing();

    let config = aws_sdk_budgets::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials())
        .endpoint_url(endpoint_url())
        .build();

    aws_sdk_budgets::Client::from_conf(config)
}

/// Build the full client set for a [`sitestack_deploy::Deployer`].
#[must_use]
pub fn deploy_clients() -> AwsClients {
    AwsClients {
        s3: s3_client(),
        cloudfront: cloudfront_client(),
        budgets: budgets_client(),
    }
}

/// Site configuration for a test run, isolated in its own directories.
#[must_use]
pub fn test_site_config(website_id: &str, asset_dir: &Path, data_dir: &Path) -> SiteConfig {
    SiteConfig::builder()
        .website_id(unique_name(website_id))
        .asset_dir(asset_dir.to_string_lossy().into_owned())
        .data_dir(data_dir.to_string_lossy().into_owned())
        .build()
}

/// Generate a unique logical ID for a test.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Write a minimal website (index and error pages) into `dir`.
pub fn write_sample_site(dir: &Path) {
    std::fs::write(dir.join("index.html"), "<h1>hello</h1>").expect("write index page");
    std::fs::write(dir.join("error.html"), "<h1>not found</h1>").expect("write error page");
    std::fs::create_dir_all(dir.join("css")).expect("create css dir");
    std::fs::write(dir.join("css").join("site.css"), "body{}").expect("write stylesheet");
}

mod test_deploy;
mod test_teardown;
