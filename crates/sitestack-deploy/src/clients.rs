//! AWS client construction.

use aws_config::BehaviorVersion;
use sitestack_core::SiteConfig;

/// Environment variable overriding the AWS endpoint, for local emulators.
const ENDPOINT_ENV: &str = "AWS_ENDPOINT_URL";

/// The set of service clients the deploy engine needs.
#[derive(Debug, Clone)]
pub struct AwsClients {
    /// S3 client for buckets and object uploads.
    pub s3: aws_sdk_s3::Client,
    /// CloudFront client for distributions and invalidations.
    pub cloudfront: aws_sdk_cloudfront::Client,
    /// Budgets client for cost budgets.
    pub budgets: aws_sdk_budgets::Client,
}

impl AwsClients {
    /// Build clients from the ambient AWS environment.
    ///
    /// Honors `AWS_ENDPOINT_URL` so the engine can target a local emulator;
    /// when the override is set, S3 uses path-style addressing since
    /// virtual-hosted buckets do not resolve against localhost.
    pub async fn connect(config: &SiteConfig) -> Self {
        let endpoint = std::env::var(ENDPOINT_ENV).ok();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.to_string()));
        if let Some(url) = &endpoint {
            loader = loader.endpoint_url(url);
        }
        let shared = loader.load().await;

        let s3 = aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::config::Builder::from(&shared)
                .force_path_style(endpoint.is_some())
                .build(),
        );
        let cloudfront = aws_sdk_cloudfront::Client::new(&shared);
        let budgets = aws_sdk_budgets::Client::new(&shared);

        Self {
            s3,
            cloudfront,
            budgets,
        }
    }
}
