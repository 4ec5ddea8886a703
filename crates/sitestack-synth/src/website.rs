//! The static-website construct.
//!
//! One call declares everything a domainless static site needs: a private
//! content bucket readable only by CloudFront, an access-log bucket with
//! short retention, the distribution itself, and a content-deployment step.

use std::path::Path;

use typed_builder::TypedBuilder;

use sitestack_core::{CLOUDFRONT_SERVICE_PRINCIPAL, arn};
use sitestack_model::{
    AssetDeploymentSpec, BucketSpec, CustomErrorResponse, DistributionSpec, LifecycleRule,
    LoggingSpec, ObjectOwnership, OriginSpec, PolicyStatement, Principal, PublicAccessBlock,
    RemovalPolicy,
};

use crate::error::SynthError;
use crate::stack::{BucketHandle, DistributionHandle, Stack};

/// Page served for remapped 403/404 errors.
const ERROR_PAGE: &str = "/error.html";

/// Properties for [`StaticWebsite`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct StaticWebsiteProps {
    /// Local directory holding the site assets.
    pub asset_dir: String,
    /// ARN of a WAF web ACL to attach to the distribution, if any.
    #[builder(default)]
    pub web_acl_arn: Option<String>,
}

/// Handles to the resources a website declaration produced.
#[derive(Debug, Clone)]
pub struct StaticWebsite {
    /// The content bucket.
    pub bucket: BucketHandle,
    /// The access-log bucket.
    pub log_bucket: BucketHandle,
    /// The distribution.
    pub distribution: DistributionHandle,
}

impl StaticWebsite {
    /// Declare a static website within `stack` under the logical ID `id`.
    ///
    /// The content bucket and log bucket carry destroy-on-teardown semantics
    /// with automatic object deletion, so experimental stacks tear down
    /// cleanly.
    ///
    /// # Errors
    /// Fails when the asset directory does not exist, or when `id` (or one of
    /// the derived logical IDs) is already declared in the stack.
    pub fn new(stack: &mut Stack, id: &str, props: StaticWebsiteProps) -> Result<Self, SynthError> {
        if !Path::new(&props.asset_dir).is_dir() {
            return Err(SynthError::AssetDirectory {
                path: props.asset_dir.clone(),
            });
        }

        let distribution_id = format!("{id}Distribution");

        let bucket = Self::declare_content_bucket(stack, id, &distribution_id)?;
        let log_bucket = Self::declare_log_bucket(stack, "CloudFrontLogs")?;
        let distribution = Self::declare_distribution(
            stack,
            &distribution_id,
            &bucket,
            &log_bucket,
            props.web_acl_arn,
        )?;

        stack.add_asset_deployment(
            "DeployWebsite",
            AssetDeploymentSpec::builder()
                .source_dir(props.asset_dir)
                .destination_bucket(bucket.logical_id().to_owned())
                .distribution(distribution.logical_id().to_owned())
                .build(),
        )?;

        Ok(Self {
            bucket,
            log_bucket,
            distribution,
        })
    }

    fn declare_content_bucket(
        stack: &mut Stack,
        id: &str,
        distribution_logical_id: &str,
    ) -> Result<BucketHandle, SynthError> {
        let mut spec = BucketSpec::builder()
            .removal_policy(RemovalPolicy::Destroy)
            .auto_delete_objects(true)
            .enforce_ssl(true)
            .public_access_block(Some(PublicAccessBlock::block_all()))
            .build();

        // The read grant is narrowed to this distribution's ARN, so no other
        // CloudFront distribution in any account can read the bucket.
        spec.add_policy_statement(
            PolicyStatement::allow(
                Principal::service(CLOUDFRONT_SERVICE_PRINCIPAL),
                vec!["s3:GetObject".to_owned()],
                vec![crate::token::bucket_objects_arn(id)],
            )
            .with_sid("AllowCloudFrontRead")
            .with_condition(
                "StringEquals",
                "AWS:SourceArn",
                crate::token::distribution_arn(distribution_logical_id),
            ),
        );

        stack.add_bucket(id, spec)
    }

    fn declare_log_bucket(stack: &mut Stack, id: &str) -> Result<BucketHandle, SynthError> {
        let mut spec = BucketSpec::builder()
            .removal_policy(RemovalPolicy::Destroy)
            .auto_delete_objects(true)
            .public_access_block(Some(PublicAccessBlock::block_all()))
            .object_ownership(Some(ObjectOwnership::BucketOwnerPreferred))
            .build();

        spec.add_lifecycle_rule(
            LifecycleRule::builder()
                .id("LogExpiration".to_owned())
                .expiration_days(1)
                .build(),
        );

        // Any distribution in this account may deliver logs; the specific
        // distribution ID is not known until it is created.
        spec.add_policy_statement(
            PolicyStatement::allow(
                Principal::service(CLOUDFRONT_SERVICE_PRINCIPAL),
                vec!["s3:PutObject".to_owned()],
                vec![crate::token::bucket_objects_arn(id)],
            )
            .with_sid("AllowCloudFrontLogDelivery")
            .with_condition(
                "StringEquals",
                "AWS:SourceArn",
                arn::any_distribution(stack.account_id.as_str()),
            ),
        );

        stack.add_bucket(id, spec)
    }

    fn declare_distribution(
        stack: &mut Stack,
        logical_id: &str,
        bucket: &BucketHandle,
        log_bucket: &BucketHandle,
        web_acl_arn: Option<String>,
    ) -> Result<DistributionHandle, SynthError> {
        let spec = DistributionSpec::builder()
            .origin(OriginSpec::builder().bucket(bucket.name_token()).build())
            .viewer_protocol_policy(sitestack_model::ViewerProtocolPolicy::RedirectToHttps)
            .error_responses(vec![
                CustomErrorResponse::remap(404, 200, ERROR_PAGE),
                CustomErrorResponse::remap(403, 200, ERROR_PAGE),
            ])
            .http_version(sitestack_model::HttpVersion::Http2)
            .minimum_protocol_version(sitestack_model::MinimumProtocolVersion::TlsV122018)
            .logging(Some(
                LoggingSpec::builder()
                    .bucket(log_bucket.name_token())
                    .include_cookies(true)
                    .build(),
            ))
            .web_acl_arn(web_acl_arn)
            .build();

        stack.add_distribution(logical_id, spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitestack_core::{AccountId, AwsRegion};
    use sitestack_model::{
        CachePolicy, Effect, Method, MinimumProtocolVersion, PriceClass, ViewerProtocolPolicy,
    };

    fn test_stack() -> Stack {
        Stack::new("TestStack", AccountId::default(), AwsRegion::default())
    }

    fn asset_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>home</html>").unwrap();
        std::fs::write(dir.path().join("error.html"), "<html>oops</html>").unwrap();
        dir
    }

    fn declare(stack: &mut Stack) -> StaticWebsite {
        let dir = asset_dir();
        let props = StaticWebsiteProps::builder()
            .asset_dir(dir.path().to_string_lossy().into_owned())
            .build();
        StaticWebsite::new(stack, "your-bucket", props).unwrap()
    }

    #[test]
    fn test_should_fail_when_asset_dir_missing() {
        let mut stack = test_stack();
        let props = StaticWebsiteProps::builder()
            .asset_dir("/definitely/not/here".to_owned())
            .build();
        let err = StaticWebsite::new(&mut stack, "site", props).unwrap_err();
        assert!(matches!(err, SynthError::AssetDirectory { .. }));
    }

    #[test]
    fn test_should_fail_on_duplicate_website_id() {
        let mut stack = test_stack();
        declare(&mut stack);

        let dir = asset_dir();
        let props = StaticWebsiteProps::builder()
            .asset_dir(dir.path().to_string_lossy().into_owned())
            .build();
        let err = StaticWebsite::new(&mut stack, "your-bucket", props).unwrap_err();
        assert!(matches!(err, SynthError::DuplicateLogicalId(_)));
    }

    #[test]
    fn test_should_grant_content_read_only_to_cloudfront() {
        let mut stack = test_stack();
        let site = declare(&mut stack);

        let spec = stack.bucket(site.bucket.logical_id()).unwrap();
        assert_eq!(spec.policy_statements.len(), 1);

        let grant = &spec.policy_statements[0];
        assert_eq!(grant.effect, Effect::Allow);
        assert_eq!(grant.action, vec!["s3:GetObject"]);
        assert_eq!(
            grant.principal,
            Some(Principal::service("cloudfront.amazonaws.com"))
        );

        // Condition is narrowed to this specific distribution.
        let condition = grant.condition.as_ref().unwrap();
        let source_arn = &condition["StringEquals"]["AWS:SourceArn"];
        assert_eq!(source_arn, "${distribution-arn:your-bucketDistribution}");
    }

    #[test]
    fn test_should_block_public_access_and_enforce_ssl_on_content_bucket() {
        let mut stack = test_stack();
        let site = declare(&mut stack);

        let spec = stack.bucket(site.bucket.logical_id()).unwrap();
        assert_eq!(spec.public_access_block, Some(PublicAccessBlock::block_all()));
        assert!(spec.enforce_ssl);
        assert_eq!(spec.removal_policy, RemovalPolicy::Destroy);
        assert!(spec.auto_delete_objects);
    }

    #[test]
    fn test_should_expire_logs_after_one_day() {
        let mut stack = test_stack();
        let site = declare(&mut stack);

        let spec = stack.bucket(site.log_bucket.logical_id()).unwrap();
        assert_eq!(spec.lifecycle_rules.len(), 1);

        let rule = &spec.lifecycle_rules[0];
        assert_eq!(rule.id, "LogExpiration");
        assert_eq!(rule.expiration_days, 1);
        assert!(rule.enabled);

        assert_eq!(spec.public_access_block, Some(PublicAccessBlock::block_all()));
        assert_eq!(
            spec.object_ownership,
            Some(ObjectOwnership::BucketOwnerPreferred)
        );
    }

    #[test]
    fn test_should_restrict_log_writes_by_source_arn() {
        let mut stack = test_stack();
        let site = declare(&mut stack);

        let spec = stack.bucket(site.log_bucket.logical_id()).unwrap();
        let grant = &spec.policy_statements[0];
        assert_eq!(grant.action, vec!["s3:PutObject"]);

        let condition = grant.condition.as_ref().unwrap();
        assert_eq!(
            condition["StringEquals"]["AWS:SourceArn"],
            "arn:aws:cloudfront::111222333444:distribution/*"
        );
    }

    #[test]
    fn test_should_remap_403_and_404_to_error_page_with_200() {
        let mut stack = test_stack();
        let site = declare(&mut stack);

        let spec = stack.distribution(site.distribution.logical_id()).unwrap();
        let codes: Vec<u16> = spec.error_responses.iter().map(|e| e.error_code).collect();
        assert!(codes.contains(&403));
        assert!(codes.contains(&404));
        for remap in &spec.error_responses {
            assert_eq!(remap.response_code, 200);
            assert_eq!(remap.response_page_path, "/error.html");
        }
    }

    #[test]
    fn test_should_configure_distribution_per_site_defaults() {
        let mut stack = test_stack();
        let site = declare(&mut stack);

        let spec = stack.distribution(site.distribution.logical_id()).unwrap();
        assert_eq!(spec.allowed_methods, Method::GET_HEAD_OPTIONS.to_vec());
        assert_eq!(spec.cached_methods, Method::GET_HEAD_OPTIONS.to_vec());
        assert!(spec.compress);
        assert_eq!(spec.cache_policy, CachePolicy::CachingOptimized);
        assert_eq!(
            spec.viewer_protocol_policy,
            ViewerProtocolPolicy::RedirectToHttps
        );
        assert_eq!(spec.default_root_object, "index.html");
        assert_eq!(spec.price_class, PriceClass::PriceClass100);
        assert_eq!(
            spec.minimum_protocol_version,
            MinimumProtocolVersion::TlsV122018
        );
        assert!(spec.origin.origin_access_control);

        let logging = spec.logging.as_ref().unwrap();
        assert!(logging.include_cookies);
        assert_eq!(logging.bucket, "${bucket-name:CloudFrontLogs}");
    }

    #[test]
    fn test_should_attach_web_acl_when_given() {
        let mut stack = test_stack();
        let dir = asset_dir();
        let props = StaticWebsiteProps::builder()
            .asset_dir(dir.path().to_string_lossy().into_owned())
            .web_acl_arn(Some("arn:aws:wafv2:us-east-1:111222333444:global/webacl/x/1".into()))
            .build();
        let site = StaticWebsite::new(&mut stack, "site", props).unwrap();

        let spec = stack.distribution(site.distribution.logical_id()).unwrap();
        assert!(spec.web_acl_arn.as_deref().unwrap().contains("webacl"));
    }

    #[test]
    fn test_should_declare_deployment_step() {
        let mut stack = test_stack();
        declare(&mut stack);

        let deployment = stack.resources().iter().find_map(|r| match r {
            crate::stack::Resource::AssetDeployment { spec, .. } => Some(spec),
            _ => None,
        });
        let deployment = deployment.unwrap();
        assert_eq!(deployment.destination_bucket, "your-bucket");
        assert_eq!(deployment.distribution, "your-bucketDistribution");
        assert_eq!(deployment.invalidation_paths, vec!["/*"]);
    }
}
