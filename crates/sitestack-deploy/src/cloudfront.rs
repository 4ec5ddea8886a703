//! CloudFront calls used by the deploy engine.

use std::time::Duration;

use aws_sdk_cloudfront::types::{
    AllowedMethods, CachedMethods, CustomErrorResponse, CustomErrorResponses,
    DefaultCacheBehavior, DistributionConfig, LoggingConfig, Origin, OriginAccessControlConfig,
    OriginAccessControlOriginTypes, OriginAccessControlSigningBehaviors,
    OriginAccessControlSigningProtocols, Origins, Paths, S3OriginConfig, ViewerCertificate,
};
use aws_smithy_types::error::display::DisplayErrorContext;
use sitestack_model::DistributionSpec;
use tracing::{debug, info};

use crate::error::DeployError;

/// Identifier assigned to the single S3 origin inside a distribution.
const ORIGIN_ID: &str = "s3-origin";

/// How long to wait between distribution status polls.
const POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Give up waiting for a distribution after this many polls.
const POLL_LIMIT: u32 = 80;

/// Physical facts about a created distribution.
#[derive(Debug, Clone)]
pub(crate) struct DistributionFacts {
    pub id: String,
    pub arn: String,
    pub domain_name: String,
}

/// Create an origin access control for signing S3 origin requests.
pub(crate) async fn create_origin_access_control(
    client: &aws_sdk_cloudfront::Client,
    name: &str,
) -> Result<String, DeployError> {
    let config = OriginAccessControlConfig::builder()
        .name(name)
        .origin_access_control_origin_type(OriginAccessControlOriginTypes::S3)
        .signing_behavior(OriginAccessControlSigningBehaviors::Always)
        .signing_protocol(OriginAccessControlSigningProtocols::Sigv4)
        .build()
        .map_err(DeployError::spec)?;

    let resp = client
        .create_origin_access_control()
        .origin_access_control_config(config)
        .send()
        .await
        .map_err(|e| DeployError::api("CreateOriginAccessControl", DisplayErrorContext(&e)))?;

    let oac = resp
        .origin_access_control
        .ok_or_else(|| DeployError::missing("CreateOriginAccessControl", "originAccessControl"))?;
    info!(oac_id = oac.id.as_str(), "created origin access control");
    Ok(oac.id)
}

/// Translate a distribution declaration into the CloudFront API config.
///
/// `origin_domain` and `logging_bucket_domain` must already be physical
/// values; the declaration's deploy-time tokens are resolved by the caller.
pub(crate) fn build_distribution_config(
    spec: &DistributionSpec,
    caller_reference: &str,
    comment: &str,
    origin_domain: &str,
    oac_id: Option<&str>,
    logging_bucket_domain: Option<&str>,
) -> Result<DistributionConfig, DeployError> {
    let mut origin = Origin::builder()
        .id(ORIGIN_ID)
        .domain_name(origin_domain)
        .s3_origin_config(
            // Empty identity selects OAC-based access instead of a legacy OAI.
            S3OriginConfig::builder().origin_access_identity("").build(),
        )
        .connection_attempts(spec.origin.connection_attempts)
        .connection_timeout(spec.origin.connection_timeout_secs);
    if let Some(id) = oac_id {
        origin = origin.origin_access_control_id(id);
    }

    let origins = Origins::builder()
        .quantity(1)
        .items(origin.build().map_err(DeployError::spec)?)
        .build()
        .map_err(DeployError::spec)?;

    let cached = CachedMethods::builder()
        .quantity(i32::try_from(spec.cached_methods.len()).unwrap_or(0))
        .set_items(Some(
            spec.cached_methods
                .iter()
                .map(|m| aws_sdk_cloudfront::types::Method::from(m.as_str()))
                .collect(),
        ))
        .build()
        .map_err(DeployError::spec)?;

    let allowed = AllowedMethods::builder()
        .quantity(i32::try_from(spec.allowed_methods.len()).unwrap_or(0))
        .set_items(Some(
            spec.allowed_methods
                .iter()
                .map(|m| aws_sdk_cloudfront::types::Method::from(m.as_str()))
                .collect(),
        ))
        .cached_methods(cached)
        .build()
        .map_err(DeployError::spec)?;

    let behavior = DefaultCacheBehavior::builder()
        .target_origin_id(ORIGIN_ID)
        .viewer_protocol_policy(aws_sdk_cloudfront::types::ViewerProtocolPolicy::from(
            spec.viewer_protocol_policy.as_str(),
        ))
        .cache_policy_id(spec.cache_policy.policy_id())
        .compress(spec.compress)
        .allowed_methods(allowed)
        .build()
        .map_err(DeployError::spec)?;

    let mut error_responses = CustomErrorResponses::builder()
        .quantity(i32::try_from(spec.error_responses.len()).unwrap_or(0));
    for remap in &spec.error_responses {
        error_responses = error_responses.items(
            CustomErrorResponse::builder()
                .error_code(i32::from(remap.error_code))
                .response_code(remap.response_code.to_string())
                .response_page_path(&remap.response_page_path)
                .build()
                .map_err(DeployError::spec)?,
        );
    }

    let logging = match (&spec.logging, logging_bucket_domain) {
        (Some(logging), Some(domain)) => Some(
            LoggingConfig::builder()
                .enabled(true)
                .include_cookies(logging.include_cookies)
                .bucket(domain)
                .prefix(logging.prefix.clone().unwrap_or_default())
                .build(),
        ),
        _ => None,
    };

    DistributionConfig::builder()
        .caller_reference(caller_reference)
        .comment(comment)
        .enabled(spec.enabled)
        .default_root_object(&spec.default_root_object)
        .origins(origins)
        .default_cache_behavior(behavior)
        .custom_error_responses(error_responses.build().map_err(DeployError::spec)?)
        .http_version(aws_sdk_cloudfront::types::HttpVersion::from(
            spec.http_version.as_str(),
        ))
        .price_class(aws_sdk_cloudfront::types::PriceClass::from(
            spec.price_class.as_str(),
        ))
        .viewer_certificate(
            ViewerCertificate::builder()
                .cloud_front_default_certificate(true)
                .minimum_protocol_version(
                    aws_sdk_cloudfront::types::MinimumProtocolVersion::from(
                        spec.minimum_protocol_version.as_str(),
                    ),
                )
                .build(),
        )
        .set_logging(logging)
        .set_web_acl_id(spec.web_acl_arn.clone())
        .build()
        .map_err(DeployError::spec)
}

/// Create a distribution and return its physical identifiers.
pub(crate) async fn create_distribution(
    client: &aws_sdk_cloudfront::Client,
    config: DistributionConfig,
) -> Result<DistributionFacts, DeployError> {
    let resp = client
        .create_distribution()
        .distribution_config(config)
        .send()
        .await
        .map_err(|e| DeployError::api("CreateDistribution", DisplayErrorContext(&e)))?;

    let dist = resp
        .distribution
        .ok_or_else(|| DeployError::missing("CreateDistribution", "distribution"))?;
    info!(
        distribution_id = dist.id.as_str(),
        domain = dist.domain_name.as_str(),
        "created distribution"
    );
    Ok(DistributionFacts {
        id: dist.id,
        arn: dist.arn,
        domain_name: dist.domain_name,
    })
}

/// Invalidate the given paths on a distribution.
pub(crate) async fn create_invalidation(
    client: &aws_sdk_cloudfront::Client,
    distribution_id: &str,
    paths: &[String],
) -> Result<(), DeployError> {
    let batch = aws_sdk_cloudfront::types::InvalidationBatch::builder()
        .caller_reference(uuid::Uuid::new_v4().to_string())
        .paths(
            Paths::builder()
                .quantity(i32::try_from(paths.len()).unwrap_or(0))
                .set_items(Some(paths.to_vec()))
                .build()
                .map_err(DeployError::spec)?,
        )
        .build()
        .map_err(DeployError::spec)?;

    client
        .create_invalidation()
        .distribution_id(distribution_id)
        .invalidation_batch(batch)
        .send()
        .await
        .map_err(|e| DeployError::api("CreateInvalidation", DisplayErrorContext(&e)))?;
    info!(distribution_id, ?paths, "created invalidation");
    Ok(())
}

/// Poll a distribution until its status reads `Deployed`.
pub(crate) async fn wait_until_deployed(
    client: &aws_sdk_cloudfront::Client,
    distribution_id: &str,
) -> Result<(), DeployError> {
    for attempt in 0..POLL_LIMIT {
        let resp = client
            .get_distribution()
            .id(distribution_id)
            .send()
            .await
            .map_err(|e| DeployError::api("GetDistribution", DisplayErrorContext(&e)))?;
        let status = resp
            .distribution
            .map(|d| d.status)
            .ok_or_else(|| DeployError::missing("GetDistribution", "distribution"))?;
        if status == "Deployed" {
            return Ok(());
        }
        debug!(distribution_id, status = status.as_str(), attempt, "waiting for distribution");
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    Err(DeployError::Api {
        operation: "GetDistribution",
        message: format!("distribution {distribution_id} never reached Deployed status"),
    })
}

/// Disable a distribution, wait for the change to propagate, and delete it.
pub(crate) async fn disable_and_delete_distribution(
    client: &aws_sdk_cloudfront::Client,
    distribution_id: &str,
) -> Result<(), DeployError> {
    let resp = client
        .get_distribution_config()
        .id(distribution_id)
        .send()
        .await
        .map_err(|e| DeployError::api("GetDistributionConfig", DisplayErrorContext(&e)))?;
    let mut config = resp
        .distribution_config
        .ok_or_else(|| DeployError::missing("GetDistributionConfig", "distributionConfig"))?;
    let etag = resp
        .e_tag
        .ok_or_else(|| DeployError::missing("GetDistributionConfig", "eTag"))?;

    if config.enabled {
        config.enabled = false;
        client
            .update_distribution()
            .id(distribution_id)
            .if_match(etag)
            .distribution_config(config)
            .send()
            .await
            .map_err(|e| DeployError::api("UpdateDistribution", DisplayErrorContext(&e)))?;
        info!(distribution_id, "disabled distribution");
    }

    wait_until_deployed(client, distribution_id).await?;

    let resp = client
        .get_distribution()
        .id(distribution_id)
        .send()
        .await
        .map_err(|e| DeployError::api("GetDistribution", DisplayErrorContext(&e)))?;
    let etag = resp
        .e_tag
        .ok_or_else(|| DeployError::missing("GetDistribution", "eTag"))?;

    client
        .delete_distribution()
        .id(distribution_id)
        .if_match(etag)
        .send()
        .await
        .map_err(|e| DeployError::api("DeleteDistribution", DisplayErrorContext(&e)))?;
    info!(distribution_id, "deleted distribution");
    Ok(())
}

/// Delete an origin access control by ID.
pub(crate) async fn delete_origin_access_control(
    client: &aws_sdk_cloudfront::Client,
    oac_id: &str,
) -> Result<(), DeployError> {
    let resp = client
        .get_origin_access_control()
        .id(oac_id)
        .send()
        .await
        .map_err(|e| DeployError::api("GetOriginAccessControl", DisplayErrorContext(&e)))?;
    let etag = resp
        .e_tag
        .ok_or_else(|| DeployError::missing("GetOriginAccessControl", "eTag"))?;

    client
        .delete_origin_access_control()
        .id(oac_id)
        .if_match(etag)
        .send()
        .await
        .map_err(|e| DeployError::api("DeleteOriginAccessControl", DisplayErrorContext(&e)))?;
    info!(oac_id, "deleted origin access control");
    Ok(())
}
