//! S3 calls used by the deploy engine.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLifecycleConfiguration, BucketLocationConstraint, CreateBucketConfiguration, Delete,
    ExpirationStatus, LifecycleExpiration, LifecycleRule, LifecycleRuleFilter, ObjectIdentifier,
    OwnershipControls, OwnershipControlsRule, PublicAccessBlockConfiguration,
};
use aws_smithy_types::error::display::DisplayErrorContext;
use sitestack_model::BucketSpec;
use tracing::{debug, info};

use crate::assets::AssetFile;
use crate::error::DeployError;

/// Create a bucket in the given region.
pub(crate) async fn create_bucket(
    client: &aws_sdk_s3::Client,
    name: &str,
    region: &str,
) -> Result<(), DeployError> {
    let mut req = client.create_bucket().bucket(name);
    // us-east-1 rejects an explicit location constraint.
    if region != "us-east-1" {
        req = req.create_bucket_configuration(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build(),
        );
    }
    req.send()
        .await
        .map_err(|e| DeployError::api("CreateBucket", DisplayErrorContext(&e)))?;
    info!(bucket = name, "created bucket");
    Ok(())
}

/// Apply public-access-block, ownership, and lifecycle settings from a
/// declaration to an existing bucket.
pub(crate) async fn configure_bucket(
    client: &aws_sdk_s3::Client,
    name: &str,
    spec: &BucketSpec,
) -> Result<(), DeployError> {
    if let Some(block) = &spec.public_access_block {
        client
            .put_public_access_block()
            .bucket(name)
            .public_access_block_configuration(
                PublicAccessBlockConfiguration::builder()
                    .block_public_acls(block.block_public_acls)
                    .block_public_policy(block.block_public_policy)
                    .ignore_public_acls(block.ignore_public_acls)
                    .restrict_public_buckets(block.restrict_public_buckets)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| DeployError::api("PutPublicAccessBlock", DisplayErrorContext(&e)))?;
    }

    if let Some(ownership) = &spec.object_ownership {
        let rule = OwnershipControlsRule::builder()
            .object_ownership(aws_sdk_s3::types::ObjectOwnership::from(ownership.as_str()))
            .build()
            .map_err(DeployError::spec)?;
        client
            .put_bucket_ownership_controls()
            .bucket(name)
            .ownership_controls(
                OwnershipControls::builder()
                    .rules(rule)
                    .build()
                    .map_err(DeployError::spec)?,
            )
            .send()
            .await
            .map_err(|e| DeployError::api("PutBucketOwnershipControls", DisplayErrorContext(&e)))?;
    }

    if !spec.lifecycle_rules.is_empty() {
        let mut config = BucketLifecycleConfiguration::builder();
        for rule in &spec.lifecycle_rules {
            let status = if rule.enabled {
                ExpirationStatus::Enabled
            } else {
                ExpirationStatus::Disabled
            };
            config = config.rules(
                LifecycleRule::builder()
                    .id(&rule.id)
                    .status(status)
                    .filter(
                        LifecycleRuleFilter::builder()
                            .prefix(rule.prefix.clone().unwrap_or_default())
                            .build(),
                    )
                    .expiration(
                        LifecycleExpiration::builder()
                            .days(rule.expiration_days)
                            .build(),
                    )
                    .build()
                    .map_err(DeployError::spec)?,
            );
        }
        client
            .put_bucket_lifecycle_configuration()
            .bucket(name)
            .lifecycle_configuration(config.build().map_err(DeployError::spec)?)
            .send()
            .await
            .map_err(|e| {
                DeployError::api("PutBucketLifecycleConfiguration", DisplayErrorContext(&e))
            })?;
    }

    debug!(bucket = name, "configured bucket");
    Ok(())
}

/// Attach a rendered policy document to a bucket.
pub(crate) async fn put_bucket_policy(
    client: &aws_sdk_s3::Client,
    name: &str,
    policy_json: &str,
) -> Result<(), DeployError> {
    client
        .put_bucket_policy()
        .bucket(name)
        .policy(policy_json)
        .send()
        .await
        .map_err(|e| DeployError::api("PutBucketPolicy", DisplayErrorContext(&e)))?;
    debug!(bucket = name, "attached bucket policy");
    Ok(())
}

/// Upload one asset file.
pub(crate) async fn upload_object(
    client: &aws_sdk_s3::Client,
    bucket: &str,
    asset: &AssetFile,
) -> Result<(), DeployError> {
    let body = ByteStream::from_path(&asset.path)
        .await
        .map_err(|e| DeployError::api("PutObject", e))?;
    client
        .put_object()
        .bucket(bucket)
        .key(&asset.key)
        .content_type(&asset.content_type)
        .body(body)
        .send()
        .await
        .map_err(|e| DeployError::api("PutObject", DisplayErrorContext(&e)))?;
    debug!(bucket, key = asset.key.as_str(), "uploaded object");
    Ok(())
}

/// Delete every object in a bucket, page by page.
pub(crate) async fn empty_bucket(
    client: &aws_sdk_s3::Client,
    name: &str,
) -> Result<(), DeployError> {
    let mut continuation: Option<String> = None;
    loop {
        let listing = client
            .list_objects_v2()
            .bucket(name)
            .set_continuation_token(continuation.take())
            .send()
            .await
            .map_err(|e| DeployError::api("ListObjectsV2", DisplayErrorContext(&e)))?;

        let keys: Vec<ObjectIdentifier> = listing
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(ToOwned::to_owned))
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<_, _>>()
            .map_err(DeployError::spec)?;

        if !keys.is_empty() {
            let count = keys.len();
            client
                .delete_objects()
                .bucket(name)
                .delete(
                    Delete::builder()
                        .set_objects(Some(keys))
                        .build()
                        .map_err(DeployError::spec)?,
                )
                .send()
                .await
                .map_err(|e| DeployError::api("DeleteObjects", DisplayErrorContext(&e)))?;
            debug!(bucket = name, count, "deleted objects");
        }

        continuation = listing.next_continuation_token().map(ToOwned::to_owned);
        if continuation.is_none() {
            break;
        }
    }
    Ok(())
}

/// Delete an empty bucket.
pub(crate) async fn delete_bucket(
    client: &aws_sdk_s3::Client,
    name: &str,
) -> Result<(), DeployError> {
    client
        .delete_bucket()
        .bucket(name)
        .send()
        .await
        .map_err(|e| DeployError::api("DeleteBucket", DisplayErrorContext(&e)))?;
    info!(bucket = name, "deleted bucket");
    Ok(())
}
