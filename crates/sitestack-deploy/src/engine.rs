//! The apply/destroy engine.
//!
//! `apply` walks the stack in dependency order: buckets, then distributions,
//! then bucket policies (which may reference a distribution's ARN), then
//! content deployments, then budgets, then outputs. Each created resource is
//! recorded in the state file immediately, so a failed apply can be re-run
//! and picks up where it stopped.

use std::path::Path;

use chrono::Utc;
use sitestack_core::SiteConfig;
use sitestack_model::{BucketSpec, PolicyDocument, PolicyStatement, Principal};
use sitestack_synth::{Output, Resource, Stack, token};
use tracing::{debug, info, warn};

use crate::clients::AwsClients;
use crate::error::DeployError;
use crate::state::DeployState;
use crate::{assets, budgets, cloudfront, s3};

/// The result of a successful apply.
#[derive(Debug, Clone)]
pub struct ApplyReport {
    /// Name of the applied stack.
    pub stack_name: String,
    /// Stack outputs with every token resolved to its physical value.
    pub outputs: Vec<Output>,
}

/// Applies and destroys stacks through the AWS APIs.
#[derive(Debug)]
pub struct Deployer {
    clients: AwsClients,
    config: SiteConfig,
}

impl Deployer {
    /// Wrap existing clients.
    #[must_use]
    pub fn new(clients: AwsClients, config: SiteConfig) -> Self {
        Self { clients, config }
    }

    /// Build clients from the ambient AWS environment.
    pub async fn connect(config: SiteConfig) -> Self {
        let clients = AwsClients::connect(&config).await;
        Self::new(clients, config)
    }

    /// Apply a stack, creating every resource that is not yet recorded in
    /// the state file.
    ///
    /// # Errors
    /// Fails on the first AWS error; already-created resources stay recorded
    /// so the apply can be re-run.
    pub async fn apply(&self, stack: &Stack) -> Result<ApplyReport, DeployError> {
        let mut state = DeployState::load(&self.config.data_dir)?
            .filter(|s| s.stack_name == stack.name)
            .unwrap_or_else(|| DeployState::new(&stack.name));

        info!(stack = stack.name.as_str(), "applying stack");

        self.apply_buckets(stack, &mut state).await?;
        self.apply_distributions(stack, &mut state).await?;
        self.apply_bucket_policies(stack, &state).await?;
        self.apply_deployments(stack, &state).await?;
        self.apply_budgets(stack, &mut state).await?;

        let outputs = stack
            .outputs()
            .iter()
            .map(|o| {
                Ok(Output {
                    name: o.name.clone(),
                    value: state.resolve(&o.value)?,
                })
            })
            .collect::<Result<Vec<_>, DeployError>>()?;

        state.deployed_at = Some(Utc::now());
        state.save(&self.config.data_dir)?;
        info!(stack = stack.name.as_str(), "apply complete");

        Ok(ApplyReport {
            stack_name: stack.name.clone(),
            outputs,
        })
    }

    async fn apply_buckets(
        &self,
        stack: &Stack,
        state: &mut DeployState,
    ) -> Result<(), DeployError> {
        for resource in stack.resources() {
            let Resource::Bucket { logical_id, spec } = resource else {
                continue;
            };
            if state.lookup(&format!("bucket-name:{logical_id}")).is_some() {
                debug!(logical_id, "bucket already created, skipping");
                continue;
            }
            let name = physical_bucket_name(logical_id);
            s3::create_bucket(&self.clients.s3, &name, self.config.region.as_str()).await?;
            s3::configure_bucket(&self.clients.s3, &name, spec).await?;
            state.record_bucket(logical_id, &name);
            state.save(&self.config.data_dir)?;
        }
        Ok(())
    }

    async fn apply_distributions(
        &self,
        stack: &Stack,
        state: &mut DeployState,
    ) -> Result<(), DeployError> {
        for resource in stack.resources() {
            let Resource::Distribution { logical_id, spec } = resource else {
                continue;
            };
            if state
                .lookup(&format!("distribution-id:{logical_id}"))
                .is_some()
            {
                debug!(logical_id, "distribution already created, skipping");
                continue;
            }

            let origin_bucket = state.resolve(&spec.origin.bucket)?;
            let origin_domain = format!(
                "{origin_bucket}.s3.{}.amazonaws.com",
                self.config.region.as_str()
            );

            let oac_id = if spec.origin.origin_access_control {
                let id = cloudfront::create_origin_access_control(
                    &self.clients.cloudfront,
                    &format!("{}-{logical_id}", stack.name),
                )
                .await?;
                state.record(format!("oac-id:{logical_id}"), &id);
                state.save(&self.config.data_dir)?;
                Some(id)
            } else {
                None
            };

            let logging_domain = match &spec.logging {
                Some(logging) => {
                    let bucket = state.resolve(&logging.bucket)?;
                    Some(format!("{bucket}.s3.amazonaws.com"))
                }
                None => None,
            };

            let config = cloudfront::build_distribution_config(
                spec,
                &uuid::Uuid::new_v4().to_string(),
                &format!("{}/{logical_id}", stack.name),
                &origin_domain,
                oac_id.as_deref(),
                logging_domain.as_deref(),
            )?;
            let facts = cloudfront::create_distribution(&self.clients.cloudfront, config).await?;
            state.record_distribution(logical_id, &facts.id, &facts.arn, &facts.domain_name);
            state.save(&self.config.data_dir)?;
        }
        Ok(())
    }

    async fn apply_bucket_policies(
        &self,
        stack: &Stack,
        state: &DeployState,
    ) -> Result<(), DeployError> {
        for resource in stack.resources() {
            let Resource::Bucket { logical_id, spec } = resource else {
                continue;
            };
            let doc = bucket_policy_document(logical_id, spec);
            if doc.statement.is_empty() {
                continue;
            }
            let rendered = state.resolve(&doc.to_json()?)?;
            let bucket = state
                .lookup(&format!("bucket-name:{logical_id}"))
                .ok_or_else(|| DeployError::UnknownResource(logical_id.clone()))?;
            s3::put_bucket_policy(&self.clients.s3, &bucket, &rendered).await?;
        }
        Ok(())
    }

    async fn apply_deployments(
        &self,
        stack: &Stack,
        state: &DeployState,
    ) -> Result<(), DeployError> {
        for resource in stack.resources() {
            let Resource::AssetDeployment { logical_id, spec } = resource else {
                continue;
            };
            let bucket = state
                .lookup(&format!("bucket-name:{}", spec.destination_bucket))
                .ok_or_else(|| DeployError::UnknownResource(spec.destination_bucket.clone()))?;

            let files = assets::collect_assets(Path::new(&spec.source_dir))?;
            info!(
                logical_id,
                bucket = bucket.as_str(),
                count = files.len(),
                "uploading assets"
            );
            for file in &files {
                s3::upload_object(&self.clients.s3, &bucket, file).await?;
            }

            let distribution_id = state
                .lookup(&format!("distribution-id:{}", spec.distribution))
                .ok_or_else(|| DeployError::UnknownResource(spec.distribution.clone()))?;
            cloudfront::create_invalidation(
                &self.clients.cloudfront,
                &distribution_id,
                &spec.invalidation_paths,
            )
            .await?;
        }
        Ok(())
    }

    async fn apply_budgets(
        &self,
        stack: &Stack,
        state: &mut DeployState,
    ) -> Result<(), DeployError> {
        for resource in stack.resources() {
            let Resource::Budget { logical_id, spec } = resource else {
                continue;
            };
            let key = format!("budget-name:{logical_id}");
            if state.lookup(&key).is_some() {
                debug!(logical_id, "budget already created, skipping");
                continue;
            }
            budgets::create_budget(
                &self.clients.budgets,
                self.config.account_id.as_str(),
                spec,
            )
            .await?;
            state.record(key, &spec.name);
            state.save(&self.config.data_dir)?;
        }
        Ok(())
    }

    /// Destroy a previously applied stack, in reverse declaration order.
    ///
    /// Buckets declared with a `Retain` removal policy are left in place.
    /// The state file is removed only after everything else succeeds.
    ///
    /// # Errors
    /// Fails when no state file exists or an AWS call fails.
    pub async fn destroy(&self, stack: &Stack) -> Result<(), DeployError> {
        let state = DeployState::load(&self.config.data_dir)?
            .filter(|s| s.stack_name == stack.name)
            .ok_or_else(|| DeployError::NoState(stack.name.clone()))?;

        info!(stack = stack.name.as_str(), "destroying stack");

        for resource in stack.resources().iter().rev() {
            match resource {
                Resource::Budget { logical_id, spec } => {
                    if state.lookup(&format!("budget-name:{logical_id}")).is_some() {
                        budgets::delete_budget(
                            &self.clients.budgets,
                            self.config.account_id.as_str(),
                            &spec.name,
                        )
                        .await?;
                    }
                }
                Resource::AssetDeployment { .. } => {
                    // Uploaded objects are removed with their bucket.
                }
                Resource::Distribution { logical_id, .. } => {
                    if let Some(id) = state.lookup(&format!("distribution-id:{logical_id}")) {
                        cloudfront::disable_and_delete_distribution(
                            &self.clients.cloudfront,
                            &id,
                        )
                        .await?;
                    }
                    if let Some(oac_id) = state.lookup(&format!("oac-id:{logical_id}")) {
                        cloudfront::delete_origin_access_control(
                            &self.clients.cloudfront,
                            &oac_id,
                        )
                        .await?;
                    }
                }
                Resource::Bucket { logical_id, spec } => {
                    let Some(name) = state.lookup(&format!("bucket-name:{logical_id}")) else {
                        continue;
                    };
                    if spec.removal_policy == sitestack_model::RemovalPolicy::Destroy {
                        if spec.auto_delete_objects {
                            s3::empty_bucket(&self.clients.s3, &name).await?;
                        }
                        s3::delete_bucket(&self.clients.s3, &name).await?;
                    } else {
                        warn!(bucket = name.as_str(), "retaining bucket per removal policy");
                    }
                }
            }
        }

        DeployState::remove(&self.config.data_dir)?;
        info!(stack = stack.name.as_str(), "destroy complete");
        Ok(())
    }
}

/// Generate a globally unique bucket name from a logical ID.
fn physical_bucket_name(logical_id: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", sanitize_bucket_id(logical_id), &suffix[..8])
}

/// Reduce a logical ID to the character set S3 bucket names allow.
fn sanitize_bucket_id(logical_id: &str) -> String {
    let mut out = String::with_capacity(logical_id.len());
    let mut last_dash = true;
    for c in logical_id.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("bucket");
    }
    // Leave room for the uniqueness suffix within the 63-character limit.
    out.truncate(54);
    out
}

/// Render a bucket's full resource policy, including the HTTPS-only deny
/// statement when the declaration enforces SSL. Resource ARNs may still
/// contain deploy-time tokens at this point.
fn bucket_policy_document(logical_id: &str, spec: &BucketSpec) -> PolicyDocument {
    let mut doc = PolicyDocument::new(spec.policy_statements.clone());
    if spec.enforce_ssl {
        doc.add_statement(
            PolicyStatement::deny(
                Principal::any(),
                vec!["s3:*".to_owned()],
                vec![
                    token::bucket_arn(logical_id),
                    token::bucket_objects_arn(logical_id),
                ],
            )
            .with_condition("Bool", "aws:SecureTransport", "false"),
        );
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_sanitize_logical_ids_for_bucket_names() {
        assert_eq!(sanitize_bucket_id("your-bucket"), "your-bucket");
        assert_eq!(sanitize_bucket_id("CloudFrontLogs"), "cloudfrontlogs");
        assert_eq!(sanitize_bucket_id("My_Site!!"), "my-site");
        assert_eq!(sanitize_bucket_id("---"), "bucket");
    }

    #[test]
    fn test_should_generate_unique_physical_names() {
        let a = physical_bucket_name("your-bucket");
        let b = physical_bucket_name("your-bucket");
        assert!(a.starts_with("your-bucket-"));
        assert_ne!(a, b);
        assert!(a.len() <= 63);
    }

    #[test]
    fn test_should_append_https_only_deny_when_ssl_enforced() {
        let spec = BucketSpec::builder().enforce_ssl(true).build();
        let doc = bucket_policy_document("content", &spec);

        assert_eq!(doc.statement.len(), 1);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["Statement"][0]["Effect"], "Deny");
        assert_eq!(json["Statement"][0]["Principal"], "*");
        assert_eq!(json["Statement"][0]["Action"][0], "s3:*");
        assert_eq!(
            json["Statement"][0]["Resource"][0],
            "${bucket-arn:content}"
        );
        assert_eq!(
            json["Statement"][0]["Condition"]["Bool"]["aws:SecureTransport"],
            "false"
        );
    }

    #[test]
    fn test_should_keep_declared_statements_before_ssl_deny() {
        let spec = BucketSpec::builder()
            .enforce_ssl(true)
            .policy_statements(vec![PolicyStatement::allow(
                Principal::service("cloudfront.amazonaws.com"),
                vec!["s3:GetObject".to_owned()],
                vec![token::bucket_objects_arn("content")],
            )])
            .build();
        let doc = bucket_policy_document("content", &spec);

        assert_eq!(doc.statement.len(), 2);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["Statement"][0]["Effect"], "Allow");
        assert_eq!(json["Statement"][1]["Effect"], "Deny");
    }

    #[test]
    fn test_should_skip_policy_for_plain_buckets() {
        let spec = BucketSpec::builder().build();
        assert!(bucket_policy_document("content", &spec).statement.is_empty());
    }
}
