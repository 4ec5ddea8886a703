//! End-to-end apply tests: synthesize the website stack and push it through
//! the deploy engine against a local emulator.

#[cfg(test)]
mod tests {
    use sitestack_deploy::{DeployState, Deployer};
    use sitestack_synth::{DISTRIBUTION_DOMAIN_OUTPUT, build_site_stack};

    use crate::{deploy_clients, s3_client, test_site_config, write_sample_site};

    #[tokio::test]
    #[ignore = "requires a local AWS emulator"]
    async fn test_should_apply_website_stack() {
        let asset_dir = tempfile::tempdir().expect("asset dir");
        let data_dir = tempfile::tempdir().expect("data dir");
        write_sample_site(asset_dir.path());

        let config = test_site_config("apply", asset_dir.path(), data_dir.path());
        let stack = build_site_stack(&config).expect("synthesize stack");

        let deployer = Deployer::new(deploy_clients(), config.clone());
        let report = deployer.apply(&stack).await.expect("apply stack");

        // The domain output must be fully resolved.
        let domain = report
            .outputs
            .iter()
            .find(|o| o.name == DISTRIBUTION_DOMAIN_OUTPUT)
            .expect("domain output");
        assert!(!domain.value.contains("${"), "unresolved token: {}", domain.value);

        // The state file records the physical names.
        let state = DeployState::load(&config.data_dir)
            .expect("load state")
            .expect("state file exists");
        let content_bucket = state
            .lookup(&format!("bucket-name:{}", config.website_id))
            .expect("content bucket recorded");
        let log_bucket = state
            .lookup("bucket-name:CloudFrontLogs")
            .expect("log bucket recorded");

        let s3 = s3_client();

        // All assets were uploaded with their content types.
        let index = s3
            .get_object()
            .bucket(&content_bucket)
            .key("index.html")
            .send()
            .await
            .expect("index.html uploaded");
        assert_eq!(index.content_type(), Some("text/html; charset=utf-8"));
        s3.get_object()
            .bucket(&content_bucket)
            .key("css/site.css")
            .send()
            .await
            .expect("css/site.css uploaded");

        // Content bucket policy narrows the read grant to the distribution
        // and denies plain-HTTP access.
        let policy = s3
            .get_bucket_policy()
            .bucket(&content_bucket)
            .send()
            .await
            .expect("content bucket policy");
        let doc: serde_json::Value =
            serde_json::from_str(policy.policy().expect("policy body")).expect("policy json");
        let statements = doc["Statement"].as_array().expect("statements");

        let read_grant = statements
            .iter()
            .find(|s| s["Sid"] == "AllowCloudFrontRead")
            .expect("read grant");
        let distribution_arn = state
            .lookup(&format!("distribution-arn:{}Distribution", config.website_id))
            .expect("distribution arn recorded");
        assert_eq!(
            read_grant["Condition"]["StringEquals"]["AWS:SourceArn"],
            distribution_arn.as_str()
        );

        let ssl_deny = statements
            .iter()
            .find(|s| s["Effect"] == "Deny")
            .expect("https-only deny");
        assert_eq!(
            ssl_deny["Condition"]["Bool"]["aws:SecureTransport"],
            "false"
        );

        // Log bucket expires objects after one day.
        let lifecycle = s3
            .get_bucket_lifecycle_configuration()
            .bucket(&log_bucket)
            .send()
            .await
            .expect("log bucket lifecycle");
        let rule = &lifecycle.rules()[0];
        assert_eq!(rule.id(), Some("LogExpiration"));
        assert_eq!(rule.expiration().and_then(|e| e.days()), Some(1));

        deployer.destroy(&stack).await.expect("destroy stack");
    }

    #[tokio::test]
    #[ignore = "requires a local AWS emulator"]
    async fn test_should_reapply_without_duplicating_resources() {
        let asset_dir = tempfile::tempdir().expect("asset dir");
        let data_dir = tempfile::tempdir().expect("data dir");
        write_sample_site(asset_dir.path());

        let config = test_site_config("reapply", asset_dir.path(), data_dir.path());
        let stack = build_site_stack(&config).expect("synthesize stack");
        let deployer = Deployer::new(deploy_clients(), config.clone());

        deployer.apply(&stack).await.expect("first apply");
        let first = DeployState::load(&config.data_dir)
            .expect("load state")
            .expect("state file exists");

        // A second apply reuses the recorded physical names.
        deployer.apply(&stack).await.expect("second apply");
        let second = DeployState::load(&config.data_dir)
            .expect("load state")
            .expect("state file exists");
        assert_eq!(first.physical, second.physical);

        deployer.destroy(&stack).await.expect("destroy stack");
    }
}
