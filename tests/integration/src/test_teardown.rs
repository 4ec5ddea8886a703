//! Destroy-path integration tests.

#[cfg(test)]
mod tests {
    use sitestack_deploy::{DeployError, DeployState, Deployer};
    use sitestack_synth::build_site_stack;

    use crate::{deploy_clients, s3_client, test_site_config, write_sample_site};

    #[tokio::test]
    #[ignore = "requires a local AWS emulator"]
    async fn test_should_destroy_applied_stack() {
        let asset_dir = tempfile::tempdir().expect("asset dir");
        let data_dir = tempfile::tempdir().expect("data dir");
        write_sample_site(asset_dir.path());

        let config = test_site_config("teardown", asset_dir.path(), data_dir.path());
        let stack = build_site_stack(&config).expect("synthesize stack");
        let deployer = Deployer::new(deploy_clients(), config.clone());

        deployer.apply(&stack).await.expect("apply stack");
        let state = DeployState::load(&config.data_dir)
            .expect("load state")
            .expect("state file exists");
        let content_bucket = state
            .lookup(&format!("bucket-name:{}", config.website_id))
            .expect("content bucket recorded");

        deployer.destroy(&stack).await.expect("destroy stack");

        // The content bucket is emptied and deleted, and the state is gone.
        let s3 = s3_client();
        let head = s3.head_bucket().bucket(&content_bucket).send().await;
        assert!(head.is_err(), "content bucket should be deleted");
        assert!(
            DeployState::load(&config.data_dir)
                .expect("load state")
                .is_none(),
            "state file should be removed"
        );
    }

    #[tokio::test]
    #[ignore = "requires a local AWS emulator"]
    async fn test_should_fail_destroy_without_state() {
        let asset_dir = tempfile::tempdir().expect("asset dir");
        let data_dir = tempfile::tempdir().expect("data dir");
        write_sample_site(asset_dir.path());

        let config = test_site_config("nostate", asset_dir.path(), data_dir.path());
        let stack = build_site_stack(&config).expect("synthesize stack");
        let deployer = Deployer::new(deploy_clients(), config);

        let err = deployer.destroy(&stack).await.unwrap_err();
        assert!(matches!(err, DeployError::NoState(_)));
    }
}
