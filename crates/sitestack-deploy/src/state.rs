//! Deployment state tracking.
//!
//! Maps token bodies (e.g. `bucket-name:content`) to the physical values AWS
//! assigned, persisted as JSON so `destroy` can find what `apply` created.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DeployError;

/// File name of the persisted state within the data directory.
const STATE_FILE: &str = "sitestack.state.json";

/// Physical IDs recorded during an apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployState {
    /// Name of the stack this state belongs to.
    pub stack_name: String,
    /// When the last successful apply finished.
    pub deployed_at: Option<DateTime<Utc>>,
    /// Token body -> physical value. `BTreeMap` keeps the file diffable.
    pub physical: BTreeMap<String, String>,
}

impl DeployState {
    /// Fresh state for a stack.
    #[must_use]
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            deployed_at: None,
            physical: BTreeMap::new(),
        }
    }

    /// Path of the state file inside `data_dir`.
    #[must_use]
    pub fn path(data_dir: &str) -> PathBuf {
        Path::new(data_dir).join(STATE_FILE)
    }

    /// Load state from `data_dir`, if a state file exists.
    ///
    /// # Errors
    /// Fails on unreadable or unparsable state files.
    pub fn load(data_dir: &str) -> Result<Option<Self>, DeployError> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Persist state into `data_dir`.
    ///
    /// # Errors
    /// Fails when the directory is not writable.
    pub fn save(&self, data_dir: &str) -> Result<(), DeployError> {
        std::fs::create_dir_all(data_dir)?;
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::path(data_dir), raw)?;
        Ok(())
    }

    /// Delete the state file, if present.
    ///
    /// # Errors
    /// Fails when the file exists but cannot be removed.
    pub fn remove(data_dir: &str) -> Result<(), DeployError> {
        let path = Self::path(data_dir);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Record a physical value under a token body.
    pub fn record(&mut self, token_body: impl Into<String>, value: impl Into<String>) {
        self.physical.insert(token_body.into(), value.into());
    }

    /// Record the name-derived values for a bucket.
    pub fn record_bucket(&mut self, logical_id: &str, physical_name: &str) {
        self.record(
            format!("bucket-name:{logical_id}"),
            physical_name,
        );
        self.record(
            format!("bucket-arn:{logical_id}"),
            sitestack_core::arn::bucket(physical_name),
        );
        self.record(
            format!("bucket-objects-arn:{logical_id}"),
            sitestack_core::arn::bucket_objects(physical_name),
        );
    }

    /// Record the ID-derived values for a distribution.
    pub fn record_distribution(
        &mut self,
        logical_id: &str,
        physical_id: &str,
        arn: &str,
        domain_name: &str,
    ) {
        self.record(format!("distribution-id:{logical_id}"), physical_id);
        self.record(format!("distribution-arn:{logical_id}"), arn);
        self.record(format!("distribution-domain:{logical_id}"), domain_name);
    }

    /// Look up a recorded value by token body.
    #[must_use]
    pub fn lookup(&self, token_body: &str) -> Option<String> {
        self.physical.get(token_body).cloned()
    }

    /// Resolve every token in `value` against the recorded physical IDs.
    ///
    /// # Errors
    /// Fails when a token has no recorded value.
    pub fn resolve(&self, value: &str) -> Result<String, DeployError> {
        Ok(sitestack_synth::token::resolve(value, |body| {
            self.lookup(body)
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_record_and_resolve_bucket_tokens() {
        let mut state = DeployState::new("TestStack");
        state.record_bucket("content", "content-ab12cd34");

        assert_eq!(
            state.resolve("${bucket-name:content}").unwrap(),
            "content-ab12cd34"
        );
        assert_eq!(
            state.resolve("${bucket-objects-arn:content}").unwrap(),
            "arn:aws:s3:::content-ab12cd34/*"
        );
    }

    #[test]
    fn test_should_record_distribution_tokens() {
        let mut state = DeployState::new("TestStack");
        state.record_distribution(
            "siteDistribution",
            "E2EXAMPLE",
            "arn:aws:cloudfront::111222333444:distribution/E2EXAMPLE",
            "d111111abcdef8.cloudfront.net",
        );

        assert_eq!(
            state.resolve("${distribution-domain:siteDistribution}").unwrap(),
            "d111111abcdef8.cloudfront.net"
        );
    }

    #[test]
    fn test_should_fail_resolving_unknown_token() {
        let state = DeployState::new("TestStack");
        assert!(state.resolve("${bucket-name:ghost}").is_err());
    }

    #[test]
    fn test_should_roundtrip_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_string_lossy().into_owned();

        let mut state = DeployState::new("TestStack");
        state.record_bucket("content", "content-ab12cd34");
        state.deployed_at = Some(Utc::now());
        state.save(&data_dir).unwrap();

        let loaded = DeployState::load(&data_dir).unwrap().unwrap();
        assert_eq!(loaded.stack_name, "TestStack");
        assert_eq!(
            loaded.lookup("bucket-name:content").as_deref(),
            Some("content-ab12cd34")
        );

        DeployState::remove(&data_dir).unwrap();
        assert!(DeployState::load(&data_dir).unwrap().is_none());
    }
}
