//! Content-deployment declaration model.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Declaration of a one-shot content synchronization: upload a local
/// directory into a bucket, then invalidate cached paths on a distribution.
///
/// Not a standing resource; the deploy engine re-runs it on every apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct AssetDeploymentSpec {
    /// Local directory whose contents are uploaded.
    pub source_dir: String,
    /// Logical ID of the destination bucket within the stack.
    pub destination_bucket: String,
    /// Logical ID of the distribution to invalidate.
    pub distribution: String,
    /// Paths to invalidate after upload.
    #[builder(default = vec![String::from("/*")])]
    pub invalidation_paths: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_default_to_invalidating_all_paths() {
        let spec = AssetDeploymentSpec::builder()
            .source_dir("./assets".to_owned())
            .destination_bucket("content".to_owned())
            .distribution("distribution".to_owned())
            .build();
        assert_eq!(spec.invalidation_paths, vec!["/*"]);
    }
}
