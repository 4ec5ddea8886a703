//! S3 bucket declaration model.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::policy::PolicyStatement;

/// What happens to a bucket when its stack is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RemovalPolicy {
    /// Default variant. The bucket survives stack teardown.
    #[default]
    Retain,
    /// The bucket is deleted on teardown.
    Destroy,
}

impl RemovalPolicy {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retain => "Retain",
            Self::Destroy => "Destroy",
        }
    }
}

impl std::fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RemovalPolicy {
    fn from(s: &str) -> Self {
        match s {
            "Destroy" => Self::Destroy,
            _ => Self::default(),
        }
    }
}

/// S3 ObjectOwnership enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectOwnership {
    /// Default variant.
    #[default]
    BucketOwnerEnforced,
    BucketOwnerPreferred,
    ObjectWriter,
}

impl ObjectOwnership {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BucketOwnerEnforced => "BucketOwnerEnforced",
            Self::BucketOwnerPreferred => "BucketOwnerPreferred",
            Self::ObjectWriter => "ObjectWriter",
        }
    }
}

impl std::fmt::Display for ObjectOwnership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ObjectOwnership {
    fn from(s: &str) -> Self {
        match s {
            "BucketOwnerEnforced" => Self::BucketOwnerEnforced,
            "BucketOwnerPreferred" => Self::BucketOwnerPreferred,
            "ObjectWriter" => Self::ObjectWriter,
            _ => Self::default(),
        }
    }
}

/// Public-access restrictions on a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccessBlock {
    /// Block public ACLs on the bucket and objects.
    pub block_public_acls: bool,
    /// Block public bucket policies.
    pub block_public_policy: bool,
    /// Ignore any public ACLs already present.
    pub ignore_public_acls: bool,
    /// Restrict access when the bucket has a public policy.
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlock {
    /// Block every form of public access.
    #[must_use]
    pub fn block_all() -> Self {
        Self {
            block_public_acls: true,
            block_public_policy: true,
            ignore_public_acls: true,
            restrict_public_buckets: true,
        }
    }
}

/// A lifecycle rule expiring objects after a fixed number of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleRule {
    /// Rule identifier, unique within the bucket.
    pub id: String,
    /// Key prefix the rule applies to; empty applies to all objects.
    #[builder(default)]
    pub prefix: Option<String>,
    /// Days after creation at which objects expire.
    pub expiration_days: i32,
    /// Whether the rule is active.
    #[builder(default = true)]
    pub enabled: bool,
}

/// Declaration of an S3 bucket.
///
/// The physical bucket name is generated at deploy time; the declaration only
/// carries configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct BucketSpec {
    /// Teardown behavior.
    #[builder(default)]
    pub removal_policy: RemovalPolicy,

    /// Delete remaining objects before deleting the bucket on teardown.
    /// Only meaningful with [`RemovalPolicy::Destroy`].
    #[builder(default = false)]
    pub auto_delete_objects: bool,

    /// Add a policy statement denying requests over plain HTTP.
    #[builder(default = false)]
    pub enforce_ssl: bool,

    /// Public-access restrictions, if any.
    #[builder(default)]
    pub public_access_block: Option<PublicAccessBlock>,

    /// Object-ownership setting, if any.
    #[builder(default)]
    pub object_ownership: Option<ObjectOwnership>,

    /// Lifecycle rules.
    #[builder(default)]
    pub lifecycle_rules: Vec<LifecycleRule>,

    /// Resource-policy statements attached to the bucket. Resource ARNs may
    /// contain deploy-time tokens.
    #[builder(default)]
    pub policy_statements: Vec<PolicyStatement>,
}

impl BucketSpec {
    /// Append a resource-policy statement.
    pub fn add_policy_statement(&mut self, statement: PolicyStatement) {
        self.policy_statements.push(statement);
    }

    /// Append a lifecycle rule.
    pub fn add_lifecycle_rule(&mut self, rule: LifecycleRule) {
        self.lifecycle_rules.push(rule);
    }
}
