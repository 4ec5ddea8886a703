//! The declared resource graph.

use serde::{Deserialize, Serialize};

use sitestack_core::{AccountId, AwsRegion};
use sitestack_model::{AssetDeploymentSpec, BucketSpec, BudgetSpec, DistributionSpec};

use crate::error::SynthError;
use crate::token;

/// A declared resource with its logical ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Resource {
    /// An S3 bucket.
    #[serde(rename_all = "camelCase")]
    Bucket {
        /// Logical ID within the stack.
        logical_id: String,
        /// The declaration.
        spec: BucketSpec,
    },
    /// A CloudFront distribution.
    #[serde(rename_all = "camelCase")]
    Distribution {
        /// Logical ID within the stack.
        logical_id: String,
        /// The declaration.
        spec: DistributionSpec,
    },
    /// A content-deployment step.
    #[serde(rename_all = "camelCase")]
    AssetDeployment {
        /// Logical ID within the stack.
        logical_id: String,
        /// The declaration.
        spec: AssetDeploymentSpec,
    },
    /// A cost budget.
    #[serde(rename_all = "camelCase")]
    Budget {
        /// Logical ID within the stack.
        logical_id: String,
        /// The declaration.
        spec: BudgetSpec,
    },
}

impl Resource {
    /// The resource's logical ID.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        match self {
            Self::Bucket { logical_id, .. }
            | Self::Distribution { logical_id, .. }
            | Self::AssetDeployment { logical_id, .. }
            | Self::Budget { logical_id, .. } => logical_id,
        }
    }
}

/// A named value surfaced after deployment. The value may contain tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    /// Output name.
    pub name: String,
    /// Output value or token.
    pub value: String,
}

/// Handle to a declared bucket, used for downstream referencing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketHandle {
    logical_id: String,
}

impl BucketHandle {
    /// The bucket's logical ID.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Token for the physical bucket name.
    #[must_use]
    pub fn name_token(&self) -> String {
        token::bucket_name(&self.logical_id)
    }

    /// Token for the bucket ARN.
    #[must_use]
    pub fn arn_token(&self) -> String {
        token::bucket_arn(&self.logical_id)
    }

    /// Token for the ARN matching every object in the bucket.
    #[must_use]
    pub fn objects_arn_token(&self) -> String {
        token::bucket_objects_arn(&self.logical_id)
    }
}

/// Handle to a declared distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionHandle {
    logical_id: String,
}

impl DistributionHandle {
    /// The distribution's logical ID.
    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// Token for the physical distribution ID.
    #[must_use]
    pub fn id_token(&self) -> String {
        token::distribution_id(&self.logical_id)
    }

    /// Token for the distribution ARN.
    #[must_use]
    pub fn arn_token(&self) -> String {
        token::distribution_arn(&self.logical_id)
    }

    /// Token for the distribution's public domain name.
    #[must_use]
    pub fn domain_name_token(&self) -> String {
        token::distribution_domain(&self.logical_id)
    }
}

/// A deployable unit: the declared resource graph plus its outputs.
///
/// Resources keep their declaration order, which is also the order the deploy
/// engine walks them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    /// Stack name.
    pub name: String,
    /// Account the stack targets.
    pub account_id: AccountId,
    /// Region the stack targets.
    pub region: AwsRegion,
    resources: Vec<Resource>,
    outputs: Vec<Output>,
}

impl Stack {
    /// Create an empty stack.
    #[must_use]
    pub fn new(name: impl Into<String>, account_id: AccountId, region: AwsRegion) -> Self {
        Self {
            name: name.into(),
            account_id,
            region,
            resources: Vec::new(),
            outputs: Vec::new(),
        }
    }

    fn ensure_unique(&self, logical_id: &str) -> Result<(), SynthError> {
        if self.resources.iter().any(|r| r.logical_id() == logical_id) {
            return Err(SynthError::DuplicateLogicalId(logical_id.to_owned()));
        }
        Ok(())
    }

    /// Declare a bucket.
    ///
    /// # Errors
    /// Fails if `logical_id` is already taken.
    pub fn add_bucket(
        &mut self,
        logical_id: impl Into<String>,
        spec: BucketSpec,
    ) -> Result<BucketHandle, SynthError> {
        let logical_id = logical_id.into();
        self.ensure_unique(&logical_id)?;
        self.resources.push(Resource::Bucket {
            logical_id: logical_id.clone(),
            spec,
        });
        Ok(BucketHandle { logical_id })
    }

    /// Declare a distribution.
    ///
    /// # Errors
    /// Fails if `logical_id` is already taken.
    pub fn add_distribution(
        &mut self,
        logical_id: impl Into<String>,
        spec: DistributionSpec,
    ) -> Result<DistributionHandle, SynthError> {
        let logical_id = logical_id.into();
        self.ensure_unique(&logical_id)?;
        self.resources.push(Resource::Distribution {
            logical_id: logical_id.clone(),
            spec,
        });
        Ok(DistributionHandle { logical_id })
    }

    /// Declare a content-deployment step.
    ///
    /// # Errors
    /// Fails if `logical_id` is already taken.
    pub fn add_asset_deployment(
        &mut self,
        logical_id: impl Into<String>,
        spec: AssetDeploymentSpec,
    ) -> Result<(), SynthError> {
        let logical_id = logical_id.into();
        self.ensure_unique(&logical_id)?;
        self.resources
            .push(Resource::AssetDeployment { logical_id, spec });
        Ok(())
    }

    /// Declare a cost budget.
    ///
    /// # Errors
    /// Fails if `logical_id` is already taken.
    pub fn add_budget(
        &mut self,
        logical_id: impl Into<String>,
        spec: BudgetSpec,
    ) -> Result<(), SynthError> {
        let logical_id = logical_id.into();
        self.ensure_unique(&logical_id)?;
        self.resources.push(Resource::Budget { logical_id, spec });
        Ok(())
    }

    /// Declare an output.
    ///
    /// # Errors
    /// Fails if an output with the same name already exists.
    pub fn add_output(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), SynthError> {
        let name = name.into();
        if self.outputs.iter().any(|o| o.name == name) {
            return Err(SynthError::DuplicateOutput(name));
        }
        self.outputs.push(Output {
            name,
            value: value.into(),
        });
        Ok(())
    }

    /// All declared resources, in declaration order.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// All declared outputs.
    #[must_use]
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Look up a bucket declaration by logical ID.
    #[must_use]
    pub fn bucket(&self, logical_id: &str) -> Option<&BucketSpec> {
        self.resources.iter().find_map(|r| match r {
            Resource::Bucket { logical_id: id, spec } if id == logical_id => Some(spec),
            _ => None,
        })
    }

    /// Look up a distribution declaration by logical ID.
    #[must_use]
    pub fn distribution(&self, logical_id: &str) -> Option<&DistributionSpec> {
        self.resources.iter().find_map(|r| match r {
            Resource::Distribution { logical_id: id, spec } if id == logical_id => Some(spec),
            _ => None,
        })
    }

    /// Look up a budget declaration by logical ID.
    #[must_use]
    pub fn budget(&self, logical_id: &str) -> Option<&BudgetSpec> {
        self.resources.iter().find_map(|r| match r {
            Resource::Budget { logical_id: id, spec } if id == logical_id => Some(spec),
            _ => None,
        })
    }

    /// Render the stack as a deterministic JSON template.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_template(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
