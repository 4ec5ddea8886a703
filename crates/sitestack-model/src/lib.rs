//! Declarative AWS resource model for SiteStack.
//!
//! These types describe the resources a stack declares (buckets,
//! distributions, deployments, budgets) independently of how they are
//! created. Enum values mirror the AWS wire values so the deploy crate can
//! translate them 1:1 into SDK calls, and so serialized templates read like
//! the provider's own configuration.

pub mod budget;
pub mod cloudfront;
pub mod deployment;
pub mod policy;
pub mod s3;

pub use budget::{
    BudgetNotification, BudgetSpec, BudgetType, ComparisonOperator, NotificationType, Subscriber,
    SubscriptionType, ThresholdType, TimeUnit,
};
pub use cloudfront::{
    CachePolicy, CustomErrorResponse, DistributionSpec, HttpVersion, LoggingSpec, Method,
    MinimumProtocolVersion, OriginSpec, PriceClass, ViewerProtocolPolicy,
};
pub use deployment::AssetDeploymentSpec;
pub use policy::{Effect, PolicyDocument, PolicyStatement, Principal};
pub use s3::{BucketSpec, LifecycleRule, ObjectOwnership, PublicAccessBlock, RemovalPolicy};
