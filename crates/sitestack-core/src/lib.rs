//! Core types, configuration, and errors for SiteStack.
//!
//! This crate provides the foundational building blocks shared across the
//! SiteStack synthesis and deployment crates: account/region identifiers,
//! ARN formatting helpers, site configuration, and the common error type.

pub mod arn;
mod config;
mod error;
mod types;

pub use config::SiteConfig;
pub use error::{SiteStackError, SiteStackResult};
pub use types::{AccountId, AwsRegion};

/// Service principal used in bucket policies that grant CloudFront access.
pub const CLOUDFRONT_SERVICE_PRINCIPAL: &str = "cloudfront.amazonaws.com";
