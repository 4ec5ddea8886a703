//! Stack synthesis for SiteStack.
//!
//! Synthesis builds a declared resource graph, a [`Stack`] of bucket,
//! distribution, deployment, and budget declarations, without touching any
//! provider API. Values that only exist after deployment (physical bucket
//! names, distribution IDs) are represented as `${...}` tokens resolved by
//! the deploy crate.

mod error;
mod site;
mod stack;
pub mod token;
mod website;

pub use error::SynthError;
pub use site::{DISTRIBUTION_DOMAIN_OUTPUT, build_site_stack};
pub use stack::{BucketHandle, DistributionHandle, Output, Resource, Stack};
pub use website::{StaticWebsite, StaticWebsiteProps};
