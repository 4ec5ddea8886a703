//! Deploy engine for SiteStack.
//!
//! Walks a synthesized [`sitestack_synth::Stack`] and applies it through the
//! AWS SDK: buckets first, then the distribution, then bucket policies (which
//! may reference the distribution's ARN), then content deployment, then the
//! budget. Physical IDs are recorded in a local state file so `destroy` can
//! find what `apply` created.
//!
//! There is no retry or rollback logic here; failures surface as fatal
//! errors and retries are left to the SDK's own retry policy.

mod assets;
mod budgets;
mod clients;
mod cloudfront;
mod engine;
mod error;
mod s3;
mod state;

pub use assets::{AssetFile, collect_assets, content_type_for};
pub use clients::AwsClients;
pub use engine::{ApplyReport, Deployer};
pub use error::DeployError;
pub use state::DeployState;
