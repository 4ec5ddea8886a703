//! Site configuration.
//!
//! All settings are fixed at synthesis time. The defaults mirror the values a
//! new installation is expected to customize; `from_env` allows overriding
//! them without a rebuild.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::types::{AccountId, AwsRegion};

/// Configuration for a static-site stack.
///
/// All fields have defaults; configuration can be loaded from environment
/// variables via [`SiteConfig::from_env`]. No validation beyond the account ID
/// format is performed here: a malformed email or budget amount is only
/// rejected by AWS at deploy time.
///
/// # Examples
///
/// ```
/// use sitestack_core::SiteConfig;
///
/// let config = SiteConfig::default();
/// assert_eq!(config.website_id, "your-bucket");
/// assert_eq!(config.region.as_str(), "us-east-1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// AWS account the stack deploys into.
    #[builder(default)]
    pub account_id: AccountId,

    /// AWS region the stack deploys into.
    #[builder(default)]
    pub region: AwsRegion,

    /// Monthly cost-budget ceiling in USD.
    #[builder(default = 3.50)]
    pub budget_amount: f64,

    /// Email address receiving budget alerts.
    #[builder(default = String::from("admin@mymail.com"))]
    pub admin_email: String,

    /// Logical identifier for the website within the stack.
    #[builder(default = String::from("your-bucket"))]
    pub website_id: String,

    /// Local directory holding the site assets to upload.
    #[builder(default = String::from("./assets"))]
    pub asset_dir: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Directory where the deploy engine keeps its state file.
    #[builder(default = String::from("."))]
    pub data_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            account_id: AccountId::default(),
            region: AwsRegion::default(),
            budget_amount: 3.50,
            admin_email: String::from("admin@mymail.com"),
            website_id: String::from("your-bucket"),
            asset_dir: String::from("./assets"),
            log_level: String::from("info"),
            data_dir: String::from("."),
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SITE_ACCOUNT_ID` | `111222333444` |
    /// | `SITE_REGION` | `us-east-1` |
    /// | `SITE_BUDGET` | `3.50` |
    /// | `SITE_ADMIN_EMAIL` | `admin@mymail.com` |
    /// | `SITE_WEBSITE_ID` | `your-bucket` |
    /// | `SITE_ASSET_DIR` | `./assets` |
    /// | `LOG_LEVEL` | `info` |
    /// | `DATA_DIR` | `.` |
    ///
    /// # Errors
    /// Returns an error if `SITE_ACCOUNT_ID` is set to a value that is not a
    /// 12-digit numeric string.
    pub fn from_env() -> Result<Self, crate::SiteStackError> {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("SITE_ACCOUNT_ID") {
            config.account_id = AccountId::new(v)?;
        }
        if let Ok(v) = std::env::var("SITE_REGION") {
            config.region = AwsRegion::new(v);
        }
        if let Ok(v) = std::env::var("SITE_BUDGET") {
            if let Ok(n) = v.parse::<f64>() {
                config.budget_amount = n;
            }
        }
        if let Ok(v) = std::env::var("SITE_ADMIN_EMAIL") {
            config.admin_email = v;
        }
        if let Ok(v) = std::env::var("SITE_WEBSITE_ID") {
            config.website_id = v;
        }
        if let Ok(v) = std::env::var("SITE_ASSET_DIR") {
            config.asset_dir = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("DATA_DIR") {
            config.data_dir = v;
        }

        Ok(config)
    }
}
