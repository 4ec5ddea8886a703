//! SiteStack CLI - synthesize and deploy a static-website hosting stack.
//!
//! # Usage
//!
//! ```text
//! sitestack synth      # print the stack template as JSON
//! sitestack deploy     # apply the stack to AWS
//! sitestack destroy    # tear the stack down
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SITE_ACCOUNT_ID` | `111222333444` | Target AWS account |
//! | `SITE_REGION` | `us-east-1` | Target AWS region |
//! | `SITE_BUDGET` | `3.50` | Monthly cost ceiling in USD |
//! | `SITE_ADMIN_EMAIL` | `admin@mymail.com` | Budget alert recipient |
//! | `SITE_WEBSITE_ID` | `your-bucket` | Logical website identifier |
//! | `SITE_ASSET_DIR` | `./assets` | Directory of site content |
//! | `AWS_ENDPOINT_URL` | *(unset)* | Endpoint override for local emulators |
//! | `DATA_DIR` | `.` | Where the deployment state file lives |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result};
use sitestack_core::SiteConfig;
use sitestack_deploy::Deployer;
use sitestack_synth::build_site_stack;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subcommand selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Print the synthesized stack template.
    Synth,
    /// Apply the stack to AWS.
    Deploy,
    /// Tear the stack down.
    Destroy,
}

impl Command {
    fn parse(arg: Option<&str>) -> Option<Self> {
        match arg {
            Some("synth") => Some(Self::Synth),
            Some("deploy") => Some(Self::Deploy),
            Some("destroy") => Some(Self::Destroy),
            _ => None,
        }
    }
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let arg = std::env::args().nth(1);
    let Some(command) = Command::parse(arg.as_deref()) else {
        eprintln!("usage: sitestack <synth|deploy|destroy>");
        std::process::exit(2);
    };

    let config = SiteConfig::from_env().context("invalid configuration")?;
    init_tracing(&config.log_level)?;

    info!(
        account_id = %config.account_id,
        region = %config.region,
        website_id = %config.website_id,
        version = VERSION,
        "starting sitestack",
    );

    match command {
        Command::Synth => {
            let stack = build_site_stack(&config).context("failed to synthesize stack")?;
            println!("{}", stack.to_template()?);
        }
        Command::Deploy => {
            let stack = build_site_stack(&config).context("failed to synthesize stack")?;
            let deployer = Deployer::connect(config).await;
            let report = deployer
                .apply(&stack)
                .await
                .context("failed to apply stack")?;
            for output in &report.outputs {
                println!("{} = {}", output.name, output.value);
            }
        }
        Command::Destroy => {
            let stack = build_site_stack(&config).context("failed to synthesize stack")?;
            let deployer = Deployer::connect(config).await;
            deployer
                .destroy(&stack)
                .await
                .context("failed to destroy stack")?;
        }
    }

    Ok(())
}
