//! Top-level stack assembly.

use sitestack_core::SiteConfig;
use sitestack_model::{BudgetNotification, BudgetSpec, Subscriber};

use crate::error::SynthError;
use crate::stack::Stack;
use crate::website::{StaticWebsite, StaticWebsiteProps};

/// Name of the stack's single output.
pub const DISTRIBUTION_DOMAIN_OUTPUT: &str = "DistributionDomainName";

/// Assemble the full static-site stack from configuration: one website
/// declaration, its domain-name output, and the account cost budget.
///
/// # Errors
/// Fails when the configured asset directory does not exist.
pub fn build_site_stack(config: &SiteConfig) -> Result<Stack, SynthError> {
    let mut stack = Stack::new(
        "StaticWebStack",
        config.account_id.clone(),
        config.region.clone(),
    );

    let website = StaticWebsite::new(
        &mut stack,
        &config.website_id,
        StaticWebsiteProps::builder()
            .asset_dir(config.asset_dir.clone())
            .build(),
    )?;

    stack.add_output(
        DISTRIBUTION_DOMAIN_OUTPUT,
        website.distribution.domain_name_token(),
    )?;

    stack.add_budget(
        "MyBudget",
        BudgetSpec::builder()
            .name("My Account Budget".to_owned())
            .limit_amount(config.budget_amount)
            .notifications(vec![
                BudgetNotification::builder()
                    .threshold(80.0)
                    .subscribers(vec![Subscriber::email(config.admin_email.clone())])
                    .build(),
            ])
            .build(),
    )?;

    Ok(stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitestack_model::{BudgetType, ComparisonOperator, NotificationType, TimeUnit};

    fn config_with_assets(dir: &tempfile::TempDir) -> SiteConfig {
        SiteConfig::builder()
            .asset_dir(dir.path().to_string_lossy().into_owned())
            .build()
    }

    #[test]
    fn test_should_emit_distribution_domain_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "hi").unwrap();

        let stack = build_site_stack(&config_with_assets(&dir)).unwrap();
        let output = &stack.outputs()[0];
        assert_eq!(output.name, "DistributionDomainName");
        assert_eq!(output.value, "${distribution-domain:your-bucketDistribution}");
    }

    #[test]
    fn test_should_declare_monthly_budget_with_80_percent_email_alert() {
        let dir = tempfile::tempdir().unwrap();

        let stack = build_site_stack(&config_with_assets(&dir)).unwrap();
        let budget = stack.budget("MyBudget").unwrap();

        assert_eq!(budget.name, "My Account Budget");
        assert!((budget.limit_amount - 3.50).abs() < f64::EPSILON);
        assert_eq!(budget.limit_unit, "USD");
        assert_eq!(budget.time_unit, TimeUnit::Monthly);
        assert_eq!(budget.budget_type, BudgetType::Cost);

        assert_eq!(budget.notifications.len(), 1);
        let alert = &budget.notifications[0];
        assert_eq!(alert.notification_type, NotificationType::Actual);
        assert_eq!(alert.comparison_operator, ComparisonOperator::GreaterThan);
        assert!((alert.threshold - 80.0).abs() < f64::EPSILON);

        assert_eq!(alert.subscribers.len(), 1);
        assert_eq!(alert.subscribers[0].address, "admin@mymail.com");
    }

    #[test]
    fn test_should_fail_when_configured_asset_dir_missing() {
        let config = SiteConfig::builder()
            .asset_dir("/nope/assets".to_owned())
            .build();
        assert!(build_site_stack(&config).is_err());
    }
}
