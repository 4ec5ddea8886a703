//! AWS Budgets calls used by the deploy engine.

use aws_sdk_budgets::types::{
    Budget, Notification, NotificationWithSubscribers, Spend, Subscriber,
};
use aws_smithy_types::error::display::DisplayErrorContext;
use sitestack_model::BudgetSpec;
use tracing::info;

use crate::error::DeployError;

/// Create a cost budget with its notification rules.
pub(crate) async fn create_budget(
    client: &aws_sdk_budgets::Client,
    account_id: &str,
    spec: &BudgetSpec,
) -> Result<(), DeployError> {
    let limit = Spend::builder()
        .amount(spec.limit_amount.to_string())
        .unit(&spec.limit_unit)
        .build()
        .map_err(DeployError::spec)?;

    let budget = Budget::builder()
        .budget_name(&spec.name)
        .budget_limit(limit)
        .time_unit(aws_sdk_budgets::types::TimeUnit::from(
            spec.time_unit.as_str(),
        ))
        .budget_type(aws_sdk_budgets::types::BudgetType::from(
            spec.budget_type.as_str(),
        ))
        .build()
        .map_err(DeployError::spec)?;

    let mut req = client
        .create_budget()
        .account_id(account_id)
        .budget(budget);

    for alert in &spec.notifications {
        let notification = Notification::builder()
            .notification_type(aws_sdk_budgets::types::NotificationType::from(
                alert.notification_type.as_str(),
            ))
            .comparison_operator(aws_sdk_budgets::types::ComparisonOperator::from(
                alert.comparison_operator.as_str(),
            ))
            .threshold(alert.threshold)
            .threshold_type(aws_sdk_budgets::types::ThresholdType::from(
                alert.threshold_type.as_str(),
            ))
            .build()
            .map_err(DeployError::spec)?;

        let subscribers: Vec<Subscriber> = alert
            .subscribers
            .iter()
            .map(|s| {
                Subscriber::builder()
                    .subscription_type(aws_sdk_budgets::types::SubscriptionType::from(
                        s.subscription_type.as_str(),
                    ))
                    .address(&s.address)
                    .build()
            })
            .collect::<Result<_, _>>()
            .map_err(DeployError::spec)?;

        req = req.notifications_with_subscribers(
            NotificationWithSubscribers::builder()
                .notification(notification)
                .set_subscribers(Some(subscribers))
                .build()
                .map_err(DeployError::spec)?,
        );
    }

    req.send()
        .await
        .map_err(|e| DeployError::api("CreateBudget", DisplayErrorContext(&e)))?;
    info!(budget = spec.name.as_str(), "created budget");
    Ok(())
}

/// Delete a budget by name.
pub(crate) async fn delete_budget(
    client: &aws_sdk_budgets::Client,
    account_id: &str,
    name: &str,
) -> Result<(), DeployError> {
    client
        .delete_budget()
        .account_id(account_id)
        .budget_name(name)
        .send()
        .await
        .map_err(|e| DeployError::api("DeleteBudget", DisplayErrorContext(&e)))?;
    info!(budget = name, "deleted budget");
    Ok(())
}
