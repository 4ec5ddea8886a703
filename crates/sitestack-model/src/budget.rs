//! Cost-budget declaration model.
//!
//! Enum values mirror the AWS Budgets API wire values.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Budget accumulation period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Default variant.
    #[default]
    #[serde(rename = "MONTHLY")]
    Monthly,
    #[serde(rename = "QUARTERLY")]
    Quarterly,
    #[serde(rename = "ANNUALLY")]
    Annually,
    #[serde(rename = "DAILY")]
    Daily,
}

impl TimeUnit {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "MONTHLY",
            Self::Quarterly => "QUARTERLY",
            Self::Annually => "ANNUALLY",
            Self::Daily => "DAILY",
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the budget measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BudgetType {
    /// Default variant.
    #[default]
    #[serde(rename = "COST")]
    Cost,
    #[serde(rename = "USAGE")]
    Usage,
}

impl BudgetType {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cost => "COST",
            Self::Usage => "USAGE",
        }
    }
}

impl std::fmt::Display for BudgetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How spend is compared to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// Default variant.
    #[default]
    #[serde(rename = "GREATER_THAN")]
    GreaterThan,
    #[serde(rename = "LESS_THAN")]
    LessThan,
    #[serde(rename = "EQUAL_TO")]
    EqualTo,
}

impl ComparisonOperator {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterThan => "GREATER_THAN",
            Self::LessThan => "LESS_THAN",
            Self::EqualTo => "EQUAL_TO",
        }
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether actual or forecast spend triggers the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NotificationType {
    /// Default variant.
    #[default]
    #[serde(rename = "ACTUAL")]
    Actual,
    #[serde(rename = "FORECASTED")]
    Forecasted,
}

impl NotificationType {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actual => "ACTUAL",
            Self::Forecasted => "FORECASTED",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the threshold value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThresholdType {
    /// Default variant. Threshold is a percentage of the budget limit.
    #[default]
    #[serde(rename = "PERCENTAGE")]
    Percentage,
    #[serde(rename = "ABSOLUTE_VALUE")]
    AbsoluteValue,
}

impl ThresholdType {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "PERCENTAGE",
            Self::AbsoluteValue => "ABSOLUTE_VALUE",
        }
    }
}

impl std::fmt::Display for ThresholdType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubscriptionType {
    /// Default variant.
    #[default]
    #[serde(rename = "EMAIL")]
    Email,
    #[serde(rename = "SNS")]
    Sns,
}

impl SubscriptionType {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Sns => "SNS",
        }
    }
}

impl std::fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    /// Delivery channel.
    pub subscription_type: SubscriptionType,
    /// Email address or SNS topic ARN.
    pub address: String,
}

impl Subscriber {
    /// An email subscriber.
    #[must_use]
    pub fn email(address: impl Into<String>) -> Self {
        Self {
            subscription_type: SubscriptionType::Email,
            address: address.into(),
        }
    }
}

/// A budget alert rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct BudgetNotification {
    /// Actual or forecast spend.
    #[builder(default)]
    pub notification_type: NotificationType,
    /// Comparison against the threshold.
    #[builder(default)]
    pub comparison_operator: ComparisonOperator,
    /// Threshold value, interpreted per `threshold_type`.
    pub threshold: f64,
    /// Threshold interpretation.
    #[builder(default)]
    pub threshold_type: ThresholdType,
    /// Who gets notified.
    pub subscribers: Vec<Subscriber>,
}

/// Declaration of a cost budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSpec {
    /// Budget name, unique within the account.
    pub name: String,
    /// Spend ceiling.
    pub limit_amount: f64,
    /// Currency unit for the ceiling.
    #[builder(default = String::from("USD"))]
    pub limit_unit: String,
    /// Accumulation period.
    #[builder(default)]
    pub time_unit: TimeUnit,
    /// Cost or usage.
    #[builder(default)]
    pub budget_type: BudgetType,
    /// Alert rules.
    #[builder(default)]
    pub notifications: Vec<BudgetNotification>,
}
