//! IAM resource-policy document model.
//!
//! Serializes to the exact JSON shape S3 expects in `PutBucketPolicy`, so a
//! [`PolicyDocument`] can be rendered with `serde_json` and sent as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Policy language version understood by all current AWS services.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Effect {
    /// Default variant.
    #[default]
    Allow,
    Deny,
}

impl Effect {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement principal.
///
/// Serializes either as the wildcard string `"*"` or as a
/// `{"Service": "..."}` map, matching the IAM policy grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Principal {
    /// A service principal such as `cloudfront.amazonaws.com`.
    Service {
        /// The service identifier.
        #[serde(rename = "Service")]
        service: String,
    },
    /// Any principal (`"*"`).
    Wildcard(String),
}

impl Principal {
    /// A service principal.
    #[must_use]
    pub fn service(service: impl Into<String>) -> Self {
        Self::Service {
            service: service.into(),
        }
    }

    /// The wildcard principal.
    #[must_use]
    pub fn any() -> Self {
        Self::Wildcard("*".to_owned())
    }
}

/// A single policy statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyStatement {
    /// Optional statement identifier.
    #[serde(rename = "Sid", skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    /// Allow or Deny.
    #[serde(rename = "Effect")]
    pub effect: Effect,
    /// Who the statement applies to.
    #[serde(rename = "Principal", skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    /// Actions covered by the statement.
    #[serde(rename = "Action")]
    pub action: Vec<String>,
    /// Resources covered by the statement.
    #[serde(rename = "Resource")]
    pub resource: Vec<String>,
    /// Condition operator -> (condition key -> value). `BTreeMap` keeps the
    /// rendered JSON deterministic.
    #[serde(rename = "Condition", skip_serializing_if = "Option::is_none")]
    pub condition: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

impl PolicyStatement {
    /// An Allow statement for the given principal, actions, and resources.
    #[must_use]
    pub fn allow(
        principal: Principal,
        actions: Vec<String>,
        resources: Vec<String>,
    ) -> Self {
        Self {
            sid: None,
            effect: Effect::Allow,
            principal: Some(principal),
            action: actions,
            resource: resources,
            condition: None,
        }
    }

    /// A Deny statement for the given principal, actions, and resources.
    #[must_use]
    pub fn deny(principal: Principal, actions: Vec<String>, resources: Vec<String>) -> Self {
        Self {
            sid: None,
            effect: Effect::Deny,
            principal: Some(principal),
            action: actions,
            resource: resources,
            condition: None,
        }
    }

    /// Set the statement identifier.
    #[must_use]
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    /// Add a condition entry, e.g. `("StringEquals", "AWS:SourceArn", arn)`.
    #[must_use]
    pub fn with_condition(
        mut self,
        operator: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.condition
            .get_or_insert_with(BTreeMap::new)
            .entry(operator.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }
}

/// A full policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Policy language version.
    #[serde(rename = "Version")]
    pub version: String,
    /// The statements.
    #[serde(rename = "Statement")]
    pub statement: Vec<PolicyStatement>,
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statement: Vec::new(),
        }
    }
}

impl PolicyDocument {
    /// A document holding the given statements.
    #[must_use]
    pub fn new(statements: Vec<PolicyStatement>) -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statement: statements,
        }
    }

    /// Append a statement.
    pub fn add_statement(&mut self, statement: PolicyStatement) {
        self.statement.push(statement);
    }

    /// Render the document as the JSON string AWS expects.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
