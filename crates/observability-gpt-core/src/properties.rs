//! Custom properties attached to observability log entries.
//!
//! Every operation builds a fresh property map. The same map is sent as
//! `Helicone-Property-<key>` headers on gateway calls and embedded in the
//! custom log entries of simulated operations.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::credits::{CreditAmount, CREDIT_USD_RATE};
use crate::ids::{AgentId, BatchId, PlanId, SessionId};

/// Header prefix used for each property.
pub const PROPERTY_HEADER_PREFIX: &str = "Helicone-Property-";

/// Plan type reported when none is configured.
pub const DEFAULT_PLAN_TYPE: &str = "credit_based";

/// A property value: text, integer or decimal number.
///
/// Integers stay integers on the wire (`5`, not `5.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Text value.
    Text(String),
    /// Integer value.
    Integer(u64),
    /// Decimal value.
    Number(f64),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

/// Flat map of string keys to text or numeric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomProperties(BTreeMap<String, PropertyValue>);

impl CustomProperties {
    /// Create an empty property map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the properties as `Helicone-Property-<key>` header pairs.
    #[must_use]
    pub fn to_headers(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(key, value)| (format!("{PROPERTY_HEADER_PREFIX}{key}"), value.to_string()))
            .collect()
    }
}

/// Inputs for the standard property schema of one operation.
#[derive(Debug, Clone)]
pub struct OperationProperties<'a> {
    /// The billed agent.
    pub agent_id: &'a AgentId,
    /// The plan the credits belong to.
    pub plan_id: &'a PlanId,
    /// Plan type label (e.g. `credit_based`).
    pub plan_type: &'a str,
    /// Credits to redeem for the operation.
    pub credit_amount: CreditAmount,
    /// Operation label (e.g. `gpt_completion`).
    pub operation: &'a str,
    /// Batch id when the operation is part of a combined request.
    pub batch_id: Option<BatchId>,
}

impl OperationProperties<'_> {
    /// Build the property map with a fresh session id.
    #[must_use]
    pub fn build(&self) -> CustomProperties {
        self.build_with_session(&SessionId::generate())
    }

    /// Build the property map for a given session id.
    #[must_use]
    pub fn build_with_session(&self, session_id: &SessionId) -> CustomProperties {
        let batch_id = self.batch_id.map(|id| id.to_string()).unwrap_or_default();
        let is_batch_request = u64::from(self.batch_id.is_some());

        CustomProperties::new()
            .with("agentid", self.agent_id.as_str())
            .with("sessionid", session_id.as_str())
            .with("planid", self.plan_id.as_str())
            .with("plan_type", self.plan_type)
            .with("credit_amount", self.credit_amount.get())
            .with("credit_usd_rate", CREDIT_USD_RATE)
            .with("credit_price_usd", self.credit_amount.price_usd())
            .with("operation", self.operation)
            .with("batch_id", batch_id)
            .with("is_batch_request", is_batch_request)
    }
}
