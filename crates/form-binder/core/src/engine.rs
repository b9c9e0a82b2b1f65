//! Validation engine contract and the built-in rule engine
//!
//! The binder only talks to an engine through [`ValidationEngine`]: it
//! registers a scope with its rule descriptors and gets back a
//! [`Subscription`] that runs validation passes over a snapshot of field
//! values.

use std::collections::HashMap;

use crate::error::Result;
use crate::rules::{parse_rules, FailedRule, Failure, RuleDescriptor, RuleToken};

/// Snapshot of field values keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: HashMap<String, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A registered rule set that can run validation passes
pub trait Subscription {
    /// Scope the subscription was registered under
    fn scope(&self) -> &str;

    /// Run one pass; failures are reported in field order
    fn run(&self, values: &FieldValues) -> Vec<Failure>;
}

/// Trait for validation engines
pub trait ValidationEngine {
    type Subscription: Subscription;

    /// Register a scope and its rules
    fn register(&mut self, scope: &str, rules: &[RuleDescriptor]) -> Result<Self::Subscription>;
}

/// Engine understanding `required` and `matches[<field>]`
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ValidationEngine for RuleEngine {
    type Subscription = RuleSubscription;

    fn register(&mut self, scope: &str, rules: &[RuleDescriptor]) -> Result<RuleSubscription> {
        let fields = rules
            .iter()
            .map(|d| parse_rules(&d.name, &d.rules).map(|tokens| (d.name.clone(), tokens)))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(scope, fields = fields.len(), "registered rule set");

        Ok(RuleSubscription {
            scope: scope.to_string(),
            fields,
        })
    }
}

/// Parsed rule set for one scope
#[derive(Debug, Clone)]
pub struct RuleSubscription {
    scope: String,
    fields: Vec<(String, Vec<RuleToken>)>,
}

impl RuleSubscription {
    fn check_field(name: &str, rules: &[RuleToken], values: &FieldValues) -> Option<Failure> {
        // Fields absent from the snapshot are not validated
        let value = values.get(name)?;
        let required = rules.contains(&RuleToken::Required);

        if value.is_empty() && !required {
            return None;
        }

        rules
            .iter()
            .find(|rule| !Self::check_rule(rule, value, values))
            .map(|rule| Failure::new(name, FailedRule::from(rule)))
    }

    fn check_rule(rule: &RuleToken, value: &str, values: &FieldValues) -> bool {
        match rule {
            RuleToken::Required => !value.is_empty(),
            RuleToken::Matches(other) => values.get(other).is_some_and(|v| v == value),
        }
    }
}

impl Subscription for RuleSubscription {
    fn scope(&self) -> &str {
        &self.scope
    }

    fn run(&self, values: &FieldValues) -> Vec<Failure> {
        let failures: Vec<Failure> = self
            .fields
            .iter()
            .filter_map(|(name, rules)| Self::check_field(name, rules, values))
            .collect();

        tracing::debug!(scope = %self.scope, failures = failures.len(), "validation pass");
        failures
    }
}
