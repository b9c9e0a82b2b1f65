//! Rule tokens, rule descriptors and failure records
//!
//! A rule string is a `|`-separated list of tokens; a token may carry one
//! parameter in brackets, e.g. `required|matches[password]`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{BinderError, Result};

/// Separator between tokens in a rule string
pub const RULE_SEPARATOR: char = '|';

static PARAM_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\[(.*)\]$").unwrap());

/// One validation check attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleToken {
    /// Value must be non-empty
    Required,
    /// Value must equal the value of the named field
    Matches(String),
}

impl RuleToken {
    /// Token name without its parameter
    pub fn name(&self) -> &'static str {
        match self {
            RuleToken::Required => "required",
            RuleToken::Matches(_) => "matches",
        }
    }

    /// Parse a single token of a rule string
    pub fn parse(field: &str, token: &str) -> Result<Self> {
        let (name, param) = split_token(token);
        match (name, param) {
            ("required", None) => Ok(RuleToken::Required),
            ("matches", Some(other)) if !other.is_empty() => Ok(RuleToken::Matches(other.to_string())),
            ("required", Some(_)) | ("matches", _) => Err(BinderError::InvalidRule {
                field: field.to_string(),
                rule: token.to_string(),
            }),
            _ => Err(BinderError::UnknownRule {
                field: field.to_string(),
                rule: token.to_string(),
            }),
        }
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleToken::Required => write!(f, "required"),
            RuleToken::Matches(other) => write!(f, "matches[{}]", other),
        }
    }
}

/// Split `name[param]` into its parts; tokens without brackets have no param
fn split_token(token: &str) -> (&str, Option<&str>) {
    match PARAM_TOKEN.captures(token) {
        Some(caps) => {
            let name = caps.get(1).map_or(token, |m| m.as_str());
            let param = caps.get(2).map(|m| m.as_str());
            (name, param)
        }
        None => (token, None),
    }
}

/// Join tokens into the rule string handed to the engine
pub fn join_rules(tokens: &[RuleToken]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(&RULE_SEPARATOR.to_string())
}

/// Parse a full rule string; empty tokens are skipped
pub fn parse_rules(field: &str, rules: &str) -> Result<Vec<RuleToken>> {
    rules
        .split(RULE_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| RuleToken::parse(field, t))
        .collect()
}

/// What the engine is given for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    pub name: String,
    pub rules: String,
}

impl RuleDescriptor {
    pub fn new(name: impl Into<String>, tokens: &[RuleToken]) -> Self {
        Self {
            name: name.into(),
            rules: join_rules(tokens),
        }
    }
}

/// Rule named by a failure record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedRule {
    Required,
    Matches,
    Other(String),
}

impl FailedRule {
    /// Accepts bare names as well as parameterised tokens (`matches[x]`)
    pub fn parse(rule: &str) -> Self {
        match split_token(rule.trim()).0 {
            "required" => FailedRule::Required,
            "matches" => FailedRule::Matches,
            other => FailedRule::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FailedRule::Required => "required",
            FailedRule::Matches => "matches",
            FailedRule::Other(rule) => rule,
        }
    }
}

impl From<&RuleToken> for FailedRule {
    fn from(token: &RuleToken) -> Self {
        match token {
            RuleToken::Required => FailedRule::Required,
            RuleToken::Matches(_) => FailedRule::Matches,
        }
    }
}

impl Serialize for FailedRule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FailedRule {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(FailedRule::parse(&raw))
    }
}

/// One field that did not satisfy one rule during a validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub name: String,
    pub rule: FailedRule,
}

impl Failure {
    pub fn new(name: impl Into<String>, rule: FailedRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }

    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, FailedRule::Required)
    }

    pub fn matches(name: impl Into<String>) -> Self {
        Self::new(name, FailedRule::Matches)
    }
}
