// File: form-binder-core/src/markup.rs
// Purpose: Read validation attributes from form markup into field configs

use crate::config::BinderConfig;
use crate::rules::{FailedRule, RuleDescriptor, RuleToken, RULE_SEPARATOR};

/// Attribute enabling the required rule; its value is the message
pub const REQUIRED_ATTR: &str = "required-field";
/// Attribute naming the field this one must equal
pub const MATCHES_ATTR: &str = "matches-field";
/// Message shown when the matches rule fails
pub const MATCHES_ERROR_ATTR: &str = "matches-field-error";

/// Characters a matches target cannot contain without breaking the rule string
const RULE_DELIMITERS: &[char] = &[RULE_SEPARATOR, '[', ']'];

/// Read access to one input-like element
pub trait FieldElement {
    fn id(&self) -> String;

    /// Form-scoped name; the join key between failures and fields
    fn name(&self) -> String;

    /// Attribute value, `None` when the attribute is absent
    fn attribute(&self, name: &str) -> Option<String>;
}

/// A form-like container of fields
pub trait FormContainer {
    type Field: FieldElement;

    /// Scope name handed to the validation engine
    fn name(&self) -> String;

    /// Input-like descendants matching `selector`, in document order
    fn fields(&self, selector: &str) -> Vec<Self::Field>;
}

/// Everything the binder needs to know about one field, read once at bind time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    pub id: String,
    pub name: String,
    pub rules: Vec<RuleToken>,
    pub required_message: Option<String>,
    pub matches_message: Option<String>,
    pub message_id: String,
}

impl FieldConfig {
    /// Derive a field's config from its attributes
    ///
    /// Required is checked before matches, so the token order is fixed
    /// regardless of attribute order in the markup. A matches target that is
    /// empty or contains rule delimiters drops only that field's matches rule.
    pub fn from_element<F: FieldElement + ?Sized>(element: &F, config: &BinderConfig) -> Self {
        let id = element.id();
        let name = element.name();
        let required_message = element.attribute(REQUIRED_ATTR);
        let matches_target = element.attribute(MATCHES_ATTR);

        let mut rules = Vec::new();
        if required_message.is_some() {
            rules.push(RuleToken::Required);
        }
        match matches_target {
            Some(other) if other.is_empty() => {
                tracing::debug!(field = %name, "empty {}, matches rule skipped", MATCHES_ATTR);
            }
            Some(other) if other.contains(RULE_DELIMITERS) => {
                tracing::warn!(
                    field = %name,
                    target = %other,
                    "{} contains rule delimiters, matches rule skipped",
                    MATCHES_ATTR
                );
            }
            Some(other) => rules.push(RuleToken::Matches(other)),
            None => {}
        }

        Self {
            message_id: config.message_id(&id),
            name,
            rules,
            required_message,
            matches_message: element.attribute(MATCHES_ERROR_ATTR),
            id,
        }
    }

    pub fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor::new(self.name.clone(), &self.rules)
    }

    /// Message text for a failed rule; `None` leaves the content untouched
    pub fn message_for(&self, rule: &FailedRule) -> Option<String> {
        match rule {
            FailedRule::Required => Some(self.required_message.clone().unwrap_or_default()),
            FailedRule::Matches => Some(self.matches_message.clone().unwrap_or_default()),
            FailedRule::Other(_) => None,
        }
    }
}
