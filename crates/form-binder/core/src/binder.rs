//! Form binding
//!
//! [`init_validate`] scans a container once, registers the derived rules with
//! an engine and returns a [`Binder`]. Each validation pass then goes through
//! [`FormBinding::present`], which turns a failure list into display
//! commands: clear every field first, then mark each failing field. Later
//! failures for the same field overwrite earlier ones.

use std::collections::HashSet;

use crate::config::BinderConfig;
use crate::display::{apply_commands, DisplayCommand, DisplaySurface};
use crate::engine::{FieldValues, Subscription, ValidationEngine};
use crate::error::{BinderError, Result};
use crate::markup::{FieldConfig, FieldElement, FormContainer};
use crate::rules::{Failure, RuleDescriptor};

/// Frozen field configs of one form
#[derive(Debug, Clone)]
pub struct FormBinding {
    scope: String,
    fields: Vec<FieldConfig>,
    config: BinderConfig,
}

impl FormBinding {
    /// Build from already-scanned elements
    pub fn from_elements<F: FieldElement>(
        scope: impl Into<String>,
        elements: &[F],
        config: BinderConfig,
    ) -> Result<Self> {
        let fields = elements
            .iter()
            .map(|el| FieldConfig::from_element(el, &config))
            .collect();
        Self::new(scope, fields, config)
    }

    /// Build from field configs; field names must be unique
    pub fn new(scope: impl Into<String>, fields: Vec<FieldConfig>, config: BinderConfig) -> Result<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(BinderError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }

        Ok(Self {
            scope: scope.into(),
            fields,
            config,
        })
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn fields(&self) -> &[FieldConfig] {
        &self.fields
    }

    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Rule descriptors in field order
    pub fn descriptors(&self) -> Vec<RuleDescriptor> {
        self.fields.iter().map(FieldConfig::descriptor).collect()
    }

    /// Display commands for one validation pass
    pub fn present(&self, failures: &[Failure]) -> Vec<DisplayCommand> {
        let clear = self.fields.iter().map(|field| DisplayCommand::Clear {
            field_id: field.id.clone(),
            message_id: field.message_id.clone(),
        });

        let apply = failures.iter().filter_map(|failure| {
            let field = self.field(&failure.name)?;
            Some(DisplayCommand::ShowError {
                field_id: field.id.clone(),
                message_id: field.message_id.clone(),
                message: field.message_for(&failure.rule),
            })
        });

        clear.chain(apply).collect()
    }
}

/// A form bound to an engine subscription
pub struct Binder<S: Subscription> {
    binding: FormBinding,
    subscription: S,
}

impl<S: Subscription> Binder<S> {
    pub fn binding(&self) -> &FormBinding {
        &self.binding
    }

    pub fn subscription(&self) -> &S {
        &self.subscription
    }

    /// Presentation callback: render the failures of one pass
    pub fn handle_failures<D: DisplaySurface + ?Sized>(
        &self,
        failures: &[Failure],
        surface: &mut D,
    ) -> Result<()> {
        let commands = self.binding.present(failures);
        apply_commands(&commands, surface, &self.binding.config)
    }

    /// Run a pass over `values` and render it
    pub fn validate<D: DisplaySurface + ?Sized>(
        &self,
        values: &FieldValues,
        surface: &mut D,
    ) -> Result<Vec<Failure>> {
        let failures = self.subscription.run(values);
        self.handle_failures(&failures, surface)?;
        Ok(failures)
    }
}

impl<S: Subscription + std::fmt::Debug> std::fmt::Debug for Binder<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binder")
            .field("binding", &self.binding)
            .field("subscription", &self.subscription)
            .finish()
    }
}

/// Scan `container`, register its rules with `engine` and return the binder
pub fn init_validate<C, E>(container: &C, engine: &mut E, config: BinderConfig) -> Result<Binder<E::Subscription>>
where
    C: FormContainer + ?Sized,
    E: ValidationEngine + ?Sized,
{
    let elements = container.fields(&config.selector);
    let binding = FormBinding::from_elements(container.name(), &elements, config)?;
    let subscription = engine.register(binding.scope(), &binding.descriptors())?;

    tracing::debug!(
        scope = %binding.scope(),
        fields = binding.fields().len(),
        "form bound"
    );

    Ok(Binder {
        binding,
        subscription,
    })
}
