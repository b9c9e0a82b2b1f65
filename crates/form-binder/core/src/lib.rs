//! Form Binder Core
//!
//! Turns declarative validation attributes on form fields into engine rules,
//! and engine failures back into error styling and messages.
//!
//! ```ignore
//! <input class="input" id="password2" name="password2"
//!        required-field="Please repeat your password"
//!        matches-field="password"
//!        matches-field-error="Passwords do not match">
//! <p id="password2-message" style="display:none"></p>
//! ```
//!
//! The DOM is reached only through the [`FormContainer`], [`FieldElement`]
//! and [`DisplaySurface`] traits, so everything here runs without a browser.
//! See `form-binder-wasm` for the `web-sys` implementation.

pub mod binder;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod markup;
pub mod memory;
pub mod rules;

pub use binder::{init_validate, Binder, FormBinding};
pub use config::{BinderConfig, MissingMessagePolicy};
pub use display::{apply_commands, DisplayCommand, DisplaySurface};
pub use engine::{FieldValues, RuleEngine, RuleSubscription, Subscription, ValidationEngine};
pub use error::{BinderError, Result};
pub use markup::{FieldConfig, FieldElement, FormContainer, MATCHES_ATTR, MATCHES_ERROR_ATTR, REQUIRED_ATTR};
pub use memory::{MemoryDocument, MemoryElement};
pub use rules::{FailedRule, Failure, RuleDescriptor, RuleToken};
