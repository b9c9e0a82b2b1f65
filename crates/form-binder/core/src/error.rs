// File: form-binder-core/src/error.rs
// Purpose: Error type shared by binding, engine registration and presentation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BinderError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BinderError {
    /// Two bound fields share a name, so failures could not be joined back
    #[error("duplicate field name '{name}' in form")]
    DuplicateField { name: String },

    #[error("field '{field}' uses unknown rule '{rule}'")]
    UnknownRule { field: String, rule: String },

    #[error("field '{field}' has malformed rule '{rule}'")]
    InvalidRule { field: String, rule: String },

    /// Field has no status element at the derived id
    #[error("no message element '{message_id}' for field '{field_id}'")]
    MissingMessage { field_id: String, message_id: String },

    #[error("invalid binder configuration: {0}")]
    Config(String),
}
