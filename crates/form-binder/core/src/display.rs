// File: form-binder-core/src/display.rs
// Purpose: Display commands and their application to a document

use crate::config::{BinderConfig, MissingMessagePolicy};
use crate::error::{BinderError, Result};

/// One display state change for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCommand {
    /// Remove the error class and hide the message element
    Clear { field_id: String, message_id: String },

    /// Add the error class and show the message element.
    /// `message == None` keeps whatever content the element has.
    ShowError {
        field_id: String,
        message_id: String,
        message: Option<String>,
    },
}

/// Write access to the document the fields live in
pub trait DisplaySurface {
    fn add_class(&mut self, element_id: &str, class: &str);

    fn remove_class(&mut self, element_id: &str, class: &str);

    /// Whether an element with this id exists
    fn has_element(&self, element_id: &str) -> bool;

    fn set_visible(&mut self, element_id: &str, visible: bool);

    fn set_content(&mut self, element_id: &str, content: &str);
}

/// Apply commands in order
///
/// With `MissingMessagePolicy::Fail` every command is still applied and the
/// first missing message element is reported afterwards.
pub fn apply_commands<S: DisplaySurface + ?Sized>(
    commands: &[DisplayCommand],
    surface: &mut S,
    config: &BinderConfig,
) -> Result<()> {
    let mut missing = None;

    for command in commands {
        let (field_id, message_id) = match command {
            DisplayCommand::Clear {
                field_id,
                message_id,
            } => {
                surface.remove_class(field_id, &config.error_class);
                (field_id, message_id)
            }
            DisplayCommand::ShowError {
                field_id,
                message_id,
                ..
            } => {
                surface.add_class(field_id, &config.error_class);
                (field_id, message_id)
            }
        };

        if !surface.has_element(message_id) {
            tracing::warn!(field = %field_id, message_id = %message_id, "message element not found");
            if missing.is_none() {
                missing = Some(BinderError::MissingMessage {
                    field_id: field_id.clone(),
                    message_id: message_id.clone(),
                });
            }
            continue;
        }

        match command {
            DisplayCommand::Clear { .. } => surface.set_visible(message_id, false),
            DisplayCommand::ShowError { message, .. } => {
                match message {
                    Some(text) => surface.set_content(message_id, text),
                    None => tracing::debug!(field = %field_id, "no message text for failed rule"),
                }
                surface.set_visible(message_id, true);
            }
        }
    }

    match (missing, config.missing_message) {
        (Some(err), MissingMessagePolicy::Fail) => Err(err),
        _ => Ok(()),
    }
}
