//! In-memory document
//!
//! A small stand-in for a browser document: a named form holding elements in
//! document order. Used by tests and by hosts that render markup outside a
//! browser. Selectors are limited to comma-separated class selectors
//! (`.input,.textarea`).

use std::collections::BTreeMap;

use crate::display::DisplaySurface;
use crate::markup::{FieldElement, FormContainer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub id: String,
    pub name: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub visible: bool,
    pub content: String,
}

impl MemoryElement {
    /// `<input class="input" id=name name=name>`
    pub fn input(name: &str) -> Self {
        Self {
            id: name.to_string(),
            name: name.to_string(),
            classes: vec!["input".to_string()],
            visible: true,
            ..Default::default()
        }
    }

    /// `<textarea class="textarea" id=name name=name>`
    pub fn textarea(name: &str) -> Self {
        Self {
            classes: vec!["textarea".to_string()],
            ..Self::input(name)
        }
    }

    /// `<p id=id style="display:none">`
    pub fn message(id: &str) -> Self {
        Self {
            id: id.to_string(),
            visible: false,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn matches_selector(&self, selector: &str) -> bool {
        selector
            .split(',')
            .filter_map(|part| part.trim().strip_prefix('.'))
            .any(|class| self.has_class(class))
    }
}

impl FieldElement for MemoryElement {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}

/// A single form and the elements inside it
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    form_name: String,
    elements: Vec<MemoryElement>,
}

impl MemoryDocument {
    pub fn new(form_name: &str) -> Self {
        Self {
            form_name: form_name.to_string(),
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: MemoryElement) -> &mut Self {
        self.elements.push(element);
        self
    }

    /// Append a field followed by its `<id>-message` element
    pub fn push_field(&mut self, field: MemoryElement) -> &mut Self {
        let message = MemoryElement::message(&format!("{}-message", field.id));
        self.elements.push(field);
        self.elements.push(message);
        self
    }

    pub fn get(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut MemoryElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<MemoryElement> {
        let pos = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(pos))
    }

    /// Whether the field carries `class`
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.get(id).is_some_and(|e| e.has_class(class))
    }

    /// Visible content of a message element, `None` when hidden or absent
    pub fn shown_message(&self, id: &str) -> Option<&str> {
        self.get(id)
            .filter(|e| e.visible)
            .map(|e| e.content.as_str())
    }
}

impl FormContainer for MemoryDocument {
    type Field = MemoryElement;

    fn name(&self) -> String {
        self.form_name.clone()
    }

    fn fields(&self, selector: &str) -> Vec<MemoryElement> {
        self.elements
            .iter()
            .filter(|e| e.matches_selector(selector))
            .cloned()
            .collect()
    }
}

impl DisplaySurface for MemoryDocument {
    fn add_class(&mut self, element_id: &str, class: &str) {
        if let Some(el) = self.get_mut(element_id) {
            if !el.has_class(class) {
                el.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element_id: &str, class: &str) {
        if let Some(el) = self.get_mut(element_id) {
            el.classes.retain(|c| c != class);
        }
    }

    fn has_element(&self, element_id: &str) -> bool {
        self.get(element_id).is_some()
    }

    fn set_visible(&mut self, element_id: &str, visible: bool) {
        if let Some(el) = self.get_mut(element_id) {
            el.visible = visible;
        }
    }

    fn set_content(&mut self, element_id: &str, content: &str) {
        if let Some(el) = self.get_mut(element_id) {
            el.content = content.to_string();
        }
    }
}
