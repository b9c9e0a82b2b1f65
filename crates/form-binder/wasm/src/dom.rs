//! `web-sys` implementations of the binder's document traits

use std::collections::HashMap;

use form_binder_core::{DisplaySurface, FieldElement, FieldValues, FormContainer};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

/// An input-like element found inside the form
pub struct DomField {
    element: Element,
}

impl FieldElement for DomField {
    fn id(&self) -> String {
        self.element.id()
    }

    fn name(&self) -> String {
        self.element.get_attribute("name").unwrap_or_default()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }
}

/// The form being bound
pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }

    /// Current values of all named controls
    ///
    /// Unchecked checkboxes and radios count as empty; a checked one in a
    /// group supplies the group's value.
    pub fn values(&self) -> FieldValues {
        let controls = self.form.elements();
        let mut values: HashMap<String, String> = HashMap::new();

        for i in 0..controls.length() {
            let Some(control) = controls.item(i) else {
                continue;
            };

            if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
                let name = input.name();
                if name.is_empty() {
                    continue;
                }
                match input.type_().as_str() {
                    "checkbox" | "radio" => {
                        let entry = values.entry(name).or_default();
                        if input.checked() {
                            *entry = input.value();
                        }
                    }
                    _ => {
                        values.insert(name, input.value());
                    }
                }
            } else if let Some(textarea) = control.dyn_ref::<HtmlTextAreaElement>() {
                if !textarea.name().is_empty() {
                    values.insert(textarea.name(), textarea.value());
                }
            } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
                if !select.name().is_empty() {
                    values.insert(select.name(), select.value());
                }
            }
        }

        values.into_iter().collect()
    }
}

impl FormContainer for DomForm {
    type Field = DomField;

    fn name(&self) -> String {
        self.form.name()
    }

    fn fields(&self, selector: &str) -> Vec<DomField> {
        let nodes = match self.form.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                tracing::warn!(selector, "invalid field selector: {:?}", err);
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| DomField { element })
            .collect()
    }
}

/// Display changes are looked up by id in the owning document
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }
}

impl DisplaySurface for DomSurface {
    fn add_class(&mut self, element_id: &str, class: &str) {
        if let Some(el) = self.element(element_id) {
            if let Err(err) = el.class_list().add_1(class) {
                tracing::warn!(element = element_id, "could not add class: {:?}", err);
            }
        }
    }

    fn remove_class(&mut self, element_id: &str, class: &str) {
        if let Some(el) = self.element(element_id) {
            if let Err(err) = el.class_list().remove_1(class) {
                tracing::warn!(element = element_id, "could not remove class: {:?}", err);
            }
        }
    }

    fn has_element(&self, element_id: &str) -> bool {
        self.element(element_id).is_some()
    }

    fn set_visible(&mut self, element_id: &str, visible: bool) {
        let Some(el) = self
            .element(element_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };

        let style = el.style();
        let result = if visible {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", "none")
        };
        if let Err(err) = result {
            tracing::warn!(element = element_id, "could not set display: {:?}", err);
        }
    }

    fn set_content(&mut self, element_id: &str, content: &str) {
        if let Some(el) = self.element(element_id) {
            el.set_inner_html(content);
        }
    }
}
