//! Form Binder WASM
//!
//! Browser entry point: binds an HTML form's declarative validation
//! attributes to the rule engine and renders failures on submit.
//!
//! # Example (JavaScript)
//! ```javascript
//! import init, { initValidate } from './form_binder_wasm.js';
//!
//! await init();
//! const validator = initValidate(document.forms.signup, { errorClass: 'is-danger' });
//! ```

mod dom;
pub mod logging;

use std::rc::Rc;

use form_binder_core::{
    init_validate as bind_form, Binder, BinderConfig, Failure, RuleEngine, RuleSubscription,
    Subscription,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlFormElement};

pub use dom::{DomField, DomForm, DomSurface};

/// Set panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init();
}

struct BoundForm {
    form: DomForm,
    document: Document,
    binder: Binder<RuleSubscription>,
}

impl BoundForm {
    /// Run one pass over the form's current values and render it
    fn run_pass(&self) -> Vec<Failure> {
        let values = self.form.values();
        let failures = self.binder.subscription().run(&values);
        self.present(&failures);
        failures
    }

    fn present(&self, failures: &[Failure]) {
        let mut surface = DomSurface::new(self.document.clone());
        if let Err(err) = self.binder.handle_failures(failures, &mut surface) {
            tracing::error!(scope = %self.binder.binding().scope(), "{}", err);
        }
    }
}

/// A form bound to the validation engine
///
/// Dropping it (or calling `free()` from JavaScript) detaches the submit
/// listener.
#[wasm_bindgen]
pub struct FormValidator {
    bound: Rc<BoundForm>,
    element: HtmlFormElement,
    on_submit: Closure<dyn FnMut(Event)>,
}

#[wasm_bindgen]
impl FormValidator {
    /// Scope name the form was registered under
    #[wasm_bindgen(getter)]
    pub fn scope(&self) -> String {
        self.bound.binder.binding().scope().to_string()
    }

    /// Registered `{ name, rules }` descriptors
    pub fn descriptors(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(
            &self.bound.binder.binding().descriptors(),
        )?)
    }

    /// Validate now and render the result; returns the `{ name, rule }` failures
    pub fn validate(&self) -> Result<JsValue, JsValue> {
        let failures = self.bound.run_pass();
        Ok(serde_wasm_bindgen::to_value(&failures)?)
    }

    /// Render a failure list produced elsewhere
    pub fn present(&self, failures: JsValue) -> Result<(), JsValue> {
        let failures: Vec<Failure> = serde_wasm_bindgen::from_value(failures)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse failures: {}", e)))?;
        self.bound.present(&failures);
        Ok(())
    }
}

impl Drop for FormValidator {
    fn drop(&mut self) {
        if let Err(err) = self
            .element
            .remove_event_listener_with_callback("submit", self.on_submit.as_ref().unchecked_ref())
        {
            tracing::warn!(scope = %self.scope(), "could not remove submit listener: {:?}", err);
        }
    }
}

fn parse_options(options: JsValue) -> Result<BinderConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(BinderConfig::default());
    }
    let config: BinderConfig = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?;
    config
        .validated()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Bind a form's validation attributes and validate it on every submit
///
/// Submission is cancelled while any field fails. Binding fails when two
/// fields share a name or the options are invalid.
#[wasm_bindgen(js_name = initValidate)]
pub fn init_validate(form: HtmlFormElement, options: JsValue) -> Result<FormValidator, JsValue> {
    let config = parse_options(options)?;
    let document = form
        .owner_document()
        .ok_or_else(|| JsValue::from_str("form is not attached to a document"))?;

    let container = DomForm::new(form.clone());
    let binder = bind_form(&container, &mut RuleEngine::new(), config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let bound = Rc::new(BoundForm {
        form: container,
        document,
        binder,
    });

    let handler = Rc::clone(&bound);
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if !handler.run_pass().is_empty() {
            event.prevent_default();
        }
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;

    Ok(FormValidator {
        bound,
        element: form,
        on_submit,
    })
}
