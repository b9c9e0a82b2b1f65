//! Browser tests for form-binder-wasm
//!
//! Run with `wasm-pack test --headless --firefox crates/form-binder/wasm`.

use form_binder_core::{Failure, RuleDescriptor};
use form_binder_wasm::init_validate;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Event, EventInit, HtmlElement, HtmlFormElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

const SIGNUP: &str = r#"
<input class="input" id="signup-password" name="password"
       required-field="Password is required">
<p id="signup-password-message" style="display:none"></p>
<input class="input" id="signup-confirm" name="confirm"
       required-field="Please repeat your password"
       matches-field="password"
       matches-field-error="Passwords do not match">
<p id="signup-confirm-message" style="display:none"></p>
<textarea class="textarea" id="signup-bio" name="bio"></textarea>
<p id="signup-bio-message" style="display:none"></p>
"#;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(form_name: &str, markup: &str) -> HtmlFormElement {
    let doc = document();
    let form: HtmlFormElement = doc.create_element("form").unwrap().dyn_into().unwrap();
    form.set_name(form_name);
    form.set_inner_html(markup);
    doc.body().unwrap().append_child(&form).unwrap();
    form
}

fn set_value(id: &str, value: &str) {
    let input: HtmlInputElement = document().get_element_by_id(id).unwrap().dyn_into().unwrap();
    input.set_value(value);
}

fn has_error(id: &str) -> bool {
    document()
        .get_element_by_id(id)
        .unwrap()
        .class_list()
        .contains("is-danger")
}

fn shown_message(id: &str) -> Option<String> {
    let el: HtmlElement = document().get_element_by_id(id).unwrap().dyn_into().unwrap();
    if el.style().get_property_value("display").unwrap() == "none" {
        None
    } else {
        Some(el.inner_html())
    }
}

/// Dispatch a cancelable submit event; returns whether it was cancelled
fn submit(form: &HtmlFormElement) -> bool {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("submit", &init).unwrap();
    form.dispatch_event(&event).unwrap();
    event.default_prevented()
}

#[wasm_bindgen_test]
fn test_descriptors_follow_markup() {
    let form = mount("signup-a", &SIGNUP.replace("signup-", "a-"));
    let validator = init_validate(form, JsValue::UNDEFINED).unwrap();

    assert_eq!(validator.scope(), "signup-a");
    let descriptors: Vec<RuleDescriptor> =
        serde_wasm_bindgen::from_value(validator.descriptors().unwrap()).unwrap();
    let rules: Vec<_> = descriptors.iter().map(|d| d.rules.as_str()).collect();
    assert_eq!(rules, vec!["required", "required|matches[password]", ""]);
}

#[wasm_bindgen_test]
fn test_validate_marks_and_clears_fields() {
    let form = mount("signup-b", &SIGNUP.replace("signup-", "b-"));
    let validator = init_validate(form, JsValue::UNDEFINED).unwrap();

    validator.validate().unwrap();
    assert!(has_error("b-password"));
    assert_eq!(
        shown_message("b-password-message").as_deref(),
        Some("Password is required")
    );
    assert!(!has_error("b-bio"));

    set_value("b-password", "secret");
    set_value("b-confirm", "other");
    validator.validate().unwrap();
    assert!(!has_error("b-password"));
    assert_eq!(shown_message("b-password-message"), None);
    assert_eq!(
        shown_message("b-confirm-message").as_deref(),
        Some("Passwords do not match")
    );

    set_value("b-confirm", "secret");
    validator.validate().unwrap();
    assert!(!has_error("b-confirm"));
}

#[wasm_bindgen_test]
fn test_present_accepts_external_failures() {
    let form = mount("signup-c", &SIGNUP.replace("signup-", "c-"));
    let validator = init_validate(form, JsValue::UNDEFINED).unwrap();

    let failures = serde_wasm_bindgen::to_value(&vec![
        Failure::matches("confirm"),
        Failure::required("nonexistent"),
    ])
    .unwrap();
    validator.present(failures).unwrap();

    assert!(has_error("c-confirm"));
    assert!(!has_error("c-password"));
}

#[wasm_bindgen_test]
fn test_duplicate_names_rejected() {
    let form = mount(
        "dup",
        r#"<input class="input" id="a1" name="a"><input class="input" id="a2" name="a">"#,
    );
    assert!(init_validate(form, JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn test_missing_message_element_does_not_throw() {
    let form = mount(
        "bare",
        r#"<input class="input" id="bare-email" name="email" required-field="Email required">"#,
    );
    let validator = init_validate(form, JsValue::UNDEFINED).unwrap();

    validator.validate().unwrap();
    assert!(has_error("bare-email"));
}


#[wasm_bindgen_test]
fn test_submit_runs_pass_and_cancels_only_on_failure() {
    let form = mount("signup-d", &SIGNUP.replace("signup-", "d-"));
    let _validator = init_validate(form.clone(), JsValue::UNDEFINED).unwrap();

    assert!(submit(&form));
    assert!(has_error("d-password"));
    assert_eq!(
        shown_message("d-password-message").as_deref(),
        Some("Password is required")
    );

    set_value("d-password", "secret");
    set_value("d-confirm", "secret");
    assert!(!submit(&form));
    assert!(!has_error("d-password"));
    assert_eq!(shown_message("d-password-message"), None);
}

#[wasm_bindgen_test]
fn test_dropped_validator_stops_listening() {
    let form = mount("signup-e", &SIGNUP.replace("signup-", "e-"));
    let validator = init_validate(form.clone(), JsValue::UNDEFINED).unwrap();

    assert!(submit(&form));
    assert!(has_error("e-password"));

    drop(validator);
    set_value("e-password", "secret");
    set_value("e-confirm", "secret");

    assert!(!submit(&form));
    assert!(has_error("e-password"));
    assert_eq!(
        shown_message("e-password-message").as_deref(),
        Some("Password is required")
    );
}
