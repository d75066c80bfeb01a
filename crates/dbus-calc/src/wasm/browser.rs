//! Browser bindings for the calculator page
//!
//! Exposes `multiply()` to the page. The request goes out through a plain
//! `XMLHttpRequest` and every `readystatechange` is fed through the shared
//! completion decision, so the browser and the native client behave alike.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Event, HtmlInputElement, Window, XmlHttpRequest};

use crate::config::ClientConfig;
use crate::core::{on_ready_state_change, render_result, Decision, Method, ReadyState};
use crate::page::Page;
use crate::transport::JSON_CONTENT_TYPE;

/// The live document as a [`Page`]
#[derive(Debug, Clone)]
pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    /// Binds to the current window's document
    pub fn current() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self { window, document })
    }

    fn input(&self, id: &str) -> Option<HtmlInputElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }
}

impl Page for BrowserPage {
    fn field_value(&self, id: &str) -> Option<String> {
        self.input(id).map(|input| input.value())
    }

    fn set_field_value(&mut self, id: &str, value: &str) {
        if let Some(input) = self.input(id) {
            input.set_value(value);
        }
    }

    fn replace_location(&mut self, location: &str) {
        if let Err(e) = self.window.location().replace(location) {
            console::error_2(&"location.replace failed:".into(), &e);
        }
    }
}

/// Multiplies the two operand fields into the result field
#[wasm_bindgen]
pub fn multiply() -> Result<(), JsValue> {
    dispatch(&ClientConfig::default(), Method::Multiply)
}

/// Divides the two operand fields into the result field
#[wasm_bindgen]
pub fn divide() -> Result<(), JsValue> {
    dispatch(&ClientConfig::default(), Method::Divide)
}

/// Sends one request and returns immediately; the reply is handled by the
/// `readystatechange` callback.
fn dispatch(config: &ClientConfig, method: Method) -> Result<(), JsValue> {
    let mut page = BrowserPage::current()?;

    let request = config.build_request(method, &page);

    let xhr = XmlHttpRequest::new()?;
    let result_field = config.result_field.clone();
    let login_page = config.login_page.clone();

    // The request is read back from the event target; holding a handle to it
    // here would keep the XHR and the handler alive forever
    let on_change = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(watched) = event
            .target()
            .and_then(|target| target.dyn_into::<XmlHttpRequest>().ok())
        else {
            return;
        };
        let Some(state) = ReadyState::from_code(watched.ready_state()) else {
            return;
        };
        let status = watched.status().unwrap_or(0);
        match on_ready_state_change(state, status) {
            Decision::Render => {
                let body = watched.response_text().ok().flatten().unwrap_or_default();
                match render_result(&body) {
                    Ok(value) => page.set_field_value(&result_field, &value),
                    Err(e) => console::error_1(&e.to_string().into()),
                }
            }
            Decision::Redirect => page.replace_location(&login_page),
            Decision::Nothing => {}
        }
    });
    // Ownership moves to the JS function, which is collected with the XHR
    let on_change = on_change.into_js_value();
    xhr.set_onreadystatechange(Some(on_change.unchecked_ref()));

    xhr.open("POST", &config.endpoint)?;
    xhr.set_request_header("Content-Type", JSON_CONTENT_TYPE)?;
    xhr.send_with_opt_str(Some(&request.to_json()))?;
    Ok(())
}

/// Initialize the calculator in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"dbus-calc initialized".into());
}
