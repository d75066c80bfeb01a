//! Browser front end
//!
//! The mock page is always available so the client can be tested without
//! browser bindings; the real bindings need the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod dom;

#[cfg(feature = "wasm")]
pub use browser::{divide, multiply, BrowserPage};
pub use dom::{DomElement, DomEvent, MockPage};
