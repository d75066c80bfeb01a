//! dbus-calc - client for the dbus-http Calculator service
//!
//! The dbus-http bridge exposes D-Bus objects over HTTP: a POST to
//! `dbus/<bus name>/<object path>` with an interface, a method and an argument
//! list calls that method and answers with the return values as `arg0`,
//! `arg1`, ... This crate is the page-side client for the bridge's
//! calculator object.
//!
//! # Layout
//!
//! - [`core`]: operand parsing, request/response model, completion decisions
//! - [`page`]: the fields and location the client reads and writes
//! - [`transport`]: one POST per call (reqwest, or scripted for tests)
//! - [`client`]: trigger-and-display tying the above together
//! - [`wasm`]: mock page, and browser bindings behind the `wasm` feature
//!
//! # Example
//!
//! ```rust
//! use dbus_calc::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread()
//! #     .build()
//! #     .unwrap()
//! #     .block_on(async {
//! let transport = MockTransport::new();
//! transport.respond_with(200, r#"{"arg0": 12}"#);
//!
//! let client = CalculatorClient::new(ClientConfig::default(), transport.clone());
//! let mut page = MockPage::with_operands("3", "4");
//!
//! let outcome = client.multiply(&mut page).await.unwrap();
//! assert_eq!(outcome, Outcome::Rendered { value: "12".to_string() });
//! assert_eq!(
//!     transport.requests()[0].body,
//!     r#"{"interface":"dbus.http.Calculator","method":"Multiply","arguments":[3,4]}"#
//! );
//! # });
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod core;
pub mod page;
pub mod transport;

/// Mock page, plus browser bindings with the `wasm` feature
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::CalculatorClient;
    pub use crate::config::{ClientConfig, DEFAULT_ENDPOINT};
    pub use crate::core::{
        display_value, on_ready_state_change, BridgeError, CalcError, CalcResult,
        CalculatorRequest, CalculatorResponse, Decision, Method, Operand, Outcome, ReadyState,
    };
    pub use crate::page::{ids, Page, LOGIN_PAGE};
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::transport::HttpTransport;
    pub use crate::transport::{MockTransport, RecordedRequest, Transport, TransportResponse};

    pub use crate::wasm::{DomElement, DomEvent, MockPage};
}
