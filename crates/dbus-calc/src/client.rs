//! Calculator client - trigger-and-display
//!
//! One invocation reads the two operand fields, sends one method call, and
//! runs the completion callback over the reply:
//!
//! ```text
//! prepare(page) ──► send(request) ──► complete(response, page)
//!   read fields      one POST           200 → write result field
//!   parse operands   no retry           401 → replace location
//!                                        else → nothing
//! ```
//!
//! Invocations share nothing but the page. Several can be in flight at once;
//! whichever completes last owns the result field.

use crate::config::ClientConfig;
use crate::core::{
    on_ready_state_change, render_result, BridgeError, CalcResult, CalculatorRequest, Decision,
    Method, Outcome, ReadyState,
};
use crate::page::Page;
use crate::transport::{Transport, TransportResponse};

#[cfg(not(target_arch = "wasm32"))]
use crate::transport::HttpTransport;

/// Client for the bridge's calculator object
#[derive(Debug, Clone)]
pub struct CalculatorClient<T> {
    config: ClientConfig,
    transport: T,
}

#[cfg(not(target_arch = "wasm32"))]
impl CalculatorClient<HttpTransport> {
    /// Creates a client talking HTTP to `config.base_url`
    pub fn connect(config: ClientConfig) -> CalcResult<Self> {
        config.validate()?;
        let timeout = config.timeout_ms.map(std::time::Duration::from_millis);
        let transport = HttpTransport::new(&config.base_url, timeout)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> CalculatorClient<T> {
    /// Creates a client over an existing transport
    #[must_use]
    pub const fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Reads the operand fields and builds the request.
    ///
    /// A missing field reads as empty text, which parses to not-a-number.
    pub fn prepare<P: Page + ?Sized>(&self, method: Method, page: &P) -> CalculatorRequest {
        let request = self.config.build_request(method, page);
        let [lhs, rhs] = request.arguments;
        tracing::debug!(method = %method, %lhs, %rhs, "prepared method call");
        request
    }

    /// Sends one request. No retry, no cancellation.
    pub async fn send(&self, request: &CalculatorRequest) -> CalcResult<TransportResponse> {
        let response = self
            .transport
            .post_json(&self.config.endpoint, request.to_json())
            .await?;
        tracing::debug!(status = response.status, "bridge replied");
        Ok(response)
    }

    /// Runs the completion callback for every readiness change the reply
    /// goes through.
    ///
    /// A 200 body that is not a JSON object, or lacks `arg0`, is an error and
    /// leaves the page untouched.
    pub fn complete<P: Page + ?Sized>(
        &self,
        response: &TransportResponse,
        page: &mut P,
    ) -> CalcResult<Outcome> {
        let status = response.status;

        for state in ReadyState::after_response() {
            match on_ready_state_change(state, status) {
                Decision::Render => {
                    let value = render_result(&response.body)?;
                    page.set_field_value(&self.config.result_field, &value);
                    tracing::info!(
                        field = %self.config.result_field,
                        value = %value,
                        "rendered result"
                    );
                    return Ok(Outcome::Rendered { value });
                }
                Decision::Redirect => {
                    page.replace_location(&self.config.login_page);
                    tracing::info!(location = %self.config.login_page, "unauthorized, redirecting");
                    return Ok(Outcome::Redirected {
                        location: self.config.login_page.clone(),
                    });
                }
                Decision::Nothing => {
                    tracing::trace!(?state, status, "no action");
                }
            }
        }

        match BridgeError::from_body(&response.body) {
            Some(err) => tracing::warn!(status, error = %err, "ignoring bridge reply"),
            None => tracing::warn!(
                status,
                reason = BridgeError::describe_status(status),
                "ignoring bridge reply"
            ),
        }
        Ok(Outcome::Ignored { status })
    }

    /// prepare + send + complete for `method`
    pub async fn invoke<P: Page + ?Sized>(
        &self,
        method: Method,
        page: &mut P,
    ) -> CalcResult<Outcome> {
        let request = self.prepare(method, page);
        let response = self.send(&request).await?;
        self.complete(&response, page)
    }

    /// Invokes the configured method
    pub async fn trigger<P: Page + ?Sized>(&self, page: &mut P) -> CalcResult<Outcome> {
        self.invoke(self.config.method, page).await
    }

    /// Invokes `Multiply`
    pub async fn multiply<P: Page + ?Sized>(&self, page: &mut P) -> CalcResult<Outcome> {
        self.invoke(Method::Multiply, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CalcError, Operand};
    use crate::page::ids;
    use crate::transport::MockTransport;
    use crate::wasm::MockPage;

    fn client_with(transport: &MockTransport) -> CalculatorClient<MockTransport> {
        CalculatorClient::new(ClientConfig::new(), transport.clone())
    }

    fn result_of(page: &MockPage) -> String {
        page.field_value(ids::RESULT).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_request_body_is_exact() {
        let transport = MockTransport::new();
        transport.respond_with(200, r#"{"arg0":12}"#);
        let client = client_with(&transport);
        let mut page = MockPage::with_operands("3", "4");

        client.multiply(&mut page).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].path,
            "dbus/dbus.http.Calculator/dbus/http/Calculator"
        );
        assert_eq!(
            requests[0].body,
            r#"{"interface":"dbus.http.Calculator","method":"Multiply","arguments":[3,4]}"#
        );
    }

    #[tokio::test]
    async fn test_success_renders_arg0() {
        let transport = MockTransport::new();
        transport.respond_with(200, r#"{"arg0": 12}"#);
        let client = client_with(&transport);
        let mut page = MockPage::with_operands("3", "4");

        let outcome = client.multiply(&mut page).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Rendered {
                value: "12".to_string()
            }
        );
        assert_eq!(result_of(&page), "12");
        assert!(page.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_redirects_and_keeps_result() {
        let transport = MockTransport::new();
        transport.respond_with(401, "");
        let client = client_with(&transport);
        let mut page = MockPage::with_operands("3", "4");
        page.set_field_value(ids::RESULT, "previous");
        page.clear_event_history();

        let outcome = client.multiply(&mut page).await.unwrap();

        assert_eq!(
            outcome,
            Outcome::Redirected {
                location: "/index.html".to_string()
            }
        );
        assert_eq!(page.location(), "/index.html");
        assert_eq!(page.navigations(), vec!["/index.html"]);
        assert_eq!(result_of(&page), "previous");
        assert_eq!(page.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_unauthorized_with_json_body_still_redirects() {
        let transport = MockTransport::new();
        transport.respond_with(401, r#"{"arg0": 99}"#);
        let client = client_with(&transport);
        let mut page = MockPage::with_operands("1", "1");

        let outcome = client.multiply(&mut page).await.unwrap();

        assert!(matches!(outcome, Outcome::Redirected { .. }));
        assert_eq!(result_of(&page), "");
    }

    #[tokio::test]
    async fn test_non_numeric_input_is_sent_as_null() {
        let transport = MockTransport::new();
        transport.respond_with(200, r#"{"arg0": 0}"#);
        let client = client_with(&transport);
        let mut page = MockPage::with_operands("abc", "4");

        client.multiply(&mut page).await.unwrap();

        assert_eq!(
            transport.requests()[0].body,
            r#"{"interface":"dbus.http.Calculator","method":"Multiply","arguments":[null,4]}"#
        );
    }

    #[tokio::test]
    async fn test_server_error_is_ignored() {
        let transport = MockTransport::new();
        transport.respond_with(
            500,
            r#"{"error":"org.freedesktop.DBus.Error.Failed","message":"boom"}"#,
        );
        let client = client_with(&transport);
        let mut page = MockPage::with_operands("3", "4");
        page.clear_event_history();

        let outcome = client.multiply(&mut page).await.unwrap();

        assert_eq!(outcome, Outcome::Ignored { status: 500 });
        assert_eq!(page.mutation_count(), 0);
        assert!(page.navigations().is_empty());
        assert_eq!(page.location(), "/calculator.html");
    }

    #[tokio::test]
    async fn test_other_statuses_are_ignored() {
        for status in [204, 400, 403, 404, 408] {
            let transport = MockTransport::new();
            transport.respond_with(status, "");
            let client = client_with(&transport);
            let mut page = MockPage::with_operands("3", "4");

            let outcome = client.multiply(&mut page).await.unwrap();

            assert_eq!(outcome, Outcome::Ignored { status });
            assert_eq!(result_of(&page), "");
        }
    }

    #[tokio::test]
    async fn test_rapid_invocations_are_independent() {
        let transport =
            MockTransport::with_default(TransportResponse::new(200, r#"{"arg0": 12}"#));
        let client = client_with(&transport);
        let page = MockPage::with_operands("3", "4");
        let request = client.prepare(Method::Multiply, &page);

        let replies = futures::future::join_all((0..5).map(|_| client.send(&request))).await;

        assert_eq!(replies.len(), 5);
        assert!(replies.iter().all(Result::is_ok));
        assert_eq!(transport.request_count(), 5);
        assert!(transport
            .requests()
            .iter()
            .all(|r| r.body == request.to_json()));
    }

    #[tokio::test]
    async fn test_last_completion_wins() {
        let transport = MockTransport::new();
        transport
            .respond_with(200, r#"{"arg0": 6}"#)
            .respond_with(200, r#"{"arg0": 20}"#);
        let client = client_with(&transport);
        let mut page = MockPage::with_operands("2", "3");

        let first = client.prepare(Method::Multiply, &page);
        page.type_into(ids::NUMBER1, "4");
        page.type_into(ids::NUMBER2, "5");
        let second = client.prepare(Method::Multiply, &page);

        let (r1, r2) = futures::join!(client.send(&first), client.send(&second));
        let (r1, r2) = (r1.unwrap(), r2.unwrap());

        // The second reply arrives first; the first one resolves last
        client.complete(&r2, &mut page).unwrap();
        client.complete(&r1, &mut page).unwrap();

        assert_eq!(result_of(&page), "6");
        assert_eq!(page.mutation_count(), 2);
        let bodies: Vec<_> = transport.requests().into_iter().map(|r| r.body).collect();
        assert!(bodies[0].ends_with("[2,3]}"));
        assert!(bodies[1].ends_with("[4,5]}"));
    }

    #[tokio::test]
    async fn test_malformed_json_fails_loudly() {
        let transport = MockTransport::new();
        transport.respond_with(200, "<html>not json</html>");
        let client = client_with(&transport);
        let mut page = MockPage::with_operands("3", "4");

        let err = client.multiply(&mut page).await.unwrap_err();

        assert!(matches!(err, CalcError::MalformedJson(_)));
        assert_eq!(page.mutation_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_arg0_fails_loudly() {
        let transport = MockTransport::new();
        transport.respond_with(200, r#"{"arg1": 12}"#);
        let client = client_with(&transport);
        let mut page = MockPage::with_operands("3", "4");

        let err = client.multiply(&mut page).await.unwrap_err();

        assert!(matches!(err, CalcError::MissingField(f) if f == "arg0"));
        assert_eq!(result_of(&page), "");
    }

    #[tokio::test]
    async fn test_network_failure_fails_loudly() {
        let transport = MockTransport::new();
        transport.fail_with("connection refused");
        let client = client_with(&transport);
        let mut page = MockPage::with_operands("3", "4");

        let err = client.multiply(&mut page).await.unwrap_err();

        assert!(matches!(err, CalcError::Transport(_)));
        assert_eq!(page.mutation_count(), 0);
        assert!(page.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_divide() {
        let transport = MockTransport::new();
        transport.respond_with(200, r#"{"arg0": 5}"#);
        let client = client_with(&transport);
        let mut page = MockPage::with_operands("10", "2");

        let outcome = client.invoke(Method::Divide, &mut page).await.unwrap();

        assert!(outcome.is_rendered());
        assert!(transport.requests()[0].body.contains(r#""method":"Divide""#));
        assert_eq!(result_of(&page), "5");
    }

    #[tokio::test]
    async fn test_trigger_uses_configured_method_and_fields() {
        let transport = MockTransport::new();
        transport.respond_with(401, "");
        let mut config = ClientConfig::new()
            .with_method(Method::Divide)
            .with_interface("org.example.Calc")
            .with_endpoint("dbus/org.example.Calc/org/example/Calc")
            .with_login_page("/login.html");
        config.operand_fields = ["number2".to_string(), "number1".to_string()];
        let client = CalculatorClient::new(config, transport.clone());
        let mut page = MockPage::with_operands("7", "8");

        let outcome = client.trigger(&mut page).await.unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.path, "dbus/org.example.Calc/org/example/Calc");
        assert_eq!(
            request.body,
            r#"{"interface":"org.example.Calc","method":"Divide","arguments":[8,7]}"#
        );
        assert_eq!(page.location(), "/login.html");
        assert_eq!(
            outcome,
            Outcome::Redirected {
                location: "/login.html".to_string()
            }
        );
    }

    #[test]
    fn test_prepare_with_missing_fields() {
        let client = client_with(&MockTransport::new());
        let page = MockPage::new();
        let request = client.prepare(Method::Multiply, &page);
        assert_eq!(request.arguments, [Operand::NaN, Operand::NaN]);
    }

    #[test]
    fn test_complete_renders_float_result() {
        let client = client_with(&MockTransport::new());
        let mut page = MockPage::calculator();
        let outcome = client
            .complete(&TransportResponse::new(200, r#"{"arg0": 12.0}"#), &mut page)
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Rendered {
                value: "12".to_string()
            }
        );
    }

    #[test]
    fn test_accessors() {
        let transport = MockTransport::new();
        let client = client_with(&transport);
        assert_eq!(client.config().method, Method::Multiply);
        assert_eq!(client.transport().request_count(), 0);
    }

    #[test]
    fn test_connect_validates_config() {
        let err = CalculatorClient::connect(ClientConfig::new().with_base_url("bridge:8080"))
            .unwrap_err();
        assert!(matches!(err, CalcError::Config(_)));
    }

    #[tokio::test]
    async fn test_connect_end_to_end() {
        use httpmock::MockServer;

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path("/dbus/dbus.http.Calculator/dbus/http/Calculator")
                .json_body(serde_json::json!({
                    "interface": "dbus.http.Calculator",
                    "method": "Multiply",
                    "arguments": [6, 7]
                }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"arg0":42}"#);
        });

        let client =
            CalculatorClient::connect(ClientConfig::new().with_base_url(server.base_url()))
                .unwrap();
        let mut page = MockPage::with_operands("6", "7");
        let outcome = client.multiply(&mut page).await.unwrap();

        mock.assert();
        assert!(outcome.is_rendered());
        assert_eq!(result_of(&page), "42");
    }
}
