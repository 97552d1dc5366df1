//! Unit tests for the OpenAI-compatible chat backend.

use std::time::Duration;

use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{ChatContent, OpenAiChatBackend, OpenAiConfig, parse_content_value};
use crate::ai::backend::{ChatBackend, ChatRequest};
use crate::error::EnhanceError;

struct ServerFixture {
    runtime: Runtime,
    server: MockServer,
}

impl ServerFixture {
    fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    fn backend(&self, api_key: Option<&str>, timeout: Duration) -> OpenAiChatBackend {
        OpenAiChatBackend::new(OpenAiConfig::new(
            format!("{}/v1", self.server.uri()),
            api_key.map(ToOwned::to_owned),
            timeout,
        ))
    }
}

#[fixture]
fn server_fixture() -> ServerFixture {
    let runtime = Runtime::new().expect("runtime should start");
    let server = runtime.block_on(MockServer::start());
    ServerFixture { runtime, server }
}

fn sample_request() -> ChatRequest {
    ChatRequest::system_and_user("gpt-4o-mini", "rules", "data")
}

#[test]
fn parse_content_value_supports_string_and_array() {
    let as_string: ChatContent =
        serde_json::from_value(serde_json::json!("hello")).expect("string content should decode");
    let as_array: ChatContent =
        serde_json::from_value(serde_json::json!([{"text":"first"}, {"text":"second"}]))
            .expect("array content should decode");

    assert_eq!(parse_content_value(&as_string), Some("hello"));
    assert_eq!(parse_content_value(&as_array), Some("first"));
}

#[rstest]
fn chat_returns_first_choice_text(server_fixture: ServerFixture) {
    server_fixture.mount(
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "rules"},
                    {"role": "user", "content": "data"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "rewritten"}}]
            }))),
    );

    let backend = server_fixture.backend(Some("sk-test"), Duration::from_secs(5));
    let text = backend
        .chat(&sample_request())
        .expect("chat should succeed");

    assert_eq!(text, "rewritten");
}

#[rstest]
fn chat_maps_non_success_status_to_external_service(server_fixture: ServerFixture) {
    server_fixture.mount(
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model exploded")),
    );

    let backend = server_fixture.backend(None, Duration::from_secs(5));
    let error = backend
        .chat(&sample_request())
        .expect_err("500 should be rejected");

    let EnhanceError::ExternalService { message } = error else {
        panic!("expected ExternalService, got {error:?}");
    };
    assert!(message.contains("500"), "message should carry status: {message}");
    assert!(message.contains("model exploded"));
}

#[rstest]
fn chat_rejects_response_without_choices(server_fixture: ServerFixture) {
    server_fixture.mount(
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": []
            }))),
    );

    let backend = server_fixture.backend(None, Duration::from_secs(5));
    let result = backend.chat(&sample_request());

    assert!(
        matches!(result, Err(EnhanceError::ExternalService { .. })),
        "missing content should map to ExternalService, got {result:?}"
    );
}

#[rstest]
fn chat_maps_timeout_to_external_service(server_fixture: ServerFixture) {
    server_fixture.mount(
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(2))
                    .set_body_json(serde_json::json!({
                        "choices": [{"message": {"content": "late"}}]
                    })),
            ),
    );

    let backend = server_fixture.backend(None, Duration::from_millis(200));
    let error = backend
        .chat(&sample_request())
        .expect_err("slow response should time out");

    let EnhanceError::ExternalService { message } = error else {
        panic!("expected ExternalService, got {error:?}");
    };
    assert!(message.contains("timed out"), "unexpected message: {message}");
}
