use ai_arena::{
    config::ArenaConfig,
    server::{app, handlers::AppState},
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt; // for `oneshot`

mod common;
use common::*;

fn create_test_app(mock: &MockLlmClient) -> (Router, AppState) {
    let state = AppState::new(create_test_arena(mock), ArenaConfig::default());
    (app(state.clone()), state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = create_test_app(&MockLlmClient::new());
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_catalog_endpoints() {
    let mock = MockLlmClient::new();

    let (app, _) = create_test_app(&mock);
    let (status, body) = send(app, get("/api/models")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["models"].as_array().unwrap().len(), 3);
    assert_eq!(body["models"][0]["id"], "gpt-4");

    let (app, _) = create_test_app(&mock);
    let (status, body) = send(app, get("/api/templates")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["templates"].as_array().unwrap().len(), 5);
    assert_eq!(body["templates"][0]["id"], "summarize");
}

#[tokio::test]
async fn test_session_lifecycle() {
    let (app, state) = create_test_app(&MockLlmClient::new());

    let (status, body) = send(app, post_json("/api/sessions", json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["messages"][0]["role"], "assistant");
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app_for(&state),
        get(&format!("/api/sessions/{session_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], session_id.as_str());
    assert!(body["pending"].is_null());

    let (status, body) = send(app_for(&state), get("/api/sessions/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("unknown"));
}

fn app_for(state: &AppState) -> Router {
    app(state.clone())
}

#[tokio::test]
async fn test_generate_missing_prompt_is_unprocessable() {
    let (app, _) = create_test_app(&MockLlmClient::new());
    let response = app
        .oneshot(post_json("/api/generate", json!({ "session_id": "s1" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_generate_empty_prompt_is_bad_request() {
    let mock = MockLlmClient::new();
    let (app, _) = create_test_app(&mock);

    let (status, body) = send(app, post_json("/api/generate", json!({ "prompt": "  " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Prompt cannot be empty.");
    assert_eq!(body["title"], "Error generating response");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_generate_component_end_to_end() {
    let mock = MockLlmClient::new()
        .reply(router_reply("authentication"))
        .reply(component_reply("const Login = () => <form />;"))
        .reply(formatter_reply("```tsx\nconst Login = () => <form />;\n```"));
    let (app, state) = create_test_app(&mock);

    let (status, body) = send(
        app,
        post_json(
            "/api/generate",
            json!({
                "session_id": "browser-tab-1",
                "prompt": "Create a login form",
                "params": { "model": "gpt-4", "temperature": 0.7, "max_tokens": 2048 }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], "browser-tab-1");
    assert_eq!(body["kind"], "component");
    assert_eq!(body["category"], "authentication");
    assert_eq!(body["output"], "const Login = () => <form />;");
    assert_eq!(body["degraded"], false);
    assert_eq!(body["transcript"].as_array().unwrap().len(), 3);

    let transcript = state.sessions.get("browser-tab-1").unwrap();
    assert_eq!(transcript.len(), 3);
}

#[tokio::test]
async fn test_generate_backend_failure_is_bad_gateway() {
    let mock = MockLlmClient::new()
        .reply(router_reply("form"))
        .fail("model overloaded");
    let (app, state) = create_test_app(&mock);
    let (session_id, _) = state.sessions.create().unwrap();

    let (status, body) = send(
        app,
        post_json(
            "/api/generate",
            json!({ "session_id": session_id, "prompt": "A contact form" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "model overloaded");
    // The user turn was rolled back
    let transcript = state.sessions.get(&session_id).unwrap();
    assert_eq!(transcript.len(), 1);
    assert!(transcript.pending().is_none());
}

#[tokio::test]
async fn test_generate_ui_uses_ui_title_on_failure() {
    let mock = MockLlmClient::new().fail("boom");
    let (app, _) = create_test_app(&mock);

    let (status, body) = send(
        app,
        post_json(
            "/api/generate",
            json!({ "prompt": "a toggle", "kind": "ui-element" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["title"], "Error generating UI");
}

#[tokio::test]
async fn test_generate_busy_session_is_conflict() {
    let mock = MockLlmClient::new();
    let (app, state) = create_test_app(&mock);
    let _in_flight = state.sessions.stage("s1", "in flight").unwrap();

    let (status, _) = send(
        app,
        post_json(
            "/api/generate",
            json!({ "session_id": "s1", "prompt": "another one" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_generate_without_session_is_not_stored() {
    let mock = MockLlmClient::new()
        .reply(text_reply("Short-lived."))
        .fail("backend down");
    let (app, state) = create_test_app(&mock);

    let (status, body) = send(
        app,
        post_json(
            "/api/generate",
            json!({ "prompt": "Define ephemeral", "kind": "text" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["output"], "Short-lived.");
    assert!(body.get("session_id").is_none());
    assert!(body.get("transcript").is_none());

    let (status, _) = send(
        app_for(&state),
        post_json(
            "/api/generate",
            json!({ "prompt": "Define ephemeral", "kind": "text" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(state.sessions.is_empty().unwrap());
}

#[tokio::test]
async fn test_generate_applies_template_prefix() {
    let mock = MockLlmClient::new().reply(text_reply("Lasting a very short time."));
    let (app, state) = create_test_app(&mock);
    let (session_id, _) = state.sessions.create().unwrap();

    let (status, body) = send(
        app,
        post_json(
            "/api/generate",
            json!({
                "session_id": session_id,
                "template_id": "define-word",
                "prompt": "ephemeral",
                "kind": "text"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        mock.prompt_of(0)
            .contains("What is the meaning of the word: \n\nephemeral")
    );
    assert_eq!(
        body["transcript"][1]["content"],
        "What is the meaning of the word: \n\nephemeral"
    );
}

#[tokio::test]
async fn test_generate_rejects_unknown_template_and_model() {
    let mock = MockLlmClient::new();

    let (app, _) = create_test_app(&mock);
    let (status, body) = send(
        app,
        post_json(
            "/api/generate",
            json!({ "template_id": "haiku", "prompt": "autumn" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown template: haiku");

    let (app, state) = create_test_app(&mock);
    let (status, body) = send(
        app,
        post_json(
            "/api/generate",
            json!({
                "session_id": "s1",
                "prompt": "A login form",
                "params": { "model": "gpt-9" }
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown model: gpt-9");

    assert_eq!(mock.call_count(), 0);
    assert!(state.sessions.is_empty().unwrap());
}

#[tokio::test]
async fn test_description_endpoint() {
    let mock = MockLlmClient::new().reply(description_reply("Hand-thrown and glazed."));

    let (app, _) = create_test_app(&mock);
    let (status, body) = send(
        app,
        post_json(
            "/api/descriptions",
            json!({ "product_name": "", "keywords": "" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Missing Fields");

    let (app, _) = create_test_app(&mock);
    let (status, body) = send(
        app,
        post_json(
            "/api/descriptions",
            json!({ "product_name": "Mug", "keywords": "ceramic" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "product-description");
    assert_eq!(body["output"], "Hand-thrown and glazed.");
    assert!(body.get("category").is_none());
}

#[tokio::test]
async fn test_recommendation_endpoint() {
    let mock = MockLlmClient::new().reply(recommendation_reply("Try gpt-4 at 0.3."));

    let (app, _) = create_test_app(&mock);
    let (status, body) = send(app, post_json("/api/recommendations", json!({ "prompt": "" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["recommendations"],
        "Please enter a prompt to get recommendations."
    );
    assert_eq!(mock.call_count(), 0);

    let (app, state) = create_test_app(&mock);
    let (status, body) = send(
        app,
        post_json("/api/recommendations", json!({ "prompt": "Write a haiku" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendations"], "Try gpt-4 at 0.3.");
    assert!(state.sessions.is_empty().unwrap());
}

#[tokio::test]
async fn test_format_endpoint() {
    let mock = MockLlmClient::new().reply(formatter_reply(
        "Here is code:\n```jsx\nconst X=()=>null;\n```\nDone.",
    ));
    let (app, _) = create_test_app(&mock);

    let (status, body) = send(
        app,
        post_json(
            "/api/format",
            json!({ "raw_response": "messy output", "target": "JSX only" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["formatted"], "const X=()=>null;");
}
