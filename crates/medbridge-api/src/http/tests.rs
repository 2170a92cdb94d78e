//! Endpoint tests driving the full router with a canned AI provider.
//!
//! Each test gets a fresh temp-dir database and media directory, so the
//! suite runs without a network, an API key, or any shared state.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use tower::ServiceExt;

use medbridge_core::ai::service::TranslationService;
use medbridge_core::conversation::repository::ConversationRepository;
use medbridge_core::testing::FixedProviderFactory;
use medbridge_infra::sqlite::conversation::SqliteConversationRepository;
use medbridge_infra::sqlite::pool::Database;
use medbridge_infra::storage::filesystem::LocalAudioStore;

use crate::http::router::build_router;
use crate::state::AppState;

const BOUNDARY: &str = "x-medbridge-test-boundary";

async fn test_state(factory: FixedProviderFactory) -> AppState {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_path_buf();
    // Leak tempdir so it lives for the test
    std::mem::forget(dir);

    let db = Database::open(&data_dir).await.unwrap();
    let media_dir = data_dir.join("media");
    AppState {
        conversation_repo: Arc::new(SqliteConversationRepository::new(db)),
        translation: Arc::new(TranslationService::new(Box::new(factory))),
        audio_store: Arc::new(LocalAudioStore::new(media_dir.clone())),
        conversation_key: "default".to_string(),
        media_dir,
    }
}

async fn test_app(factory: FixedProviderFactory) -> (Router, AppState) {
    let state = test_state(factory).await;
    (build_router(state.clone()), state)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Build a multipart body. Each part is (name, optional filename, value);
/// parts with a filename get an `audio/webm` content type.
fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
    let mut body = String::new();
    for (name, filename, value) in parts {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        match filename {
            Some(filename) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
                ));
                body.push_str("Content-Type: audio/webm\r\n\r\n");
            }
            None => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                ));
            }
        }
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

fn post_multipart(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn message_count(state: &AppState) -> u32 {
    let conversation = state
        .conversation_repo
        .get_or_create(&state.conversation_key)
        .await
        .unwrap();
    state
        .conversation_repo
        .count_messages(conversation.id)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_send_message_translates_and_stores() {
    let (app, state) = test_app(FixedProviderFactory::replying("Me duele la cabeza")).await;

    let response = app
        .oneshot(post_json(
            "/api/messages/send",
            json!({
                "text": "I have a headache",
                "sender": "Patient",
                "targetLanguage": "Spanish",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["text"], "I have a headache");
    assert_eq!(body["sender"], "Patient");
    assert_eq!(body["translatedText"], "Me duele la cabeza");
    assert_eq!(body["hasAudio"], false);
    assert!(body["audioUrl"].is_null());

    let timestamp = body["timestamp"].as_str().unwrap();
    assert_eq!(timestamp.len(), 8, "expected clock time, got {timestamp:?}");
    assert!(timestamp.ends_with("AM") || timestamp.ends_with("PM"));

    assert_eq!(message_count(&state).await, 1);
}

#[tokio::test]
async fn test_send_message_trims_input_text() {
    let (app, _state) = test_app(FixedProviderFactory::replying("Hola")).await;

    let response = app
        .oneshot(post_json(
            "/api/messages/send",
            json!({ "text": "  Hello  ", "sender": "Doctor" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["text"], "Hello");
}

#[tokio::test]
async fn test_send_message_rejects_empty_text() {
    let (app, state) = test_app(FixedProviderFactory::replying("unused")).await;

    for text in ["", "   \t"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/messages/send",
                json!({ "text": text, "sender": "Doctor" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "Text is required" }));
    }

    assert_eq!(message_count(&state).await, 0);
}

#[tokio::test]
async fn test_send_message_rejects_unknown_sender() {
    let (app, state) = test_app(FixedProviderFactory::replying("unused")).await;

    // Lowercase is rejected: wire values are exact.
    let response = app
        .oneshot(post_json(
            "/api/messages/send",
            json!({ "text": "hello", "sender": "doctor" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "Sender must be \"Doctor\" or \"Patient\"" }));
    assert_eq!(message_count(&state).await, 0);
}

#[tokio::test]
async fn test_send_message_rejects_malformed_json() {
    let (app, _state) = test_app(FixedProviderFactory::replying("unused")).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/messages/send")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "Invalid JSON" }));
}

#[tokio::test]
async fn test_send_message_provider_failure_stores_nothing() {
    let (app, state) = test_app(FixedProviderFactory::failing("connection reset")).await;

    let response = app
        .oneshot(post_json(
            "/api/messages/send",
            json!({ "text": "hello", "sender": "Doctor" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Translation failed");
    assert!(
        body["message"].as_str().unwrap().contains("connection reset"),
        "unexpected message: {}",
        body["message"]
    );

    assert_eq!(message_count(&state).await, 0);
}

#[tokio::test]
async fn test_send_message_reports_missing_api_key() {
    let (app, _state) = test_app(FixedProviderFactory::missing_key("OPENAI_API_KEY")).await;

    let response = app
        .oneshot(post_json(
            "/api/messages/send",
            json!({ "text": "hello", "sender": "Doctor" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Translation failed");
    assert_eq!(body["message"], "OPENAI_API_KEY is not configured");
}

#[tokio::test]
async fn test_messages_share_one_conversation() {
    let (app, state) = test_app(FixedProviderFactory::replying("ok")).await;

    for (text, sender) in [("How are you?", "Doctor"), ("Fine, thanks", "Patient")] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/messages/send",
                json!({ "text": text, "sender": sender }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let conversation = state
        .conversation_repo
        .get_or_create("default")
        .await
        .unwrap();
    let messages = state
        .conversation_repo
        .list_messages(conversation.id)
        .await
        .unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m.conversation_id == conversation.id));
}

#[tokio::test]
async fn test_search_empty_query_returns_empty_results() {
    let (app, _state) = test_app(FixedProviderFactory::replying("unused")).await;

    for uri in ["/api/messages/search", "/api/messages/search?q=%20%20"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "results": [] }));
    }
}

#[tokio::test]
async fn test_search_matches_original_and_translated_text() {
    let (app, _state) = test_app(FixedProviderFactory::replying("Tengo fiebre")).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/messages/send",
            json!({ "text": "I have a FEVER", "sender": "Patient" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Case-insensitive match on the original text.
    let response = app
        .clone()
        .oneshot(get("/api/messages/search?q=fever"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["text"], "I have a FEVER");

    // The translated text is searchable too.
    let response = app
        .clone()
        .oneshot(get("/api/messages/search?q=fiebre"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 1);

    let response = app
        .oneshot(get("/api/messages/search?q=toothache"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body, json!({ "results": [] }));
}

#[tokio::test]
async fn test_summary_requires_messages() {
    let (app, _state) = test_app(FixedProviderFactory::replying("unused")).await;

    for body in [json!({ "messages": [] }), json!({})] {
        let response = app
            .clone()
            .oneshot(post_json("/api/summary/generate", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "Messages array is required" }));
    }
}

#[tokio::test]
async fn test_summary_returns_provider_output() {
    let (app, _state) =
        test_app(FixedProviderFactory::replying("Chief Complaint: headache")).await;

    let response = app
        .oneshot(post_json(
            "/api/summary/generate",
            json!({
                "messages": [
                    { "sender": "Patient", "text": "My head hurts" },
                    { "sender": "Doctor", "text": "Since when?" },
                ],
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "summary": "Chief Complaint: headache" }));
}

#[tokio::test]
async fn test_summary_provider_failure_is_labelled() {
    let (app, _state) = test_app(FixedProviderFactory::failing("model overloaded")).await;

    let response = app
        .oneshot(post_json(
            "/api/summary/generate",
            json!({ "messages": [{ "sender": "Doctor", "text": "hi" }] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Summary generation failed");
}

#[tokio::test]
async fn test_upload_audio_stores_blob_and_serves_it() {
    let (app, state) = test_app(FixedProviderFactory::replying("Mensaje de audio")).await;

    let body = multipart_body(&[
        ("audio", Some("clip.webm"), "fake webm bytes"),
        ("sender", None, "Patient"),
        ("targetLanguage", None, "Spanish"),
    ]);
    let response = app
        .clone()
        .oneshot(post_multipart("/api/audio/upload", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["text"], "Audio message");
    assert_eq!(body["translatedText"], "Mensaje de audio");
    assert_eq!(body["hasAudio"], true);

    let audio_url = body["audioUrl"].as_str().unwrap();
    assert!(audio_url.starts_with("/media/audio/"), "got {audio_url}");
    assert!(audio_url.ends_with(".webm"), "got {audio_url}");

    // The blob landed on disk under the media dir.
    let id = body["id"].as_str().unwrap();
    let stored = state.media_dir.join("audio").join(format!("{id}.webm"));
    let bytes = tokio::fs::read(&stored).await.unwrap();
    assert_eq!(bytes, b"fake webm bytes");

    // And the router serves it back.
    let response = app.oneshot(get(audio_url)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let served = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&served[..], b"fake webm bytes");
}

#[tokio::test]
async fn test_upload_audio_requires_audio_field() {
    let (app, state) = test_app(FixedProviderFactory::replying("unused")).await;

    // Missing audio wins over the bad sender: it is checked first.
    let body = multipart_body(&[("sender", None, "nurse")]);
    let response = app
        .oneshot(post_multipart("/api/audio/upload", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "Audio file is required" }));
    assert_eq!(message_count(&state).await, 0);
}

#[tokio::test]
async fn test_upload_audio_rejects_unknown_sender() {
    let (app, _state) = test_app(FixedProviderFactory::replying("unused")).await;

    let body = multipart_body(&[
        ("audio", Some("clip.webm"), "fake webm bytes"),
        ("sender", None, "nurse"),
    ]);
    let response = app
        .oneshot(post_multipart("/api/audio/upload", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "Sender must be \"Doctor\" or \"Patient\"" }));
}

#[tokio::test]
async fn test_upload_audio_without_filename_defaults_to_webm() {
    let (app, _state) = test_app(FixedProviderFactory::replying("ok")).await;

    // A part with a filename is required for multipart file semantics, but
    // the extension can be junk; the store falls back to webm.
    let body = multipart_body(&[
        ("audio", Some("blob"), "bytes"),
        ("sender", None, "Doctor"),
    ]);
    let response = app
        .oneshot(post_multipart("/api/audio/upload", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["audioUrl"].as_str().unwrap().ends_with(".webm"));
}

#[tokio::test]
async fn test_api_info_lists_endpoints() {
    let (app, _state) = test_app(FixedProviderFactory::replying("unused")).await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Doctor-Patient Translation Assistant API");
    assert_eq!(body["endpoints"]["send_message"], "/api/messages/send");
    assert_eq!(body["endpoints"]["generate_summary"], "/api/summary/generate");
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = test_app(FixedProviderFactory::replying("unused")).await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _state) = test_app(FixedProviderFactory::replying("unused")).await;

    let response = app.oneshot(get("/api/messages/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
