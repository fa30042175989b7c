#![allow(dead_code)]

use std::time::Duration;

use inventory_finder::ai::common::ChatClient;
use inventory_finder::ai::prompts::{
    INTRO_SYSTEM_PROMPT, LISTINGS_SYSTEM_PROMPT, QUALITY_SYSTEM_PROMPT,
};
use inventory_finder::places::PlacesClient;
use inventory_finder::utils::RetryPolicy;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CHAT_PATH: &str = "/v1/chat/completions";
pub const PLACES_PATH: &str = "/maps/api/place/textsearch/json";

/// A chat completion envelope whose message content is `content`.
pub fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

pub fn chat_client(server: &MockServer) -> ChatClient {
    let url = format!("{}{CHAT_PATH}", server.uri());
    ChatClient::new(
        "test-key",
        "gpt-test",
        Some(&url),
        Duration::from_secs(5),
        RetryPolicy::immediate(1),
    )
    .unwrap()
}

pub fn places_client(server: &MockServer) -> PlacesClient {
    let url = format!("{}{PLACES_PATH}", server.uri());
    PlacesClient::new(
        "places-key",
        Some(&url),
        Duration::from_secs(5),
        RetryPolicy::immediate(1),
    )
    .unwrap()
}

fn chat_mock(system_prompt: &str, reply: ResponseTemplate) -> Mock {
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_string_contains(system_prompt))
        .respond_with(reply)
}

pub async fn mount_listings(server: &MockServer, reply: ResponseTemplate) {
    chat_mock(LISTINGS_SYSTEM_PROMPT, reply).mount(server).await;
}

pub async fn mount_quality(server: &MockServer, reply: ResponseTemplate) {
    chat_mock(QUALITY_SYSTEM_PROMPT, reply).mount(server).await;
}

pub async fn mount_intro(server: &MockServer, reply: ResponseTemplate) {
    chat_mock(INTRO_SYSTEM_PROMPT, reply).mount(server).await;
}

/// Intro mock that must be hit exactly `times` times.
pub async fn mount_intro_expecting(server: &MockServer, reply: ResponseTemplate, times: u64) {
    chat_mock(INTRO_SYSTEM_PROMPT, reply)
        .expect(times)
        .mount(server)
        .await;
}
