use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use assistant_relay::config::AssistantConfig;
use assistant_relay::server::{router, AppState};
use assistant_relay::{ChatRelay, OpenAiAssistantClient, PollPolicy};
use axum::Router;
use tempfile::TempDir;

pub const API_KEY: &str = "sk-test";
pub const ASSISTANT_ID: &str = "asst_test";

#[allow(dead_code)]
pub fn assistant_config(api_base: &str) -> AssistantConfig {
    AssistantConfig {
        api_key: API_KEY.to_string(),
        assistant_id: ASSISTANT_ID.to_string(),
        api_base: api_base.to_string(),
        request_timeout_seconds: 5,
    }
}

#[allow(dead_code)]
pub fn client_for(api_base: &str) -> OpenAiAssistantClient {
    OpenAiAssistantClient::new(assistant_config(api_base)).expect("failed to build client")
}

/// Router wired to an assistants API at `api_base`, polling every `interval_ms`
#[allow(dead_code)]
pub fn relay_app(api_base: &str, interval_ms: u64, max_wait_ms: u64) -> Router {
    let relay = ChatRelay::new(
        Arc::new(client_for(api_base)),
        ASSISTANT_ID,
        PollPolicy {
            interval: Duration::from_millis(interval_ms),
            max_wait: Duration::from_millis(max_wait_ms),
        },
    );
    router(AppState::new(relay))
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
