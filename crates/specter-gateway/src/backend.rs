//! The backend capability boundary.

use async_trait::async_trait;
use serde_json::{json, Value};

/// A generative-text backend.
///
/// Concrete integrations (an LLM API client, a local model) implement
/// this trait; the gateway only ever talks to a backend through it.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send a prompt plus caller-supplied parameters and return the
    /// backend's response.
    async fn invoke(&self, prompt: &str, params: &Value) -> anyhow::Result<Value>;
}

/// Stand-in backend that echoes a prompt prefix.
///
/// Useful for wiring checks and the CLI demo; replace with a real
/// integration in deployment.
pub struct EchoBackend;

#[async_trait]
impl Backend for EchoBackend {
    async fn invoke(&self, prompt: &str, _params: &Value) -> anyhow::Result<Value> {
        tracing::info!(prompt_length = prompt.chars().count(), "Prompt accepted by backend");
        let echo: String = prompt.chars().take(80).collect();
        Ok(json!({ "ok": true, "echo": echo }))
    }
}
