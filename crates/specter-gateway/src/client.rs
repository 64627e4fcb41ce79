//! The gateway client.

use std::path::Path;

use serde_json::{json, Value};

use specter_audit::{AuditEvent, AuditLogger};
use specter_core::AuditConfig;
use specter_policy::PolicyEngine;

use crate::backend::Backend;
use crate::error::GatewayError;

/// Wraps a backend and enforces the firewall policy on every call.
pub struct GatewayClient<B: Backend> {
    backend: B,
    engine: PolicyEngine,
    logger: AuditLogger,
    strict: bool,
}

impl<B: Backend> GatewayClient<B> {
    /// Build a client from a policy document path and audit settings.
    ///
    /// Fails if the policy document is missing or malformed, or if the
    /// audit log destination cannot be prepared.
    pub fn new(
        backend: B,
        policy_path: impl AsRef<Path>,
        audit: AuditConfig,
        strict: bool,
    ) -> Result<Self, GatewayError> {
        let engine = PolicyEngine::from_file(policy_path)?;
        let logger = AuditLogger::new(audit)?;
        Ok(Self {
            backend,
            engine,
            logger,
            strict,
        })
    }

    /// Build a client from already-constructed parts.
    pub fn from_parts(backend: B, engine: PolicyEngine, logger: AuditLogger, strict: bool) -> Self {
        Self {
            backend,
            engine,
            logger,
            strict,
        }
    }

    /// Reload the policy document from its source path.
    pub fn reload_policy(&mut self) -> Result<(), GatewayError> {
        self.engine.reload()?;
        Ok(())
    }

    /// The policy engine backing this client.
    pub fn engine(&self) -> &PolicyEngine {
        &self.engine
    }

    /// Run one gated call: evaluate, audit, enforce-or-forward.
    ///
    /// The audit record is written before any enforcement action. A deny
    /// in strict mode fails with [`GatewayError::PermissionDenied`]; in
    /// non-strict mode it returns a `{"blocked": true, "reason": ...}`
    /// stub. Either way the backend is never invoked on a deny.
    pub async fn call(&self, prompt: &str, params: &Value) -> Result<Value, GatewayError> {
        let decision = self.engine.evaluate(prompt);

        // One record per call, allow and warn included, before enforcement.
        // A gatekeeper that cannot record a decision does not forward.
        self.logger
            .log(AuditEvent::from_decision(prompt, &decision))
            .await?;

        if decision.is_deny() {
            tracing::warn!(reason = %decision.reason, strict = self.strict, "Prompt denied");
            if self.strict {
                return Err(GatewayError::PermissionDenied {
                    reason: decision.reason,
                });
            }
            return Ok(json!({ "blocked": true, "reason": decision.reason }));
        }

        self.backend
            .invoke(prompt, params)
            .await
            .map_err(GatewayError::Backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use specter_audit::{hash_prompt, AuditError, AuditFilter, AuditStorage, FileStorage};
    use specter_core::PolicyConfig;
    use specter_policy::DecisionAction;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Backend that counts invocations and echoes its params back.
    struct CountingBackend {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Backend for CountingBackend {
        async fn invoke(&self, prompt: &str, params: &Value) -> anyhow::Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "ok": true, "prompt_len": prompt.chars().count(), "params": params }))
        }
    }

    /// Storage whose writes always fail.
    struct FailingStorage;

    #[async_trait]
    impl AuditStorage for FailingStorage {
        async fn store(&self, _event: &AuditEvent) -> Result<(), AuditError> {
            Err(AuditError::Storage("disk full".to_string()))
        }

        async fn query(&self, _filter: &AuditFilter) -> Result<Vec<AuditEvent>, AuditError> {
            Ok(vec![])
        }
    }

    fn policy(yaml: &str) -> PolicyEngine {
        let config: PolicyConfig = serde_yaml::from_str(yaml).unwrap();
        PolicyEngine::with_policy(config)
    }

    fn client(
        yaml: &str,
        strict: bool,
    ) -> (GatewayClient<CountingBackend>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = CountingBackend {
            calls: calls.clone(),
        };
        let client =
            GatewayClient::from_parts(backend, policy(yaml), AuditLogger::disabled(), strict);
        (client, calls)
    }

    #[tokio::test]
    async fn test_strict_deny_is_permission_denied() {
        let (client, calls) = client("deny_terms: [internal_ip]", true);

        let err = client
            .call("our internal_ip is 10.0.0.1", &json!({}))
            .await
            .unwrap_err();

        match err {
            GatewayError::PermissionDenied { reason } => {
                assert_eq!(reason, "Matched deny terms: internal_ip");
            }
            other => panic!("expected PermissionDenied, got {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_strict_deny_returns_blocked_stub() {
        let (client, calls) = client("deny_terms: [internal_ip]", false);

        let response = client
            .call("our internal_ip is 10.0.0.1", &json!({}))
            .await
            .unwrap();

        assert_eq!(response["blocked"], json!(true));
        assert_eq!(response["reason"], json!("Matched deny terms: internal_ip"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_allow_forwards_unmodified_with_params() {
        let (client, calls) = client("block_jailbreak_like: false", true);

        let params = json!({ "temperature": 0.2, "max_tokens": 64 });
        let response = client.call("hello", &params).await.unwrap();

        assert_eq!(response["ok"], json!(true));
        assert_eq!(response["prompt_len"], json!(5));
        assert_eq!(response["params"], params);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_warn_still_forwards() {
        let (client, calls) = client("warn_terms: [password]", true);

        let response = client.call("what makes a strong password?", &json!({})).await;
        assert!(response.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_every_call_is_audited_with_hash_and_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = AuditLogger::with_storage(
            AuditConfig::default(),
            Arc::new(FileStorage::new(&path).unwrap()),
        );
        let calls = Arc::new(AtomicUsize::new(0));
        let client = GatewayClient::from_parts(
            CountingBackend {
                calls: calls.clone(),
            },
            policy("deny_terms: [internal_ip]"),
            logger,
            false,
        );

        let prompts = ["hello", "our internal_ip leaked", "world"];
        for prompt in prompts {
            client.call(prompt, &json!({})).await.unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let events: Vec<AuditEvent> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(events.len(), prompts.len());
        for (event, prompt) in events.iter().zip(prompts) {
            assert_eq!(event.prompt_hash, hash_prompt(prompt));
            assert_eq!(event.prompt_length, prompt.chars().count() as u64);
            assert!(!content.contains(prompt), "raw prompt leaked into the audit log");
        }
        assert_eq!(events[1].action, DecisionAction::Deny);
    }

    #[tokio::test]
    async fn test_audit_write_failure_fails_the_call() {
        let logger =
            AuditLogger::with_storage(AuditConfig::default(), Arc::new(FailingStorage));
        let calls = Arc::new(AtomicUsize::new(0));
        let client = GatewayClient::from_parts(
            CountingBackend {
                calls: calls.clone(),
            },
            policy("{}"),
            logger,
            true,
        );

        let err = client.call("hello there friend", &json!({})).await.unwrap_err();
        assert!(matches!(err, GatewayError::Audit(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backend_error_propagates_untouched() {
        struct BrokenBackend;

        #[async_trait]
        impl Backend for BrokenBackend {
            async fn invoke(&self, _prompt: &str, _params: &Value) -> anyhow::Result<Value> {
                anyhow::bail!("upstream timeout")
            }
        }

        let client = GatewayClient::from_parts(
            BrokenBackend,
            policy("{}"),
            AuditLogger::disabled(),
            true,
        );

        let err = client.call("hello friend", &json!({})).await.unwrap_err();
        match err {
            GatewayError::Backend(e) => assert_eq!(e.to_string(), "upstream timeout"),
            other => panic!("expected Backend, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reload_changes_outcome_for_same_prompt() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "deny_terms: []").unwrap();
        file.flush().unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let mut client = GatewayClient::from_parts(
            CountingBackend {
                calls: calls.clone(),
            },
            PolicyEngine::from_file(file.path()).unwrap(),
            AuditLogger::disabled(),
            false,
        );

        let response = client.call("our internal_ip", &json!({})).await.unwrap();
        assert_eq!(response["ok"], json!(true));

        std::fs::write(file.path(), "deny_terms: [internal_ip]").unwrap();
        client.reload_policy().unwrap();

        let response = client.call("our internal_ip", &json!({})).await.unwrap();
        assert_eq!(response["blocked"], json!(true));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
