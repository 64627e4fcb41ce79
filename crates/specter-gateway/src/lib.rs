//! # specter-gateway
//!
//! The gateway client: one call path in front of a generative-text
//! backend.
//!
//! `call(prompt, params)` runs evaluate -> audit -> enforce-or-forward:
//!
//! 1. The policy engine evaluates the prompt
//! 2. An audit event is written unconditionally, before any enforcement
//! 3. A deny either fails with [`GatewayError::PermissionDenied`]
//!    (strict) or returns a `{"blocked": true, ...}` stub (non-strict);
//!    the backend is never invoked either way
//! 4. Allow and warn forward to the backend and return its response
//!    unmodified
//!
//! No retry, no timeout: backend errors propagate to the caller
//! untouched.

pub mod backend;
pub mod client;
pub mod error;

pub use backend::{Backend, EchoBackend};
pub use client::GatewayClient;
pub use error::GatewayError;
