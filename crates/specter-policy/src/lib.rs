//! # specter-policy
//!
//! Policy evaluation for the Specter AI firewall proxy.
//!
//! The engine evaluates a single prompt against the loaded policy document
//! and returns a [`Decision`]:
//!
//! 1. **Deny terms** - case-insensitive substring scan; any hit denies
//! 2. **Jailbreak heuristics** - fixed regex patterns, only consulted when
//!    no deny term matched
//! 3. **Warn terms** - case-insensitive substring scan; hits flag but do
//!    not block
//!
//! Precedence is fixed: deny term > jailbreak heuristic > warn term >
//! allow. Evaluation never fails; enforcement is the gateway's job.

pub mod decision;
pub mod engine;
pub mod jailbreak;

pub use decision::{Decision, DecisionAction, DecisionMatches};
pub use engine::PolicyEngine;
pub use jailbreak::JailbreakDetector;

/// Literal tag recorded in the deny match list when a jailbreak
/// heuristic fires without any configured deny term.
pub const JAILBREAK_MATCH_TAG: &str = "jailbreak_pattern";
