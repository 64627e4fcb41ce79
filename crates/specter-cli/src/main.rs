use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use specter_audit::{AuditFilter, AuditLogger};
use specter_core::AuditConfig;
use specter_gateway::{EchoBackend, GatewayClient, GatewayError};
use specter_policy::{DecisionAction, PolicyEngine};

/// Starter policy written by `specter init`.
const STARTER_POLICY: &str = "\
mode: enforce
deny_terms:
  - internal_ip
  - api_key
warn_terms:
  - password
block_jailbreak_like: true
";

#[derive(Parser, Debug)]
#[command(name = "specter", version, about = "Specter AI firewall proxy CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a starter policy.yaml
    Init {
        /// Where to write the policy document
        #[arg(long, default_value = "policy.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Evaluate a prompt against the policy and print the decision as JSON
    Check {
        prompt: String,

        /// Policy document path
        #[arg(long, default_value = "policy.yaml")]
        policy: PathBuf,
    },

    /// Run the full gated call path against the built-in echo backend
    Call {
        prompt: String,

        /// Policy document path
        #[arg(long, default_value = "policy.yaml")]
        policy: PathBuf,

        /// Audit log path (defaults to ~/.specter/logs/events.jsonl)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Deny raises an error instead of returning a blocked stub
        #[arg(long, default_value_t = false)]
        strict: bool,
    },

    /// Print recent audit events, newest first
    Tail {
        /// Audit log path (defaults to ~/.specter/logs/events.jsonl)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Maximum number of events
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Only events with this action (allow | warn | deny)
        #[arg(long)]
        action: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Init { path, force } => run_init(&path, force)?,
        Command::Check { prompt, policy } => run_check(&prompt, &policy)?,
        Command::Call {
            prompt,
            policy,
            log,
            strict,
        } => run_call(&prompt, &policy, log, strict).await?,
        Command::Tail { log, limit, action } => run_tail(log, limit, action.as_deref()).await?,
    }

    Ok(())
}

fn run_init(path: &PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::write(path, STARTER_POLICY)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote starter policy to {}", path.display());
    Ok(())
}

fn run_check(prompt: &str, policy: &PathBuf) -> anyhow::Result<()> {
    let engine = PolicyEngine::from_file(policy)?;
    let decision = engine.evaluate(prompt);
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

async fn run_call(
    prompt: &str,
    policy: &PathBuf,
    log: Option<PathBuf>,
    strict: bool,
) -> anyhow::Result<()> {
    let mut audit = AuditConfig::default();
    if let Some(path) = log {
        audit.path = path;
    }

    let client = GatewayClient::new(EchoBackend, policy, audit, strict)?;

    match client.call(prompt, &serde_json::json!({})).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(GatewayError::PermissionDenied { reason }) => {
            anyhow::bail!("blocked by firewall: {}", reason)
        }
        Err(err) => Err(err.into()),
    }
}

async fn run_tail(log: Option<PathBuf>, limit: usize, action: Option<&str>) -> anyhow::Result<()> {
    let mut audit = AuditConfig::default();
    if let Some(path) = log {
        audit.path = path;
    }

    let filter = AuditFilter {
        action: action.map(parse_action).transpose()?,
        limit: Some(limit),
        ..Default::default()
    };

    let logger = AuditLogger::new(audit)?;
    for event in logger.query(filter).await? {
        println!("{}", event.to_log_line());
    }
    Ok(())
}

fn parse_action(s: &str) -> anyhow::Result<DecisionAction> {
    match s {
        "allow" => Ok(DecisionAction::Allow),
        "warn" => Ok(DecisionAction::Warn),
        "deny" => Ok(DecisionAction::Deny),
        other => anyhow::bail!("unknown action '{}' (expected allow, warn or deny)", other),
    }
}
