//! # Contexts CLI — List registered protocol contexts.
//!
//! Builds the connector configuration (from flags, falling back to the
//! `EDC_PARTICIPANT_ID` / `EDC_DSP_CALLBACK_ADDRESS` environment), registers
//! every supported Dataspace Protocol version, and prints each context with
//! its resolved webhook address.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use fx_protocol::{
    register_dataspace_protocol, ConnectorConfig, ProfileContextRegistry,
    DEFAULT_DSP_CALLBACK_ADDRESS,
};

/// Contexts subcommand arguments.
#[derive(Args, Debug)]
pub struct ContextsArgs {
    /// This connector's participant id. Overrides `EDC_PARTICIPANT_ID`.
    #[arg(long)]
    pub participant_id: Option<String>,

    /// Base DSP callback address. Overrides `EDC_DSP_CALLBACK_ADDRESS`.
    #[arg(long)]
    pub callback_address: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// A registered context as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextSummary {
    /// Protocol identifier, e.g. `dataspace-protocol-http:2025-1`.
    pub protocol: String,
    /// Protocol version string.
    pub version: String,
    /// Resolved callback address for this version.
    pub webhook: String,
    /// This connector's participant id.
    pub participant_id: String,
    /// Credential property the counterparty identity is read from.
    pub identity_property: String,
}

/// Resolve the connector configuration from flags and environment.
pub fn resolve_config(args: &ContextsArgs) -> Result<ConnectorConfig> {
    let config = match (&args.participant_id, &args.callback_address) {
        (Some(id), callback) => ConnectorConfig::new(
            id,
            callback.as_deref().unwrap_or(DEFAULT_DSP_CALLBACK_ADDRESS),
        )?,
        (None, None) => ConnectorConfig::from_env()?,
        (None, Some(callback)) => {
            let env = ConnectorConfig::from_env()?;
            ConnectorConfig::new(env.participant_id.as_str(), callback)?
        }
    };
    Ok(config)
}

/// Register every protocol version for `config` and summarize the contexts.
pub fn describe_contexts(config: &ConnectorConfig) -> Result<Vec<ContextSummary>> {
    let registry = ProfileContextRegistry::new();
    register_dataspace_protocol(&registry, &config.base_webhook(), &config.participant_id)
        .context("failed to register protocol contexts")?;

    Ok(registry
        .list()
        .into_iter()
        .map(|ctx| ContextSummary {
            webhook: ctx.webhook.get().to_string(),
            participant_id: ctx.participant_id.to_string(),
            identity_property: ctx.id_extraction.identity_property().to_string(),
            protocol: ctx.protocol,
            version: ctx.version,
        })
        .collect())
}

/// Execute the contexts subcommand.
pub fn run_contexts(args: &ContextsArgs) -> Result<u8> {
    let config = resolve_config(args)?;
    let summaries = describe_contexts(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(0);
    }

    println!("Participant: {}", config.participant_id);
    println!();
    for s in &summaries {
        println!("  {:<32} {:<8} {}", s.protocol, s.version, s.webhook);
    }
    println!();
    println!("Total: {} contexts", summaries.len());
    Ok(0)
}
