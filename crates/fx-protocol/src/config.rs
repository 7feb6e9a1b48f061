//! Connector configuration.
//!
//! Identifies this node and where counterparties reach its protocol
//! endpoints. Loaded from environment variables or built explicitly.

use fx_core::{ParticipantId, ValidationError};
use url::Url;

use crate::webhook::WebhookAddress;

/// Default base DSP callback address.
pub const DEFAULT_DSP_CALLBACK_ADDRESS: &str = "http://localhost:8282/api/v1/dsp";

/// Configuration of the local connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    /// This node's participant identifier.
    pub participant_id: ParticipantId,
    /// Base DSP callback address published to counterparties.
    pub dsp_callback_address: Url,
}

impl ConnectorConfig {
    /// Build a configuration from explicit values.
    pub fn new(participant_id: &str, dsp_callback_address: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            participant_id: ParticipantId::new(participant_id)?,
            dsp_callback_address: parse_url("dsp_callback_address", dsp_callback_address)?,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `EDC_PARTICIPANT_ID` (required)
    /// - `EDC_DSP_CALLBACK_ADDRESS` (default: `http://localhost:8282/api/v1/dsp`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let participant_id =
            std::env::var("EDC_PARTICIPANT_ID").map_err(|_| ConfigError::MissingParticipantId)?;
        let callback = std::env::var("EDC_DSP_CALLBACK_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_DSP_CALLBACK_ADDRESS.to_string());
        Ok(Self {
            participant_id: ParticipantId::new(participant_id)?,
            dsp_callback_address: parse_url("EDC_DSP_CALLBACK_ADDRESS", &callback)?,
        })
    }

    /// The base webhook address, without a trailing slash.
    pub fn base_webhook(&self) -> WebhookAddress {
        let address = self.dsp_callback_address.as_str().trim_end_matches('/').to_string();
        WebhookAddress::fixed(address)
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("EDC_PARTICIPANT_ID environment variable is required")]
    MissingParticipantId,
    #[error("invalid participant id: {0}")]
    InvalidParticipantId(#[from] ValidationError),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
