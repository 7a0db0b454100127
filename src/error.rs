use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Missing required connection setting '{0}' (set it in the config file or environment)")]
    MissingConnection(&'static str),

    #[error("Invalid party settings: {0}")]
    InvalidParty(String),
}

/// Failures talking to the content store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Record '{id}' does not match the declared shape: {source}")]
    Shape {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures talking to the interaction executor.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Interaction API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Interaction returned no result")]
    EmptyResult,

    #[error("Interaction result does not match the expected shape: {0}")]
    Shape(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Record type '{type_name}' is not available in the content store")]
    SchemaUnavailable { type_name: String },

    #[error("Campaign ID not provided")]
    MissingIdentifier,

    #[error("Campaign already has {plans} plans; no session numbers left")]
    SessionLimit { plans: usize },

    #[error("Generation failed in interaction '{interaction}': {source}")]
    GenerationFailed {
        interaction: String,
        #[source]
        source: GeneratorError,
    },

    #[error("Persistence failed while {operation}: {source}")]
    PersistenceFailed {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl CampaignError {
    pub fn generation(interaction: &str, source: GeneratorError) -> Self {
        CampaignError::GenerationFailed {
            interaction: interaction.to_string(),
            source,
        }
    }

    pub fn persistence(operation: &'static str, source: StoreError) -> Self {
        CampaignError::PersistenceFailed { operation, source }
    }
}
