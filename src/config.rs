use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::graph_catalog::RANDOM_PROPERTY_SCHEMA;
use crate::graph_export::DEFAULT_RECORD_TYPE;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

fn validate_delimiter(delimiter: &char) -> Result<(), ValidationError> {
    if delimiter.is_ascii() && !matches!(*delimiter, '"' | '\n' | '\r') {
        Ok(())
    } else {
        Err(ValidationError::new("delimiter").with_message(
            "Delimiter must be a single ASCII character other than a quote or newline".into(),
        ))
    }
}

/// Settings for converting a tabular file into a graph file pair
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output files are `{output_prefix}.nodes` and `{output_prefix}.relationships`
    #[validate(length(min = 1, message = "Output prefix cannot be empty"))]
    pub output_prefix: String,

    /// Label and id stem of the per-record nodes
    #[validate(length(min = 1, message = "Record type cannot be empty"))]
    pub record_type: String,

    /// Schema file path or predefined schema name
    #[validate(length(min = 1, message = "Schema reference cannot be empty"))]
    pub schema: String,

    /// Field delimiter for both input and output
    #[validate(custom(function = "validate_delimiter"))]
    pub delimiter: char,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_prefix: "graph".to_string(),
            record_type: DEFAULT_RECORD_TYPE.to_string(),
            schema: RANDOM_PROPERTY_SCHEMA.to_string(),
            delimiter: ',',
        }
    }
}

/// Settings for generating synthetic household records
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Number of households (not people) to generate
    #[validate(range(
        min = 1,
        max = 10_000_000,
        message = "Household count must be between 1 and 10000000"
    ))]
    pub households: usize,

    /// Seed for reproducible output; entropy-seeded when absent
    pub seed: Option<u64>,

    #[validate(custom(function = "validate_delimiter"))]
    pub delimiter: char,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            households: 100,
            seed: None,
            delimiter: ',',
        }
    }
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Clone, Debug, Default)]
pub struct CliExportConfig {
    pub output_prefix: Option<String>,
    pub record_type: Option<String>,
    pub schema: Option<String>,
    pub delimiter: Option<char>,
}

#[derive(Clone, Debug, Default)]
pub struct CliGenerateConfig {
    pub households: Option<usize>,
    pub seed: Option<u64>,
    pub delimiter: Option<char>,
}

impl ExportConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            output_prefix: env::var("TABGRAPH_OUTPUT_PREFIX").unwrap_or(defaults.output_prefix),
            record_type: env::var("TABGRAPH_RECORD_TYPE").unwrap_or(defaults.record_type),
            schema: env::var("TABGRAPH_SCHEMA").unwrap_or(defaults.schema),
            delimiter: parse_env_var("TABGRAPH_DELIMITER", ",")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: Self = read_yaml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command line values on top of this configuration and revalidate
    pub fn merge_cli(mut self, cli: CliExportConfig) -> Result<Self, ConfigError> {
        if let Some(output_prefix) = cli.output_prefix {
            self.output_prefix = output_prefix;
        }
        if let Some(record_type) = cli.record_type {
            self.record_type = record_type;
        }
        if let Some(schema) = cli.schema {
            self.schema = schema;
        }
        if let Some(delimiter) = cli.delimiter {
            self.delimiter = delimiter;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}

impl GenerateConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let seed = match env::var("TABGRAPH_SEED") {
            Ok(value) => Some(value.parse::<u64>().map_err(|e| ConfigError::Parse {
                field: "TABGRAPH_SEED".to_string(),
                value,
                source: Box::new(e),
            })?),
            Err(env::VarError::NotPresent) => None,
            Err(e) => return Err(e.into()),
        };
        let config = Self {
            households: parse_env_var("TABGRAPH_HOUSEHOLDS", "100")?,
            seed,
            delimiter: parse_env_var("TABGRAPH_DELIMITER", ",")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: Self = read_yaml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command line values on top of this configuration and revalidate
    pub fn merge_cli(mut self, cli: CliGenerateConfig) -> Result<Self, ConfigError> {
        if let Some(households) = cli.households {
            self.households = households;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(delimiter) = cli.delimiter {
            self.delimiter = delimiter;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}

fn read_yaml<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
        field: "yaml_file".to_string(),
        value: "file read failed".to_string(),
        source: Box::new(e),
    })?;

    serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
        field: "yaml_content".to_string(),
        value: content,
        source: Box::new(e),
    })
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
