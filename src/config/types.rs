use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::args::{OutputFormat, PositiveU64, PositiveUsize, parsers::parse_duration_value};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub interface: Option<String>,
    pub iterations: Option<u64>,
    pub timeout: Option<DurationValue>,
    #[serde(alias = "print_worker_stats")]
    pub worker_stats: Option<bool>,
    pub quantum: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}

/// Fully validated inputs for one load run.
#[derive(Debug, Clone)]
pub struct LoadSettings {
    pub url: Url,
    pub interface: String,
    pub iterations: PositiveU64,
    pub timeout: Duration,
    pub print_worker_stats: bool,
    pub quantum: PositiveUsize,
    pub output_format: OutputFormat,
}
