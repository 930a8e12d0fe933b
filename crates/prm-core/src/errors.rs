//! Error type returned by every fallible planner and ranker operation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and diagnostic context carried by a [`PrmError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable snake_case code, e.g. `missing_layer_sequence`.
    pub code: String,
    /// What went wrong.
    pub message: String,
    /// Offending identifiers, fields and values.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
    /// Suggested fix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key = value`; a repeated key keeps the last value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut pairs = self.context.iter();
        if let Some((key, value)) = pairs.next() {
            write!(f, " {{{key}={value}")?;
            for (key, value) in pairs {
                write!(f, ", {key}={value}")?;
            }
            f.write_str("}")?;
        }
        match &self.hint {
            Some(hint) => write!(f, " (hint: {hint})"),
            None => Ok(()),
        }
    }
}

/// Failure of a planner or ranker operation, grouped by the stage that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum PrmError {
    /// Malformed configuration, architecture or path input.
    #[error("model: {0}")]
    Model(ErrorInfo),
    /// Ranking could not proceed.
    #[error("ranking: {0}")]
    Ranking(ErrorInfo),
    /// An estimator received unusable parameters.
    #[error("stats: {0}")]
    Stats(ErrorInfo),
    /// Planner or ranker options are invalid.
    #[error("config: {0}")]
    Config(ErrorInfo),
    /// Encoding, decoding or reading a payload failed.
    #[error("serde: {0}")]
    Serde(ErrorInfo),
}

impl PrmError {
    /// Payload shared by every family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            PrmError::Model(info)
            | PrmError::Ranking(info)
            | PrmError::Stats(info)
            | PrmError::Config(info)
            | PrmError::Serde(info) => info,
        }
    }

    /// Family name as it appears in the serialized `family` tag.
    pub fn family(&self) -> &'static str {
        match self {
            PrmError::Model(_) => "Model",
            PrmError::Ranking(_) => "Ranking",
            PrmError::Stats(_) => "Stats",
            PrmError::Config(_) => "Config",
            PrmError::Serde(_) => "Serde",
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
