//! Error handling for the Scalar Kiota core library

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Scalar Kiota operations
pub type Result<T> = std::result::Result<T, ScalarKiotaError>;

/// Main error type for SDK generation operations
#[derive(Error, Debug)]
pub enum ScalarKiotaError {
    /// The OpenAPI document could not be downloaded from the host
    #[error("OpenAPI document unavailable at {url}: {reason}")]
    SpecUnavailable { url: String, reason: String },

    /// An external command exited with a non-zero status
    #[error("{command} {} failed: {stderr}", .args.join(" "))]
    ExternalTool {
        command: String,
        args: Vec<String>,
        stderr: String,
    },

    /// An external command could not be started at all
    #[error("Failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// No bundler entry point was found in the generated SDK directory
    #[error("No TypeScript entry point found in {}", .dir.display())]
    NoEntryPoint { dir: PathBuf },

    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl ScalarKiotaError {
    /// Create a spec-unavailable error
    pub fn spec_unavailable<U: Into<String>, R: Into<String>>(url: U, reason: R) -> Self {
        Self::SpecUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an external tool error
    pub fn external_tool<C, S>(command: C, args: &[String], stderr: S) -> Self
    where
        C: Into<String>,
        S: Into<String>,
    {
        Self::ExternalTool {
            command: command.into(),
            args: args.to_vec(),
            stderr: stderr.into(),
        }
    }

    /// Create a spawn error
    pub fn spawn<C: Into<String>>(command: C, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Create a missing entry point error
    pub fn no_entry_point<P: Into<PathBuf>>(dir: P) -> Self {
        Self::NoEntryPoint { dir: dir.into() }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this error means an external tool is absent or unusable.
    ///
    /// Only failures of the process itself count; filesystem or
    /// configuration errors raised around the call are real failures.
    pub fn is_tool_unavailable(&self) -> bool {
        matches!(self, Self::ExternalTool { .. } | Self::Spawn { .. })
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SpecUnavailable { .. } => ErrorCategory::Network,
            Self::ExternalTool { .. } | Self::Spawn { .. } => ErrorCategory::ExternalTool,
            Self::NoEntryPoint { .. } => ErrorCategory::Bundling,
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Json(_) | Self::Yaml(_) => ErrorCategory::Serialization,
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Template(_) => ErrorCategory::Template,
            Self::Validation { .. } => ErrorCategory::Validation,
        }
    }
}

/// Error categories for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Network,
    ExternalTool,
    Bundling,
    FileSystem,
    Serialization,
    Configuration,
    Template,
    Validation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::ExternalTool => write!(f, "external_tool"),
            Self::Bundling => write!(f, "bundling"),
            Self::FileSystem => write!(f, "filesystem"),
            Self::Serialization => write!(f, "serialization"),
            Self::Configuration => write!(f, "configuration"),
            Self::Template => write!(f, "template"),
            Self::Validation => write!(f, "validation"),
        }
    }
}
