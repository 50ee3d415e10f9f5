//! CLI error types

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI-specific errors with helpful messages and hints
#[derive(Debug, Error)]
pub enum CliError {
    /// A descriptor file is missing or unreadable
    #[error("Descriptor file not found: {path}\n  Hint: pass --types-file and --modules-file explicitly")]
    DescriptorNotFound { path: String },

    /// A requested plugin is not in the registry
    #[error("Unknown plugin '{name}'\n  Available: csv, ros")]
    UnknownPlugin { name: String },

    /// Descriptor validation or code generation failed
    #[error("{0}")]
    Codegen(#[from] openfarm_codegen::CodegenError),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
