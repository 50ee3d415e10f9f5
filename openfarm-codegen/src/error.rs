//! Error types for descriptor validation and code generation
//!
//! Every failure aborts the whole generation call — there is no partial
//! output mode. The core never logs or prints; presenting errors to the
//! user is the caller's job.

use thiserror::Error;

/// Result type for codegen operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Errors surfaced by the code generation core
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Malformed module type or module instance record
    #[error("invalid descriptor: {detail}")]
    Validation { detail: String },

    /// A module instance references a type id that was not supplied
    #[error("module \"{module}\" references unknown module type \"{type_id}\"")]
    UnknownType { module: String, type_id: String },

    /// More arguments supplied than the module type declares
    #[error(
        "too many arguments specified for module \"{module}\" (got {supplied}, expected {expected})"
    )]
    TooManyArguments {
        module: String,
        supplied: usize,
        expected: usize,
    },

    /// A type argument without a default was not covered by the instance
    #[error(
        "not enough arguments supplied for module \"{module}\" (got {supplied}, expecting {expected})"
    )]
    MissingArgument {
        module: String,
        supplied: usize,
        expected: usize,
    },

    /// A protocol plugin cannot emit code for a port's payload type
    #[error(
        "plugin \"{plugin}\" does not support payload type \"{payload_type}\" \
         (module \"{module}\", port \"{port}\")"
    )]
    UnsupportedPayload {
        plugin: String,
        module: String,
        port: String,
        payload_type: String,
    },

    /// Writer indentation would go negative — an orchestration bug,
    /// not a data problem
    #[error("internal error: indentation level would go below zero")]
    Indentation,
}

impl CodegenError {
    /// Create a validation error from anything displayable
    pub fn validation(detail: impl std::fmt::Display) -> Self {
        CodegenError::Validation {
            detail: detail.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_arguments_names_counts() {
        let e = CodegenError::TooManyArguments {
            module: "sensor1".to_string(),
            supplied: 3,
            expected: 2,
        };
        let msg = e.to_string();
        assert!(msg.contains("sensor1"), "message should name the module: {msg}");
        assert!(msg.contains("got 3"), "message should name supplied count: {msg}");
        assert!(msg.contains("expected 2"), "message should name expected count: {msg}");
    }

    #[test]
    fn unsupported_payload_names_plugin_module_and_port() {
        let e = CodegenError::UnsupportedPayload {
            plugin: "csv".to_string(),
            module: "pump".to_string(),
            port: "state".to_string(),
            payload_type: "std_msgs/Float32".to_string(),
        };
        let msg = e.to_string();
        assert!(msg.contains("csv"), "{msg}");
        assert!(msg.contains("pump"), "{msg}");
        assert!(msg.contains("state"), "{msg}");
        assert!(msg.contains("std_msgs/Float32"), "{msg}");
    }
}
