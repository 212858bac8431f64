//! Error type shared by every core operation

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by path validation, template rendering, scaffolding and
/// external tool invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// The engine path's final component is not the reserved engine directory name
    #[error("Not correct engine path, '{}'.", .0.display())]
    InvalidEngineRoot(PathBuf),

    /// A module name that is not a single plain path component
    #[error("Invalid module name '{0}'")]
    InvalidModuleName(String),

    /// No template file exists for the requested key
    #[error("Template not found: '{key}' ({})", .path.display())]
    TemplateNotFound { key: String, path: PathBuf },

    /// A template references a placeholder the context does not provide
    #[error("Unresolved placeholder '{placeholder}' in template '{template}'")]
    UnresolvedPlaceholder {
        template: String,
        placeholder: String,
    },

    /// The template manifest exists but could not be parsed
    #[error("Invalid template manifest {}: {message}", .path.display())]
    InvalidManifest { path: PathBuf, message: String },

    /// An external tool exited with a non-zero status
    #[error("{tool} exited with code {code}")]
    ExternalToolFailure { tool: String, code: i32 },

    /// A required external tool is not available in PATH
    #[error("Required tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// The requested target has no installed binary
    #[error("Target '{target}' is not installed at {}, run Build first", .path.display())]
    TargetNotInstalled { target: String, path: PathBuf },

    /// A generated document could not be serialized
    #[error("Failed to serialize {}: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Directory or file operation failure
    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Wrap an io error with the path it happened on
    pub fn fs(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap a serialization error with the file it was destined for
    pub fn serialization(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Error::Serialization {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Process exit code this error maps to
    ///
    /// External tool failures propagate the tool's own code, everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ExternalToolFailure { code, .. } => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_propagates_tool_code() {
        let err = Error::ExternalToolFailure {
            tool: "cmake".to_string(),
            code: 42,
        };
        assert_eq!(err.exit_code(), 42);
    }

    #[test]
    fn test_exit_code_defaults_to_one() {
        let err = Error::InvalidEngineRoot(PathBuf::from("/tmp/NotEngine"));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("/tmp/NotEngine"));
    }

    #[test]
    fn test_serialization_error_names_target() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::serialization("/work/Game/Game.code-workspace", source);
        assert!(matches!(err, Error::Serialization { .. }));
        assert!(err
            .to_string()
            .starts_with("Failed to serialize /work/Game/Game.code-workspace"));
        assert_eq!(err.exit_code(), 1);
    }
}
