use thiserror::Error;

use crate::utils::command::{self, ToolOutput};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("{context} failed with exit code {exit_code}")]
    Tool {
        context: String,
        exit_code: i32,
        output: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a fatal tool error from a failed invocation's captured output.
    pub fn tool(context: impl Into<String>, output: &ToolOutput) -> Self {
        Error::Tool {
            context: context.into(),
            exit_code: output.exit_code,
            output: command::error_text(output),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::Manifest(_) => "MANIFEST_ERROR",
            Error::Tool { .. } => "TOOL_FAILED",
            Error::Io(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
            Error::Other(_) => "ERROR",
        }
    }
}
