//! Errors surfaced by the flow-e pipeline.

use std::io;
use std::path::PathBuf;

/// Errors raised while dispatching a file or running the checker.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// A stream-backed file reached the pipeline. Only buffered contents can be
    /// inspected for the `@flow` marker.
    #[error("Stream content is not supported: {}", path.display())]
    UnsupportedInputKind { path: PathBuf },

    #[error("flow produced output that is not valid JSON for {}: {source}", path.display())]
    MalformedCheckerOutput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not spawn `{command}`: {source}")]
    CheckerSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with exit code {code:?}: {stderr}")]
    CheckerProcessFailure {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl FlowError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FlowError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the error kinds produced by running the checker itself.
    pub fn is_checker_failure(&self) -> bool {
        matches!(
            self,
            FlowError::MalformedCheckerOutput { .. }
                | FlowError::CheckerSpawn { .. }
                | FlowError::CheckerProcessFailure { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;
