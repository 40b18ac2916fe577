use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end the process before or after the packaging steps.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    IoError(String),

    // Only raised when the caller opted into --strict-build.
    #[error("Build failed in {dir:?}: {message}")]
    BuildFailed { dir: PathBuf, message: String },
}

/// A failed file-system step. Recorded in the run summary, never propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("could not create directory {path:?}: {message}")]
    CreateDir {
        path: PathBuf,
        message: String,
    },

    #[error("could not copy {from:?} to {to:?}: {message}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },

    #[error("could not read directory {path:?}: {message}")]
    ReadDir { path: PathBuf, message: String },

    #[error("autograder folder {path:?} is not accessible: {message}")]
    AutograderMissing { path: PathBuf, message: String },

    #[error("destination {path:?} already exists")]
    DestinationExists { path: PathBuf },

    #[error("could not move {from:?} to {to:?}: {message}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        message: String,
    },
}

impl StepError {
    pub fn create_dir(path: PathBuf, err: &io::Error) -> Self {
        StepError::CreateDir {
            path,
            message: err.to_string(),
        }
    }

    pub fn copy(from: PathBuf, to: PathBuf, err: &io::Error) -> Self {
        StepError::Copy {
            from,
            to,
            message: err.to_string(),
        }
    }
}
