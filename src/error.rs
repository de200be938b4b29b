//! Error types for the reference generator
//!
//! Every failure along the pipeline maps to one [`Error`] variant so that a
//! broken preprocessor run is reported instead of producing an empty or
//! partial document.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::extract::scanner::ScanError;

/// Errors produced while generating a reference.
#[derive(Debug, Error)]
pub enum Error {
    /// The input definition file does not exist
    #[error("input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    /// The preprocessor program could not be resolved on `PATH`
    #[error("preprocessor '{program}' not found")]
    PreprocessorNotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    /// The preprocessor was found but could not be started
    #[error("failed to launch preprocessor '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The preprocessor exited unsuccessfully
    #[error("preprocessor '{program}' failed ({status}){}", stderr_suffix(.stderr))]
    PreprocessorFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("preprocessor output is not valid UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),

    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Extraction found nothing to document
    #[error("no sections found in '{}'", .0.display())]
    NoSections(PathBuf),

    #[error("failed to write output")]
    Write(#[source] io::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Result type for reference generation.
pub type Result<T> = std::result::Result<T, Error>;
