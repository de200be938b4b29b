//! External preprocessor invocation
//!
//! The definition file is run through a C-style preprocessor before
//! extraction so that includes are expanded. Doc comments must survive this
//! step, hence the default `mcpp -C -P` (keep comments, no line markers).

use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const DEFAULT_PROGRAM: &str = "mcpp";
pub const DEFAULT_ARGS: [&str; 2] = ["-C", "-P"];

/// A preprocessor command line; the input path is appended as the last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessor {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_ARGS)
    }
}

impl Preprocessor {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Preprocess `input` and return the captured standard output.
    ///
    /// Fails if the input is missing, the program cannot be found or started,
    /// the program exits unsuccessfully, or its output is not UTF-8.
    pub fn run(&self, input: &Path) -> Result<String> {
        if !input.exists() {
            return Err(Error::InputNotFound(input.to_path_buf()));
        }

        let resolved = which::which(&self.program).map_err(|source| Error::PreprocessorNotFound {
            program: self.program.clone(),
            source,
        })?;

        debug!(
            program = %resolved.display(),
            args = ?self.args,
            input = %input.display(),
            "running preprocessor"
        );

        let output = Command::new(&resolved)
            .args(&self.args)
            .arg(input)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(Error::PreprocessorFailed {
                program: self.program.clone(),
                status: output.status,
                stderr,
            });
        }

        if !stderr.is_empty() {
            warn!(program = %self.program, "preprocessor reported: {}", stderr);
        }

        let text = String::from_utf8(output.stdout)?;
        debug!(bytes = text.len(), "preprocessed input");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mcpp_keeping_comments() {
        let preprocessor = Preprocessor::default();
        assert_eq!(preprocessor.program, "mcpp");
        assert_eq!(preprocessor.args, vec!["-C", "-P"]);
    }

    #[test]
    fn test_missing_input_is_reported_before_lookup() {
        let preprocessor = Preprocessor::new("definitely-not-a-real-preprocessor", Vec::<String>::new());
        let err = preprocessor
            .run(Path::new("does/not/exist.dl"))
            .unwrap_err();

        assert!(matches!(err, Error::InputNotFound(ref p) if p == Path::new("does/not/exist.dl")));
    }
}
