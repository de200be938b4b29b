//! Run configuration
//!
//! [`Config::default`] reproduces the historic invocation: `mcpp -C -P` over
//! `../src/datalog/ast.dl`, lazy section matching, and an
//! `AST API Reference` document with `erlang` code fences.

use std::path::PathBuf;

use crate::extract::ExtractMode;
use crate::preprocess::Preprocessor;
use crate::render::RenderOptions;

pub const DEFAULT_INPUT: &str = "../src/datalog/ast.dl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Definition file handed to the preprocessor
    pub input: PathBuf,
    pub preprocessor: Preprocessor,
    pub mode: ExtractMode,
    pub render: RenderOptions,
    /// Accept a run that finds no sections instead of failing
    pub allow_empty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            preprocessor: Preprocessor::default(),
            mode: ExtractMode::default(),
            render: RenderOptions::default(),
            allow_empty: false,
        }
    }
}

impl Config {
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn with_mode(mut self, mode: ExtractMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn allowing_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}
