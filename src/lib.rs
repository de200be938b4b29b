//! # Introduction
//!
//! dlref builds a Markdown API reference from a Datalog AST definition file.
//! The file is run through a C-style preprocessor, its named sections are
//! located, and every `.decl` preceded by a `/** ... */` doc comment becomes
//! an entry in the reference.
//!
//! ## Pipeline
//!
//! ```text
//! ast.dl → Preprocessor → text → Sections → Declarations → Markdown
//! ```
//!
//! 1. [`preprocess`] — runs the external preprocessor and fails loudly when it
//!    is missing or exits unsuccessfully.
//! 2. [`extract`] — finds `<name> { ... }` sections and the doc-commented
//!    declarations inside them.
//! 3. [`render`] — formats the [`extract::Reference`] as Markdown.
//!
//! [`config::Config`] gathers the knobs; its default reproduces the historic
//! `mcpp -C -P ../src/datalog/ast.dl` invocation.

pub mod config;
pub mod error;
pub mod extract;
pub mod preprocess;
pub mod render;

use tracing::{info, warn};

pub use config::Config;
pub use error::{Error, Result};
pub use extract::{extract_reference, Declaration, ExtractMode, Reference, Section};
pub use preprocess::Preprocessor;
pub use render::{render_markdown, Markdown, RenderOptions};

/// Preprocess the configured input and extract its reference.
///
/// Fails with [`Error::NoSections`] when nothing was extracted, unless
/// [`Config::allow_empty`] is set.
pub fn generate(config: &Config) -> Result<Reference> {
    let text = config.preprocessor.run(&config.input)?;
    let reference = extract_reference(&text, config.mode)?;

    info!(
        input = %config.input.display(),
        sections = reference.sections.len(),
        declarations = reference.declaration_count(),
        "extracted reference"
    );

    for (name, count) in reference.duplicate_names() {
        warn!(declaration = name, count, "declaration documented more than once");
    }

    if reference.is_empty() && !config.allow_empty {
        return Err(Error::NoSections(config.input.clone()));
    }

    Ok(reference)
}
