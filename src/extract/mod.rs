//! Section and declaration extraction
//!
//! This module turns preprocessed definition text into a [`Reference`]:
//! - [`pattern`]: regex extraction of sections and doc-commented declarations
//! - [`scanner`]: brace-balanced section scanner
//!
//! # Extraction modes
//!
//! [`ExtractMode::Lazy`] matches each section with a lazy, non-recursive
//! pattern. A section body that contains a nested `{...}` is cut at the first
//! closing brace. [`ExtractMode::Balanced`] tracks brace depth instead and
//! keeps nested blocks inside the body. Declarations are extracted from the
//! body the same way in both modes.

pub mod pattern;
pub mod scanner;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::Result;
use pattern::PatternExtractor;
use scanner::Scanner;

/// How section bodies are delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExtractMode {
    /// Lazy match up to the first `}` (nested braces truncate the body)
    #[default]
    Lazy,
    /// Match up to the brace that balances the section's opening brace
    Balanced,
}

/// A doc-commented declaration inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Doc comment text, verbatim
    pub doc: String,
    /// Signature from the declaration name through the first `)`
    pub signature: String,
}

impl Declaration {
    pub fn new(doc: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            doc: doc.into(),
            signature: signature.into(),
        }
    }

    /// The declared name: everything before the first `(` of the signature.
    pub fn name(&self) -> &str {
        self.signature
            .split('(')
            .next()
            .unwrap_or(&self.signature)
    }
}

/// A named top-level block together with its documented declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub body: String,
    pub declarations: Vec<Declaration>,
}

/// All sections of one definition file, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    pub sections: Vec<Section>,
}

impl Reference {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn declaration_count(&self) -> usize {
        self.sections.iter().map(|s| s.declarations.len()).sum()
    }

    /// Declaration names that appear more than once, with their counts.
    ///
    /// Names are reported in the order of their first occurrence.
    pub fn duplicate_names(&self) -> Vec<(&str, usize)> {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        let mut order = Vec::new();

        for decl in self.sections.iter().flat_map(|s| &s.declarations) {
            let count = counts.entry(decl.name()).or_insert(0);
            if *count == 0 {
                order.push(decl.name());
            }
            *count += 1;
        }

        order
            .into_iter()
            .filter_map(|name| {
                let count = counts[name];
                (count > 1).then_some((name, count))
            })
            .collect()
    }
}

/// Extract every section and its declarations from preprocessed text.
pub fn extract_reference(text: &str, mode: ExtractMode) -> Result<Reference> {
    let extractor = PatternExtractor::new();

    let raw_sections = match mode {
        ExtractMode::Lazy => extractor.sections(text),
        ExtractMode::Balanced => Scanner::new(text).sections()?,
    };

    let sections = raw_sections
        .into_iter()
        .map(|(name, body)| {
            let declarations = extractor.declarations(&body);
            debug!(
                section = %name,
                declarations = declarations.len(),
                "extracted section"
            );
            Section {
                name,
                body,
                declarations,
            }
        })
        .collect();

    Ok(Reference { sections })
}
