//! Markdown rendering of an extracted [`Reference`]
//!
//! Layout: one `#` title, a `##` heading per section, and per declaration a
//! `###` heading with the declared name, a fenced block holding the
//! signature, and the doc text as written in the source.

use std::fmt;

use crate::extract::Reference;

pub const DEFAULT_TITLE: &str = "AST API Reference";
pub const DEFAULT_FENCE_LANGUAGE: &str = "erlang";

/// Title and code fence language of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub title: String,
    pub fence_language: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            fence_language: DEFAULT_FENCE_LANGUAGE.to_string(),
        }
    }
}

/// Markdown view of a reference; render it with `Display`.
pub struct Markdown<'a> {
    reference: &'a Reference,
    options: &'a RenderOptions,
}

impl<'a> Markdown<'a> {
    pub fn new(reference: &'a Reference, options: &'a RenderOptions) -> Self {
        Self { reference, options }
    }
}

impl fmt::Display for Markdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.options.title)?;

        for section in &self.reference.sections {
            writeln!(f, "## {}", section.name)?;

            for decl in &section.declarations {
                writeln!(f, "### {}", decl.name())?;
                writeln!(f)?;
                writeln!(f, "```{}", self.options.fence_language)?;
                writeln!(f, "{}", decl.signature)?;
                writeln!(f, "```")?;
                writeln!(f)?;
                writeln!(f, "{}", decl.doc)?;
            }
        }

        Ok(())
    }
}

/// Render a reference to a Markdown string.
pub fn render_markdown(reference: &Reference, options: &RenderOptions) -> String {
    Markdown::new(reference, options).to_string()
}
