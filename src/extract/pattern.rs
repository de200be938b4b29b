//! Regex extraction of sections and declarations
//!
//! Sections are matched lazily and without recursion: the body ends at the
//! first `}` after the opening brace, so a nested block truncates it.

use regex::Regex;

use super::Declaration;

/// `<name> {<body>}` with the body ending at the first closing brace.
const SECTION_PATTERN: &str = r"(?s)([A-Za-z -]+) \{(.*?)\}";

/// A `/** ... */` doc comment, a blank line, then a `.decl` through the first `)`.
const DECLARATION_PATTERN: &str = r"(?s)/\*\*\n(.*?)\*/\n\n.decl ([^)]*\))";

/// Precompiled section and declaration patterns.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    section_regex: Regex,
    declaration_regex: Regex,
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternExtractor {
    pub fn new() -> Self {
        Self {
            section_regex: Regex::new(SECTION_PATTERN).expect("section pattern is valid"),
            declaration_regex: Regex::new(DECLARATION_PATTERN)
                .expect("declaration pattern is valid"),
        }
    }

    /// All `(name, body)` pairs in source order.
    pub fn sections(&self, text: &str) -> Vec<(String, String)> {
        self.section_regex
            .captures_iter(text)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect()
    }

    /// All doc-commented declarations in a section body, in source order.
    pub fn declarations(&self, body: &str) -> Vec<Declaration> {
        self.declaration_regex
            .captures_iter(body)
            .map(|caps| Declaration::new(&caps[1], &caps[2]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_section() {
        let extractor = PatternExtractor::new();
        let sections = extractor.sections("Types {\n  body\n}\n");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, "Types");
        assert_eq!(sections[0].1, "\n  body\n");
    }

    #[test]
    fn test_section_names_allow_spaces_and_hyphens() {
        let extractor = PatternExtractor::new();
        let text = "Control-flow graph {\n}\nTop level nodes {\n}\n";
        let names: Vec<_> = extractor
            .sections(text)
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(names, vec!["Control-flow graph", "Top level nodes"]);
    }

    #[test]
    fn test_section_requires_single_space_before_brace() {
        let extractor = PatternExtractor::new();

        assert!(extractor.sections("Types{\n}\n").is_empty());
        // A trailing space becomes part of the name
        assert_eq!(extractor.sections("Types  {}")[0].0, "Types ");
    }

    #[test]
    fn test_section_name_stops_at_other_characters() {
        let extractor = PatternExtractor::new();
        let sections = extractor.sections("// AST\nNodes {}\n#define X 1\n");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, "Nodes");
        assert_eq!(sections[0].1, "");
    }

    #[test]
    fn test_nested_braces_truncate_body() {
        let extractor = PatternExtractor::new();
        let sections = extractor.sections("Outer {\n a {\n b\n }\n c\n}\n");

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].1, "\n a {\n b\n ");
    }

    #[test]
    fn test_declaration_extraction() {
        let extractor = PatternExtractor::new();
        let body = "\n/**\n Method declarations.\n */\n\n.decl Method(id: symbol, name: symbol)\n";
        let decls = extractor.declarations(body);

        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].doc, " Method declarations.\n ");
        assert_eq!(decls[0].signature, "Method(id: symbol, name: symbol)");
        assert_eq!(decls[0].name(), "Method");
    }

    #[test]
    fn test_multiline_signature_ends_at_first_paren() {
        let extractor = PatternExtractor::new();
        let body = "/**\ndoc\n*/\n\n.decl Call(\n  id: symbol,\n  callee: symbol\n) choice-domain id\n";
        let decls = extractor.declarations(body);

        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].signature, "Call(\n  id: symbol,\n  callee: symbol\n)");
    }

    #[test]
    fn test_declaration_requires_blank_line() {
        let extractor = PatternExtractor::new();
        let body = "/**\ndoc\n*/\n.decl Foo(x: number)\n";

        assert!(extractor.declarations(body).is_empty());
    }

    #[test]
    fn test_undocumented_declarations_are_skipped() {
        let extractor = PatternExtractor::new();
        let body = ".decl Plain(x: number)\n\n/* not a doc comment */\n\n.decl Other(y: number)\n";

        assert!(extractor.declarations(body).is_empty());
    }

    #[test]
    fn test_multiple_declarations_in_order() {
        let extractor = PatternExtractor::new();
        let body = "/**\nfirst\n*/\n\n.decl A(x: number)\n/**\nsecond\n*/\n\n.decl B(y: number)\n";
        let names: Vec<_> = extractor
            .declarations(body)
            .iter()
            .map(|d| d.name().to_string())
            .collect();

        assert_eq!(names, vec!["A", "B"]);
    }
}
