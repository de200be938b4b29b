//! Brace-balanced section scanner
//!
//! Walks the preprocessed text character by character, tracking brace depth
//! so that nested `{...}` blocks stay inside their section body. Braces in
//! `/* */` comments, `//` line comments and string literals are not counted.
//!
//! A section is a top-level block whose opening brace is preceded by exactly
//! one space and a name made of letters, spaces and hyphens. Top-level blocks
//! without such a name are skipped whole.

use std::fmt;

/// Line and column of a character in the scanned text (both 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Scanner error type
#[derive(Debug)]
pub struct ScanError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scan error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ScanError {}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == ' ' || ch == '-'
}

/// Scanner for brace-delimited sections
pub struct Scanner {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scan the entire input for `(name, body)` pairs
    pub fn sections(&mut self) -> Result<Vec<(String, String)>, ScanError> {
        let mut sections = Vec::new();
        // Names never reach back past the end of the previous block
        let mut segment_start = 0;

        while let Some(ch) = self.peek() {
            match ch {
                '/' if matches!(self.peek_ahead(1), Some('*') | Some('/')) => {
                    self.skip_comment()?;
                    segment_start = self.position;
                }
                '"' => {
                    self.skip_string()?;
                    segment_start = self.position;
                }
                '{' => {
                    let open = self.position;
                    let name = self.name_before(open, segment_start);
                    let body = self.block_body()?;
                    if let Some(name) = name {
                        sections.push((name, body));
                    }
                    segment_start = self.position;
                }
                _ => {
                    self.advance();
                }
            }
        }

        Ok(sections)
    }

    /// Name preceding the brace at `open`, if the text there has the shape
    /// `<name> {`.
    fn name_before(&self, open: usize, segment_start: usize) -> Option<String> {
        if open < segment_start + 2 || self.input[open - 1] != ' ' {
            return None;
        }

        let end = open - 1;
        let mut start = end;
        while start > segment_start && is_name_char(self.input[start - 1]) {
            start -= 1;
        }

        (start < end).then(|| self.input[start..end].iter().collect())
    }

    /// Consume a brace block starting at the current `{` and return the text
    /// between it and its balancing `}`.
    fn block_body(&mut self) -> Result<String, ScanError> {
        let open_loc = self.current_location();
        self.advance(); // consume '{'

        let body_start = self.position;
        let mut depth = 1;

        while let Some(ch) = self.peek() {
            match ch {
                '/' if matches!(self.peek_ahead(1), Some('*') | Some('/')) => {
                    self.skip_comment()?;
                }
                '"' => self.skip_string()?,
                '{' => {
                    depth += 1;
                    self.advance();
                }
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let body = self.input[body_start..self.position].iter().collect();
                        self.advance(); // consume '}'
                        return Ok(body);
                    }
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }

        Err(ScanError {
            message: "Unclosed '{'".to_string(),
            location: open_loc,
        })
    }

    /// Skip a `//` or `/* */` comment
    fn skip_comment(&mut self) -> Result<(), ScanError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'

        if self.advance() == Some('/') {
            while let Some(ch) = self.advance() {
                if ch == '\n' {
                    break;
                }
            }
            return Ok(());
        }

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(ScanError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    /// Skip a string literal, honoring backslash escapes
    fn skip_string(&mut self) -> Result<(), ScanError> {
        let start_loc = self.current_location();
        self.advance(); // skip opening quote

        while let Some(ch) = self.advance() {
            match ch {
                '"' => return Ok(()),
                '\\' => {
                    self.advance();
                }
                '\n' => break,
                _ => {}
            }
        }

        Err(ScanError {
            message: "Unterminated string literal".to_string(),
            location: start_loc,
        })
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
