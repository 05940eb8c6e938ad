//! Line-oriented scanner that groups top-level declarations into elements.
//!
//! The scanner counts `{` and `}` per line and tracks `/* */` comments with a
//! single flag. Braces inside strings, template literals or regexes are
//! counted like any other brace.

use crate::extract;
use crate::models::{Element, ElementKind};
use tracing::debug;

/// Scan source text into its top-level elements, in source order.
///
/// Lines are split on `\n` only, so a `\r` from CRLF endings stays part of
/// the line. A final newline does not start an extra empty line.
pub fn scan(source: &str) -> Vec<Element> {
    let mut scanner = DeclarationScanner::new();
    if !source.is_empty() {
        let body = source.strip_suffix('\n').unwrap_or(source);
        for line in body.split('\n') {
            scanner.feed(line);
        }
    }
    scanner.finish()
}

/// Incremental state for [`scan`]
#[derive(Debug, Default)]
pub struct DeclarationScanner {
    depth: i64,
    in_block_comment: bool,
    current: Option<Element>,
    elements: Vec<Element>,
    line_number: usize,
}

impl DeclarationScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current brace depth (may go negative on unbalanced input)
    pub fn depth(&self) -> i64 {
        self.depth
    }

    /// Process the next physical line
    pub fn feed(&mut self, line: &str) {
        self.line_number += 1;

        // A line holding both markers opens then closes: the close wins.
        if line.contains("/*") {
            self.in_block_comment = true;
        }
        if line.contains("*/") {
            self.in_block_comment = false;
            self.append_to_current(line);
            return;
        }
        if self.in_block_comment {
            self.append_to_current(line);
            return;
        }

        let before = self.depth;
        self.depth += brace_delta(line);

        if let Some(current) = self.current.as_mut() {
            current.push_line(line);
            if self.depth == 0 && before > 0 {
                if let Some(done) = self.current.take() {
                    debug!(
                        kind = done.kind.as_str(),
                        name = %done.name,
                        line = self.line_number,
                        "completed element"
                    );
                    self.elements.push(done);
                }
            }
            return;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            return;
        }

        // Declarations only count when the line starts at top level.
        if before != 0 {
            return;
        }

        self.detect(line, trimmed);
    }

    /// Flush any still-open element and return everything found
    pub fn finish(mut self) -> Vec<Element> {
        if let Some(open) = self.current.take() {
            debug!(
                kind = open.kind.as_str(),
                name = %open.name,
                depth = self.depth,
                "flushing unterminated element"
            );
            self.elements.push(open);
        }
        debug!(
            lines = self.line_number,
            elements = self.elements.len(),
            "scan finished"
        );
        self.elements
    }

    fn detect(&mut self, line: &str, trimmed: &str) {
        let start = self.line_number;

        if extract::is_function_line(trimmed) {
            if let Some(name) = extract::function_name(trimmed) {
                debug!(name = %name, line = start, "found function");
                self.current = Some(Element::new(ElementKind::Function, name, line, start));
                return;
            }
        }

        if extract::is_class_line(trimmed) {
            if let Some(name) = extract::class_name(trimmed) {
                debug!(name = %name, line = start, "found class");
                self.current = Some(Element::new(ElementKind::Class, name, line, start));
                return;
            }
        }

        if extract::is_import_line(trimmed) {
            self.elements
                .push(Element::new(ElementKind::Import, trimmed, line, start));
            return;
        }

        if extract::is_variable_line(trimmed) {
            if let Some(name) = extract::variable_name(trimmed) {
                self.elements
                    .push(Element::new(ElementKind::Variable, name, line, start));
            }
        }
    }

    fn append_to_current(&mut self, line: &str) {
        if let Some(current) = self.current.as_mut() {
            current.push_line(line);
        }
    }
}

fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}
