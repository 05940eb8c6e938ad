//! Identifier extraction from a single declaration line.
//!
//! These are plain substring rules, not a tokenizer. Each function returns
//! `None` when the line does not yield a usable name, which the scanner
//! treats as "not this kind of declaration".

const FUNCTION_KEYWORD: &str = "function ";
const CLASS_KEYWORD: &str = "class ";
const VARIABLE_KEYWORDS: [&str; 3] = ["let ", "const ", "var "];

/// Name between `function ` and the following `(`
pub fn function_name(line: &str) -> Option<String> {
    let (_, rest) = line.split_once(FUNCTION_KEYWORD)?;
    let name = rest.split('(').next().unwrap_or_default();
    non_empty(name)
}

/// Name between a leading `class ` and the first `{` or `extends`
pub fn class_name(line: &str) -> Option<String> {
    let rest = line.strip_prefix(CLASS_KEYWORD)?;
    let name = rest.split('{').next().unwrap_or_default();
    let name = name.split("extends").next().unwrap_or_default();
    non_empty(name)
}

/// Name after `let ` / `const ` / `var ` up to the first `=` or `;`.
///
/// Only the first keyword present (checked in that order) is used, even
/// when it yields nothing: `const outlet = 3;` matches `let ` inside
/// "outlet " and has no name.
pub fn variable_name(line: &str) -> Option<String> {
    let keyword = VARIABLE_KEYWORDS.iter().find(|k| line.contains(*k))?;
    let (_, rest) = line.split_once(keyword)?;
    let name = rest.split('=').next().unwrap_or_default();
    let name = name.split(';').next().unwrap_or_default();
    non_empty(name)
}

pub(crate) fn is_function_line(line: &str) -> bool {
    line.contains(FUNCTION_KEYWORD)
}

pub(crate) fn is_class_line(line: &str) -> bool {
    line.starts_with(CLASS_KEYWORD)
}

pub(crate) fn is_import_line(line: &str) -> bool {
    line.starts_with("import ")
}

pub(crate) fn is_variable_line(line: &str) -> bool {
    VARIABLE_KEYWORDS.iter().any(|k| line.contains(k))
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_name() {
        assert_eq!(function_name("function foo(a, b) {").as_deref(), Some("foo"));
        assert_eq!(function_name("async function load() {").as_deref(), Some("load"));
        assert_eq!(function_name("export function  spaced (x) {").as_deref(), Some("spaced"));
    }

    #[test]
    fn test_anonymous_function_has_no_name() {
        assert_eq!(function_name("const handler = function (e) {"), None);
        assert_eq!(function_name("let x = 1;"), None);
    }

    #[test]
    fn test_class_name() {
        assert_eq!(class_name("class Bar extends Baz {").as_deref(), Some("Bar"));
        assert_eq!(class_name("class Foo{").as_deref(), Some("Foo"));
        assert_eq!(class_name("class Plain").as_deref(), Some("Plain"));
    }

    #[test]
    fn test_class_must_lead_the_line() {
        assert_eq!(class_name("export class Foo {"), None);
        assert_eq!(class_name("class {"), None);
    }

    #[test]
    fn test_variable_name() {
        assert_eq!(variable_name("const x = 5;").as_deref(), Some("x"));
        assert_eq!(variable_name("let saveBtn, loadBtn;").as_deref(), Some("saveBtn, loadBtn"));
        assert_eq!(variable_name("var counter").as_deref(), Some("counter"));
    }

    #[test]
    fn test_variable_name_uses_first_keyword_present() {
        // "outlet " contains "let ", which wins over "const " and names nothing.
        assert_eq!(variable_name("const outlet = 3;"), None);
        assert_eq!(variable_name("let = 4"), None);
        assert_eq!(variable_name("const a = let_b;").as_deref(), Some("a"));
    }
}
