use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of top-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// `import ...` statement
    Import,
    /// `let` / `const` / `var` declaration
    Variable,
    /// `function name(...)` declaration
    Function,
    /// `class Name ...` declaration
    Class,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Import => "import",
            ElementKind::Variable => "variable",
            ElementKind::Function => "function",
            ElementKind::Class => "class",
        }
    }

    /// Functions and classes are assigned to one destination; imports and
    /// variables are copied into all of them.
    pub fn is_movable(&self) -> bool {
        matches!(self, ElementKind::Function | ElementKind::Class)
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scanned top-level declaration and its verbatim source lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    /// Identifier, or the whole statement text for imports
    pub name: String,
    /// Original lines, indentation included
    pub lines: Vec<String>,
    /// Start line (1-indexed)
    pub start_line: usize,
}

impl Element {
    pub fn new(kind: ElementKind, name: impl Into<String>, line: &str, start_line: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            lines: vec![line.to_string()],
            start_line,
        }
    }

    pub fn push_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// End line (1-indexed), assuming the lines were contiguous in the source
    pub fn end_line(&self) -> usize {
        self.start_line + self.lines.len().saturating_sub(1)
    }
}

/// Per-kind element counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementStats {
    pub total_elements: usize,
    pub imports: usize,
    pub variables: usize,
    pub functions: usize,
    pub classes: usize,
    pub covered_lines: usize,
}

impl ElementStats {
    pub fn from_elements(elements: &[Element]) -> Self {
        let mut stats = Self::default();
        for element in elements {
            stats.add(element);
        }
        stats
    }

    pub fn add(&mut self, element: &Element) {
        self.total_elements += 1;
        self.covered_lines += element.line_count();
        match element.kind {
            ElementKind::Import => self.imports += 1,
            ElementKind::Variable => self.variables += 1,
            ElementKind::Function => self.functions += 1,
            ElementKind::Class => self.classes += 1,
        }
    }

    pub fn movable(&self) -> usize {
        self.functions + self.classes
    }
}

/// Scan metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    pub scan_duration_ms: u64,
    pub timestamp: String,
    pub tool_version: String,
}

impl Default for ScanMetadata {
    fn default() -> Self {
        Self {
            scan_duration_ms: 0,
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// All elements found in one source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceOutline {
    pub path: PathBuf,
    pub line_count: usize,
    pub elements: Vec<Element>,
    pub stats: ElementStats,
    pub metadata: ScanMetadata,
}

impl SourceOutline {
    /// Functions and classes in scan order; position `i` is selection index `i + 1`
    pub fn movable(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.kind.is_movable())
    }
}

/// Elements slated for one output label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationGroup {
    pub label: String,
    pub is_default: bool,
    pub elements: Vec<Element>,
}

impl DestinationGroup {
    pub fn new(label: impl Into<String>, is_default: bool) -> Self {
        Self {
            label: label.into(),
            is_default,
            elements: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Functions and classes assigned here, in group order
    pub fn movable(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.kind.is_movable())
    }

    /// Imports and variables, in group order
    pub fn shared(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| !e.kind.is_movable())
    }
}

/// Index request for one destination
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// 1-based indices into the function/class subsequence
    pub indices: Vec<usize>,
    /// Tokens that contained no digits
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<String>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() && self.ignored.is_empty()
    }
}

/// Why a requested index was not assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IssueReason {
    /// Index outside `1..=max`
    OutOfRange { max: usize },
    /// Another destination claimed the index first
    AlreadyClaimed { by: String },
    /// Selection text held no numbers at all
    NoNumbers,
}

impl std::fmt::Display for IssueReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueReason::OutOfRange { max } => write!(f, "out of range (1-{})", max),
            IssueReason::AlreadyClaimed { by } => write!(f, "already assigned to {}", by),
            IssueReason::NoNumbers => f.write_str("no valid numbers found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentIssue {
    pub destination: String,
    /// Offending index, absent for [`IssueReason::NoNumbers`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(flatten)]
    pub reason: IssueReason,
}

/// Non-fatal conditions noticed while splitting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitWarning {
    /// Destination ended up with no elements; its file was not written
    EmptyDestination { label: String },
    /// Label given more than once; later occurrences dropped
    DuplicateDestination { label: String },
}

impl std::fmt::Display for SplitWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitWarning::EmptyDestination { label } => {
                write!(f, "No content assigned to {}", label)
            }
            SplitWarning::DuplicateDestination { label } => {
                write!(f, "Destination {} listed more than once", label)
            }
        }
    }
}

/// A destination file produced by a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenFile {
    pub label: String,
    pub path: PathBuf,
    pub bytes: usize,
    pub element_count: usize,
    /// False on dry runs
    pub written: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteFailure {
    pub label: String,
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one split run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitReport {
    pub source: PathBuf,
    pub default_destination: String,
    pub stats: ElementStats,
    pub files: Vec<WrittenFile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SplitWarning>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignment_issues: Vec<AssignmentIssue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub write_failures: Vec<WriteFailure>,
    pub metadata: ScanMetadata,
}

impl SplitReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.assignment_issues.is_empty() && self.write_failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_lines() {
        let mut element = Element::new(ElementKind::Function, "f", "function f() {", 3);
        element.push_line("  return 1;");
        element.push_line("}");

        assert_eq!(element.line_count(), 3);
        assert_eq!(element.end_line(), 5);
    }

    #[test]
    fn test_movable_kinds() {
        assert!(ElementKind::Function.is_movable());
        assert!(ElementKind::Class.is_movable());
        assert!(!ElementKind::Import.is_movable());
        assert!(!ElementKind::Variable.is_movable());
    }

    #[test]
    fn test_stats() {
        let elements = vec![
            Element::new(ElementKind::Import, "import a;", "import a;", 1),
            Element::new(ElementKind::Class, "A", "class A {", 2),
            Element::new(ElementKind::Function, "f", "function f() {", 5),
        ];
        let stats = ElementStats::from_elements(&elements);

        assert_eq!(stats.total_elements, 3);
        assert_eq!(stats.imports, 1);
        assert_eq!(stats.movable(), 2);
        assert_eq!(stats.covered_lines, 3);
    }

    #[test]
    fn test_issue_serializes_flat() {
        let issue = AssignmentIssue {
            destination: "b.js".to_string(),
            index: Some(9),
            reason: IssueReason::OutOfRange { max: 3 },
        };
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"reason\":\"out_of_range\""));
        assert!(json.contains("\"max\":3"));
    }
}
