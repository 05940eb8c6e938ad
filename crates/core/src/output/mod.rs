mod json;
mod yaml;

pub use json::to_json;
pub use yaml::to_yaml;

use crate::models::{SourceOutline, SplitReport};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Summary,
}

/// Format the elements of one scanned file
pub fn format_outline(outline: &SourceOutline, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => to_json(outline),
        OutputFormat::Yaml => to_yaml(outline),
        OutputFormat::Summary => Ok(format_outline_summary(outline)),
    }
}

/// Format the result of a split run
pub fn format_report(report: &SplitReport, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Yaml => to_yaml(report),
        OutputFormat::Summary => Ok(format_report_summary(report)),
    }
}

/// Numbered list of functions and classes, the numbers used for selections
pub fn format_movable_list(outline: &SourceOutline) -> String {
    let mut output = String::new();
    for (i, element) in outline.movable().enumerate() {
        output.push_str(&format!("{}. {} '{}'\n", i + 1, element.kind, element.name));
    }
    output
}

pub fn format_outline_summary(outline: &SourceOutline) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "File: {}\n\
         Lines: {}\n\
         Elements: {} (imports: {}, variables: {}, functions: {}, classes: {})\n\n",
        outline.path.display(),
        outline.line_count,
        outline.stats.total_elements,
        outline.stats.imports,
        outline.stats.variables,
        outline.stats.functions,
        outline.stats.classes,
    ));

    let shared: Vec<_> = outline.elements.iter().filter(|e| !e.kind.is_movable()).collect();
    if !shared.is_empty() {
        output.push_str("Shared (copied into every destination):\n");
        for element in shared {
            output.push_str(&format!(
                "  {} {} (line {})\n",
                element.kind, element.name, element.start_line
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!("Found {} functions/classes:\n", outline.stats.movable()));
    for (i, element) in outline.movable().enumerate() {
        output.push_str(&format!(
            "{}. {}: {} (lines {}-{})\n",
            i + 1,
            element.kind,
            element.name,
            element.start_line,
            element.end_line()
        ));
    }

    output
}

pub fn format_report_summary(report: &SplitReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Split Summary\n\
         =============\n\
         Source: {}\n\
         Default destination: {}\n\n",
        report.source.display(),
        report.default_destination
    ));

    for file in &report.files {
        let verb = if file.written { "Created" } else { "Would create" };
        output.push_str(&format!(
            "{}: {} ({} elements, {} bytes)\n",
            verb,
            file.path.display(),
            file.element_count,
            file.bytes
        ));
    }

    for failure in &report.write_failures {
        output.push_str(&format!("Error writing {}: {}\n", failure.label, failure.error));
    }

    for warning in &report.warnings {
        output.push_str(&format!("Warning: {}\n", warning));
    }

    for issue in &report.assignment_issues {
        match issue.index {
            Some(index) => output.push_str(&format!(
                "Element {} for {}: {}\n",
                index, issue.destination, issue.reason
            )),
            None => output.push_str(&format!("{}: {}\n", issue.destination, issue.reason)),
        }
    }

    output
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
