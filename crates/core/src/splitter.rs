use crate::assign::assign;
use crate::config::{ConfigError, SplitConfig};
use crate::emit::emit_group;
use crate::models::{
    ElementStats, ScanMetadata, SourceOutline, SplitReport, SplitWarning, WriteFailure, WrittenFile,
};
use crate::scanner::scan;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("File '{}' not found", .path.display())]
    SourceNotFound { path: PathBuf, nearby: Vec<PathBuf> },
    #[error("No code elements found in '{}'", .path.display())]
    NoElements { path: PathBuf },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Runs scan, assignment and emission for one source file
pub struct Splitter {
    config: SplitConfig,
}

impl Splitter {
    pub fn new(config: SplitConfig) -> Result<Self, SplitError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Read and scan the configured source, then split it
    pub fn run(&self) -> Result<SplitReport, SplitError> {
        let outline = scan_file(&self.config.resolved_source())?;
        self.run_with(&outline)
    }

    /// Split an already scanned source
    pub fn run_with(&self, outline: &SourceOutline) -> Result<SplitReport, SplitError> {
        let start = Instant::now();

        if outline.elements.is_empty() {
            return Err(SplitError::NoElements {
                path: outline.path.clone(),
            });
        }

        let default_destination = self
            .config
            .default_destination()
            .ok_or(ConfigError::NoDestinations)?
            .to_string();

        let assignment = assign(
            &outline.elements,
            &self.config.destinations,
            &self.config.parsed_selections(),
        );

        let mut report = SplitReport {
            source: outline.path.clone(),
            default_destination,
            stats: outline.stats.clone(),
            files: vec![],
            warnings: assignment.warnings,
            assignment_issues: assignment.issues,
            write_failures: vec![],
            metadata: ScanMetadata::default(),
        };

        let output_dir = self.config.resolved_output_dir();
        if !self.config.dry_run {
            if let Err(e) = fs::create_dir_all(&output_dir) {
                warn!(dir = %output_dir.display(), error = %e, "could not create output directory");
            }
        }

        for group in &assignment.groups {
            let Some(content) = emit_group(group) else {
                warn!(destination = %group.label, "no content assigned");
                report.warnings.push(SplitWarning::EmptyDestination {
                    label: group.label.clone(),
                });
                continue;
            };

            let path = output_dir.join(&group.label);
            let file = WrittenFile {
                label: group.label.clone(),
                path: path.clone(),
                bytes: content.len(),
                element_count: group.elements.len(),
                written: !self.config.dry_run,
            };

            if self.config.dry_run {
                report.files.push(file);
                continue;
            }

            match fs::write(&path, &content) {
                Ok(()) => {
                    info!(destination = %group.label, path = %path.display(), "created");
                    report.files.push(file);
                }
                Err(e) => {
                    warn!(destination = %group.label, error = %e, "error writing destination");
                    report.write_failures.push(WriteFailure {
                        label: group.label.clone(),
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }

        report.metadata.scan_duration_ms = start.elapsed().as_millis() as u64;
        Ok(report)
    }
}

/// Read one file and scan it into an outline
pub fn scan_file(path: &Path) -> Result<SourceOutline, SplitError> {
    let start = Instant::now();

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SplitError::SourceNotFound {
                path: path.to_path_buf(),
                nearby: nearby_scripts(path),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let elements = scan(&content);
    let stats = ElementStats::from_elements(&elements);

    let mut metadata = ScanMetadata::default();
    metadata.scan_duration_ms = start.elapsed().as_millis() as u64;

    Ok(SourceOutline {
        path: path.to_path_buf(),
        line_count: content.lines().count(),
        elements,
        stats,
        metadata,
    })
}

/// `.js` files next to a missing source, to hint at what was meant
fn nearby_scripts(path: &Path) -> Vec<PathBuf> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut found: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "js"))
        .collect();
    found.sort();
    found
}
