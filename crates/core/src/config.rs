//! Split configuration and plan files.
//!
//! A [`SplitConfig`] is normally built with its `with_*` methods. A
//! [`SplitPlan`] is the same information read from a TOML, JSON or YAML
//! file so a split can be repeated without answering prompts.

use crate::assign::parse_selection;
use crate::models::Selection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML plan: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Failed to parse JSON plan: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Failed to parse YAML plan: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Unsupported plan file extension: {0}")]
    UnsupportedPlan(String),
    #[error("No destination files specified")]
    NoDestinations,
    #[error("Destination label must not be empty")]
    EmptyLabel,
}

/// Configuration for one split run
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Source file, relative to `base_dir` unless absolute
    pub source: PathBuf,
    /// Directory relative paths are resolved against
    pub base_dir: PathBuf,
    /// Where destination files are written (defaults to `base_dir`)
    pub output_dir: Option<PathBuf>,
    /// Destination labels; the first is the default
    pub destinations: Vec<String>,
    /// Raw index selections per destination label
    pub selections: Vec<(String, String)>,
    /// Compute everything but skip writing files
    pub dry_run: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            base_dir: PathBuf::from("."),
            output_dir: None,
            destinations: vec![],
            selections: vec![],
            dry_run: false,
        }
    }
}

impl SplitConfig {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    pub fn with_base_dir(mut self, base_dir: PathBuf) -> Self {
        self.base_dir = base_dir;
        self
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<String>) -> Self {
        self.destinations = destinations;
        self
    }

    /// Add a raw selection (e.g. `"2, 4, 7"`) for a destination
    pub fn with_selection(mut self, label: impl Into<String>, raw: impl Into<String>) -> Self {
        self.selections.push((label.into(), raw.into()));
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.destinations.is_empty() {
            return Err(ConfigError::NoDestinations);
        }
        if self.destinations.iter().any(|d| d.trim().is_empty()) {
            return Err(ConfigError::EmptyLabel);
        }
        Ok(())
    }

    pub fn default_destination(&self) -> Option<&str> {
        self.destinations.first().map(String::as_str)
    }

    pub fn resolved_source(&self) -> PathBuf {
        resolve(&self.base_dir, &self.source)
    }

    pub fn resolved_output_dir(&self) -> PathBuf {
        match self.output_dir {
            Some(ref dir) => resolve(&self.base_dir, dir),
            None => self.base_dir.clone(),
        }
    }

    pub fn output_path(&self, label: &str) -> PathBuf {
        self.resolved_output_dir().join(label)
    }

    /// Parse the raw selections; repeated labels accumulate indices
    pub fn parsed_selections(&self) -> HashMap<String, Selection> {
        let mut parsed: HashMap<String, Selection> = HashMap::new();
        for (label, raw) in &self.selections {
            let selection = parse_selection(raw);
            let entry = parsed.entry(label.clone()).or_default();
            entry.indices.extend(selection.indices);
            entry.ignored.extend(selection.ignored);
        }
        parsed
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// A destination entry in a plan file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDestination {
    pub label: String,
    /// Raw selection, e.g. `"2, 4"`
    #[serde(default)]
    pub select: String,
}

/// Split plan read from disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPlan {
    pub source: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Default destination label
    pub default: String,
    #[serde(default, rename = "destination", alias = "destinations")]
    pub destinations: Vec<PlanDestination>,
}

impl SplitPlan {
    /// Load a plan, choosing the format from the file extension
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let content = fs::read_to_string(path)?;
        Self::parse(&content, &ext)
    }

    pub fn parse(content: &str, ext: &str) -> Result<Self, ConfigError> {
        let plan: SplitPlan = match ext {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            "yaml" | "yml" => serde_yaml::from_str(content)?,
            other => return Err(ConfigError::UnsupportedPlan(other.to_string())),
        };
        Ok(plan)
    }

    /// Turn the plan into a config whose relative paths resolve against `base_dir`
    pub fn into_config(self, base_dir: PathBuf) -> SplitConfig {
        let mut destinations = vec![self.default];
        let mut selections = Vec::new();
        for dest in self.destinations {
            if !dest.select.trim().is_empty() {
                selections.push((dest.label.clone(), dest.select));
            }
            destinations.push(dest.label);
        }

        let mut config = SplitConfig::new(self.source)
            .with_base_dir(base_dir)
            .with_destinations(destinations);
        config.selections = selections;
        if let Some(dir) = self.output_dir {
            config = config.with_output_dir(dir);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML_PLAN: &str = r#"
source = "game.js"
output_dir = "split"
default = "main.js"

[[destination]]
label = "ui.js"
select = "2, 4"

[[destination]]
label = "audio.js"
"#;

    #[test]
    fn test_default_config() {
        let config = SplitConfig::default();
        assert_eq!(config.base_dir, PathBuf::from("."));
        assert!(config.destinations.is_empty());
        assert!(!config.dry_run);
        assert!(matches!(config.validate(), Err(ConfigError::NoDestinations)));
    }

    #[test]
    fn test_config_builder() {
        let config = SplitConfig::new(PathBuf::from("game.js"))
            .with_base_dir(PathBuf::from("/work"))
            .with_output_dir(PathBuf::from("out"))
            .with_destinations(vec!["a.js".to_string(), "b.js".to_string()])
            .with_selection("b.js", "1, 3")
            .with_dry_run(true);

        assert!(config.validate().is_ok());
        assert_eq!(config.default_destination(), Some("a.js"));
        assert_eq!(config.resolved_source(), PathBuf::from("/work/game.js"));
        assert_eq!(config.output_path("b.js"), PathBuf::from("/work/out/b.js"));
        assert!(config.dry_run);
    }

    #[test]
    fn test_absolute_source_not_rebased() {
        let config = SplitConfig::new(PathBuf::from("/abs/game.js")).with_base_dir(PathBuf::from("/work"));
        assert_eq!(config.resolved_source(), PathBuf::from("/abs/game.js"));
        assert_eq!(config.resolved_output_dir(), PathBuf::from("/work"));
    }

    #[test]
    fn test_empty_label_rejected() {
        let config = SplitConfig::new(PathBuf::from("a.js")).with_destinations(vec!["  ".to_string()]);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyLabel)));
    }

    #[test]
    fn test_repeated_selection_accumulates() {
        let config = SplitConfig::new(PathBuf::from("a.js"))
            .with_selection("b.js", "1")
            .with_selection("b.js", "[3]");
        let parsed = config.parsed_selections();
        assert_eq!(parsed["b.js"].indices, vec![1, 3]);
    }

    #[test]
    fn test_plan_toml() {
        let plan = SplitPlan::parse(TOML_PLAN, "toml").unwrap();
        assert_eq!(plan.default, "main.js");
        assert_eq!(plan.destinations.len(), 2);
        assert_eq!(plan.destinations[1].select, "");

        let config = plan.into_config(PathBuf::from("/work"));
        assert_eq!(
            config.destinations,
            vec!["main.js".to_string(), "ui.js".to_string(), "audio.js".to_string()]
        );
        assert_eq!(config.selections, vec![("ui.js".to_string(), "2, 4".to_string())]);
        assert_eq!(config.resolved_output_dir(), PathBuf::from("/work/split"));
    }

    #[test]
    fn test_plan_json_and_yaml() {
        let json = r#"{"source": "game.js", "default": "main.js",
            "destinations": [{"label": "ui.js", "select": "1"}]}"#;
        let yaml = "source: game.js\ndefault: main.js\ndestination:\n  - label: ui.js\n    select: \"1\"\n";

        let from_json = SplitPlan::parse(json, "json").unwrap();
        let from_yaml = SplitPlan::parse(yaml, "yml").unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn test_plan_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(TOML_PLAN.as_bytes()).unwrap();

        let plan = SplitPlan::load(file.path()).unwrap();
        assert_eq!(plan.source, PathBuf::from("game.js"));
    }

    #[test]
    fn test_plan_unknown_extension() {
        assert!(matches!(
            SplitPlan::parse("", "ini"),
            Err(ConfigError::UnsupportedPlan(ext)) if ext == "ini"
        ));
    }
}
