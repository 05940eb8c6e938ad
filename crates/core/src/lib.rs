//! Refucktor Core Library
//!
//! Splits one JavaScript source file into several files by regrouping its
//! top-level declarations.
//!
//! The pipeline has three stages:
//!
//! - **scan**: a line/brace-depth scanner groups lines into elements
//!   (imports, variables, functions, classes). It is a heuristic, not a
//!   JavaScript parser.
//! - **assign**: functions and classes are partitioned across destinations;
//!   imports and variables are copied into each one.
//! - **emit**: each destination group is written back out, imports first.
//!
//! # Example
//!
//! ```no_run
//! use refucktor_core::{SplitConfig, Splitter};
//! use std::path::PathBuf;
//!
//! let config = SplitConfig::new(PathBuf::from("game.js"))
//!     .with_destinations(vec!["game.js".into(), "ui.js".into()])
//!     .with_selection("ui.js", "2, 4");
//! let report = Splitter::new(config).unwrap().run().unwrap();
//! println!("{} files written", report.files.len());
//! ```

pub mod assign;
pub mod config;
pub mod emit;
pub mod extract;
pub mod models;
pub mod output;
pub mod scanner;
pub mod splitter;

// Re-exports for convenience
pub use assign::{assign, parse_selection, Assignment};
pub use config::{ConfigError, PlanDestination, SplitConfig, SplitPlan};
pub use emit::emit_group;
pub use models::*;
pub use output::{
    format_movable_list, format_outline, format_report, FormatError, OutputFormat,
};
pub use scanner::{scan, DeclarationScanner};
pub use splitter::{scan_file, SplitError, Splitter};
