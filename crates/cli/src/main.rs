//! refucktor CLI
//!
//! Splits a JavaScript file into several files, either interactively or from
//! command-line flags / a plan file.

mod interactive;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use interactive::Session;
use refucktor_core::{
    format_outline, format_report, scan_file, OutputFormat, SplitConfig, SplitError, SplitPlan,
    SplitReport, Splitter,
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "refucktor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Split a JavaScript file into several files by top-level declaration")]
#[command(long_about = r#"
refucktor: split one JavaScript file into several.

The source is scanned line by line for top-level imports, variables,
functions and classes. Functions and classes are numbered; you choose which
numbers go to which destination file. Everything not chosen goes to the first
(default) destination. Imports and variables are copied into every file.

The scanner counts braces; it does not parse JavaScript. Braces inside
strings or regexes are counted too.

Examples:
  refucktor                                   # Interactive menu
  refucktor list game.js                      # Numbered functions/classes
  refucktor split game.js -d game.js -d ui.js -a ui.js=2,4
  refucktor split --plan split.toml --dry-run
"#)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory relative source and destination paths resolve against
    #[arg(long, global = true, default_value = ".")]
    pub base_dir: PathBuf,

    /// Show scanner and assignment diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive menu (default)
    Interactive {
        /// Directory destination files are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// List the elements found in a file
    List {
        /// File to scan
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Summary)]
        format: OutputFormatArg,
    },

    /// Split a file without prompting
    Split {
        /// Source file (taken from the plan when --plan is given)
        #[arg(required_unless_present = "plan")]
        file: Option<PathBuf>,

        /// Destination file; repeat for each, the first is the default
        #[arg(short, long = "dest", action = clap::ArgAction::Append, conflicts_with = "plan")]
        dest: Vec<String>,

        /// Assignment as LABEL=INDICES, e.g. ui.js=2,4
        #[arg(short, long = "assign", action = clap::ArgAction::Append, conflicts_with = "plan")]
        assign: Vec<String>,

        /// Plan file (.toml, .json, .yaml)
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Directory destination files are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Report what would be written without writing
        #[arg(long)]
        dry_run: bool,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Summary)]
        format: OutputFormatArg,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);
    if args.no_color || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match &args.command {
        None => run_interactive(None, &args),
        Some(Commands::Interactive { output_dir }) => run_interactive(output_dir.clone(), &args),
        Some(Commands::List { file, format }) => run_list(file, format.clone(), &args),
        Some(Commands::Split {
            file,
            dest,
            assign,
            plan,
            output_dir,
            dry_run,
            format,
        }) => {
            let mut config = match plan {
                Some(plan) => config_from_plan(plan, file.as_deref(), &args)?,
                None => config_from_flags(file.as_deref(), dest, assign, &args)?,
            };
            if let Some(dir) = output_dir {
                config = config.with_output_dir(dir.clone());
            }
            config = config.with_dry_run(*dry_run);
            run_split(config, format.clone(), &args)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_interactive(output_dir: Option<PathBuf>, args: &Args) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(stdin.lock(), stdout.lock(), args.base_dir.clone())
        .with_output_dir(output_dir)
        .run()
}

fn run_list(file: &Path, format: OutputFormatArg, args: &Args) -> Result<()> {
    let path = resolve(&args.base_dir, file);
    let outline = scan_file(&path).map_err(report_missing)?;

    let output = format_outline(&outline, format.into())?;
    println!("{}", output);
    Ok(())
}

fn run_split(config: SplitConfig, format: OutputFormatArg, args: &Args) -> Result<()> {
    let spinner = if args.verbose && atty::is(atty::Stream::Stderr) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Splitting {}...", config.source.display()));
        Some(pb)
    } else {
        None
    };

    let splitter = Splitter::new(config)?;
    let report = splitter.run().map_err(report_missing)?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Split into {} files in {}ms",
            report.files.len(),
            report.metadata.scan_duration_ms
        ));
    }

    let format: OutputFormat = format.into();
    let output = format_report(&report, format)?;
    if format == OutputFormat::Summary {
        print_summary(&report, &output);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn print_summary(report: &SplitReport, output: &str) {
    for line in output.lines() {
        if line.starts_with("Error") {
            println!("{}", line.red());
        } else if line.starts_with("Warning") || line.starts_with("Element") {
            println!("{}", line.yellow());
        } else if line.starts_with("Created") {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
    if report.is_clean() && !report.files.is_empty() {
        println!("{}", "Refucked!".green().bold());
    }
}

fn config_from_flags(
    file: Option<&Path>,
    dest: &[String],
    assign: &[String],
    args: &Args,
) -> Result<SplitConfig> {
    let Some(file) = file else {
        bail!("a source file is required without --plan");
    };
    if dest.is_empty() {
        bail!("at least one --dest is required");
    }

    let mut config = SplitConfig::new(file.to_path_buf())
        .with_base_dir(args.base_dir.clone())
        .with_destinations(dest.to_vec());

    for entry in assign {
        let (label, indices) = entry
            .split_once('=')
            .with_context(|| format!("invalid --assign '{}', expected LABEL=INDICES", entry))?;
        config = config.with_selection(label.trim(), indices.trim());
    }

    Ok(config)
}

fn config_from_plan(plan_path: &Path, file: Option<&Path>, args: &Args) -> Result<SplitConfig> {
    let plan_path = resolve(&args.base_dir, plan_path);
    let mut plan = SplitPlan::load(&plan_path)
        .with_context(|| format!("failed to load plan {}", plan_path.display()))?;

    // A source given on the command line is relative to where it was typed.
    if let Some(file) = file {
        let file = resolve(&args.base_dir, file);
        plan.source = if file.is_absolute() {
            file
        } else {
            std::env::current_dir()
                .context("failed to read current directory")?
                .join(file)
        };
    }

    // Paths in a plan are relative to the plan file.
    let base_dir = plan_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| args.base_dir.clone());

    Ok(plan.into_config(base_dir))
}

fn report_missing(error: SplitError) -> anyhow::Error {
    if let SplitError::SourceNotFound { ref nearby, .. } = error {
        if !nearby.is_empty() {
            eprintln!("JavaScript files next to it:");
            for path in nearby {
                eprintln!("  - {}", path.display());
            }
        }
    }
    error.into()
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(base: &Path) -> Args {
        Args {
            command: None,
            base_dir: base.to_path_buf(),
            verbose: false,
            no_color: true,
        }
    }

    #[test]
    fn test_cli_parses_split() {
        let args = Args::try_parse_from([
            "refucktor", "split", "game.js", "-d", "game.js", "-d", "ui.js", "-a", "ui.js=2,4",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Split { file, dest, assign, .. }) => {
                assert_eq!(file, Some(PathBuf::from("game.js")));
                assert_eq!(dest, vec!["game.js".to_string(), "ui.js".to_string()]);
                assert_eq!(assign, vec!["ui.js=2,4".to_string()]);
            }
            _ => panic!("expected split command"),
        }
    }

    #[test]
    fn test_plan_conflicts_with_dest() {
        let result = Args::try_parse_from(["refucktor", "split", "--plan", "p.toml", "-d", "a.js"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_flags() {
        let dir = TempDir::new().unwrap();
        let config = config_from_flags(
            Some(Path::new("game.js")),
            &["main.js".to_string(), "ui.js".to_string()],
            &["ui.js = 2, 4".to_string()],
            &args(dir.path()),
        )
        .unwrap();

        assert_eq!(config.default_destination(), Some("main.js"));
        assert_eq!(config.parsed_selections()["ui.js"].indices, vec![2, 4]);
    }

    #[test]
    fn test_bad_assign_rejected() {
        let dir = TempDir::new().unwrap();
        let result = config_from_flags(
            Some(Path::new("game.js")),
            &["main.js".to_string()],
            &["ui.js:2".to_string()],
            &args(dir.path()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_plan_paths_relative_to_plan() {
        let dir = TempDir::new().unwrap();
        let plans = dir.path().join("plans");
        fs::create_dir(&plans).unwrap();
        fs::write(
            plans.join("split.yaml"),
            "source: game.js\ndefault: main.js\ndestination:\n  - label: ui.js\n    select: \"1\"\n",
        )
        .unwrap();

        let config = config_from_plan(Path::new("plans/split.yaml"), None, &args(dir.path())).unwrap();
        assert_eq!(config.resolved_source(), plans.join("game.js"));
        assert_eq!(config.destinations, vec!["main.js".to_string(), "ui.js".to_string()]);

        let config = config_from_plan(
            Path::new("plans/split.yaml"),
            Some(Path::new("other.js")),
            &args(dir.path()),
        )
        .unwrap();
        assert_eq!(config.resolved_source(), dir.path().join("other.js"));
        assert_eq!(config.resolved_output_dir(), plans);
    }
}
