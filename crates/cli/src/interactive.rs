//! Interactive menu session.
//!
//! The session owns the run loop and reads every answer from a generic
//! `BufRead`, so scripted input drives it the same way a terminal does.

use anyhow::Result;
use colored::Colorize;
use refucktor_core::{
    format_movable_list, output::format_report_summary, scan_file, SourceOutline, SplitConfig,
    SplitError, Splitter,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub struct Session<R, W> {
    input: R,
    out: W,
    base_dir: PathBuf,
    output_dir: Option<PathBuf>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, out: W, base_dir: PathBuf) -> Self {
        Self {
            input,
            out,
            base_dir,
            output_dir: None,
        }
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Show the menu until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "{}", "Ready for Refucktor".bold())?;
            writeln!(self.out, "1. Split js file into multiple files")?;
            writeln!(self.out, "X. Exit")?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };
            match choice.as_str() {
                "x" | "X" => break,
                "1" => self.split()?,
                _ => writeln!(self.out, "{}", "Invalid choice".yellow())?,
            }
        }

        writeln!(self.out, "{}", "Refucked!".green().bold())?;
        Ok(())
    }

    fn split(&mut self) -> Result<()> {
        writeln!(self.out, "Splitting js file into multiple files")?;

        let source = self
            .prompt("Enter the source JavaScript file path: ")?
            .unwrap_or_default();
        if source.is_empty() {
            writeln!(self.out, "{}", "No source file given".yellow())?;
            return Ok(());
        }

        let mut config = SplitConfig::new(PathBuf::from(source)).with_base_dir(self.base_dir.clone());
        if let Some(ref dir) = self.output_dir {
            config = config.with_output_dir(dir.clone());
        }

        let outline = match scan_file(&config.resolved_source()) {
            Ok(outline) => outline,
            Err(e) => return self.report_error(&e),
        };
        if outline.elements.is_empty() {
            writeln!(self.out, "{}", "No code elements found in the file".yellow())?;
            return Ok(());
        }

        self.show_movable(&outline)?;

        let destinations = self.read_destinations()?;
        if destinations.is_empty() {
            writeln!(self.out, "{}", "No destination files specified".yellow())?;
            return Ok(());
        }
        let default = destinations[0].clone();
        config = config.with_destinations(destinations.clone());

        writeln!(self.out, "\nAssign functions/classes to destination files:")?;
        writeln!(
            self.out,
            "Any function/class not assigned to another file will go to the default file: {}.",
            default.cyan()
        )?;
        let mut asked = vec![default.as_str()];
        for dest in &destinations {
            if asked.contains(&dest.as_str()) {
                continue;
            }
            asked.push(dest.as_str());
            let answer = self.prompt(&format!(
                "\nWhich functions/classes should be moved to '{}'? Enter numbers (e.g., 2, 4, 7) or press Enter to skip: ",
                dest
            ))?;
            if let Some(raw) = answer.filter(|a| !a.is_empty()) {
                config = config.with_selection(dest.clone(), raw);
            }
        }

        writeln!(self.out, "\nGenerating output files...")?;
        let result = Splitter::new(config).and_then(|s| s.run_with(&outline));
        match result {
            Ok(report) => {
                write!(self.out, "{}", format_report_summary(&report))?;
                Ok(())
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn show_movable(&mut self, outline: &SourceOutline) -> Result<()> {
        writeln!(
            self.out,
            "\nFound {} functions/classes:",
            outline.stats.movable().to_string().bold()
        )?;
        write!(self.out, "{}", format_movable_list(outline))?;
        Ok(())
    }

    fn read_destinations(&mut self) -> Result<Vec<String>> {
        writeln!(self.out, "\nEnter destination files (one per line, empty line to finish):")?;
        writeln!(
            self.out,
            "The first file you enter will be the DEFAULT file. Any function/class not assigned to another file will go there."
        )?;

        let mut destinations = Vec::new();
        while let Some(dest) = self.prompt("Destination file: ")? {
            if dest.is_empty() {
                break;
            }
            destinations.push(dest);
        }
        Ok(destinations)
    }

    fn report_error(&mut self, error: &SplitError) -> Result<()> {
        writeln!(self.out, "{} {}", "Error:".red().bold(), error)?;
        if let SplitError::SourceNotFound { nearby, .. } = error {
            if !nearby.is_empty() {
                writeln!(self.out, "JavaScript files next to it:")?;
                for path in nearby {
                    writeln!(self.out, "  - {}", path.display())?;
                }
            }
        }
        Ok(())
    }

    /// Print `message` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
