use crate::config::Config;
use crate::packager::Progress;
use crate::types::{BuildOutcome, DirCreation, FileClass, Relocation, RunSummary};
use console::{Style, Term};
use std::io::{self, Write};
use std::path::Path;

pub struct DisplayManager {
    term: Term,
    // Predefined styles for consistency
    pub error_style: Style,
    pub warning_style: Style,
    pub success_style: Style,
    pub filename_style: Style,
    pub metadata_style: Style,
}

impl DisplayManager {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            error_style: Style::new().red().bold(),
            warning_style: Style::new().yellow(),
            success_style: Style::new().green(),
            filename_style: Style::new().cyan().bold(),
            metadata_style: Style::new().dim(),
        }
    }

    pub fn print_working_dir(&self, dir: &Path) -> io::Result<()> {
        let mut out = self.term.clone();
        writeln!(
            out,
            "The current working directory is {}",
            self.filename_style.apply_to(dir.display())
        )
    }

    /// Print one step result as it happens
    pub fn print_progress(&self, config: &Config, progress: Progress<'_>) -> io::Result<()> {
        let mut out = self.term.clone();

        match progress {
            Progress::TargetDir { path, outcome } => {
                writeln!(
                    out,
                    "new path = {}",
                    self.filename_style.apply_to(path.display())
                )?;
                match outcome {
                    DirCreation::Created => writeln!(
                        out,
                        "  {} Successfully created the directory {}",
                        self.success_style.apply_to("✓"),
                        config.display_path(path).display()
                    )?,
                    DirCreation::AlreadyExists => writeln!(
                        out,
                        "  {} Directory path already exists {}",
                        self.metadata_style.apply_to("•"),
                        config.display_path(path).display()
                    )?,
                    DirCreation::Failed(err) => writeln!(
                        out,
                        "  {} {}",
                        self.error_style.apply_to("✗"),
                        self.error_style.apply_to(err)
                    )?,
                }
            }
            Progress::ListingFailed(err) => {
                writeln!(
                    out,
                    "  {} {}",
                    self.error_style.apply_to("✗"),
                    self.error_style.apply_to(err)
                )?;
            }
            Progress::Copied(copy) => {
                let tag = match copy.class {
                    FileClass::Source => "source",
                    FileClass::Makefile => "makefile",
                    FileClass::Other => "other",
                };
                match &copy.result {
                    Ok(bytes) => writeln!(
                        out,
                        "  {} {} {}",
                        self.success_style.apply_to("✓"),
                        self.filename_style.apply_to(&copy.file_name),
                        self.metadata_style
                            .apply_to(format!("copied ({}, {} bytes)", tag, bytes))
                    )?,
                    Err(err) => writeln!(
                        out,
                        "  {} {} {}",
                        self.error_style.apply_to("✗"),
                        self.filename_style.apply_to(&copy.file_name),
                        self.error_style.apply_to(format!("copy failed: {}", err))
                    )?,
                }
            }
            Progress::BuildStarting { program, dir } => {
                writeln!(
                    out,
                    "\n{} {} in {}",
                    self.metadata_style.apply_to("Running"),
                    self.filename_style.apply_to(program),
                    config.display_path(dir).display()
                )?;
                writeln!(out, "{}", self.metadata_style.apply_to("-".repeat(40)))?;
            }
            Progress::Built(build) => {
                writeln!(out, "{}", self.metadata_style.apply_to("-".repeat(40)))?;
                self.write_build_line(&mut out, build)?;
            }
            Progress::Relocated(relocation) => match relocation {
                Relocation::Moved { destination } => writeln!(
                    out,
                    "{} Folder {} moved to {}",
                    self.success_style.apply_to("✓"),
                    config.project_folder,
                    self.filename_style
                        .apply_to(config.display_path(destination).display())
                )?,
                Relocation::ManualMoveRequired(err) => {
                    writeln!(
                        out,
                        "{} Move manually the {}",
                        self.warning_style.apply_to("⚠"),
                        self.warning_style.apply_to(&config.project_folder)
                    )?;
                    writeln!(out, "   {}", self.metadata_style.apply_to(err))?;
                }
            },
        }
        Ok(())
    }

    fn write_build_line(&self, out: &mut Term, build: &BuildOutcome) -> io::Result<()> {
        match build {
            BuildOutcome::Finished {
                program,
                code: Some(0),
            } => writeln!(
                out,
                "{} {} finished",
                self.success_style.apply_to("✓"),
                program
            ),
            BuildOutcome::Finished {
                program,
                code: Some(code),
            } => writeln!(
                out,
                "{} {} exited with status {}",
                self.warning_style.apply_to("⚠"),
                program,
                self.warning_style.apply_to(code)
            ),
            BuildOutcome::Finished {
                program,
                code: None,
            } => writeln!(
                out,
                "{} {} was terminated by a signal",
                self.warning_style.apply_to("⚠"),
                program
            ),
            BuildOutcome::SpawnFailed { program, message } => writeln!(
                out,
                "{} could not run {}: {}",
                self.error_style.apply_to("✗"),
                program,
                self.error_style.apply_to(message)
            ),
        }
    }

    /// Print the closing tally followed by the completion message
    pub fn print_summary(&self, config: &Config, summary: &RunSummary) -> io::Result<()> {
        let mut out = self.term.clone();

        writeln!(out, "\n{}", self.metadata_style.apply_to("=".repeat(40)))?;
        writeln!(
            out,
            "{} {}",
            self.metadata_style.apply_to("Variant:"),
            self.filename_style
                .apply_to(summary.selection.folder_name().unwrap_or("invalid"))
        )?;
        writeln!(
            out,
            "{} {}",
            self.metadata_style.apply_to("Target:"),
            self.filename_style
                .apply_to(config.display_path(&summary.target_dir).display())
        )?;

        let copied = summary.copied().count();
        let failed = summary.failed_copies().count();
        let copy_style = if failed == 0 {
            &self.success_style
        } else {
            &self.warning_style
        };
        writeln!(
            out,
            "{} {}",
            self.metadata_style.apply_to("Files:"),
            copy_style.apply_to(format!("{} copied, {} failed", copied, failed))
        )?;

        let build = match &summary.build {
            None => self.metadata_style.apply_to("skipped".to_string()),
            Some(b) if b.succeeded() => self.success_style.apply_to("ok".to_string()),
            Some(BuildOutcome::Finished { code: Some(code), .. }) => {
                self.warning_style.apply_to(format!("exit status {}", code))
            }
            Some(_) => self.warning_style.apply_to("failed".to_string()),
        };
        writeln!(out, "{} {}", self.metadata_style.apply_to("Build:"), build)?;

        let relocation = match &summary.relocation {
            None => self.metadata_style.apply_to("skipped".to_string()),
            Some(Relocation::Moved { .. }) => self.success_style.apply_to("moved".to_string()),
            Some(Relocation::ManualMoveRequired(_)) => {
                self.warning_style.apply_to("manual move needed".to_string())
            }
        };
        writeln!(
            out,
            "{} {}",
            self.metadata_style.apply_to("Relocation:"),
            relocation
        )?;
        writeln!(out, "{}", self.metadata_style.apply_to("=".repeat(40)))?;
        Ok(())
    }

    pub fn print_done(&self) -> io::Result<()> {
        let mut out = self.term.clone();
        writeln!(out, "{}", self.success_style.apply_to("Done!"))
    }
}
