use crate::error::AppError;
use crate::types::Selection;
use std::env;
use std::path::{Path, PathBuf};

pub const PROJECT_FOLDER: &str = "pa5";
pub const AUTOGRADER_FOLDER: &str = "pa5_autograter";
pub const BUILD_PROGRAM: &str = "make";

#[derive(Debug, Clone)]
pub struct Config {
    pub working_dir: PathBuf,
    pub project_folder: String,
    pub autograder_folder: String,
    pub build_program: String,
    pub run_build: bool,
    pub relocate: bool,
    pub strict_build: bool,
}

impl Config {
    /// Creates a new Config instance.
    ///
    /// The working directory is captured once here and never re-read.
    pub fn new() -> Result<Self, AppError> {
        let working_dir = env::current_dir().map_err(|io_err| {
            AppError::IoError(format!(
                "Failed to determine current working directory: {}",
                io_err
            ))
        })?;
        Ok(Config::with_working_dir(working_dir))
    }

    pub fn with_working_dir(working_dir: PathBuf) -> Self {
        Config {
            working_dir,
            project_folder: PROJECT_FOLDER.to_string(),
            autograder_folder: AUTOGRADER_FOLDER.to_string(),
            build_program: BUILD_PROGRAM.to_string(),
            run_build: true,
            relocate: true,
            strict_build: false,
        }
    }

    /// `<cwd>/pa5/<first|second>`, or `None` for an invalid selection.
    pub fn target_dir(&self, selection: Selection) -> Option<PathBuf> {
        selection
            .folder_name()
            .map(|name| self.project_dir().join(name))
    }

    pub fn project_dir(&self) -> PathBuf {
        self.working_dir.join(&self.project_folder)
    }

    pub fn autograder_dir(&self) -> PathBuf {
        self.working_dir.join(&self.autograder_folder)
    }

    /// Path relative to the working directory, for display.
    pub fn display_path(&self, path: &Path) -> PathBuf {
        pathdiff::diff_paths(path, &self.working_dir).unwrap_or_else(|| path.to_path_buf())
    }
}
