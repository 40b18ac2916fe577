use crate::error::StepError;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Which assignment variant the user asked to package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    First,
    Second,
    Invalid,
}

impl Selection {
    /// Parses a raw prompt token. Anything that is not the integer 1 or 2
    /// (including non-numeric text and empty input) is `Invalid`.
    pub fn parse(token: &str) -> Self {
        match token.trim().parse::<i64>() {
            Ok(1) => Selection::First,
            Ok(2) => Selection::Second,
            Ok(_) | Err(_) => Selection::Invalid,
        }
    }

    pub fn folder_name(self) -> Option<&'static str> {
        match self {
            Selection::First => Some("first"),
            Selection::Second => Some("second"),
            Selection::Invalid => None,
        }
    }
}

/// How a directory entry is treated by the copy step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// `.c` or `.h`, matched case-sensitively on the suffix.
    Source,
    /// Any name starting with "makefile", ignoring case.
    Makefile,
    Other,
}

impl FileClass {
    pub fn classify(file_name: &str) -> Self {
        if file_name.ends_with(".c") || file_name.ends_with(".h") {
            FileClass::Source
        } else if file_name.to_lowercase().starts_with("makefile") {
            FileClass::Makefile
        } else {
            FileClass::Other
        }
    }

    pub fn is_copied(self) -> bool {
        !matches!(self, FileClass::Other)
    }
}

/// A directory entry selected for copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    // Name as stored on disk; used for the destination path.
    pub(crate) os_name: OsString,
    // Lossy rendering of `os_name`, for classification and output only.
    pub(crate) file_name: String,
    pub(crate) path: PathBuf,
    pub(crate) class: FileClass,
}

impl CandidateFile {
    pub(crate) fn new(os_name: OsString, path: PathBuf, class: FileClass) -> Self {
        let file_name = os_name.to_string_lossy().into_owned();
        Self {
            os_name,
            file_name,
            path,
            class,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn os_name(&self) -> &OsStr {
        &self.os_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn class(&self) -> FileClass {
        self.class
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirCreation {
    Created,
    AlreadyExists,
    Failed(StepError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    pub file_name: String,
    pub class: FileClass,
    /// Bytes written on success.
    pub result: Result<u64, StepError>,
}

impl CopyOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The build tool ran to completion. `code` is `None` when it was
    /// terminated by a signal.
    Finished { program: String, code: Option<i32> },
    SpawnFailed { program: String, message: String },
}

impl BuildOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, BuildOutcome::Finished { code: Some(0), .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    Moved { destination: PathBuf },
    ManualMoveRequired(StepError),
}

/// Everything one packaging run did, in step order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub selection: Selection,
    pub target_dir: PathBuf,
    pub dir_creation: DirCreation,
    /// Set when the working directory itself could not be listed.
    pub listing_error: Option<StepError>,
    pub copies: Vec<CopyOutcome>,
    /// `None` when the build step was skipped.
    pub build: Option<BuildOutcome>,
    /// `None` when the relocation step was skipped.
    pub relocation: Option<Relocation>,
}

impl RunSummary {
    pub fn copied(&self) -> impl Iterator<Item = &CopyOutcome> {
        self.copies.iter().filter(|c| c.is_ok())
    }

    pub fn failed_copies(&self) -> impl Iterator<Item = &CopyOutcome> {
        self.copies.iter().filter(|c| !c.is_ok())
    }

    /// A build that ran and did not exit with status 0, or could not start.
    pub fn build_failed(&self) -> bool {
        self.build.as_ref().is_some_and(|b| !b.succeeded())
    }
}
