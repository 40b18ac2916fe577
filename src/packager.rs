use crate::builder::run_build;
use crate::config::Config;
use crate::error::StepError;
use crate::file_resolver::resolve_candidates;
use crate::relocate::relocate_project;
use crate::types::{
    BuildOutcome, CandidateFile, CopyOutcome, DirCreation, Relocation, RunSummary, Selection,
};
use std::fs;
use std::io;
use std::path::Path;

/// A step result, reported as soon as it is known.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    TargetDir {
        path: &'a Path,
        outcome: &'a DirCreation,
    },
    ListingFailed(&'a StepError),
    Copied(&'a CopyOutcome),
    BuildStarting {
        program: &'a str,
        dir: &'a Path,
    },
    Built(&'a BuildOutcome),
    Relocated(&'a Relocation),
}

/// Runs every packaging step for `selection` in order.
///
/// Returns `None` for an invalid selection, in which case nothing on disk
/// has been touched. Otherwise every step runs regardless of how the
/// previous one went, and all outcomes end up in the summary.
pub fn package<F>(config: &Config, selection: Selection, mut report: F) -> Option<RunSummary>
where
    F: FnMut(Progress<'_>),
{
    let target_dir = config.target_dir(selection)?;

    let dir_creation = create_target_dir(&target_dir);
    report(Progress::TargetDir {
        path: &target_dir,
        outcome: &dir_creation,
    });

    let mut listing_error = None;
    let mut copies = Vec::new();
    match resolve_candidates(&config.working_dir) {
        Ok(candidates) => {
            for candidate in &candidates {
                let outcome = copy_candidate(candidate, &target_dir);
                report(Progress::Copied(&outcome));
                copies.push(outcome);
            }
        }
        Err(err) => {
            report(Progress::ListingFailed(&err));
            listing_error = Some(err);
        }
    }

    let build = if config.run_build {
        report(Progress::BuildStarting {
            program: &config.build_program,
            dir: &target_dir,
        });
        let outcome = run_build(&config.build_program, &target_dir);
        report(Progress::Built(&outcome));
        Some(outcome)
    } else {
        log::info!("Build step skipped");
        None
    };

    let relocation = if config.relocate {
        let outcome = relocate_project(&config.project_dir(), &config.autograder_dir());
        report(Progress::Relocated(&outcome));
        Some(outcome)
    } else {
        log::info!("Relocation step skipped");
        None
    };

    Some(RunSummary {
        selection,
        target_dir,
        dir_creation,
        listing_error,
        copies,
        build,
        relocation,
    })
}

/// Creates `dir` and its parents. An existing directory counts as success.
pub fn create_target_dir(dir: &Path) -> DirCreation {
    if dir.is_dir() {
        return DirCreation::AlreadyExists;
    }
    match fs::create_dir_all(dir) {
        Ok(()) => DirCreation::Created,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => {
            DirCreation::AlreadyExists
        }
        Err(err) => {
            log::warn!("Failed to create {:?}: {}", dir, err);
            DirCreation::Failed(StepError::create_dir(dir.to_path_buf(), &err))
        }
    }
}

/// Copies one candidate into `target_dir` under the same name.
pub fn copy_candidate(candidate: &CandidateFile, target_dir: &Path) -> CopyOutcome {
    let destination = target_dir.join(candidate.os_name());
    let result = fs::copy(candidate.path(), &destination).map_err(|err| {
        log::warn!("Copy of {} failed: {}", candidate.file_name(), err);
        StepError::copy(candidate.path().to_path_buf(), destination.clone(), &err)
    });

    CopyOutcome {
        file_name: candidate.file_name().to_string(),
        class: candidate.class(),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileClass;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn offline_config(dir: &Path) -> Config {
        let mut config = Config::with_working_dir(dir.to_path_buf());
        config.run_build = false;
        config
    }

    fn write_files(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), format!("// {name}\n")).unwrap();
        }
    }

    #[test]
    fn invalid_selection_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        write_files(tmp.path(), &["first.c"]);
        let mut events = 0;

        let summary = package(&offline_config(tmp.path()), Selection::Invalid, |_| events += 1);

        assert!(summary.is_none());
        assert_eq!(events, 0);
        assert!(!tmp.path().join("pa5").exists());
    }

    #[test]
    fn first_selection_copies_matching_files() {
        let tmp = TempDir::new().unwrap();
        write_files(
            tmp.path(),
            &["first.c", "first.h", "Makefile", "MAKEFILE.txt", "notes.txt", "run.sh"],
        );
        let mut config = offline_config(tmp.path());
        config.relocate = false;

        let summary = package(&config, Selection::First, |_| {}).unwrap();

        let target = tmp.path().join("pa5/first");
        assert_eq!(summary.target_dir, target);
        assert_eq!(summary.dir_creation, DirCreation::Created);
        assert_eq!(summary.copied().count(), 4);
        for name in ["first.c", "first.h", "Makefile", "MAKEFILE.txt"] {
            assert_eq!(
                fs::read_to_string(target.join(name)).unwrap(),
                format!("// {name}\n")
            );
        }
        assert!(!target.join("notes.txt").exists());
        assert!(!target.join("run.sh").exists());
        assert!(summary.build.is_none());
        assert!(summary.relocation.is_none());
    }

    #[test]
    fn second_selection_targets_second_folder() {
        let tmp = TempDir::new().unwrap();
        write_files(tmp.path(), &["second.c", "second.h"]);
        let mut config = offline_config(tmp.path());
        config.relocate = false;

        let summary = package(&config, Selection::Second, |_| {}).unwrap();

        assert_eq!(summary.target_dir, tmp.path().join("pa5/second"));
        assert!(tmp.path().join("pa5/second/second.c").is_file());
        assert!(tmp.path().join("pa5/second/second.h").is_file());
        assert!(!tmp.path().join("pa5/first").exists());
    }

    #[test]
    fn no_matching_files_still_completes() {
        let tmp = TempDir::new().unwrap();
        write_files(tmp.path(), &["README.md"]);
        let mut config = offline_config(tmp.path());
        config.relocate = false;

        let summary = package(&config, Selection::First, |_| {}).unwrap();

        assert!(summary.copies.is_empty());
        assert!(tmp.path().join("pa5/first").is_dir());
    }

    #[test]
    fn rerun_with_existing_target_still_copies() {
        let tmp = TempDir::new().unwrap();
        write_files(tmp.path(), &["first.c"]);
        let mut config = offline_config(tmp.path());
        config.relocate = false;

        package(&config, Selection::First, |_| {}).unwrap();
        fs::write(tmp.path().join("first.c"), "updated").unwrap();
        let summary = package(&config, Selection::First, |_| {}).unwrap();

        assert_eq!(summary.dir_creation, DirCreation::AlreadyExists);
        assert_eq!(summary.copied().count(), 1);
        assert_eq!(
            fs::read_to_string(tmp.path().join("pa5/first/first.c")).unwrap(),
            "updated"
        );
    }

    #[test]
    fn one_failed_copy_does_not_stop_the_rest() {
        let tmp = TempDir::new().unwrap();
        write_files(tmp.path(), &["a.c", "z.h"]);
        // A directory with a matching name cannot be copied as a file.
        fs::create_dir(tmp.path().join("m.c")).unwrap();
        let mut config = offline_config(tmp.path());
        config.relocate = false;

        let summary = package(&config, Selection::First, |_| {}).unwrap();

        let failed: Vec<&str> = summary
            .failed_copies()
            .map(|c| c.file_name.as_str())
            .collect();
        assert_eq!(failed, vec!["m.c"]);
        assert_eq!(summary.copied().count(), 2);
        assert!(tmp.path().join("pa5/first/a.c").is_file());
        assert!(tmp.path().join("pa5/first/z.h").is_file());
    }

    #[test]
    fn failed_target_creation_is_recorded_and_run_continues() {
        let tmp = TempDir::new().unwrap();
        write_files(tmp.path(), &["first.c"]);
        // A plain file where the project folder should be blocks creation.
        fs::write(tmp.path().join("pa5"), "not a directory").unwrap();
        let mut config = offline_config(tmp.path());
        config.relocate = false;

        let summary = package(&config, Selection::First, |_| {}).unwrap();

        assert!(matches!(
            summary.dir_creation,
            DirCreation::Failed(StepError::CreateDir { .. })
        ));
        assert_eq!(summary.failed_copies().count(), 1);
    }

    #[test]
    fn relocates_into_existing_autograder() {
        let tmp = TempDir::new().unwrap();
        write_files(tmp.path(), &["first.c", "Makefile"]);
        fs::create_dir(tmp.path().join("pa5_autograter")).unwrap();

        let summary = package(&offline_config(tmp.path()), Selection::First, |_| {}).unwrap();

        assert_eq!(
            summary.relocation,
            Some(Relocation::Moved {
                destination: tmp.path().join("pa5_autograter/pa5")
            })
        );
        assert!(!tmp.path().join("pa5").exists());
        assert!(tmp.path().join("pa5_autograter/pa5/first/first.c").is_file());
        assert!(tmp.path().join("pa5_autograter/pa5/first/Makefile").is_file());
    }

    #[test]
    fn missing_autograder_asks_for_manual_move() {
        let tmp = TempDir::new().unwrap();
        write_files(tmp.path(), &["first.c"]);

        let summary = package(&offline_config(tmp.path()), Selection::First, |_| {}).unwrap();

        assert!(matches!(
            summary.relocation,
            Some(Relocation::ManualMoveRequired(StepError::AutograderMissing { .. }))
        ));
        assert!(tmp.path().join("pa5/first/first.c").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn build_runs_in_target_dir_and_failure_is_only_recorded() {
        let tmp = TempDir::new().unwrap();
        write_files(tmp.path(), &["first.c"]);
        let mut config = Config::with_working_dir(tmp.path().to_path_buf());
        config.build_program = "false".to_string();
        config.relocate = false;

        let mut build_dir: Option<PathBuf> = None;
        let summary = package(&config, Selection::First, |event| {
            if let Progress::BuildStarting { dir, .. } = event {
                build_dir = Some(dir.to_path_buf());
            }
        })
        .unwrap();

        assert_eq!(build_dir, Some(tmp.path().join("pa5/first")));
        assert!(summary.build_failed());
        assert_eq!(summary.copied().count(), 1);
    }

    #[test]
    fn progress_is_reported_in_step_order() {
        let tmp = TempDir::new().unwrap();
        write_files(tmp.path(), &["a.c", "b.h"]);
        let mut steps = Vec::new();

        package(&offline_config(tmp.path()), Selection::First, |event| {
            steps.push(match event {
                Progress::TargetDir { .. } => "dir",
                Progress::ListingFailed(_) => "listing",
                Progress::Copied(_) => "copy",
                Progress::BuildStarting { .. } | Progress::Built(_) => "build",
                Progress::Relocated(_) => "move",
            });
        })
        .unwrap();

        assert_eq!(steps, vec!["dir", "copy", "copy", "move"]);
    }

    #[test]
    fn copy_candidate_reports_bytes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("first.c"), "12345").unwrap();
        let target = tmp.path().join("out");
        fs::create_dir(&target).unwrap();
        let candidate =
            CandidateFile::new("first.c".into(), tmp.path().join("first.c"), FileClass::Source);

        let outcome = copy_candidate(&candidate, &target);

        assert_eq!(outcome.result, Ok(5));
        assert_eq!(outcome.class, FileClass::Source);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_name_is_copied_byte_for_byte() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        let raw = OsStr::from_bytes(b"caf\xe9.c");
        fs::write(tmp.path().join(raw), "int x;").unwrap();
        let mut config = offline_config(tmp.path());
        config.relocate = false;

        let summary = package(&config, Selection::First, |_| {}).unwrap();

        assert_eq!(summary.copied().count(), 1);
        let target = tmp.path().join("pa5/first");
        assert_eq!(fs::read_to_string(target.join(raw)).unwrap(), "int x;");
        let names: Vec<_> = fs::read_dir(&target)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![raw.to_os_string()]);
    }
}
