use crate::types::BuildOutcome;
use std::path::Path;
use std::process::Command;

/// Runs the build tool inside `dir` with no arguments and waits for it.
///
/// The child inherits stdio so its output shows up in the terminal. The exit
/// status is recorded, not judged; callers decide what a failure means.
pub fn run_build(program: &str, dir: &Path) -> BuildOutcome {
    log::info!("Running {} in {:?}", program, dir);

    match Command::new(program).current_dir(dir).status() {
        Ok(status) => {
            log::debug!("{} exited with {}", program, status);
            BuildOutcome::Finished {
                program: program.to_string(),
                code: status.code(),
            }
        }
        Err(err) => {
            log::warn!("Could not start {}: {}", program, err);
            BuildOutcome::SpawnFailed {
                program: program.to_string(),
                message: err.to_string(),
            }
        }
    }
}
