use crate::error::StepError;
use crate::types::Relocation;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Moves `project` into `autograder`, ending up at `autograder/<project name>`.
///
/// The autograder folder must already exist and be readable; nothing is
/// created on its behalf. An existing destination is never merged into.
pub fn relocate_project(project: &Path, autograder: &Path) -> Relocation {
    if let Err(err) = fs::read_dir(autograder) {
        return Relocation::ManualMoveRequired(StepError::AutograderMissing {
            path: autograder.to_path_buf(),
            message: err.to_string(),
        });
    }

    let Some(name) = project.file_name() else {
        return Relocation::ManualMoveRequired(StepError::Move {
            from: project.to_path_buf(),
            to: autograder.to_path_buf(),
            message: "project path has no folder name".to_string(),
        });
    };
    let destination = autograder.join(name);

    if destination.exists() {
        return Relocation::ManualMoveRequired(StepError::DestinationExists { path: destination });
    }

    match move_dir(project, &destination) {
        Ok(()) => Relocation::Moved { destination },
        Err(err) => Relocation::ManualMoveRequired(StepError::Move {
            from: project.to_path_buf(),
            to: destination,
            message: err.to_string(),
        }),
    }
}

/// `rename`, falling back to a recursive copy plus delete across devices.
fn move_dir(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices && src.is_dir() => {
            log::debug!("Rename of {:?} crosses devices, falling back to copy", src);
            copy_then_remove(src, dest)
        }
        Err(err) => Err(err),
    }
}

/// Copies `src` to `dest` and removes `src`. A failed copy removes the
/// partial `dest` so a later run is not blocked by it.
fn copy_then_remove(src: &Path, dest: &Path) -> io::Result<()> {
    if let Err(err) = copy_tree(src, dest) {
        if let Err(cleanup) = fs::remove_dir_all(dest) {
            log::warn!("Could not remove partial copy {:?}: {}", dest, cleanup);
        }
        return Err(err);
    }

    fs::remove_dir_all(src).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("copied, but could not remove {:?}: {}", src, err),
        )
    })
}

fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
