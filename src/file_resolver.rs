// src/file_resolver.rs

use crate::error::StepError;
use crate::types::{CandidateFile, FileClass};
use std::path::Path;
use walkdir::WalkDir;

/// Lists the direct entries of `dir` that the copy step should pick up.
///
/// The listing is not recursive and is ordered by file name. Only a failure
/// to open `dir` itself is an error; unreadable individual entries are
/// logged and skipped.
pub fn resolve_candidates(dir: &Path) -> Result<Vec<CandidateFile>, StepError> {
    let mut candidates = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(StepError::ReadDir {
                    path: dir.to_path_buf(),
                    message: err.to_string(),
                });
            }
            Err(err) => {
                log::warn!("Skipping unreadable entry in {:?}: {}", dir, err);
                continue;
            }
        };

        let os_name = entry.file_name().to_os_string();
        let class = FileClass::classify(&os_name.to_string_lossy());
        if !class.is_copied() {
            log::debug!("skip {:?}", os_name);
            continue;
        }

        candidates.push(CandidateFile::new(os_name, entry.into_path(), class));
    }

    Ok(candidates)
}
