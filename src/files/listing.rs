//! Enumerate uploadable media under the allowed root.

use super::{formats, guard};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Supported media files below `root`, keyed by parent directory.
///
/// Directory symlinks are not followed. File symlinks are kept only when
/// their target is still inside `root`.
pub fn list_media_files(root: &Path) -> BTreeMap<String, Vec<String>> {
    let roots = [root.to_path_buf()];
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                None
            }
        });

    for entry in walker {
        let path = entry.path();
        if !path.is_file() || !formats::is_supported(path) {
            continue;
        }
        if !guard::is_allowed(path, &roots) {
            debug!(path = %path.display(), "Skipping file outside allowed root");
            continue;
        }

        let parent = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(PathBuf::new);
        grouped
            .entry(parent.to_string_lossy().into_owned())
            .or_default()
            .push(entry.file_name().to_string_lossy().into_owned());
    }

    grouped
}
