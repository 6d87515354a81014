//! Allowed-root containment checks.

use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Check whether `path` resolves to one of `roots` or to something below it.
///
/// Symlinks and `..` segments are resolved before comparing. Any resolution
/// failure is logged and treated as not allowed.
pub fn is_allowed(path: &Path, roots: &[PathBuf]) -> bool {
    let resolved = match resolve(path) {
        Ok(p) => p,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Path could not be resolved");
            return false;
        }
    };

    roots.iter().any(|root| match root.canonicalize() {
        Ok(root) => resolved.starts_with(&root),
        Err(e) => {
            warn!(root = %root.display(), error = %e, "Allowed root could not be resolved");
            false
        }
    })
}

/// Resolve `path` to an absolute canonical path.
///
/// A path that does not exist yet still resolves when its parent does, so a
/// missing file inside the root can be reported as missing rather than as
/// outside the root. Dangling symlinks do not resolve.
pub fn resolve(path: &Path) -> io::Result<PathBuf> {
    match path.canonicalize() {
        Ok(p) => Ok(p),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if path.symlink_metadata().is_ok() {
                return Err(e);
            }
            let name = path.file_name().ok_or(e)?;
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => std::env::current_dir()?,
            };
            Ok(parent.canonicalize()?.join(name))
        }
        Err(e) => Err(e),
    }
}
