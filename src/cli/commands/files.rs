//! Files command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::files::list_media_files;
use anyhow::Result;

/// List uploadable files under the allowed directory.
pub fn run_files(settings: &Settings) -> Result<()> {
    let root = settings.allowed_dir();
    if !root.is_dir() {
        Output::warning(&format!(
            "Allowed directory {} does not exist or is not a directory",
            root.display()
        ));
        return Ok(());
    }

    let root = root.canonicalize()?;
    let grouped = list_media_files(&root);
    if grouped.is_empty() {
        Output::info(&format!("No supported files under {}", root.display()));
        return Ok(());
    }

    let total: usize = grouped.values().map(Vec::len).sum();
    Output::header(&format!("{} file(s) under {}", total, root.display()));
    for (dir, names) in &grouped {
        println!("\n{}", dir);
        for name in names {
            Output::list_item(name);
        }
    }

    Ok(())
}
