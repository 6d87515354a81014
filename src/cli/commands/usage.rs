//! Usage and formats commands.

use crate::messages;

/// Print the feature overview.
pub fn run_usage() {
    println!("{}", messages::USAGE);
}

/// Print the supported file formats.
pub fn run_formats() {
    println!("{}", messages::formats_description());
}
