//! Navigation entries for newly filed pages.
//!
//! The docs navigation file lists pages as quoted paths without extension.
//! The entries are printed ready to paste into a group there.

use std::path::PathBuf;

use crate::walk::slash_path;

/// One `"<path>",` line per page, sorted by full path.
pub fn navigation_entries(pages: &[PathBuf], extension: &str) -> Vec<String> {
    let suffix = format!(".{extension}");
    let mut paths: Vec<String> = pages.iter().map(|p| slash_path(p)).collect();
    paths.sort();
    paths
        .iter()
        .map(|p| {
            let page = p.strip_suffix(suffix.as_str()).unwrap_or(p);
            let literal = serde_json::to_string(page).expect("serializing a str cannot fail");
            format!("{literal},")
        })
        .collect()
}
