// ABOUTME: Reads the list of company profile URLs to scrape from a text file.
// ABOUTME: One URL per line; blank lines and `#` comments are skipped.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

/// Parse URL lines from file contents.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read URLs from `path`, in file order.
///
/// A missing or unreadable file is logged and yields an empty list.
pub fn read_urls_from_file(path: &Path) -> Vec<String> {
    if !path.exists() {
        warn!(path = %path.display(), "input file not found");
        return Vec::new();
    }
    match fs::read(path) {
        Ok(bytes) => {
            let urls = parse_url_list(&String::from_utf8_lossy(&bytes));
            info!("Loaded {} URLs from {}", urls.len(), path.display());
            urls
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read input file");
            Vec::new()
        }
    }
}
