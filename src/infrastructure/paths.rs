//! Path utilities for the Zellij sandbox.

use std::path::PathBuf;

/// Returns the plugin's writable data directory.
///
/// Zellij maps `/data` to a per-plugin folder in its cache directory. It holds
/// the span export file and its rotated backups.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/data")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// In the sandbox the host's home directory (`~`) is reachable as `/host`, so
/// a `theme_file` option written as `~/themes/beer.toml` still resolves.
///
/// # Examples
///
/// ```
/// use beerbar::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/beer.toml"), "/host/themes/beer.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
