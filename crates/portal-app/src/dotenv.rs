//! Minimal `.env` support: `KEY=VALUE` lines, `#` comments, optional quotes.

use std::path::Path;

/// Parse `.env` contents into key/value pairs, in file order.
pub fn parse(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim(), value)
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Export the variables in `path` that are not already set. A missing file
/// is ignored.
///
/// Must run before any other thread exists: it mutates the process
/// environment.
pub fn load(path: &Path) {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return;
    };
    for (key, value) in parse(&contents) {
        if std::env::var_os(key).is_none() {
            std::env::set_var(key, value);
        }
    }
}
