// Storage path utilities.
// Resolves where durable preferences live and how keys map to file names.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base data directory (~/.local/share/sitekit on Linux).
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sitekit").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Directory holding durable user preferences.
pub fn preferences_dir() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("preferences"))
}

/// Path of the file storing `key` inside `dir`.
pub fn key_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.value", encode_key(key)))
}

/// Encode a key as a file name.
/// Keeps ASCII alphanumerics and `-_.`, percent-escapes every other byte,
/// so distinct keys always map to distinct files.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
