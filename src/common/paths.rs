//! Configuration file location

use std::path::PathBuf;

/// Directory name used under the platform configuration root
const APP_NAME: &str = "xtest";

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV: &str = "XTEST_CONFIG";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/xtest/`
/// - macOS: `~/Library/Application Support/xtest/`
/// - Windows: `%APPDATA%\xtest\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
///
/// `$XTEST_CONFIG` wins over the platform location when it is set and non-empty.
pub fn config_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => config_dir().map(|dir| dir.join("config.toml")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_app_name() {
        if let Some(dir) = config_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
