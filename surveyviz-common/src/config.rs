//! Configuration loading and root folder resolution

use crate::Result;
use std::path::{Path, PathBuf};

/// Environment variable overriding the root folder location
pub const ROOT_ENV_VAR: &str = "SURVEYVIZ_ROOT";

/// File name of the SQLite database inside the root folder
pub const DB_FILE_NAME: &str = "survey.db";

/// Resolve the root folder holding the database, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. `SURVEYVIZ_ROOT` environment variable
/// 3. `root_folder` key in the TOML config file
/// 4. OS-dependent default data directory (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = root_from_config_file() {
        return path;
    }

    // Priority 4: OS-dependent default
    default_root_folder()
}

/// Create the root folder if it does not exist yet
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

/// Full path of the SQLite database file inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join(DB_FILE_NAME)
}

/// Read `root_folder` from the platform config file, if one exists
fn root_from_config_file() -> Option<PathBuf> {
    let config_path = dirs::config_dir()?.join("surveyviz").join("config.toml");
    let content = std::fs::read_to_string(&config_path).ok()?;
    let config = toml::from_str::<toml::Value>(&content).ok()?;
    config
        .get("root_folder")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("surveyviz"))
        .unwrap_or_else(|| PathBuf::from("./surveyviz_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_takes_priority() {
        let root = resolve_root_folder(Some("/tmp/surveyviz-test"));
        assert_eq!(root, PathBuf::from("/tmp/surveyviz-test"));
    }

    #[test]
    fn database_path_joins_file_name() {
        let path = database_path(Path::new("/data/surveyviz"));
        assert_eq!(path, PathBuf::from("/data/surveyviz/survey.db"));
    }
}
