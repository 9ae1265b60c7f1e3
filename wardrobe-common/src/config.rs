//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "wardrobe.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(
    cli_arg: Option<&str>,
    env_var_name: &str,
    use_config_file: bool,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        debug!("Root folder from command line: {}", path);
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        debug!("Root folder from {}: {}", env_var_name, path);
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if use_config_file {
        if let Ok(config_path) = locate_config_file() {
            if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
                if let Some(root_folder) = root_folder_from_toml(&toml_content) {
                    debug!("Root folder from {}", config_path.display());
                    return root_folder;
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Extract `root_folder` from TOML config content
pub fn root_folder_from_toml(content: &str) -> Option<PathBuf> {
    let config = toml::from_str::<toml::Value>(content).ok()?;
    config
        .get("root_folder")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

/// Path of the SQLite database inside a root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE_NAME)
}

/// Create the root folder if it does not exist yet
pub fn ensure_directory_exists(root_folder: &Path) -> Result<()> {
    if !root_folder.exists() {
        std::fs::create_dir_all(root_folder)?;
    }
    Ok(())
}

/// Get configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("wardrobe").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/wardrobe/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/wardrobe (or /var/lib/wardrobe for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("wardrobe"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/wardrobe"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("wardrobe"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/wardrobe"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("wardrobe"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\wardrobe"))
    } else {
        PathBuf::from("./wardrobe_data")
    }
}
