//! Where textmask keeps its files
//!
//! - masks: `$TEXTMASK_MASKS`, else `<config dir>/textmask/masks.yaml`
//! - logs: `<config dir>/textmask/logs/`
//!
//! `<config dir>` is `$XDG_CONFIG_HOME` when set, otherwise the platform
//! default from `dirs` (`~/.config`, `~/Library/Application Support`,
//! `%APPDATA%`).

use std::{
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "textmask";
const MASKS_FILE: &str = "masks.yaml";

/// Environment variable naming an alternative masks file
pub const MASKS_FILE_ENV: &str = "TEXTMASK_MASKS";

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Base directory for textmask files
pub fn config_dir() -> Option<PathBuf> {
    non_empty(env::var_os("XDG_CONFIG_HOME"))
        .or_else(dirs::config_dir)
        .map(|base| base.join(APP_DIR))
}

/// Masks file to load field definitions from
pub fn masks_file() -> Option<PathBuf> {
    resolve_masks_file(env::var_os(MASKS_FILE_ENV), config_dir())
}

fn resolve_masks_file(env_override: Option<OsString>, dir: Option<PathBuf>) -> Option<PathBuf> {
    non_empty(env_override).or_else(|| dir.map(|d| d.join(MASKS_FILE)))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn create(dir: &Path) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    create(&logs)?;
    Ok(logs)
}
