use crate::error::{Error, Result};
use crate::io::expand_home;
use std::env;
use std::path::PathBuf;

/// Overrides the config file location.
pub const CONFIG_PATH_VAR: &str = "ZTASKS_CONFIG";

/// Base ztasks config directory (~/.config/ztasks/ on Unix, %APPDATA%\ztasks on Windows)
pub fn ztasks() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected("APPDATA environment variable not set on Windows")
        })?;
        Ok(PathBuf::from(appdata).join("ztasks"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected("HOME environment variable not set on Unix-like system")
        })?;
        Ok(PathBuf::from(home).join(".config").join("ztasks"))
    }
}

/// Config file path: `$ZTASKS_CONFIG` when set, else `ztasks.json` in the config dir.
pub fn config_file() -> Result<PathBuf> {
    match env::var(CONFIG_PATH_VAR) {
        Ok(path) if !path.trim().is_empty() => Ok(expand_home(path.trim())),
        _ => Ok(ztasks()?.join("ztasks.json")),
    }
}
