// MiniArc platform paths
// Config and data directories per OS, selected at compile time.
//
// Linux:   $XDG_CONFIG_HOME/miniarc, $XDG_DATA_HOME/miniarc
// macOS:   ~/Library/Application Support/MiniArc
// Windows: %APPDATA%/MiniArc
// Other:   ~/.miniarc

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Directory holding `settings.json`.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join("miniarc"),
            Err(_) => home_dir().join(".config").join("miniarc"),
        }
    }
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("MiniArc")
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join("MiniArc")
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        home_dir().join(".miniarc")
    }
}

/// Directory holding the session database.
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join("miniarc"),
            Err(_) => home_dir().join(".local").join("share").join("miniarc"),
        }
    }
    #[cfg(not(target_os = "linux"))]
    {
        get_config_dir()
    }
}
