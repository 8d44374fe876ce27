// Docmark platform paths
// Config: settings.json lives here. Data: the SQLite database lives here.
//
//   Linux:   $XDG_CONFIG_HOME/docmark, $XDG_DATA_HOME/docmark (~/.config, ~/.local/share)
//   macOS:   ~/Library/Application Support/Docmark
//   Windows: %APPDATA%\Docmark

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join("docmark"),
        _ => fallback
            .iter()
            .fold(home_dir(), |path, part| path.join(part))
            .join("docmark"),
    }
}

#[cfg(target_os = "macos")]
fn app_support_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("Docmark")
}

#[cfg(target_os = "windows")]
fn app_data_dir() -> PathBuf {
    env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
        .join("Docmark")
}

/// Returns the directory holding `settings.json`.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        app_support_dir()
    }
    #[cfg(target_os = "windows")]
    {
        app_data_dir()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
}

/// Returns the directory holding the bookmark database.
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        app_support_dir()
    }
    #[cfg(target_os = "windows")]
    {
        app_data_dir()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"])
    }
}
