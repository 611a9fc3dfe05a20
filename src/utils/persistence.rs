//! Locations of user files under ~/.mouthflap/.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Name of the per-user directory inside the home directory.
pub const APP_DIR_NAME: &str = ".mouthflap";

/// The ~/.mouthflap/ directory path. Nothing is created.
pub fn app_dir_path() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(APP_DIR_NAME))
}

/// Get the ~/.mouthflap/ directory path, creating it if needed.
pub fn app_dir() -> io::Result<PathBuf> {
    let dir = app_dir_path()?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path of a config file in ~/.mouthflap/. Looking it up creates
/// neither the file nor the directory.
pub fn config_path(filename: &str) -> io::Result<PathBuf> {
    Ok(app_dir_path()?.join(filename))
}

/// Open (append) the log file used while the terminal UI owns stderr.
pub fn open_log_file(filename: &str) -> io::Result<fs::File> {
    let path = app_dir()?.join(filename);
    fs::OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dir_exists() {
        let dir = app_dir().expect("app_dir should succeed");
        assert!(dir.exists());
        assert!(dir.ends_with(APP_DIR_NAME));
    }

    #[test]
    fn test_config_path_format() {
        let path = config_path("test.json").expect("config_path should succeed");
        assert!(path.to_string_lossy().ends_with(".mouthflap/test.json"));
    }
}
