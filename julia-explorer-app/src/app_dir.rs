//! Where preferences and generated images live.
//!
//! Uses the OS conventions from `directories`; when no home directory can be
//! resolved, falls back to the directory of the executable.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "julia-explorer")
}

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Directory holding `preferences.json`.
pub fn config_directory() -> PathBuf {
    project_dirs()
        .map(|d| d.config_dir().to_path_buf())
        .unwrap_or_else(exe_directory)
}

/// Default directory for exported and generated images.
pub fn images_directory() -> PathBuf {
    project_dirs()
        .map(|d| d.data_dir().join("images"))
        .unwrap_or_else(|| exe_directory().join("images"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_live_in_an_images_folder() {
        assert!(!config_directory().as_os_str().is_empty());
        assert!(images_directory().ends_with("images"));
    }
}
