use std::fs;
use std::io;
use std::path::Path;

/// Creates a folder (and any necessary parent directories) at `folder_path`.
pub fn create_folder(folder_path: impl AsRef<Path>) -> io::Result<()> {
    fs::create_dir_all(folder_path)
}

/// File name of `path` for progress messages, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
