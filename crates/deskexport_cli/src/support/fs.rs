use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub fn ensure_parent_directory(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {:?}", dir)),
        _ => Ok(()),
    }
}

/// Writes the rendered export to `path`, creating parent directories as needed.
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    ensure_parent_directory(path)?;
    fs::write(path, content).with_context(|| format!("Failed to save export to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_into_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports/2024/tickets.md");
        write_document(&path, "# Export").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Export");
    }

    #[test]
    fn bare_file_name_needs_no_directory() {
        assert!(ensure_parent_directory(Path::new("tickets.md")).is_ok());
    }

    #[test]
    fn file_in_the_way_of_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        assert!(write_document(&blocker.join("tickets.md"), "x").is_err());
    }
}
