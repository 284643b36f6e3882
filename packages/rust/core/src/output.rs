//! Reading and writing the Markdown documents orgdash manages.

use std::path::Path;

use tracing::debug;

use orgdash_shared::{OrgDashError, Result};

/// Read an existing document. A missing file is an I/O error.
pub fn read_document(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| OrgDashError::io(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "read document");
    Ok(content)
}

/// Overwrite `path` with `content`, creating parent directories as needed.
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| OrgDashError::io(parent, e))?;
        }
    }

    std::fs::write(path, content).map_err(|e| OrgDashError::io(path, e))?;
    debug!(path = %path.display(), bytes = content.len(), "wrote document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("orgdash-output-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn write_creates_parent_dirs_and_overwrites() {
        let tmp = temp_dir();
        let path = tmp.join("profile").join("README.md");

        write_document(&path, "first").unwrap();
        write_document(&path, "second").unwrap();
        assert_eq!(read_document(&path).unwrap(), "second");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let tmp = temp_dir();
        let err = read_document(&tmp.join("absent.md")).unwrap_err();
        assert!(matches!(err, OrgDashError::Io { .. }));
        assert!(err.to_string().contains("absent.md"));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
