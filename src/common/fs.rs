use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Write `bytes` to `target` via a temp file in the same directory and an atomic rename,
/// replacing any existing file of that name.
pub(crate) fn write_file_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    let parent = target.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("create dir {}", parent.display()))?;

    let mut tmp = NamedTempFile::new_in(parent)
        .context("create temp file")?;
    tmp.write_all(bytes)
        .with_context(|| format!("write {}", target.display()))?;
    tmp.as_file().sync_all()
        .with_context(|| format!("fsync {}", target.display()))?;
    tmp.persist(target)
        .with_context(|| format!("rename to {}", target.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out.svg");

        write_file_atomic(&target, b"<svg/>").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"<svg/>");
    }

    #[test]
    fn overwrites_existing_file_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.svg");

        write_file_atomic(&target, b"first").unwrap();
        write_file_atomic(&target, b"second").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
