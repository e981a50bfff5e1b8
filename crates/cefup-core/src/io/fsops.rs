//! Small filesystem helpers mirroring the shell operations the pipeline
//! needs: `cp` preserving permissions, `rm -fr`, and a literal `grep`.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Copy `src` into `dest_dir` under its original file name, preserving the
/// source permission bits. Returns the destination path.
pub fn copy_into(src: &Path, dest_dir: &Path) -> io::Result<PathBuf> {
    let file_name = src.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("cannot copy {}: no file name", src.display()),
        )
    })?;
    let dest = dest_dir.join(file_name);
    fs::copy(src, &dest)?;
    let perms = fs::metadata(src)?.permissions();
    fs::set_permissions(&dest, perms)?;
    Ok(dest)
}

/// Remove a directory tree if present. A missing path is not an error.
pub fn remove_dir_if_exists(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    }
    Ok(())
}

/// First line of `path` containing the literal `needle`, if any.
/// Unreadable or missing files report no match.
pub fn grep(path: &Path, needle: &str) -> Option<String> {
    let file = fs::File::open(path).ok()?;
    for line in BufReader::new(file).lines() {
        let line = line.ok()?;
        if line.contains(needle) {
            return Some(line);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copy_into_keeps_name_and_content() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("icudtl.dat");
        fs::write(&src, b"icu data").unwrap();
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();

        let dest = copy_into(&src, &dest_dir).unwrap();

        assert_eq!(dest, dest_dir.join("icudtl.dat"));
        assert_eq!(fs::read(&dest).unwrap(), b"icu data");
    }

    #[cfg(unix)]
    #[test]
    fn copy_into_preserves_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let src = dir.path().join("app");
        fs::write(&src, b"#!/bin/sh\n").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();
        let dest_dir = dir.path().join("out");
        fs::create_dir(&dest_dir).unwrap();

        let dest = copy_into(&src, &dest_dir).unwrap();

        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn grep_finds_literal_match() {
        let dir = tempdir().unwrap();
        let readme = dir.path().join("README.txt");
        fs::write(&readme, "CEF Version: 120.1.8+ge6b45b0\nPlatform: linux64\n").unwrap();

        assert!(grep(&readme, "120.1.8+ge6b45b0").is_some());
        assert!(grep(&readme, "121.0.0").is_none());
    }

    #[test]
    fn grep_missing_file_is_none() {
        assert!(grep(Path::new("/nonexistent/README.txt"), "anything").is_none());
    }

    #[test]
    fn remove_dir_if_exists_tolerates_missing() {
        let dir = tempdir().unwrap();
        let victim = dir.path().join("tree");
        fs::create_dir_all(victim.join("nested")).unwrap();
        fs::write(victim.join("nested/file"), b"x").unwrap();

        remove_dir_if_exists(&victim).unwrap();
        assert!(!victim.exists());

        // Second removal is a no-op, not an error.
        remove_dir_if_exists(&victim).unwrap();
    }
}
