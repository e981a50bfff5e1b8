//! Archive extraction with root-directory flattening.
//!
//! CEF tarballs wrap everything in a single version-qualified folder
//! (`cef_binary_<version>_<platform>/`). Extraction rewrites that root onto
//! the destination so the installed layout is independent of the archive's
//! internal folder name.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use bzip2::read::BzDecoder;

use crate::error::PipelineError;

/// Extract a tar.bz2 archive into `dest_dir`, flattening the archive's
/// single top-level directory.
pub fn extract_tar_bz2(archive_path: &Path, dest_dir: &Path) -> Result<(), PipelineError> {
    tracing::debug!(archive = %archive_path.display(), dest = %dest_dir.display(), "unpacking");
    let file = File::open(archive_path)?;
    let decoder = BzDecoder::new(BufReader::new(file));
    extract_flattened(decoder, dest_dir)
}

/// Extract a tar stream, rewriting every entry path by replacing the
/// archive's root-directory prefix with `dest_dir`.
///
/// The root prefix is the name of the first directory entry encountered.
/// Entries outside that prefix keep their own relative path.
fn extract_flattened<R: Read>(reader: R, dest_dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(dest_dir)?;

    let mut archive = tar::Archive::new(reader);
    let mut root_prefix: Option<PathBuf> = None;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let entry_path = entry.path()?.into_owned();
        let is_dir = entry.header().entry_type().is_dir();

        if is_dir && root_prefix.is_none() {
            root_prefix = Some(entry_path.clone());
        }

        let relative = match &root_prefix {
            Some(prefix) => entry_path
                .strip_prefix(prefix)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| entry_path.clone()),
            None => entry_path.clone(),
        };

        let target = dest_dir.join(&relative);

        // Reject entries that escape the destination (zip-slip).
        if !target.starts_with(dest_dir) {
            return Err(PipelineError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid path in archive: {}", entry_path.display()),
            )));
        }

        if is_dir {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        entry.unpack(&target)?;
    }

    Ok(())
}
