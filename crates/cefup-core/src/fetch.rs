//! Conditional download and verification of the CEF binary distribution.
//!
//! Skips the network entirely when the extracted tree already carries the
//! requested version; otherwise downloads the platform archive and its
//! `.sha1` sidecar, verifies, extracts, and removes both files.

use std::fs;

use reqwest::Client;

use crate::config::{ReleaseConfig, Workspace};
use crate::error::PipelineError;
use crate::io::download::{download, read_sha1_sidecar};
use crate::io::extract::extract_tar_bz2;
use crate::io::fsops;
use crate::platform::Platform;
use crate::reporter::Reporter;

/// Fetch, verify, and extract the prebuilt CEF distribution for `platform`.
///
/// Idempotent: when the version marker inside the install location already
/// contains the configured version string, the tree is left untouched.
///
/// # Errors
///
/// A checksum mismatch deletes both the archive and its sidecar and returns
/// a verification error; the caller must re-run to retry.
pub async fn fetch_cef<R: Reporter + ?Sized>(
    config: &ReleaseConfig,
    workspace: &Workspace,
    platform: Platform,
    client: &Client,
    reporter: &R,
) -> Result<(), PipelineError> {
    let suffix = platform.cef_suffix();

    if fsops::grep(&workspace.version_marker(), &config.cef_version).is_some() {
        reporter.info(&format!("{} already downloaded", config.cef_version));
        return Ok(());
    }

    let cef_dir = workspace.cef_dir();
    let tarball = config.tarball_name(suffix);
    let url = config.tarball_url(suffix);

    reporter.info(&format!(
        "Downloading Chromium Embedded Framework into {} ...",
        cef_dir.display()
    ));
    reporter.info(&url);

    // A marker mismatch means a stale or partial tree from another version;
    // clear it so two CEF versions never interleave.
    fsops::remove_dir_if_exists(cef_dir)?;
    fs::create_dir_all(cef_dir)?;

    let archive_path = cef_dir.join(&tarball);
    let sidecar_path = cef_dir.join(format!("{tarball}.sha1"));

    let actual = download(client, &url, &archive_path, reporter).await?;
    download(client, &format!("{url}.sha1"), &sidecar_path, reporter).await?;

    let expected = read_sha1_sidecar(&sidecar_path)?;
    if actual != expected {
        fs::remove_file(&archive_path).ok();
        fs::remove_file(&sidecar_path).ok();
        return Err(PipelineError::Verification {
            archive: tarball,
            expected,
            actual,
        });
    }

    reporter.info(&format!("Unpacking {tarball} ..."));
    extract_tar_bz2(&archive_path, cef_dir)?;

    fs::remove_file(&archive_path)?;
    fs::remove_file(&sidecar_path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;
    use bzip2::write::BzEncoder;
    use bzip2::Compression;
    use mockito::Server;
    use sha1::{Digest, Sha1};
    use std::path::Path;
    use tempfile::tempdir;

    fn test_config(cdn_base: String) -> ReleaseConfig {
        ReleaseConfig {
            cef_version: "1.0.0".to_string(),
            cdn_base,
            ..ReleaseConfig::default()
        }
    }

    /// A tar.bz2 with the usual version-qualified root folder.
    fn make_cef_archive(dir: &Path) -> Vec<u8> {
        let tree = dir.join("cef_binary_1.0.0_linux64");
        std::fs::create_dir_all(&tree).unwrap();
        std::fs::write(tree.join("README.txt"), "CEF Version: 1.0.0\n").unwrap();

        let encoder = BzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder
            .append_dir_all("cef_binary_1.0.0_linux64", &tree)
            .unwrap();
        builder.into_inner().unwrap().finish().unwrap()
    }

    fn sha1_hex(data: &[u8]) -> String {
        let mut hasher = Sha1::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    fn linux_platform() -> Platform {
        Platform {
            os: crate::platform::Os::Linux,
            arch: crate::platform::Arch::X86_64,
        }
    }

    #[tokio::test]
    async fn matching_marker_skips_download() {
        let mut server = Server::new_async().await;
        // Any request arriving here would fail the expectation.
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let config = test_config(server.url());
        let workspace = Workspace::new(dir.path(), &config.app_name);
        std::fs::create_dir_all(workspace.cef_dir()).unwrap();
        std::fs::write(workspace.version_marker(), "CEF Version: 1.0.0\n").unwrap();

        let client = Client::new();
        fetch_cef(&config, &workspace, linux_platform(), &client, &NullReporter)
            .await
            .unwrap();

        mock.assert_async().await;
        // Tree untouched.
        assert!(workspace.version_marker().is_file());
    }

    #[tokio::test]
    async fn fetch_extracts_and_cleans_up() {
        let mut server = Server::new_async().await;
        let dir = tempdir().unwrap();
        let archive = make_cef_archive(&dir.path().join("fixture"));
        let config = test_config(server.url());

        let tarball = config.tarball_name("linux64");
        let _m1 = server
            .mock("GET", format!("/{tarball}").as_str())
            .with_body(archive.clone())
            .create_async()
            .await;
        let _m2 = server
            .mock("GET", format!("/{tarball}.sha1").as_str())
            .with_body(sha1_hex(&archive))
            .create_async()
            .await;

        let root = dir.path().join("work");
        std::fs::create_dir(&root).unwrap();
        let workspace = Workspace::new(&root, &config.app_name);

        let client = Client::new();
        fetch_cef(&config, &workspace, linux_platform(), &client, &NullReporter)
            .await
            .unwrap();

        // Flattened tree, archive and sidecar gone.
        assert!(workspace.version_marker().is_file());
        assert!(!workspace.cef_dir().join(&tarball).exists());
        assert!(!workspace
            .cef_dir()
            .join(format!("{tarball}.sha1"))
            .exists());
    }

    #[tokio::test]
    async fn checksum_mismatch_deletes_both_files() {
        let mut server = Server::new_async().await;
        let dir = tempdir().unwrap();
        let archive = make_cef_archive(&dir.path().join("fixture"));
        let config = test_config(server.url());

        let tarball = config.tarball_name("linux64");
        let _m1 = server
            .mock("GET", format!("/{tarball}").as_str())
            .with_body(archive)
            .create_async()
            .await;
        let _m2 = server
            .mock("GET", format!("/{tarball}.sha1").as_str())
            .with_body("0000000000000000000000000000000000000000")
            .create_async()
            .await;

        let root = dir.path().join("work");
        std::fs::create_dir(&root).unwrap();
        let workspace = Workspace::new(&root, &config.app_name);

        let client = Client::new();
        let err = fetch_cef(&config, &workspace, linux_platform(), &client, &NullReporter)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Verification { .. }));
        assert!(!workspace.cef_dir().join(&tarball).exists());
        assert!(!workspace
            .cef_dir()
            .join(format!("{tarball}.sha1"))
            .exists());
    }
}
