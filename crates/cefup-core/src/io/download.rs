//! Streaming download with the SHA-1 computed over the wire.

use std::io;
use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use sha1::{Digest, Sha1};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::PipelineError;
use crate::reporter::Reporter;

/// Download `url` to `dest`, returning the hex SHA-1 of the body.
///
/// The hash is computed while streaming, so large archives never need a
/// second read pass.
pub async fn download<R: Reporter + ?Sized>(
    client: &Client,
    url: &str,
    dest: &Path,
    reporter: &R,
) -> Result<String, PipelineError> {
    tracing::debug!(url, dest = %dest.display(), "downloading");

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await?
        .error_for_status()?;

    let total = response.content_length();
    let file_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| url.to_string());
    reporter.downloading(&file_name, 0, total);

    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut hasher = Sha1::new();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        hasher.update(&chunk);
        downloaded += chunk.len() as u64;
        reporter.downloading(&file_name, downloaded, total);
    }

    file.flush().await?;
    Ok(hex::encode(hasher.finalize()))
}

/// Read the checksum out of a `.sha1` sidecar file: the first
/// whitespace-delimited token of its content.
pub fn read_sha1_sidecar(path: &Path) -> io::Result<String> {
    let text = std::fs::read_to_string(path)?;
    Ok(text.split_whitespace().next().unwrap_or("").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;
    use mockito::Server;
    use tempfile::tempdir;

    fn sha1_hex(data: &[u8]) -> String {
        let mut hasher = Sha1::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    #[tokio::test]
    async fn download_streams_and_hashes() {
        let mut server = Server::new_async().await;
        let body = b"prebuilt framework bytes";
        let _m = server
            .mock("GET", "/cef.tar.bz2")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let dest = dir.path().join("cef.tar.bz2");
        let client = Client::new();

        let hash = download(
            &client,
            &format!("{}/cef.tar.bz2", server.url()),
            &dest,
            &NullReporter,
        )
        .await
        .unwrap();

        assert_eq!(hash, sha1_hex(body));
        assert_eq!(std::fs::read(&dest).unwrap(), body);
    }

    #[tokio::test]
    async fn download_surfaces_http_errors() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/missing.tar.bz2")
            .with_status(404)
            .create_async()
            .await;

        let dir = tempdir().unwrap();
        let dest = dir.path().join("missing.tar.bz2");
        let client = Client::new();

        let err = download(
            &client,
            &format!("{}/missing.tar.bz2", server.url()),
            &dest,
            &NullReporter,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PipelineError::Http(_)));
    }

    #[test]
    fn sidecar_reads_first_token() {
        let dir = tempdir().unwrap();
        let sidecar = dir.path().join("cef.tar.bz2.sha1");
        std::fs::write(&sidecar, "0a1b2c3d4e  cef.tar.bz2\n").unwrap();

        assert_eq!(read_sha1_sidecar(&sidecar).unwrap(), "0a1b2c3d4e");
    }

    #[test]
    fn sidecar_trims_bare_hash() {
        let dir = tempdir().unwrap();
        let sidecar = dir.path().join("x.sha1");
        std::fs::write(&sidecar, "deadbeef\n").unwrap();

        assert_eq!(read_sha1_sidecar(&sidecar).unwrap(), "deadbeef");
    }
}
