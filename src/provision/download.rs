//! Remote fetch strategy.
//!
//! - reqwest blocking client (no async runtime)
//! - response body streamed straight into the destination file

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use super::write_replacing;

/// Build the HTTP client shared by every download of one run.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("ol-app-setup/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;
    Ok(client)
}

/// Download `url` to `dest`, creating or truncating it.
///
/// Returns once the file is flushed and closed. A failed transfer leaves
/// `dest` as it was.
pub fn download_file(client: &reqwest::blocking::Client, url: &str, dest: &Path) -> Result<u64> {
    let mut response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to GET {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {}: {}", response.status(), url);
    }

    write_replacing(dest, |writer| {
        std::io::copy(&mut response, writer).with_context(|| format!("Failed to stream {}", url))
    })
}
