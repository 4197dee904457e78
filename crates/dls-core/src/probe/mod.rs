//! Source metadata probing (HTTP HEAD).
//!
//! Uses the curl crate (libcurl) to fetch response headers and read
//! `Content-Length` plus the `Content-Disposition` filename hint. The probe
//! is strictly best-effort: creation must never fail because the source is
//! unreachable, so callers go through [`fetch_info`], which swallows errors
//! and returns an empty result.

mod parse;

pub use parse::HeadInfo;

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

/// Performs a HEAD request and returns parsed metadata.
///
/// Follows redirects. Runs in the current thread; call from `spawn_blocking`
/// when used from async code.
pub fn head(url: &str) -> Result<HeadInfo> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(Duration::from_secs(30))?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform().context("HEAD request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if code < 200 || code >= 300 {
        anyhow::bail!("HEAD {} returned HTTP {}", url, code);
    }

    Ok(parse::parse_headers(&headers))
}

/// Best-effort async probe: HEAD on a blocking thread, failures logged and
/// reported as an empty result so the caller falls back to defaults.
pub async fn fetch_info(url: &str) -> HeadInfo {
    let url = url.to_string();
    let probed = tokio::task::spawn_blocking(move || head(&url)).await;
    match probed {
        Ok(Ok(info)) => info,
        Ok(Err(err)) => {
            tracing::debug!("metadata probe failed: {err:#}");
            HeadInfo::default()
        }
        Err(err) => {
            tracing::warn!("metadata probe task failed: {err}");
            HeadInfo::default()
        }
    }
}
