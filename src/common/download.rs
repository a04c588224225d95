use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{blocking::Client, redirect::Policy};

/// Fetch a remote file into memory with a single blocking GET.
/// No retry and no client-side timeout: the call blocks until the server answers or the connection fails.
pub(crate) fn fetch_bytes(url: &str, verbose: u8) -> Result<Vec<u8>> {
    let client = Client::builder()
        .user_agent(concat!("quakeviz/", env!("CARGO_PKG_VERSION")))
        .redirect(Policy::limited(10))
        .timeout(None::<Duration>)
        .build()
        .context("[download] failed to build HTTP client")?;

    if verbose > 0 { eprintln!("[download] GET {url}"); }

    let resp = client.get(url)
        .send()
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url} returned error status"))?;

    let bytes = resp.bytes()
        .with_context(|| format!("read body of {url}"))?;

    if verbose > 1 { eprintln!("[download] {} bytes from {url}", bytes.len()); }

    Ok(bytes.to_vec())
}
