use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use tracing::warn;

const TIMEOUT_SECS: u64 = 20;
const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 2000;

pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("pnr_scraper/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .context("failed to build http client")
}

pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let res = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("request failed for {}", url))?;
    let status = res.status();
    if !status.is_success() {
        bail!("{} returned {}", url, status);
    }
    Ok(res.text().await?)
}

/// Retry transient failures (timeouts, 429, 5xx) with exponential backoff.
/// Anything else is returned to the caller immediately.
pub async fn fetch_with_retry(client: &Client, url: &str) -> Result<String> {
    for attempt in 0..MAX_RETRIES {
        match fetch_html(client, url).await {
            Ok(html) => return Ok(html),
            Err(e) if !is_transient(&e) => return Err(e),
            Err(e) => {
                let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
                warn!(
                    "transient failure for {} (attempt {}/{}): {}; backing off {:.1}s",
                    url,
                    attempt + 1,
                    MAX_RETRIES,
                    e,
                    backoff.as_secs_f64()
                );
                tokio::time::sleep(backoff).await;
            }
        }
    }
    fetch_html(client, url).await
}

fn is_transient(err: &anyhow::Error) -> bool {
    if let Some(req_err) = err.downcast_ref::<reqwest::Error>() {
        if req_err.is_timeout() || req_err.is_connect() {
            return true;
        }
    }
    let msg = err.to_string();
    msg.contains("429") || msg.contains("500") || msg.contains("502") || msg.contains("503")
}
