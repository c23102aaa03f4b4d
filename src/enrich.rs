use std::sync::Arc;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::fetch;
use crate::model::{LocationRecord, LocationStub};
use crate::parser::{self, extract::SectionPolicy};

const DEFAULT_CONCURRENCY: usize = 4;

pub struct EnrichStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

pub struct EnrichOutcome {
    pub records: Vec<LocationRecord>,
    pub stats: EnrichStats,
}

/// Fetch one detail page and promote the stub to a full record.
pub async fn enrich_one(
    client: &Client,
    stub: LocationStub,
    policy: SectionPolicy,
) -> Result<LocationRecord> {
    let html = fetch::fetch_with_retry(client, &stub.url).await?;
    let details = parser::process_detail_page(&html, policy)?;
    Ok(LocationRecord::new(stub, details))
}

/// Enrich all stubs with bounded concurrency. A slow or failed location never
/// blocks its siblings; failures are logged with their URL and counted.
pub async fn enrich_all(
    client: &Client,
    stubs: Vec<LocationStub>,
    policy: SectionPolicy,
    concurrency: Option<usize>,
) -> Result<EnrichOutcome> {
    let concurrency = concurrency.unwrap_or(DEFAULT_CONCURRENCY).max(1);
    let total = stubs.len();
    let semaphore = Arc::new(Semaphore::new(concurrency));

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    // Channel: workers send results, main loop collects.
    let (tx, mut rx) =
        tokio::sync::mpsc::channel::<Result<LocationRecord, (String, anyhow::Error)>>(
            concurrency * 2,
        );

    for stub in stubs {
        let client = client.clone();
        let sem = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            let _permit = sem.acquire().await.unwrap();
            let url = stub.url.clone();
            let result = enrich_one(&client, stub, policy).await.map_err(|e| (url, e));
            let _ = tx.send(result).await;
        });
    }

    // Drop our copy of tx so rx closes when all spawned tasks finish.
    drop(tx);

    let mut records = Vec::with_capacity(total);
    let mut errors = 0usize;
    while let Some(result) = rx.recv().await {
        match result {
            Ok(record) => records.push(record),
            Err((url, e)) => {
                warn!("enrichment failed for {}: {:#}", url, e);
                errors += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let ok = records.len();
    info!("Enriched {} locations ({} ok, {} errors)", total, ok, errors);

    Ok(EnrichOutcome {
        records,
        stats: EnrichStats { total, ok, errors },
    })
}
