// src/runner.rs
// Generic single-run driver: fetch one batch from a source and wrap each raw
// record in the envelope a collector host stores.
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::backend::ItemSource;

pub const BACKEND_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A raw record plus the metadata the host needs to store and dedup it.
#[derive(Debug, Clone, Serialize)]
pub struct RawItem {
    pub backend_name: String,
    pub backend_version: String,
    pub origin: String,
    pub uuid: String,
    pub category: String,
    pub tag: String,
    pub updated_on: f64,
    pub data: Value,
}

/// Deterministic item uuid from the source origin and the item identifier.
pub fn item_uuid(origin: &str, item_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(origin.as_bytes());
    hasher.update(b":");
    hasher.update(item_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Drive one fetch on `source` and envelope every record it produced.
/// Any fetch failure propagates; no partial batch is returned.
pub async fn run_once<S: ItemSource>(
    backend_name: &str,
    source: &S,
    category: &str,
) -> Result<Vec<RawItem>> {
    let records = source.fetch(category).await?;

    let mut items = Vec::with_capacity(records.len());
    for data in records {
        let id = S::metadata_id(&data)?;
        let updated_on = S::metadata_updated_on(&data)?;

        items.push(RawItem {
            backend_name: backend_name.to_string(),
            backend_version: BACKEND_VERSION.to_string(),
            origin: source.origin().to_string(),
            uuid: item_uuid(source.origin(), &id),
            category: S::metadata_category(&data).to_string(),
            tag: source.tag().to_string(),
            updated_on,
            data,
        });
    }

    tracing::info!(
        origin = %source.origin(),
        items = items.len(),
        "run completed"
    );

    Ok(items)
}
