// src/backend.rs
// The narrow seam a collector host consumes: a source produces a finite batch
// of raw JSON records per fetch, plus static metadata accessors over them.
use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Canonical URL identifying this data-source instance. Stable for the
    /// life of the source; hosts use it for deduplication and resuming.
    fn origin(&self) -> &str;

    /// Label attached to emitted items. Defaults to the origin.
    fn tag(&self) -> &str;

    /// Categories this source can produce.
    fn categories(&self) -> &'static [&'static str];

    /// Fetch one batch of raw records for an already-validated category.
    async fn fetch_items(&self, category: &str) -> Result<Vec<Value>>;

    /// Validate the category, then delegate to `fetch_items`. Rejection
    /// happens before any network traffic.
    async fn fetch(&self, category: &str) -> Result<Vec<Value>> {
        if !self.categories().contains(&category) {
            bail!(
                "unknown category '{category}' for origin '{}'",
                self.origin()
            );
        }
        self.fetch_items(category).await
    }

    /// Whether raw responses for this source may be archived and replayed by
    /// the host. Nothing category-specific is required of the source itself.
    fn has_archiving() -> bool
    where
        Self: Sized,
    {
        false
    }

    /// Whether an interrupted fetch may be resumed by the host.
    fn has_resuming() -> bool
    where
        Self: Sized,
    {
        false
    }

    /// Unique identifier of an emitted record.
    fn metadata_id(item: &Value) -> Result<String>
    where
        Self: Sized;

    /// Update time of an emitted record, as a UNIX timestamp in seconds.
    fn metadata_updated_on(item: &Value) -> Result<f64>
    where
        Self: Sized;

    /// Category of an emitted record.
    fn metadata_category(item: &Value) -> &'static str
    where
        Self: Sized;
}
