// src/connector.rs
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::backend::ItemSource;
use crate::client::{urijoin, DockerHubClient, RegistryClient, DOCKERHUB_URL};

pub const CATEGORY_DOCKERHUB_DATA: &str = "dockerhub-data";

const DOCKER_OWNER: &str = "library";
const DOCKER_SHORTCUT_OWNER: &str = "_";

const CATEGORIES: &[&str] = &[CATEGORY_DOCKERHUB_DATA];

/// One-time metrics registration (so series show up in the host exporter).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "dockerhub_items_total",
            "Records emitted by the Docker Hub connector."
        );
        describe_counter!(
            "dockerhub_fetch_errors_total",
            "Docker Hub fetch/parse errors."
        );
    });
}

fn unix_now() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Connector for repository metadata stored on Docker Hub.
///
/// Retrieves the public data of one repository (number of pulls, stars,
/// description, among other fields) and emits it as a single timestamped
/// record per fetch. The origin is built from the owner and repository.
///
/// The shortcut `_` owner for official repositories is replaced by its long
/// name, `library`, before anything else uses it.
pub struct DockerHub<C = DockerHubClient> {
    owner: String,
    repository: String,
    tag: String,
    origin: String,
    client: C,
}

impl DockerHub<DockerHubClient> {
    pub fn new(owner: &str, repository: &str, tag: Option<&str>) -> Self {
        Self::with_client(owner, repository, tag, DockerHubClient::new())
    }
}

impl<C: RegistryClient> DockerHub<C> {
    /// Build a connector over any registry client implementation.
    pub fn with_client(owner: &str, repository: &str, tag: Option<&str>, client: C) -> Self {
        let owner = if owner == DOCKER_SHORTCUT_OWNER {
            DOCKER_OWNER
        } else {
            owner
        };
        let origin = urijoin(&[DOCKERHUB_URL, owner, repository]);
        let tag = tag
            .map(str::to_string)
            .unwrap_or_else(|| origin.clone());

        Self {
            owner: owner.to_string(),
            repository: repository.to_string(),
            tag,
            origin,
            client,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }
}

#[async_trait]
impl<C: RegistryClient> ItemSource for DockerHub<C> {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn tag(&self) -> &str {
        &self.tag
    }

    fn categories(&self) -> &'static [&'static str] {
        CATEGORIES
    }

    async fn fetch_items(&self, _category: &str) -> Result<Vec<Value>> {
        ensure_metrics_described();

        tracing::info!(
            owner = %self.owner,
            repository = %self.repository,
            "fetching data from docker hub repository"
        );

        let raw = match self.client.repository(&self.owner, &self.repository).await {
            Ok(raw) => raw,
            Err(e) => {
                counter!("dockerhub_fetch_errors_total").increment(1);
                return Err(e);
            }
        };
        // The fetch timestamp is the record's identity; take it as soon as
        // the HTTP call returns.
        let fetched_on = unix_now();

        let data: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                counter!("dockerhub_fetch_errors_total").increment(1);
                return Err(e).context("parsing docker hub repository body");
            }
        };
        let mut data = match data {
            Value::Object(map) => map,
            other => {
                counter!("dockerhub_fetch_errors_total").increment(1);
                bail!(
                    "expected a JSON object from docker hub, got {}",
                    json_kind(&other)
                );
            }
        };

        data.insert("fetched_on".to_string(), fetched_on.into());

        counter!("dockerhub_items_total").increment(1);
        tracing::info!(origin = %self.origin, "fetch process completed");

        Ok(vec![Value::Object(data)])
    }

    fn has_archiving() -> bool {
        true
    }

    fn has_resuming() -> bool {
        true
    }

    fn metadata_id(item: &Value) -> Result<String> {
        Ok(Self::metadata_updated_on(item)?.to_string())
    }

    fn metadata_updated_on(item: &Value) -> Result<f64> {
        item.get("fetched_on")
            .and_then(Value::as_f64)
            .ok_or_else(|| anyhow!("item has no 'fetched_on' field"))
    }

    fn metadata_category(_item: &Value) -> &'static str {
        CATEGORY_DOCKERHUB_DATA
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
