use anyhow::Result;
use async_trait::async_trait;

use dockerhub_collector::{runner, DockerHub, RegistryClient, CATEGORY_DOCKERHUB_DATA};

struct FixtureClient;

#[async_trait]
impl RegistryClient for FixtureClient {
    async fn repository(&self, _owner: &str, _repository: &str) -> Result<String> {
        Ok(r#"{"name": "python", "pull_count": 100}"#.to_string())
    }
}

#[tokio::test]
async fn envelope_carries_identity_and_uuid() {
    let source = DockerHub::with_client("library", "python", Some("official"), FixtureClient);

    let items = runner::run_once("dockerhub", &source, CATEGORY_DOCKERHUB_DATA)
        .await
        .expect("run ok");
    assert_eq!(items.len(), 1);

    let item = &items[0];
    assert_eq!(item.backend_name, "dockerhub");
    assert_eq!(item.backend_version, runner::BACKEND_VERSION);
    assert_eq!(item.origin, "https://hub.docker.com/library/python");
    assert_eq!(item.tag, "official");
    assert_eq!(item.category, CATEGORY_DOCKERHUB_DATA);
    assert_eq!(
        item.uuid,
        runner::item_uuid(&item.origin, &item.updated_on.to_string())
    );
    assert_eq!(item.data["fetched_on"].as_f64(), Some(item.updated_on));
    assert_eq!(item.data["name"], "python");
}

#[tokio::test]
async fn untagged_sources_fall_back_to_the_origin() {
    let source = DockerHub::with_client("_", "python", None, FixtureClient);

    let items = runner::run_once("dockerhub", &source, CATEGORY_DOCKERHUB_DATA)
        .await
        .expect("run ok");
    assert_eq!(items[0].tag, "https://hub.docker.com/library/python");
    assert_eq!(items[0].origin, "https://hub.docker.com/library/python");
}

#[tokio::test]
async fn run_serializes_to_one_json_object_per_item() {
    let source = DockerHub::with_client("library", "python", None, FixtureClient);

    let items = runner::run_once("dockerhub", &source, CATEGORY_DOCKERHUB_DATA)
        .await
        .expect("run ok");

    let line = serde_json::to_string(&items[0]).expect("serializable");
    let round: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(round["backend_name"], "dockerhub");
    assert_eq!(round["data"]["pull_count"], 100);
}
