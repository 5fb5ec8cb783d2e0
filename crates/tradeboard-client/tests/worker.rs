// crates/tradeboard-client/tests/worker.rs
use std::io::Write;

use serde_json::json;
use tokio::sync::mpsc;
use tradeboard_client::{ApiClient, DataSource, DataWorker};
use tradeboard_core::{Action, Effect};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const DATASET: &str = r#"[
  {"date":"2020-08-10","trade_code":"1JANATAMF","high":"4.3","low":"4.1","open":"4.2","close":"4.1","volume":"2,285,416"},
  {"date":"2020-08-10","trade_code":"1STPRIMFMF","high":"17.5","low":"16.4","open":"16.5","close":"17.3","volume":"1,009"}
]"#;

fn dataset_file(text: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(text.as_bytes()).expect("write dataset");
    file
}

#[tokio::test]
async fn static_dataset_fetch_loads_records() {
    let file = dataset_file(DATASET, ".json");
    let (tx, _rx) = mpsc::unbounded_channel();
    let worker = DataWorker::new(DataSource::Static(file.path().to_path_buf()), tx);

    match worker.perform(Effect::Fetch).await {
        Action::Loaded(records) => {
            assert_eq!(records.len(), 2);
            assert_eq!(records[0].id, 1);
            assert_eq!(records[0].volume, 2_285_416);
        }
        other => panic!("expected Loaded, got {other:?}"),
    }
}

#[tokio::test]
async fn static_dataset_rejects_mutations() {
    let file = dataset_file(DATASET, ".json");
    let (tx, _rx) = mpsc::unbounded_channel();
    let worker = DataWorker::new(DataSource::Static(file.path().to_path_buf()), tx);

    assert!(matches!(
        worker.perform(Effect::Delete(1)).await,
        Action::MutationFailed(_)
    ));
    assert_eq!(worker.check_health().await, None);
}

#[tokio::test]
async fn broken_dataset_reports_load_failure() {
    let file = dataset_file("[{\"date\":\"soon\"}]", ".json");
    let (tx, _rx) = mpsc::unbounded_channel();
    let worker = DataWorker::new(DataSource::Static(file.path().to_path_buf()), tx);

    match worker.perform(Effect::Fetch).await {
        Action::LoadFailed(message) => assert!(message.starts_with("Failed to load")),
        other => panic!("expected LoadFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn remote_worker_pings_then_serves_effects_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/trades"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/trades/3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = ApiClient::new(server.uri()).expect("client should build");
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let (effect_tx, effect_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(DataWorker::new(DataSource::Remote(api), action_tx).run(effect_rx));

    effect_tx.send(Effect::Fetch).unwrap();
    effect_tx.send(Effect::Delete(3)).unwrap();
    drop(effect_tx);

    assert_eq!(action_rx.recv().await, Some(Action::BackendStatus(false)));
    assert_eq!(action_rx.recv().await, Some(Action::Loaded(Vec::new())));
    match action_rx.recv().await {
        Some(Action::MutationFailed(message)) => assert!(message.contains("trade 3")),
        other => panic!("expected MutationFailed, got {other:?}"),
    }

    handle.await.expect("worker should stop when effects close");
}
