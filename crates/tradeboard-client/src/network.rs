// crates/tradeboard-client/src/network.rs

use std::path::{Path, PathBuf};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use tradeboard_core::dashboard::READ_ONLY_NOTICE;
use tradeboard_core::{Action, Effect, TradeRecord};
use tradeboard_protocol::{parse_dataset, DatasetFormat};

use crate::api::ApiClient;

/// Where trade records come from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Remote CRUD API.
    Remote(ApiClient),
    /// Read-only JSON or CSV file.
    Static(PathBuf),
}

impl DataSource {
    pub fn is_editable(&self) -> bool {
        matches!(self, DataSource::Remote(_))
    }

    /// Short label for the header.
    pub fn describe(&self) -> String {
        match self {
            DataSource::Remote(client) => client.base_url().to_string(),
            DataSource::Static(path) => path.display().to_string(),
        }
    }
}

/// Background task that performs effects and reports the outcome.
///
/// Effects are handled strictly one at a time, in arrival order.
pub struct DataWorker {
    source: DataSource,
    tx: UnboundedSender<Action>,
}

impl DataWorker {
    pub fn new(source: DataSource, tx: UnboundedSender<Action>) -> Self {
        Self { source, tx }
    }

    /// Check backend health, then serve effects until either channel closes.
    pub async fn run(self, mut rx: UnboundedReceiver<Effect>) {
        if let Some(online) = self.check_health().await {
            if self.tx.send(Action::BackendStatus(online)).is_err() {
                return;
            }
        }

        while let Some(effect) = rx.recv().await {
            debug!(?effect, "performing effect");
            let action = self.perform(effect).await;
            if let Err(e) = self.tx.send(action) {
                error!("Failed to send completion to app: {}", e);
                break;
            }
        }
        info!("Data worker stopped");
    }

    /// `None` for sources without a health endpoint.
    pub async fn check_health(&self) -> Option<bool> {
        match &self.source {
            DataSource::Remote(client) => match client.ping().await {
                Ok(()) => {
                    info!("Backend is up");
                    Some(true)
                }
                Err(e) => {
                    warn!("Backend health check failed: {}", e);
                    Some(false)
                }
            },
            DataSource::Static(_) => None,
        }
    }

    /// Run one effect to completion and describe the result as an action.
    pub async fn perform(&self, effect: Effect) -> Action {
        match &self.source {
            DataSource::Remote(client) => perform_remote(client, effect).await,
            DataSource::Static(path) => perform_static(path, effect).await,
        }
    }
}

async fn perform_remote(client: &ApiClient, effect: Effect) -> Action {
    match effect {
        Effect::Fetch => match client.list().await {
            Ok(records) => {
                info!(count = records.len(), "Fetched trades");
                Action::Loaded(records)
            }
            Err(e) => {
                error!("Fetch failed: {}", e);
                Action::LoadFailed(format!("Failed to fetch trades: {e}"))
            }
        },
        Effect::Create(trade) => match client.create(&trade).await {
            Ok(record) => {
                info!(id = record.id, code = %record.trade_code, "Created trade");
                Action::Created(record)
            }
            Err(e) => {
                error!("Create failed: {}", e);
                Action::MutationFailed(format!("Failed to add trade: {e}"))
            }
        },
        Effect::Update(record) => match client.update(&record).await {
            Ok(record) => {
                info!(id = record.id, "Updated trade");
                Action::Updated(record)
            }
            Err(e) => {
                error!("Update of {} failed: {}", record.id, e);
                Action::MutationFailed(format!("Failed to update trade {}: {e}", record.id))
            }
        },
        Effect::Delete(id) => match client.delete(id).await {
            Ok(()) => {
                info!(id, "Deleted trade");
                Action::Deleted(id)
            }
            Err(e) => {
                error!("Delete of {} failed: {}", id, e);
                Action::MutationFailed(format!("Failed to delete trade {id}: {e}"))
            }
        },
    }
}

async fn perform_static(path: &Path, effect: Effect) -> Action {
    match effect {
        Effect::Fetch => match load_dataset(path).await {
            Ok(records) => {
                info!(count = records.len(), path = %path.display(), "Loaded dataset");
                Action::Loaded(records)
            }
            Err(message) => {
                error!("{}", message);
                Action::LoadFailed(message)
            }
        },
        Effect::Create(_) | Effect::Update(_) | Effect::Delete(_) => {
            warn!("Ignoring mutation against a static dataset");
            Action::MutationFailed(READ_ONLY_NOTICE.to_string())
        }
    }
}

async fn load_dataset(path: &Path) -> Result<Vec<TradeRecord>, String> {
    let fail = |e: &dyn std::fmt::Display| format!("Failed to load {}: {e}", path.display());

    let format = DatasetFormat::from_path(path).map_err(|e| fail(&e))?;
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| fail(&e))?;
    parse_dataset(&text, format).map_err(|e| fail(&e))
}
