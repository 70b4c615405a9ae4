use std::{
    collections::BTreeSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::Practitioner,
    error::DirectoryError,
    protocol::{decode_listing, PractitionerRecord},
};
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub mod card;
pub mod pipeline;

pub use card::PractitionerCard;
pub use pipeline::{filter_and_sort, leading_integer, FilterState, ListingMemo, SortKey};

pub const DEFAULT_DATASET_URL: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

#[async_trait]
pub trait PractitionerSource: Send + Sync {
    async fn fetch_listing(&self) -> Result<Vec<PractitionerRecord>, DirectoryError>;
}

pub struct HttpDirectoryClient {
    http: Client,
    dataset_url: String,
}

impl HttpDirectoryClient {
    pub fn new(dataset_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            dataset_url: dataset_url.into(),
        }
    }

    pub fn dataset_url(&self) -> &str {
        &self.dataset_url
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, DirectoryError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| DirectoryError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| DirectoryError::Transport(err.to_string()))?;
        Ok(bytes.to_vec())
    }

    pub async fn fetch_photo(&self, url: &str) -> Result<Vec<u8>, DirectoryError> {
        self.get_bytes(url).await
    }
}

#[async_trait]
impl PractitionerSource for HttpDirectoryClient {
    async fn fetch_listing(&self) -> Result<Vec<PractitionerRecord>, DirectoryError> {
        let body = self.get_bytes(&self.dataset_url).await?;
        Ok(decode_listing(&body)?)
    }
}

/// The loaded record set and the categories derived from it. Read-only.
#[derive(Debug, Clone)]
pub struct DirectoryData {
    records: Arc<[Practitioner]>,
    categories: BTreeSet<String>,
}

impl DirectoryData {
    pub fn from_records(records: Vec<Practitioner>) -> Self {
        let categories = collect_categories(&records);
        Self {
            records: records.into(),
            categories,
        }
    }

    pub fn records(&self) -> &Arc<[Practitioner]> {
        &self.records
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }
}

pub fn collect_categories(records: &[Practitioner]) -> BTreeSet<String> {
    records
        .iter()
        .flat_map(|practitioner| practitioner.speciality_names())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready(DirectoryData),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

pub async fn load_directory<S>(source: &S) -> Result<DirectoryData, DirectoryError>
where
    S: PractitionerSource + ?Sized,
{
    let records = source.fetch_listing().await?;
    let records: Vec<Practitioner> = records.into_iter().map(Practitioner::from).collect();
    let data = DirectoryData::from_records(records);
    info!(
        records = data.records.len(),
        categories = data.categories.len(),
        "practitioner listing loaded"
    );
    Ok(data)
}

/// Runs the listing fetch at most once.
pub struct DirectoryLoader {
    source: Arc<dyn PractitionerSource>,
    started: AtomicBool,
}

impl DirectoryLoader {
    pub fn new(source: Arc<dyn PractitionerSource>) -> Self {
        Self {
            source,
            started: AtomicBool::new(false),
        }
    }

    /// Spawns the load on the current tokio runtime.
    ///
    /// Returns `None` if a load was already started by this loader. The
    /// callback is not invoked if the returned handle is cancelled or dropped
    /// before the fetch completes.
    pub fn start<F>(&self, on_complete: F) -> Option<LoadHandle>
    where
        F: FnOnce(Result<DirectoryData, DirectoryError>) + Send + 'static,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!("practitioner listing load already started; ignoring");
            return None;
        }
        let source = Arc::clone(&self.source);
        let task = tokio::spawn(async move {
            let outcome = load_directory(source.as_ref()).await;
            if let Err(err) = &outcome {
                warn!(kind = ?err.kind(), "practitioner listing load failed: {err}");
            }
            on_complete(outcome);
        });
        Some(LoadHandle { task: Some(task) })
    }
}

/// Owns the in-flight load task; dropping it aborts the task.
pub struct LoadHandle {
    task: Option<JoinHandle<()>>,
}

impl LoadHandle {
    pub fn cancel(&self) {
        if let Some(task) = self.task.as_ref().filter(|task| !task.is_finished()) {
            info!("cancelling practitioner listing load");
            task.abort();
        }
    }

    /// Waits for the task; a cancelled task reports [`DirectoryError::Cancelled`].
    pub async fn join(mut self) -> Result<(), DirectoryError> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        match task.await {
            Ok(()) => Ok(()),
            Err(err) if err.is_cancelled() => Err(DirectoryError::Cancelled),
            Err(err) => Err(DirectoryError::Transport(err.to_string())),
        }
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
