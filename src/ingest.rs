//! File ingestion: statements and receipts are posted to an extraction
//! service and whatever transactions it returns are handed back to the
//! caller. Each file is a job that moves through
//! `Queued -> Processing -> Completed | Failed`.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use reqwest::Url;
use serde::Deserialize;

use crate::error::{FinhubError, Result};
use crate::models::{Source, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    fn can_become(&self, next: UploadStatus) -> bool {
        matches!(
            (self, next),
            (Self::Queued, Self::Processing)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Failed)
        )
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    Extracted(Vec<Transaction>),
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    pub media_type: &'static str,
    pub upload_date: NaiveDate,
    pub status: UploadStatus,
    pub outcome: Option<IngestOutcome>,
}

impl UploadedFile {
    fn transition(&mut self, next: UploadStatus) -> Result<()> {
        if !self.status.can_become(next) {
            return Err(FinhubError::InvalidTransition {
                id: self.id.clone(),
                from: self.status.as_str(),
                to: next.as_str(),
            });
        }
        tracing::info!(id = %self.id, file = %self.name, "{} -> {}", self.status, next);
        self.status = next;
        Ok(())
    }

    fn finish(&mut self, outcome: IngestOutcome) -> Result<()> {
        let next = match &outcome {
            IngestOutcome::Extracted(_) => UploadStatus::Completed,
            IngestOutcome::Failed { reason } => {
                tracing::warn!(id = %self.id, file = %self.name, "extraction failed: {reason}");
                UploadStatus::Failed
            }
        };
        self.transition(next)?;
        self.outcome = Some(outcome);
        Ok(())
    }

    pub fn extracted(&self) -> &[Transaction] {
        match &self.outcome {
            Some(IngestOutcome::Extracted(txns)) => txns,
            _ => &[],
        }
    }
}

/// Best guess at a file's media type from its extension.
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "csv" => "text/csv",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "xls" | "xlsx" => "application/vnd.ms-excel",
        _ => "application/octet-stream",
    }
}

/// Something that turns an uploaded document into transactions.
pub trait Extractor {
    fn extract(
        &self,
        name: &str,
        media_type: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<Transaction>>> + Send;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// Posts the file as multipart field `file` and reads back
/// `{ "transactions": [...] }`.
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpExtractor {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| FinhubError::Settings(format!("invalid upload endpoint: {err}")))?;
        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
        })
    }
}

impl Extractor for HttpExtractor {
    async fn extract(&self, name: &str, media_type: &str, bytes: Vec<u8>) -> Result<Vec<Transaction>> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(name.to_string())
            .mime_str(media_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let res = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FinhubError::Other(format!("upload rejected with status {status}")));
        }
        let body = res.json::<UploadResponse>().await?;
        Ok(body.transactions)
    }
}

/// Upload jobs in the order they were enqueued.
#[derive(Debug, Default)]
pub struct IngestQueue {
    files: Vec<UploadedFile>,
}

impl IngestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn enqueue(&mut self, path: &Path, today: NaiveDate) -> &UploadedFile {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let id = format!("file-{}", self.files.len() + 1);
        tracing::info!(%id, file = %name, "queued upload");
        self.files.push(UploadedFile {
            id,
            name,
            path: path.to_path_buf(),
            media_type: media_type_for(path),
            upload_date: today,
            status: UploadStatus::Queued,
            outcome: None,
        });
        &self.files[self.files.len() - 1]
    }

    /// Process the oldest queued job. Returns `None` when nothing is queued.
    pub async fn run_next<E: Extractor>(&mut self, extractor: &E) -> Result<Option<&UploadedFile>> {
        let Some(idx) = self.files.iter().position(|f| f.status == UploadStatus::Queued) else {
            return Ok(None);
        };
        self.files[idx].transition(UploadStatus::Processing)?;

        let (name, media_type, path) = {
            let f = &self.files[idx];
            (f.name.clone(), f.media_type, f.path.clone())
        };
        let outcome = match tokio::fs::read(&path).await {
            Ok(bytes) => match extractor.extract(&name, media_type, bytes).await {
                Ok(txns) => match txns.iter().try_for_each(Transaction::validate) {
                    Ok(()) => {
                        let source = Source::from_media_type(media_type);
                        IngestOutcome::Extracted(txns.into_iter().map(|t| t.with_source(source)).collect())
                    }
                    Err(e) => IngestOutcome::Failed { reason: e.to_string() },
                },
                Err(e) => IngestOutcome::Failed { reason: e.to_string() },
            },
            Err(e) => IngestOutcome::Failed {
                reason: format!("could not read {}: {e}", path.display()),
            },
        };

        self.files[idx].finish(outcome)?;
        Ok(Some(&self.files[idx]))
    }

    /// Drain the queue and return every extracted transaction, in job order.
    pub async fn run_all<E: Extractor>(&mut self, extractor: &E) -> Result<Vec<Transaction>> {
        while self.run_next(extractor).await?.is_some() {}
        Ok(self
            .files
            .iter()
            .flat_map(|f| f.extracted().iter().cloned())
            .collect())
    }
}
