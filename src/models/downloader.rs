use std::path::PathBuf;

use directories::ProjectDirs;
use futures_util::StreamExt;
use reqwest::Client;
use serde::Serialize;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

use super::types::ModelRecord;
use crate::error::{Error, Result};

const PROGRESS_CHANNEL_CAPACITY: usize = 256;

/// Which of a record's two artifacts is being handled.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Weights,
    Projection,
}

impl ArtifactKind {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Weights => "model.gguf",
            Self::Projection => "projection.gguf",
        }
    }
}

/// Progress update emitted while an artifact streams to disk.
#[derive(Serialize, Clone, Debug)]
pub struct DownloadProgress {
    pub record_id: Uuid,
    pub artifact: ArtifactKind,
    pub bytes: u64,
    pub total: u64,
    pub progress: f32,
}

/// Local paths of a record's fetched artifacts.
#[derive(Clone, Debug)]
pub struct ModelPaths {
    pub weights: PathBuf,
    pub projection: PathBuf,
}

/// Fetches a record's weights and projection artifacts over HTTP.
pub struct ModelDownloader {
    client: Client,
    base_path: PathBuf,
    progress: broadcast::Sender<DownloadProgress>,
}

impl ModelDownloader {
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "llavamodels", "LlavaModels").ok_or(Error::ProjectDirs)?;
        let base_path = project_dirs.data_dir().join("models");
        std::fs::create_dir_all(&base_path)?;
        Ok(Self::with_base_path(base_path))
    }

    /// Downloader rooted at an explicit directory.
    pub fn with_base_path(base_path: PathBuf) -> Self {
        let (progress, _) = broadcast::channel(PROGRESS_CHANNEL_CAPACITY);
        Self {
            client: Client::new(),
            base_path,
            progress,
        }
    }

    pub fn subscribe_progress(&self) -> broadcast::Receiver<DownloadProgress> {
        self.progress.subscribe()
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Cache directory for a record. Keyed by name rather than id so caches
    /// survive restarts; records sharing a name share the directory.
    pub fn model_dir(&self, record: &ModelRecord) -> PathBuf {
        self.base_path.join(slug(record.model_name()))
    }

    pub fn artifact_path(&self, record: &ModelRecord, kind: ArtifactKind) -> PathBuf {
        self.model_dir(record).join(kind.file_name())
    }

    /// Whether both artifacts are already on disk.
    pub fn is_downloaded(&self, record: &ModelRecord) -> bool {
        self.artifact_path(record, ArtifactKind::Weights).exists()
            && self
                .artifact_path(record, ArtifactKind::Projection)
                .exists()
    }

    /// Fetch both artifacts for `record`, returning their local paths.
    pub async fn download(&self, record: &ModelRecord) -> Result<ModelPaths> {
        let dir = self.model_dir(record);
        tokio::fs::create_dir_all(&dir).await?;

        info!(model = record.model_name(), "downloading model artifacts");

        let weights = self.artifact_path(record, ArtifactKind::Weights);
        self.download_file(record, ArtifactKind::Weights, record.url(), &weights)
            .await?;

        let projection = self.artifact_path(record, ArtifactKind::Projection);
        self.download_file(
            record,
            ArtifactKind::Projection,
            record.projection_url(),
            &projection,
        )
        .await?;

        info!(model = record.model_name(), "download complete");
        Ok(ModelPaths {
            weights,
            projection,
        })
    }

    async fn download_file(
        &self,
        record: &ModelRecord,
        kind: ArtifactKind,
        url: &str,
        file_path: &PathBuf,
    ) -> Result<()> {
        // Stream into a .part file, rename once complete.
        let part_path = file_path.with_extension("part");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "HTTP {} for {}",
                response.status(),
                url
            )));
        }
        let total = response.content_length().unwrap_or(0);

        let mut file = File::create(&part_path).await?;
        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            let progress = if total > 0 {
                (downloaded as f32 / total as f32) * 100.0
            } else {
                0.0
            };
            let _ = self.progress.send(DownloadProgress {
                record_id: record.id(),
                artifact: kind,
                bytes: downloaded,
                total,
                progress,
            });
        }

        file.flush().await?;
        drop(file);

        tokio::fs::rename(&part_path, file_path).await?;
        Ok(())
    }

    /// Remove a record's artifacts from disk. Missing files are ignored.
    pub async fn delete(&self, record: &ModelRecord) -> Result<()> {
        for kind in [ArtifactKind::Weights, ArtifactKind::Projection] {
            let path = self.artifact_path(record, kind);
            if path.exists() {
                tokio::fs::remove_file(&path).await?;
            }
        }
        Ok(())
    }
}

/// Directory-safe form of a model name.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '.' {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash && !out.is_empty() {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ModelRecord {
        ModelRecord::new("Llava-7B", "https://x/m.gguf", "https://x/p.gguf")
    }

    #[test]
    fn slug_normalizes_names() {
        assert_eq!(slug("LLaVA v1.5 7B"), "llava-v1.5-7b");
        assert_eq!(slug("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn artifact_layout_under_base() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = ModelDownloader::with_base_path(dir.path().to_path_buf());
        let record = sample();

        let weights = downloader.artifact_path(&record, ArtifactKind::Weights);
        assert_eq!(weights, dir.path().join("llava-7b").join("model.gguf"));
        assert!(!downloader.is_downloaded(&record));
    }

    #[tokio::test]
    async fn delete_without_download_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = ModelDownloader::with_base_path(dir.path().to_path_buf());
        downloader.delete(&sample()).await.unwrap();
    }

    #[tokio::test]
    async fn is_downloaded_tracks_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = ModelDownloader::with_base_path(dir.path().to_path_buf());
        let record = sample();

        std::fs::create_dir_all(downloader.model_dir(&record)).unwrap();
        std::fs::write(downloader.artifact_path(&record, ArtifactKind::Weights), b"w").unwrap();
        std::fs::write(
            downloader.artifact_path(&record, ArtifactKind::Projection),
            b"p",
        )
        .unwrap();
        assert!(downloader.is_downloaded(&record));

        downloader.delete(&record).await.unwrap();
        assert!(!downloader.is_downloaded(&record));
    }
}
