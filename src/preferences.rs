use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{ModelRecord, ModelRegistry};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AppPreferences {
    /// Name of the model selected for use. None means no selection yet.
    #[serde(default)]
    pub active_model: Option<String>,
}

/// Persisted user preferences, cached in memory and written through on
/// every change.
pub struct PreferencesManager {
    preferences: RwLock<AppPreferences>,
    config_path: PathBuf,
}

impl PreferencesManager {
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "llavamodels", "LlavaModels").ok_or(Error::ProjectDirs)?;
        let config_dir = project_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Self::with_config_path(config_dir.join("preferences.json"))
    }

    /// Manager persisting to an explicit file path.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self> {
        let preferences = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(error = %e, "unreadable preferences file, using defaults");
                AppPreferences::default()
            })
        } else {
            AppPreferences::default()
        };

        Ok(Self {
            preferences: RwLock::new(preferences),
            config_path,
        })
    }

    pub async fn get(&self) -> AppPreferences {
        self.preferences.read().await.clone()
    }

    pub async fn set_active_model(&self, model_name: Option<String>) -> Result<()> {
        let mut prefs = self.preferences.write().await;
        prefs.active_model = model_name;
        self.save(&prefs).await
    }

    /// The registry record matching the persisted selection, if any.
    pub async fn resolve_active(&self, registry: &ModelRegistry) -> Option<ModelRecord> {
        let name = self.preferences.read().await.active_model.clone()?;
        registry.find_by_name(&name).await
    }

    async fn save(&self, prefs: &AppPreferences) -> Result<()> {
        let json = serde_json::to_string_pretty(prefs)?;
        tokio::fs::write(&self.config_path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let manager = PreferencesManager::with_config_path(path.clone()).unwrap();
        manager
            .set_active_model(Some("Llava-7B".to_string()))
            .await
            .unwrap();

        let reloaded = PreferencesManager::with_config_path(path).unwrap();
        assert_eq!(
            reloaded.get().await.active_model.as_deref(),
            Some("Llava-7B")
        );
    }

    #[tokio::test]
    async fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "not json").unwrap();

        let manager = PreferencesManager::with_config_path(path).unwrap();
        assert!(manager.get().await.active_model.is_none());
    }

    #[tokio::test]
    async fn resolve_active_joins_registry() {
        let dir = tempfile::tempdir().unwrap();
        let manager =
            PreferencesManager::with_config_path(dir.path().join("preferences.json")).unwrap();

        let record = ModelRecord::new("Llava-7B", "https://x/m.gguf", "https://x/p.gguf");
        let id = record.id();
        let registry = ModelRegistry::new(vec![record]);

        assert!(manager.resolve_active(&registry).await.is_none());

        manager
            .set_active_model(Some("Llava-7B".to_string()))
            .await
            .unwrap();
        let resolved = manager.resolve_active(&registry).await.unwrap();
        assert_eq!(resolved.id(), id);
    }
}
