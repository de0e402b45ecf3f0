//! Catalog, observable registry, and artifact downloader for LLaVA-style
//! vision-language models.
//!
//! A [`ModelRecord`] names a model and the locations of its two artifacts:
//! the weights file and the multimodal projection file. Records live in a
//! [`ModelRegistry`], an ordered container that broadcasts a
//! [`RegistryEvent`] after every mutation so a rendering layer can re-read
//! the entries. [`ModelDownloader`] fetches the artifacts to local disk and
//! [`PreferencesManager`] persists which model the user selected.
//!
//! # Example
//!
//! ```
//! use llava_models::{ModelRecord, ModelRegistry};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let registry = ModelRegistry::new(vec![ModelRecord::new(
//!     "Llava-7B",
//!     "https://x/model.bin",
//!     "https://x/proj.bin",
//! )]);
//! let mut events = registry.subscribe();
//!
//! registry
//!     .push(ModelRecord::new("Llava-13B", "https://x/m13.bin", "https://x/p13.bin"))
//!     .await;
//! assert_eq!(registry.len().await, 2);
//! assert!(events.try_recv().is_ok());
//! # });
//! ```

pub mod error;
pub mod models;
pub mod preferences;

pub use error::{Error, Result};
pub use models::{
    default_catalog, ArtifactKind, DownloadProgress, ModelDownloader, ModelPaths, ModelRecord,
    ModelRegistry, RegistryEvent,
};
pub use preferences::{AppPreferences, PreferencesManager};
