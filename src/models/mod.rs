pub mod catalog;
pub mod downloader;
pub mod registry;
pub mod types;

pub use catalog::default_catalog;
pub use downloader::{ArtifactKind, DownloadProgress, ModelDownloader, ModelPaths};
pub use registry::{ModelRegistry, RegistryEvent};
pub use types::ModelRecord;
