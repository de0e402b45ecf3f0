use serde::Serialize;
use uuid::Uuid;

/// Immutable description of one downloadable model.
///
/// A record names the model and the locations of its two artifacts: the
/// weights file and the multimodal projection file. The id is generated at
/// construction and is what `PartialEq`/`Hash` compare; two records built
/// from identical name and URLs are distinct entries.
#[derive(Serialize, Clone, Debug)]
pub struct ModelRecord {
    id: Uuid,
    model_name: String,
    url: String,
    projection_url: String,
}

impl ModelRecord {
    pub fn new(
        model_name: impl Into<String>,
        url: impl Into<String>,
        projection_url: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            model_name: model_name.into(),
            url: url.into(),
            projection_url: projection_url.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Location of the weights artifact. Opaque; not validated here.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Location of the multimodal projection artifact.
    pub fn projection_url(&self) -> &str {
        &self.projection_url
    }
}

impl PartialEq for ModelRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelRecord {}

impl std::hash::Hash for ModelRecord {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_keeps_inputs() {
        let record = ModelRecord::new("Llava-7B", "https://x/model.bin", "https://x/proj.bin");
        assert_eq!(record.model_name(), "Llava-7B");
        assert_eq!(record.url(), "https://x/model.bin");
        assert_eq!(record.projection_url(), "https://x/proj.bin");
    }

    #[test]
    fn identical_content_distinct_identity() {
        let a = ModelRecord::new("Llava-7B", "https://x/model.bin", "https://x/proj.bin");
        let b = ModelRecord::new("Llava-7B", "https://x/model.bin", "https://x/proj.bin");
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn clones_share_identity() {
        let a = ModelRecord::new("Llava-7B", "https://x/model.bin", "https://x/proj.bin");
        let b = a.clone();
        assert_eq!(a, b);
    }
}
