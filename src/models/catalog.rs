use super::types::ModelRecord;

/// Built-in model catalog.
///
/// Weights are the quantized GGUF conversions published on Hugging Face;
/// each entry pairs them with the f16 multimodal projector from the same
/// repository. Callers needing a different set construct records themselves
/// and hand them to the registry.
pub fn default_catalog() -> Vec<ModelRecord> {
    vec![
        ModelRecord::new(
            "LLaVA v1.5 7B",
            "https://huggingface.co/mys/ggml_llava-v1.5-7b/resolve/main/ggml-model-q4_k.gguf",
            "https://huggingface.co/mys/ggml_llava-v1.5-7b/resolve/main/mmproj-model-f16.gguf",
        ),
        ModelRecord::new(
            "LLaVA v1.5 13B",
            "https://huggingface.co/mys/ggml_llava-v1.5-13b/resolve/main/ggml-model-q4_k.gguf",
            "https://huggingface.co/mys/ggml_llava-v1.5-13b/resolve/main/mmproj-model-f16.gguf",
        ),
        ModelRecord::new(
            "LLaVA v1.6 Mistral 7B",
            "https://huggingface.co/cjpais/llava-1.6-mistral-7b-gguf/resolve/main/llava-v1.6-mistral-7b.Q4_K_M.gguf",
            "https://huggingface.co/cjpais/llava-1.6-mistral-7b-gguf/resolve/main/mmproj-model-f16.gguf",
        ),
        ModelRecord::new(
            "LLaVA v1.6 Vicuna 7B",
            "https://huggingface.co/cjpais/llava-v1.6-vicuna-7b-gguf/resolve/main/llava-v1.6-vicuna-7b.Q4_K_M.gguf",
            "https://huggingface.co/cjpais/llava-v1.6-vicuna-7b-gguf/resolve/main/mmproj-model-f16.gguf",
        ),
    ]
}
