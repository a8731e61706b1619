//! Per-provider defaults: base URLs, default models, well-known output
//! dimensions (§4.2, §9 design note).

/// OpenAI embeddings API base URL.
pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";
/// OpenAI default embedding model.
pub const OPENAI_DEFAULT_MODEL: &str = "text-embedding-3-small";
/// Known output dimension for `text-embedding-3-small`.
pub const OPENAI_DIMENSION_SMALL: usize = 1536;
/// Known output dimension for `text-embedding-3-large`.
pub const OPENAI_DIMENSION_LARGE: usize = 3072;
/// Known output dimension for the legacy `text-embedding-ada-002`.
pub const OPENAI_DIMENSION_ADA: usize = 1536;

/// Google Gemini embeddings API base URL.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Gemini default embedding model.
pub const GEMINI_DEFAULT_MODEL: &str = "text-embedding-004";
/// Known output dimension for `text-embedding-004`.
pub const GEMINI_DIMENSION_DEFAULT: usize = 768;

/// Google Vertex AI default region/model endpoint base URL.
pub const VERTEX_API_BASE_URL: &str = "https://us-central1-aiplatform.googleapis.com/v1";
/// Vertex default embedding model.
pub const VERTEX_DEFAULT_MODEL: &str = "text-embedding-004";
/// Known output dimension for Vertex's default embedding model.
pub const VERTEX_DIMENSION_DEFAULT: usize = 768;

/// AWS Bedrock default embeddings endpoint base URL.
pub const AWS_API_BASE_URL: &str = "https://bedrock-runtime.us-east-1.amazonaws.com";
/// AWS Bedrock default embedding model (Titan).
pub const AWS_DEFAULT_MODEL: &str = "amazon.titan-embed-text-v2:0";
/// Known output dimension for Titan Embeddings V2.
pub const AWS_DIMENSION_DEFAULT: usize = 1024;

/// Azure OpenAI default embeddings endpoint base URL placeholder; callers
/// must supply their resource's `base_url`.
pub const MICROSOFT_API_BASE_URL: &str = "https://api.openai.azure.com";
/// Azure OpenAI default embedding deployment/model name.
pub const MICROSOFT_DEFAULT_MODEL: &str = "text-embedding-3-small";
/// Known output dimension for Azure's `text-embedding-3-small` deployment.
pub const MICROSOFT_DIMENSION_DEFAULT: usize = 1536;

/// SageMaker default embeddings endpoint base URL placeholder; callers
/// must supply their endpoint's `base_url`.
pub const SAGEMAKER_API_BASE_URL: &str = "https://runtime.sagemaker.us-east-1.amazonaws.com";
/// SageMaker default embedding model/endpoint name.
pub const SAGEMAKER_DEFAULT_MODEL: &str = "huggingface-textembedding-gte-base";
/// Known output dimension for the GTE-base SageMaker endpoint.
pub const SAGEMAKER_DIMENSION_DEFAULT: usize = 768;

/// Fallback output dimension used when a model has no known entry and no
/// response has yet been observed to populate the dimension cache.
pub const DIMENSION_FALLBACK_DEFAULT: usize = 1536;

/// OpenAI/Azure-OpenAI-compatible embeddings endpoint path.
pub const OPENAI_COMPATIBLE_EMBEDDINGS_PATH: &str = "/embeddings";
