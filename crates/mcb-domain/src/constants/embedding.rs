//! Recognized embedding provider identifiers (§4.2).

/// OpenAI embeddings API.
pub const PROVIDER_OPENAI: &str = "openai";
/// Google Vertex AI embeddings.
pub const PROVIDER_VERTEX: &str = "vertex";
/// Google Gemini embeddings API.
pub const PROVIDER_GEMINI: &str = "gemini";
/// AWS Bedrock embeddings.
pub const PROVIDER_AWS: &str = "aws";
/// Microsoft Azure OpenAI embeddings.
pub const PROVIDER_MICROSOFT: &str = "microsoft";
/// AWS SageMaker-hosted embedding endpoints.
pub const PROVIDER_SAGEMAKER: &str = "sagemaker";

/// All recognized embedding provider identifiers.
pub const RECOGNIZED_PROVIDERS: &[&str] = &[
    PROVIDER_OPENAI,
    PROVIDER_VERTEX,
    PROVIDER_GEMINI,
    PROVIDER_AWS,
    PROVIDER_MICROSOFT,
    PROVIDER_SAGEMAKER,
];
