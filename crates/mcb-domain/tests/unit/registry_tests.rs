//! Embedding-provider registry resolution (§4.2, §9).

use mcb_domain::registry::resolve_embedding_provider;
use mcb_domain::value_objects::EmbeddingProviderConfig;

#[test]
fn unknown_provider_reports_available_names() {
    let config = EmbeddingProviderConfig::new("not-a-real-provider");
    let err = resolve_embedding_provider(&config).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("not-a-real-provider"));
}
