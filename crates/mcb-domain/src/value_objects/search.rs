//! Hybrid search result types (dense + sparse fused by RRF).

use serde::{Deserialize, Serialize};

use crate::entities::Document;

/// A single hybrid-search hit: the matched document plus its fused rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matched document (chunk).
    pub document: Document,
    /// Reciprocal Rank Fusion score (higher is better).
    pub score: f32,
    /// 1-based rank assigned by the vector (ANN) engine, if it matched.
    pub vec_rank: Option<usize>,
    /// 1-based rank assigned by the full-text (BM25) engine, if it matched.
    pub fts_rank: Option<usize>,
}

/// Per-engine candidate rank used internally while computing RRF.
#[derive(Debug, Clone, Copy)]
pub struct EngineRank {
    /// The document's id.
    pub document_id: crate::value_objects::DocumentId,
    /// 1-based rank within this engine's result set.
    pub rank: usize,
}

/// Reciprocal Rank Fusion constant (`k` in `1 / (k + rank)`).
pub const RRF_K: f64 = 60.0;

/// Compute the RRF score for a candidate given its (optional) per-engine
/// ranks, following `rrf_score = sum(1 / (k + rank_e))` over engines that
/// matched.
pub fn rrf_score(vec_rank: Option<usize>, fts_rank: Option<usize>) -> f64 {
    let mut score = 0.0;
    if let Some(rank) = vec_rank {
        score += 1.0 / (RRF_K + rank as f64);
    }
    if let Some(rank) = fts_rank {
        score += 1.0 / (RRF_K + rank as f64);
    }
    score
}

/// A final, context-expanded result surfaced by the Document Retriever
/// (§4.7): a coherent excerpt rehydrated from a hit plus its hierarchy
/// neighbors, deduplicated to the top-scoring representative per URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedResult {
    /// Source URL the excerpt was rehydrated from.
    pub url: String,
    /// The (possibly expanded) excerpt content.
    pub content: String,
    /// RRF score of the representative chunk.
    pub score: f32,
}
