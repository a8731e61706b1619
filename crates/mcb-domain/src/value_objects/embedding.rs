//! Dense vector embeddings, padded to the store's fixed width.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A dense embedding vector, zero-padded to the store's fixed width
/// (`D_store`). The model's native width (`D_model`) is retained so
/// callers can distinguish real from padding components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// The (possibly zero-padded) vector, length `D_store`.
    pub vector: Vec<f32>,
    /// Name of the model that produced the real, unpadded components.
    pub model: String,
    /// The model's native dimension (`D_model`), `<= vector.len()`.
    pub native_dimensions: usize,
}

impl Embedding {
    /// Build an embedding by zero-padding `vector` out to `store_dimensions`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dimension`] if `vector` is already wider than
    /// `store_dimensions`.
    pub fn padded(
        vector: Vec<f32>,
        model: impl Into<String>,
        store_dimensions: usize,
    ) -> Result<Self> {
        let native_dimensions = vector.len();
        if native_dimensions > store_dimensions {
            return Err(Error::dimension(native_dimensions, store_dimensions));
        }
        let mut vector = vector;
        vector.resize(store_dimensions, 0.0);
        Ok(Self {
            vector,
            model: model.into(),
            native_dimensions,
        })
    }

    /// The store-fixed width of this embedding.
    pub fn store_dimensions(&self) -> usize {
        self.vector.len()
    }

    /// The real (unpadded) portion of the vector.
    pub fn native_slice(&self) -> &[f32] {
        &self.vector[..self.native_dimensions]
    }
}
