//! Model source port.
//!
//! Supplies the raw `"model:operation"` keys of the upstream model config.
//! Fetching the upstream page lives outside this crate.

use async_trait::async_trait;
use std::fmt;

use crate::error::ModelsError;

#[async_trait]
pub trait ModelSourcePort: Send + Sync + fmt::Debug {
    /// All config keys, in upstream order.
    ///
    /// # Errors
    ///
    /// Returns `ModelsError::SourceUnavailable` if the source cannot be read.
    async fn model_keys(&self) -> Result<Vec<String>, ModelsError>;
}

/// In-memory model source.
#[derive(Debug, Clone, Default)]
pub struct StaticModelSource {
    keys: Vec<String>,
}

impl StaticModelSource {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ModelSourcePort for StaticModelSource {
    async fn model_keys(&self) -> Result<Vec<String>, ModelsError> {
        Ok(self.keys.clone())
    }
}
