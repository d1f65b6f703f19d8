//! Comparator configuration.

use serde::{Deserialize, Serialize};

/// How sequences and arrays are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceOrder {
    /// Treat sequences as multisets, matched greedily.
    #[default]
    Ignore,
    /// Compare element `i` with element `i`.
    Preserve,
}

/// Options for a [`Comparator`](crate::Comparator).
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    pub sequence_order: SequenceOrder,
}

impl CompareOptions {
    /// Options matching positional deep equality.
    #[must_use]
    pub const fn ordered() -> Self {
        Self {
            sequence_order: SequenceOrder::Preserve,
        }
    }

    #[must_use]
    pub const fn ignores_order(&self) -> bool {
        matches!(self.sequence_order, SequenceOrder::Ignore)
    }
}
