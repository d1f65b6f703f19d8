//! Model listing types and key grouping.
//!
//! The upstream model config is keyed by `"<model>:<operation>"`, e.g.
//! `"general-v1.1:tag"`. [`group_model_keys`] folds those keys into one
//! [`ModelInfo`] per model.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::ModelsError;

/// A model and the operations it supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(rename = "model")]
    pub name: String,
    pub supported_ops: Vec<String>,
}

impl ModelInfo {
    pub fn new<I, S>(name: impl Into<String>, ops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            supported_ops: ops.into_iter().map(Into::into).collect(),
        }
    }
}

/// The models request carries no payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetModelsRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetModelsResponse {
    pub models: Vec<ModelInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

/// Drop repeated items, keeping the first occurrence of each.
pub fn remove_duplicates<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Group `"model:operation"` keys by model.
///
/// Models come back sorted by name; operations keep the order in which they
/// first appear. Only the segment after the first `:` up to the next one is
/// taken as the operation.
pub fn group_model_keys<I, S>(keys: I) -> Result<Vec<ModelInfo>, ModelsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for key in keys {
        let key = key.as_ref();
        let mut parts = key.split(':');
        let name = parts.next().unwrap_or_default();
        let Some(op) = parts.next() else {
            return Err(ModelsError::MalformedKey(key.to_string()));
        };
        grouped
            .entry(name.to_string())
            .or_default()
            .push(op.to_string());
    }

    Ok(grouped
        .into_iter()
        .map(|(name, ops)| ModelInfo {
            name,
            supported_ops: remove_duplicates(ops),
        })
        .collect())
}
