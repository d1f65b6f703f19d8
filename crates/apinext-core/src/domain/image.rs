//! Image submission types.

use serde::{Deserialize, Serialize};

/// Object id returned for every submitted image until storage exists.
pub const OBJECT_ID: &str = "Ed1nuqPvcm";

/// Creation timestamp paired with [`OBJECT_ID`].
pub const CREATED_AT: &str = "2011-08-20T02:06:57.931Z";

/// Request to register an image by URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostImageRequest {
    pub uri: String,
}

impl PostImageRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Response to a [`PostImageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostImageResponse {
    pub object_id: String,
    pub created_at: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl PostImageResponse {
    /// The fixed response for `uri`.
    pub fn registered(uri: impl Into<String>) -> Self {
        Self {
            object_id: OBJECT_ID.to_string(),
            created_at: CREATED_AT.to_string(),
            uri: uri.into(),
            err: None,
        }
    }
}
