//! Domain types for the gateway endpoints.

mod image;
mod model;

pub use image::{CREATED_AT, OBJECT_ID, PostImageRequest, PostImageResponse};
pub use model::{GetModelsRequest, GetModelsResponse, ModelInfo, group_model_keys, remove_duplicates};
