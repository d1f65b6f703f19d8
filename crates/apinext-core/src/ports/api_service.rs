//! The gateway's service interface.

use async_trait::async_trait;
use std::fmt;

use crate::domain::{GetModelsRequest, GetModelsResponse, PostImageRequest, PostImageResponse};
use crate::error::ApiError;

/// Entry point to the gateway API.
///
/// Middlewares wrap one `ApiService` in another, so every implementation
/// must be shareable behind `Arc<dyn ApiService>`.
#[async_trait]
pub trait ApiService: Send + Sync + fmt::Debug {
    /// Register an image by URI.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` (400) when the URI is empty.
    async fn post_image(&self, request: PostImageRequest) -> Result<PostImageResponse, ApiError>;

    /// List models and the operations each supports.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the model source fails or yields malformed keys.
    async fn get_models(&self, request: GetModelsRequest) -> Result<GetModelsResponse, ApiError>;
}
