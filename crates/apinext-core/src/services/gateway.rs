//! Default [`ApiService`] implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    GetModelsRequest, GetModelsResponse, PostImageRequest, PostImageResponse, group_model_keys,
};
use crate::error::ApiError;
use crate::ports::{ApiService, ModelSourcePort};

/// The gateway service.
///
/// Image registration answers with a fixed record; model listing groups the
/// keys read from the injected model source.
#[derive(Debug, Clone)]
pub struct GatewayService {
    models: Arc<dyn ModelSourcePort>,
}

impl GatewayService {
    pub fn new(models: Arc<dyn ModelSourcePort>) -> Self {
        Self { models }
    }
}

#[async_trait]
impl ApiService for GatewayService {
    async fn post_image(&self, request: PostImageRequest) -> Result<PostImageResponse, ApiError> {
        if request.uri.is_empty() {
            return Err(ApiError::bad_request(
                "empty string",
                "post_image called without a uri",
            ));
        }
        Ok(PostImageResponse::registered(request.uri))
    }

    async fn get_models(&self, _request: GetModelsRequest) -> Result<GetModelsResponse, ApiError> {
        let keys = self.models.model_keys().await?;
        let models = group_model_keys(&keys)?;
        Ok(GetModelsResponse { models, err: None })
    }
}
