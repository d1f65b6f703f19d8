//! Logging middleware.
//!
//! Wraps any [`ApiService`] and emits one structured event per call with the
//! method name, the interesting request and response fields, the error (if
//! any) and the elapsed time. Results pass through untouched.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::{GetModelsRequest, GetModelsResponse, PostImageRequest, PostImageResponse};
use crate::error::ApiError;
use crate::ports::ApiService;

/// A chainable service decorator.
pub type ServiceMiddleware = Box<dyn Fn(Arc<dyn ApiService>) -> Arc<dyn ApiService> + Send + Sync>;

/// Middleware that wraps a service in [`LoggingService`].
pub fn logging_middleware() -> ServiceMiddleware {
    Box::new(|next| Arc::new(LoggingService::new(next)))
}

/// Apply `middlewares` in order; the last one ends up outermost.
pub fn chain(service: Arc<dyn ApiService>, middlewares: &[ServiceMiddleware]) -> Arc<dyn ApiService> {
    middlewares
        .iter()
        .fold(service, |service, middleware| middleware(service))
}

#[derive(Debug)]
pub struct LoggingService {
    next: Arc<dyn ApiService>,
}

impl LoggingService {
    pub fn new(next: Arc<dyn ApiService>) -> Self {
        Self { next }
    }
}

#[async_trait]
impl ApiService for LoggingService {
    async fn post_image(&self, request: PostImageRequest) -> Result<PostImageResponse, ApiError> {
        let begin = Instant::now();
        let uri = request.uri.clone();

        let result = self.next.post_image(request).await;

        let object_id = result.as_ref().map_or("", |r| r.object_id.as_str());
        tracing::info!(
            method = "PostImage",
            uri = %uri,
            object_id,
            err = ?result.as_ref().err(),
            took = ?begin.elapsed(),
            "Handled request"
        );
        result
    }

    async fn get_models(&self, request: GetModelsRequest) -> Result<GetModelsResponse, ApiError> {
        let begin = Instant::now();

        let result = self.next.get_models(request).await;

        let models: Vec<&str> = result.as_ref().map_or_else(
            |_| Vec::new(),
            |r| r.models.iter().map(|m| m.name.as_str()).collect(),
        );
        tracing::info!(
            method = "GetModels",
            models = ?models,
            err = ?result.as_ref().err(),
            took = ?begin.elapsed(),
            "Handled request"
        );
        result
    }
}
