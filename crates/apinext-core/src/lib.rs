#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

// Dev-dependencies only used by integration tests
#[cfg(test)]
use apinext_reflect as _;

// Re-export commonly used types for convenience
pub use domain::{
    CREATED_AT, GetModelsRequest, GetModelsResponse, ModelInfo, OBJECT_ID, PostImageRequest,
    PostImageResponse, group_model_keys, remove_duplicates,
};
pub use error::{ApiError, MODEL_INFO_ERROR, ModelsError};
pub use ports::{ApiService, ModelSourcePort, StaticModelSource};
pub use services::{GatewayService, LoggingService, ServiceMiddleware, chain, logging_middleware};
