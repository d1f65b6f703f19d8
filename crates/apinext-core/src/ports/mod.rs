//! Port definitions.
//!
//! [`ApiService`] is the inbound port every transport calls into;
//! [`ModelSourcePort`] is the outbound port that supplies raw model config.

mod api_service;
mod model_source;

pub use api_service::ApiService;
pub use model_source::{ModelSourcePort, StaticModelSource};
