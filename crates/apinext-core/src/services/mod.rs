//! Service implementations and middleware.

mod gateway;
mod logging;

pub use gateway::GatewayService;
pub use logging::{LoggingService, ServiceMiddleware, chain, logging_middleware};
