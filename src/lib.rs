// Media Gateway Library
//
// This crate provides an HTTP gateway in front of a media conversion service and
// a subtitling service. It exposes one CORS-enabled surface and forwards each
// request to exactly one upstream operation.

pub mod config;
pub mod config_loader;
pub mod config_validator;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod upstream;


// Re-export common types for easier access
pub use config::{Backend, GatewayConfig, Operation, Phase, UpstreamTable, UpstreamTarget};
pub use config_validator::GatewayConfigValidator;
pub use error::GatewayError;
pub use gateway::Gateway;
pub use handlers::{configure, cors};
pub use models::{ErrorEnvelope, UploadedFile};
pub use upstream::{UpstreamClient, UpstreamOutcome};
