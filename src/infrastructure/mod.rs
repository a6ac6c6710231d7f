//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Inference providers (bedrock, fake)
//! - HTTP server setup (server)
//! - Application state (state)

pub mod bedrock;
pub mod config;
pub mod fake;
pub mod server;
pub mod state;

pub use bedrock::BedrockProvider;
pub use fake::FakeProvider;
pub use state::AppState;
