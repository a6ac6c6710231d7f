//! Services Layer
//!
//! Business logic extracted from HTTP handlers. Services take their
//! collaborators as arguments and can be called without the HTTP layer.

pub mod coffee_service;

pub use coffee_service::{build_invocation, build_prompt, coffee_tool, suggest_coffee};
