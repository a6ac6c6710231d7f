//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no Axum, no reqwest).
//! Only the suggestion record, response extraction, the provider trait and
//! domain error types.

pub mod errors;
pub mod extraction;
pub mod provider;
pub mod suggestion;

pub use errors::CoffeeError;
pub use extraction::{Candidate, ResponseShape, extract_candidate};
pub use provider::{
    InferenceProvider, InvocationRequest, ProviderError, ProviderErrorKind, ToolDefinition,
};
pub use suggestion::{CoffeeSuggestion, ConfidenceTier, normalize};
