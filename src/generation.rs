//! Answer generation trait.

use async_trait::async_trait;

use crate::error::Result;

/// An external generative model that turns a grounded prompt into answer
/// text.
///
/// The pipeline treats generation as an opaque call and makes no retry
/// attempts of its own; a failed or timed-out call surfaces as
/// [`QaError::GenerationError`](crate::QaError::GenerationError) and the
/// caller decides whether to retry. Generation options (model,
/// temperature, output limits, timeout) belong to the implementation's
/// constructor, not to this trait.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate answer text for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
