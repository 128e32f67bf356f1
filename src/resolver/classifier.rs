use crate::error::ResolutionError;
use async_trait::async_trait;

/// An external service that answers a single free-form prompt with a short text.
///
/// The resolver only ever sends one prompt and reads one answer; whatever the
/// service says is validated against the graph afterwards, so implementations
/// do not need to enforce any output schema. Transport-level problems must be
/// reported as `ResolutionError` and never as an empty answer.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, prompt: &str) -> Result<String, ResolutionError>;

    /// Model name, for logging.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: TextClassifier + ?Sized> TextClassifier for Box<T> {
    async fn classify(&self, prompt: &str) -> Result<String, ResolutionError> {
        (**self).classify(prompt).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: TextClassifier + ?Sized> TextClassifier for std::sync::Arc<T> {
    async fn classify(&self, prompt: &str) -> Result<String, ResolutionError> {
        (**self).classify(prompt).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
