use crate::error::EvalError;

/// Turns one classification prompt into a raw response.
///
/// The default implementation shells out to a local inference tool; tests
/// substitute canned responses through [`crate::pipeline::builder::ProsodyEvaluatorBuilder::with_classifier`].
pub trait Classifier: Send + Sync {
    fn classify(&self, prompt: &str) -> Result<String, EvalError>;
}
