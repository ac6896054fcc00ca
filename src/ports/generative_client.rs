//! Generative API client port definition.

use crate::domain::AppError;
use crate::domain::generation::GenerationRequest;

/// Port for structured-output generation calls.
///
/// Implementations perform exactly one request per call and return the model's
/// JSON text unparsed. They never retry.
pub trait GenerativeClient {
    /// Send `request` and return the raw JSON text of the first candidate.
    fn generate_json(&self, request: &GenerationRequest) -> Result<String, AppError>;
}

impl<C: GenerativeClient + ?Sized> GenerativeClient for Box<C> {
    fn generate_json(&self, request: &GenerationRequest) -> Result<String, AppError> {
        (**self).generate_json(request)
    }
}
