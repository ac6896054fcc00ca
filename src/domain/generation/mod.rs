//! Remote generation: requests, reply validation, and the failure taxonomy.

mod error;
mod payload;
pub mod prompts;
mod request;

pub use error::GenerationError;
pub use payload::{StoryboardReply, parse_bilingual_pair, parse_storyboard};
pub use request::{GenerationRequest, InlineImage, RequestKind};
