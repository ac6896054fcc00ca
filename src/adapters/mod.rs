pub mod gemini_client_http;
pub mod memory_slot_claims;
pub mod memory_storyboard_store;
pub mod slot_claims_filesystem;
pub mod storyboard_filesystem;

pub use gemini_client_http::HttpGeminiClient;
pub use memory_slot_claims::MemorySlotClaims;
pub use memory_storyboard_store::MemoryStoryboardStore;
pub use slot_claims_filesystem::FilesystemSlotClaims;
pub use storyboard_filesystem::FilesystemStoryboardStore;
