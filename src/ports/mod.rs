mod generative_client;
mod slot_claims;
mod storyboard_store;

pub use generative_client::GenerativeClient;
pub use slot_claims::SlotClaims;
pub use storyboard_store::StoryboardStore;
