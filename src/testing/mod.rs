mod fake_generative_client;

pub use fake_generative_client::{FakeGenerativeClient, pair_reply, storyboard_reply};
