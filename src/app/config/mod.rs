//! Configuration and credential loading for the storyboard.

mod credential;
mod load_config;

pub use credential::{resolve_credential, resolve_credential_with};
pub use load_config::load_config;
