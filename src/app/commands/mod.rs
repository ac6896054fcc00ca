pub mod generate;
pub mod grid;
pub mod init;
pub mod key;
pub mod prefs;
pub mod preview;
pub mod prompt;
pub mod scene;
pub mod shot;
pub mod status;
