//! Scene command implementation.

use std::path::PathBuf;

use clap::Subcommand;

use crate::app::api;
use crate::domain::{AppError, Language};

#[derive(Subcommand)]
pub enum SceneCommands {
    /// Describe the scene of a reference image with Gemini
    #[clap(visible_alias = "a")]
    Analyze {
        /// Path to the reference image
        image: PathBuf,
    },
    /// Replace the scene description in one language
    Set {
        /// Language of the text (zh, en); defaults to the preferred language
        #[arg(short, long)]
        lang: Option<Language>,
        /// New scene description
        text: String,
    },
}

pub fn run_scene(command: SceneCommands) -> Result<(), AppError> {
    match command {
        SceneCommands::Analyze { image } => {
            let scene = api::analyze_scene(&image)?;
            println!("✅ Scene updated from {}", image.display());
            println!("en: {}", scene.primary);
            println!("zh: {}", scene.secondary);
        }
        SceneCommands::Set { lang, text } => {
            let (_, language) = api::set_scene_text(lang, &text)?;
            println!("✅ Updated {} scene description", language);
        }
    }
    Ok(())
}
