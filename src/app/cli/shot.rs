//! Shot command implementation.

use clap::Subcommand;
use dialoguer::Select;

use crate::app::api;
use crate::domain::{AppError, Language, SHOT_TYPES};

#[derive(Subcommand)]
pub enum ShotCommands {
    /// Set the camera shot type of a slot (interactive when no type is given)
    #[clap(visible_alias = "t")]
    Type {
        /// Shot number, starting at 1
        id: u32,
        /// Shot type such as "Close-Up"
        name: Option<String>,
    },
    /// Replace the text of a slot in one language
    #[clap(visible_alias = "x")]
    Text {
        /// Shot number, starting at 1
        id: u32,
        /// Language of the text (zh, en); defaults to the preferred language
        #[arg(short, long)]
        lang: Option<Language>,
        /// New text
        text: String,
    },
}

pub fn run_shot(command: ShotCommands) -> Result<(), AppError> {
    match command {
        ShotCommands::Type { id, name } => {
            let name = match name {
                Some(name) => name,
                None => match prompt_shot_type()? {
                    Some(name) => name,
                    None => return Ok(()),
                },
            };
            let slot = api::set_shot_type(id, &name)?;
            println!("✅ Shot {} is now {}", slot.id, slot.shot_type);
        }
        ShotCommands::Text { id, lang, text } => {
            let (slot, language) = api::set_shot_text(id, lang, &text)?;
            println!("✅ Updated {} text for shot {}", language, slot.id);
        }
    }
    Ok(())
}

fn prompt_shot_type() -> Result<Option<String>, AppError> {
    let selection = Select::new()
        .with_prompt("Select shot type")
        .items(&SHOT_TYPES)
        .default(0)
        .interact_opt()
        .map_err(|err| AppError::Validation(format!("Failed to select shot type: {}", err)))?;

    Ok(selection.map(|index| SHOT_TYPES[index].to_string()))
}
