//! Preview command implementation.

use std::path::PathBuf;

use crate::app::api;
use crate::domain::{AppError, Language};

pub fn run_preview(lang: Option<Language>, output: Option<PathBuf>) -> Result<(), AppError> {
    let rendered = api::preview(lang)?;

    match output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", rendered.export))?;
            println!("✅ Wrote prompt to {}", path.display());
        }
        None => println!("{}", rendered.export),
    }
    Ok(())
}
