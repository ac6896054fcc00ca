//! Generate command implementation.

use crate::app::api;
use crate::domain::AppError;

pub fn run_generate(shot: Option<u32>) -> Result<(), AppError> {
    match shot {
        Some(id) => {
            let content = api::generate_single(id)?;
            println!("✅ Generated shot {}", id);
            println!("en: {}", content.primary);
            println!("zh: {}", content.secondary);
        }
        None => {
            let outcome = api::generate_all()?;
            println!("✅ Generated {} shot(s)", outcome.merged);
            if outcome.missing > 0 {
                println!("⚠️  {} shot(s) had no result and were left unchanged", outcome.missing);
            }
            if outcome.scene_refined {
                println!("Scene description refined");
            }
        }
    }
    Ok(())
}
