//! Status command implementation.

use crate::app::api;
use crate::domain::AppError;

pub fn run_status() -> Result<(), AppError> {
    let report = api::status()?;
    let state = &report.state;
    let language = state.preferences.language;

    println!("Grid: {} ({} shots)", state.grid.label, state.grid.total_slots());
    println!("Language: {}  Font size: {}", language, state.preferences.font_size.as_str());
    println!("Model: {}", report.model);
    println!("API key: {}", if report.has_credential { "configured" } else { "missing" });
    println!();

    let scene = state.scene.get(language);
    println!(
        "Scene: {}",
        if scene.is_empty() { language.undefined_scene_placeholder() } else { scene }
    );
    println!();

    for slot in &state.slots {
        let text = match &slot.content {
            Some(content) => content.get(language),
            None => language.waiting_placeholder(),
        };
        let marker = if slot.is_pending { " (pending)" } else { "" };
        println!("{:>2}. [{}]{} {}", slot.id, slot.shot_type, marker, text);
    }
    Ok(())
}
