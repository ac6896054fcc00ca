//! Grid command implementation.

use dialoguer::Select;

use crate::app::api::{self, GridChange};
use crate::domain::AppError;

pub fn run_grid(
    label: Option<String>,
    shape: Option<(u32, u32)>,
    list: bool,
) -> Result<(), AppError> {
    if list {
        for spec in api::grid_catalog() {
            println!("{}  ({} shots)", spec.label, spec.total_slots());
        }
        return Ok(());
    }

    let change = match (label, shape) {
        (_, Some((rows, cols))) => api::custom_grid(rows, cols)?,
        (Some(label), None) => api::select_grid(&label)?,
        (None, None) => match prompt_grid_label()? {
            Some(label) => api::select_grid(&label)?,
            None => return Ok(()),
        },
    };

    report(&change);
    Ok(())
}

fn prompt_grid_label() -> Result<Option<String>, AppError> {
    let catalog = api::grid_catalog();
    let items: Vec<String> = catalog
        .iter()
        .map(|spec| format!("{} ({} shots)", spec.label, spec.total_slots()))
        .collect();

    let selection = Select::new()
        .with_prompt("Select grid")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|err| AppError::Validation(format!("Failed to select grid: {}", err)))?;

    Ok(selection.map(|index| catalog[index].label.clone()))
}

fn report(change: &GridChange) {
    if change.changed {
        println!("✅ Grid set to {} ({} shots)", change.grid.label, change.grid.total_slots());
    } else {
        println!("Grid is already {}", change.grid.label);
    }
}
