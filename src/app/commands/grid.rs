//! Grid selection commands.

use crate::app::AppContext;
use crate::domain::{AppError, GridSpec};
use crate::ports::StoryboardStore;

/// Result of a grid selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridChange {
    pub grid: GridSpec,
    /// `false` when the requested grid was already active.
    pub changed: bool,
}

/// Grid shapes offered for selection.
pub fn list() -> Vec<GridSpec> {
    GridSpec::catalog()
}

/// Switch to a catalog grid by label.
pub fn select<S: StoryboardStore>(
    ctx: &AppContext<S>,
    label: &str,
) -> Result<GridChange, AppError> {
    apply(ctx, GridSpec::from_catalog(label)?)
}

/// Switch to a custom `rows` x `cols` grid.
pub fn custom<S: StoryboardStore>(
    ctx: &AppContext<S>,
    rows: u32,
    cols: u32,
) -> Result<GridChange, AppError> {
    apply(ctx, GridSpec::custom(rows, cols)?)
}

fn apply<S: StoryboardStore>(ctx: &AppContext<S>, spec: GridSpec) -> Result<GridChange, AppError> {
    ctx.update_state(|state| {
        let changed = state.change_grid(spec);
        Ok((GridChange { grid: state.grid.clone(), changed }, changed))
    })
}
