//! Storyboard grid shapes.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Catalog of selectable grid shapes as `(rows, cols, label)`.
const CATALOG: [(u32, u32, &str); 5] =
    [(2, 2, "2x2"), (2, 3, "2x3"), (3, 3, "3x3"), (3, 4, "3x4"), (4, 4, "4x4")];

const DEFAULT_INDEX: usize = 2;

/// Largest row or column count accepted for a custom shape.
pub const MAX_CUSTOM_SIDE: u32 = 10;

/// Row/column shape of the storyboard grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: u32,
    pub cols: u32,
    pub label: String,
}

/// Build a grid spec. Inputs come from the catalog or a validated custom shape.
pub fn resolve(rows: u32, cols: u32, label: impl Into<String>) -> GridSpec {
    GridSpec { rows, cols, label: label.into() }
}

impl GridSpec {
    /// Number of shot slots in the grid.
    pub fn total_slots(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// All catalog entries in menu order.
    pub fn catalog() -> Vec<GridSpec> {
        CATALOG.iter().map(|(rows, cols, label)| resolve(*rows, *cols, *label)).collect()
    }

    /// Look up a catalog entry by label, ignoring case and surrounding whitespace.
    pub fn from_catalog(label: &str) -> Result<GridSpec, AppError> {
        let wanted = label.trim().to_ascii_lowercase().replace('×', "x");
        Self::catalog().into_iter().find(|spec| spec.label == wanted).ok_or_else(|| {
            AppError::UnknownGrid {
                label: label.to_string(),
                available: CATALOG.iter().map(|(_, _, l)| *l).collect::<Vec<_>>().join(", "),
            }
        })
    }

    /// A user-chosen shape outside the catalog.
    pub fn custom(rows: u32, cols: u32) -> Result<GridSpec, AppError> {
        let side = 1..=MAX_CUSTOM_SIDE;
        if !side.contains(&rows) || !side.contains(&cols) {
            return Err(AppError::InvalidGridShape { rows, cols });
        }
        Ok(resolve(rows, cols, format!("{}x{}", rows, cols)))
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        let (rows, cols, label) = CATALOG[DEFAULT_INDEX];
        resolve(rows, cols, label)
    }
}
