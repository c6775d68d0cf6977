use serde::{Deserialize, Serialize};

use crate::grid::SheetGrid;

/// Stable identity of a sheet. Assigned from a per-workbook counter, never reused.
///
/// Rendered as a plain decimal string (`"1"`, `"2"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(pub(crate) u64);

impl SheetId {
    pub fn from_raw(raw: u64) -> Self {
        SheetId(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SheetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SheetId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(SheetId)
    }
}

#[derive(Debug, Clone)]
pub struct Sheet {
    pub id: SheetId,
    pub name: String,
    pub grid: SheetGrid,
}

impl Sheet {
    pub fn new(id: SheetId, name: impl Into<String>) -> Self {
        Self::with_grid(id, name, SheetGrid::new())
    }

    pub fn with_grid(id: SheetId, name: impl Into<String>, grid: SheetGrid) -> Self {
        Self {
            id,
            name: name.into(),
            grid,
        }
    }
}
