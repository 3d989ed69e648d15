//! Named, versioned description of the grades table layout.
//!
//! The LSF "Notenspiegel" table has no machine-readable header, so the
//! positions of the course-name, grade and credit-point cells are fixed by
//! convention. [`ColumnMapping`] keeps that convention in one place and can
//! be overridden from a JSON file when the portal layout changes:
//!
//! ```json
//! { "name": "lsf-notenspiegel", "version": 2, "points_cell": 5 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LsfError, Result};

/// Default cell holding `"<number> /\n <title>"`.
pub const DEFAULT_NAME_CELL: usize = 1;
/// Default cell holding the grade text.
pub const DEFAULT_GRADE_CELL: usize = 2;
/// Default cell holding the credit points text.
pub const DEFAULT_POINTS_CELL: usize = 4;
/// Separator between module number and course title in the name cell.
pub const DEFAULT_SEPARATOR: &str = "/\n";

// ── ColumnMapping ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub name: String,
    pub version: u32,
    pub name_cell: usize,
    pub grade_cell: usize,
    pub points_cell: usize,
    pub separator: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            name: "lsf-notenspiegel".to_string(),
            version: 1,
            name_cell: DEFAULT_NAME_CELL,
            grade_cell: DEFAULT_GRADE_CELL,
            points_cell: DEFAULT_POINTS_CELL,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl ColumnMapping {
    /// Parse a mapping from JSON text. Absent fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let mapping: Self = serde_json::from_str(text)?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// Load a mapping from a JSON file on disk.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LsfError::ColumnMapRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load from `path` when given, otherwise fall back to the built-in layout.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => Ok(Self::default()),
        }
    }

    /// Reject mappings that cannot describe a real table.
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(LsfError::Config("separator must not be empty".to_string()));
        }
        if self.grade_cell == self.name_cell || self.points_cell == self.name_cell {
            return Err(LsfError::Config(
                "grade_cell and points_cell must differ from name_cell".to_string(),
            ));
        }
        Ok(())
    }

    /// Short label for log lines, e.g. `lsf-notenspiegel@v1`.
    pub fn label(&self) -> String {
        format!("{}@v{}", self.name, self.version)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
