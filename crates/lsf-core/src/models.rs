//! Plain data types passed between the scraper and the grade aggregator.

use crate::column_map::ColumnMapping;

// ── RawRow ────────────────────────────────────────────────────────────────────

/// The visible text of every cell in one scraped table row, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<String>,
}

impl RawRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Build a row from anything string-like; handy in tests.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Text of the cell at `index`, or `None` when the row is shorter.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<String>> for RawRow {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

// ── CourseRecord ──────────────────────────────────────────────────────────────

/// One course parsed out of a [`RawRow`].
///
/// `grade` and `credit_points` keep the portal's raw text (comma decimals,
/// stray whitespace); numeric interpretation happens during aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    pub name: String,
    pub grade: String,
    pub credit_points: String,
}

impl CourseRecord {
    /// Parse `row` according to `mapping`.
    ///
    /// Returns `None` when the name-bearing cell is absent or does not carry
    /// the separator. Missing grade or points cells read as empty text.
    pub fn from_row(row: &RawRow, mapping: &ColumnMapping) -> Option<Self> {
        let name = course_name(row, mapping)?;
        Some(Self {
            name,
            grade: row.cell(mapping.grade_cell).unwrap_or_default().to_string(),
            credit_points: row.cell(mapping.points_cell).unwrap_or_default().to_string(),
        })
    }

    /// `false` while the course has no grade yet.
    pub fn is_graded(&self) -> bool {
        !self.grade.trim().is_empty()
    }
}

/// Extract the trimmed course name from the name-bearing cell.
///
/// The cell looks like `"<module number> /\n <course title>"`; the title is
/// whatever follows the first separator.
pub fn course_name(row: &RawRow, mapping: &ColumnMapping) -> Option<String> {
    let cell = row.cell(mapping.name_cell)?;
    let (_, rest) = cell.split_once(mapping.separator.as_str())?;
    // Only the segment between the first and a possible second separator.
    let title = rest
        .split_once(mapping.separator.as_str())
        .map_or(rest, |(head, _)| head);
    Some(title.trim().to_string())
}

// ── AggregateReport ───────────────────────────────────────────────────────────

/// Summary statistics for one scrape run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateReport {
    /// Every graded course that was logged, in table order.
    pub courses: Vec<CourseRecord>,
    /// Mean of all numerically valid grades; `0.0` when there are none.
    pub average_grade: f64,
    /// Sum of all numerically valid credit points; `0.0` when there are none.
    pub total_points: f64,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> ColumnMapping {
        ColumnMapping::default()
    }

    #[test]
    fn test_raw_row_cell_access() {
        let row = RawRow::from_cells(["a", "b"]);
        assert_eq!(row.cell(0), Some("a"));
        assert_eq!(row.cell(1), Some("b"));
        assert_eq!(row.cell(2), None);
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
        assert!(RawRow::default().is_empty());
    }

    // ── course_name ───────────────────────────────────────────────────────────

    #[test]
    fn test_course_name_takes_text_after_separator() {
        let row = RawRow::from_cells(["", "1234 /\n  Analysis I  "]);
        assert_eq!(course_name(&row, &mapping()), Some("Analysis I".to_string()));
    }

    #[test]
    fn test_course_name_without_separator_is_none() {
        let row = RawRow::from_cells(["", "Prüfungsnummer / Titel"]);
        assert_eq!(course_name(&row, &mapping()), None);
    }

    #[test]
    fn test_course_name_uses_second_segment_only() {
        let row = RawRow::from_cells(["", "A /\n B /\n C"]);
        assert_eq!(course_name(&row, &mapping()), Some("B".to_string()));
    }

    #[test]
    fn test_course_name_short_row_is_none() {
        let row = RawRow::from_cells(["only one cell /\n x"]);
        assert_eq!(course_name(&row, &mapping()), None);
    }

    // ── CourseRecord ──────────────────────────────────────────────────────────

    #[test]
    fn test_record_from_full_row() {
        let row = RawRow::from_cells(["", "Math /\n Analysis I", "1,7", "", "8"]);
        let rec = CourseRecord::from_row(&row, &mapping()).expect("record");
        assert_eq!(rec.name, "Analysis I");
        assert_eq!(rec.grade, "1,7");
        assert_eq!(rec.credit_points, "8");
        assert!(rec.is_graded());
    }

    #[test]
    fn test_record_missing_trailing_cells_read_empty() {
        let row = RawRow::from_cells(["", "Math /\n Analysis I", "2,0"]);
        let rec = CourseRecord::from_row(&row, &mapping()).expect("record");
        assert_eq!(rec.grade, "2,0");
        assert_eq!(rec.credit_points, "");
    }

    #[test]
    fn test_record_whitespace_grade_is_ungraded() {
        let row = RawRow::from_cells(["", "Phys /\n Mechanics", "  \t", "", "6"]);
        let rec = CourseRecord::from_row(&row, &mapping()).expect("record");
        assert!(!rec.is_graded());
    }
}
