//! Reading the grade overview table into [`RawRow`]s.

use lsf_core::models::RawRow;

use crate::driver::{Locator, PageElement, SessionDriver};
use crate::error::Result;

/// Visible link text that leads to the grade overview.
pub const DEFAULT_LINK_PATTERN: &str = "Notenspiegel";
/// Where the grade table sits on the report page.
pub const GRADE_TABLE_XPATH: &str = "//*[@id='wrapper']/div[6]/div[2]/form/table";

// ── TableExtractor ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExtractor {
    table: Locator,
    row: Locator,
    cell: Locator,
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new(Locator::xpath(GRADE_TABLE_XPATH))
    }
}

impl TableExtractor {
    pub fn new(table: Locator) -> Self {
        Self {
            table,
            row: Locator::xpath(".//tr"),
            cell: Locator::xpath(".//td"),
        }
    }

    /// Follow the link whose text contains `pattern`, then read the table.
    ///
    /// A missing link or table is returned as an error; nothing is swallowed.
    /// Rows without `td` cells (header rows built from `th`) are left out.
    pub async fn fetch_table_data<D: SessionDriver>(
        &self,
        driver: &D,
        pattern: &str,
    ) -> Result<Vec<RawRow>> {
        let link = driver.find_element(&link_locator(pattern)).await?;
        link.click().await?;

        let table = driver.find_element(&self.table).await?;
        let rows = table.find_elements(&self.row).await?;

        let mut data = Vec::with_capacity(rows.len());
        for row in &rows {
            let cells = row.find_elements(&self.cell).await?;
            if cells.is_empty() {
                continue;
            }
            let mut texts = Vec::with_capacity(cells.len());
            for cell in &cells {
                texts.push(cell.text().await?);
            }
            data.push(RawRow::new(texts));
        }

        tracing::debug!(rows = rows.len(), kept = data.len(), "grade table read");
        Ok(data)
    }
}

/// [`TableExtractor::fetch_table_data`] with the default table location.
pub async fn fetch_table_data<D: SessionDriver>(driver: &D, pattern: &str) -> Result<Vec<RawRow>> {
    TableExtractor::default().fetch_table_data(driver, pattern).await
}

/// XPath matching an `<a>` whose text contains `pattern`.
pub fn link_locator(pattern: &str) -> Locator {
    Locator::xpath(format!("//a[contains(text(), {})]", xpath_literal(pattern)))
}

/// Quote `value` as an XPath string literal.
///
/// XPath 1.0 has no escape sequences, so text containing both quote kinds
/// is assembled with `concat()`.
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
