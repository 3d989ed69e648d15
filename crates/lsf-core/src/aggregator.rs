//! Grade aggregation over scraped "Notenspiegel" rows.
//!
//! Turns [`RawRow`]s into [`CourseRecord`]s, logs every graded course as an
//! aligned line, and finishes with the average grade and the total credit
//! points. Statistics never abort the run: unparseable values are skipped and
//! a failed conversion only zeroes the statistic it belongs to.

use crate::column_map::ColumnMapping;
use crate::formatting::{course_line, summary_line};
use crate::models::{course_name, AggregateReport, CourseRecord, RawRow};
use crate::numeric::{mean_of_valid, sum_of_valid, NumericPolicy};
use crate::sink::ReportSink;

pub const NO_TABLE_DATA: &str = "No table data found.";
pub const NO_EXPECTED_ENTRIES: &str = "No entries with expected format found in data.";

// ── GradeAggregator ───────────────────────────────────────────────────────────

/// Parses and summarises one scrape.
#[derive(Debug, Clone, Default)]
pub struct GradeAggregator {
    mapping: ColumnMapping,
    policy: NumericPolicy,
}

impl GradeAggregator {
    pub fn new(mapping: ColumnMapping, policy: NumericPolicy) -> Self {
        Self { mapping, policy }
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn policy(&self) -> NumericPolicy {
        self.policy
    }

    /// Log every graded course in `rows` and the closing summary to `sink`.
    ///
    /// Returns `None` without computing anything when `rows` is empty or no
    /// row carries the name separator; both cases emit one informational
    /// line and are not errors.
    pub fn process_and_log(&self, rows: &[RawRow], sink: &dyn ReportSink) -> Option<AggregateReport> {
        if rows.is_empty() {
            sink.info(NO_TABLE_DATA);
            return None;
        }

        let names: Vec<String> = rows
            .iter()
            .filter_map(|row| course_name(row, &self.mapping))
            .collect();
        if names.is_empty() {
            sink.info(NO_EXPECTED_ENTRIES);
            return None;
        }
        let name_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

        let mut courses: Vec<CourseRecord> = Vec::new();
        for record in rows.iter().filter_map(|row| CourseRecord::from_row(row, &self.mapping)) {
            if !record.is_graded() {
                continue;
            }
            sink.info(&course_line(
                &record.name,
                name_width,
                &record.grade,
                &record.credit_points,
            ));
            courses.push(record);
        }

        let grades: Vec<&str> = courses.iter().map(|c| c.grade.as_str()).collect();
        let points: Vec<&str> = courses.iter().map(|c| c.credit_points.as_str()).collect();

        // Each statistic falls back to 0.0 on its own.
        let average_grade = mean_of_valid(&grades, self.policy).unwrap_or_else(|e| {
            sink.error(&format!("Error calculating average grade: {e}"));
            0.0
        });
        let total_points = sum_of_valid(&points, self.policy).unwrap_or_else(|e| {
            sink.error(&format!("Error calculating total points: {e}"));
            0.0
        });

        sink.info(&summary_line(average_grade, total_points));

        Some(AggregateReport {
            courses,
            average_grade,
            total_points,
        })
    }
}

/// Run the aggregator with the default column mapping and legacy numbers.
pub fn process_and_log(rows: &[RawRow], sink: &dyn ReportSink) -> Option<AggregateReport> {
    GradeAggregator::default().process_and_log(rows, sink)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
