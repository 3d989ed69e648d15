/// Width the grade column is padded to in course lines.
pub const GRADE_COLUMN_WIDTH: usize = 8;

/// Format one graded course for the log.
///
/// The name is padded to `name_width` characters and the grade to
/// [`GRADE_COLUMN_WIDTH`], so consecutive lines line up. Overlong values are
/// never truncated; the padding just drops to zero.
///
/// # Examples
///
/// ```
/// use lsf_core::formatting::course_line;
///
/// assert_eq!(
///     course_line("Analysis I", 12, "1,7", "8"),
///     "[Analysis I]    note=[1,7]      lp=[8]"
/// );
/// ```
pub fn course_line(name: &str, name_width: usize, grade: &str, points: &str) -> String {
    let name_pad = pad(name_width, name);
    let grade_pad = pad(GRADE_COLUMN_WIDTH, grade);
    format!("[{name}] {name_pad} note=[{grade}]{grade_pad} lp=[{points}]")
}

/// Final summary line with both statistics at two decimals.
///
/// # Examples
///
/// ```
/// use lsf_core::formatting::summary_line;
///
/// assert_eq!(summary_line(1.7, 8.0), "Average Grade: 1.70, Total Points: 8.00");
/// ```
pub fn summary_line(average_grade: f64, total_points: f64) -> String {
    format!("Average Grade: {average_grade:.2}, Total Points: {total_points:.2}")
}

/// Spaces needed to widen `text` to `width` characters (not bytes).
fn pad(width: usize, text: &str) -> String {
    " ".repeat(width.saturating_sub(text.chars().count()))
}
