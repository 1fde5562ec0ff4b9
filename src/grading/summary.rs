// The consolidated outputs of a run: the summary workbook with one row
// per roster entry, and the JSON document used for exports and for
// regression checks against a reference run.

use log::warn;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Serialize;
use serde_json::json;
use snafu::prelude::*;
use std::fs;
use std::path::Path;
use text_diff::print_diff;

use crate::grading::{
    GradingResult, JsonWriteSnafu, OpeningJsonSnafu, ParsingJsonSnafu, RosterEntry,
    SummaryWriteSnafu,
};
use mcq_scoring::{Grader, Outcome};

type JSValue = serde_json::Value;

pub const SUMMARY_FILE_NAME: &str = "concise_marksheet.xlsx";

const SUMMARY_COLUMNS: [&str; 7] = [
    "Roll Number",
    "Name",
    "Right",
    "Wrong",
    "Not Attempt",
    "Status",
    "Score",
];
const COLUMN_WIDTH: f64 = 17.0;

/// One line of the consolidated summary, in roster order.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub identifier: String,
    pub name: String,
    pub right: u32,
    pub wrong: u32,
    #[serde(rename = "notAttempted")]
    pub not_attempted: u32,
    pub status: String,
    pub score: String,
}

impl SummaryRow {
    pub fn new(entry: &RosterEntry, outcome: &Outcome) -> SummaryRow {
        SummaryRow {
            identifier: entry.identifier.clone(),
            name: entry.name.clone(),
            right: outcome.right,
            wrong: outcome.wrong,
            not_attempted: outcome.unattempted,
            status: outcome.status_string(),
            score: outcome.score_string(),
        }
    }
}

/// Writes the consolidated workbook with one row per roster entry.
pub fn write_summary_workbook(path: &Path, rows: &[SummaryRow]) -> GradingResult<()> {
    let mut workbook = Workbook::new();
    render_summary(&mut workbook, rows).context(SummaryWriteSnafu {
        path: path.display().to_string(),
    })?;
    workbook.save(path).context(SummaryWriteSnafu {
        path: path.display().to_string(),
    })?;
    Ok(())
}

fn render_summary(workbook: &mut Workbook, rows: &[SummaryRow]) -> Result<(), XlsxError> {
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Summary")?;
    for (col, name) in SUMMARY_COLUMNS.iter().enumerate() {
        worksheet.set_column_width(col as u16, COLUMN_WIDTH)?;
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        worksheet.write_string(r, 0, &row.identifier)?;
        worksheet.write_string(r, 1, &row.name)?;
        worksheet.write_number(r, 2, row.right)?;
        worksheet.write_number(r, 3, row.wrong)?;
        worksheet.write_number(r, 4, row.not_attempted)?;
        worksheet.write_string(r, 5, &row.status)?;
        worksheet.write_string(r, 6, &row.score)?;
    }
    Ok(())
}

/// Builds the JSON view of a run. This is the exchange format written
/// with `--out` and compared with `--reference`.
pub fn build_summary_js(exam: &str, grader: &Grader, rows: &[SummaryRow]) -> JSValue {
    json!({
        "exam": exam,
        "questionCount": grader.question_count(),
        "maxScore": grader.max_score(),
        "results": rows,
    })
}

pub fn write_summary_json(path: &str, summary: &JSValue) -> GradingResult<()> {
    let pretty = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    fs::write(path, pretty).context(JsonWriteSnafu { path })?;
    Ok(())
}

pub fn read_summary(path: &str) -> GradingResult<JSValue> {
    let content = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    let summary: JSValue = serde_json::from_str(&content).context(ParsingJsonSnafu {})?;
    Ok(summary)
}

/// Compares the computed summary against a reference file and fails the
/// run on any difference.
pub fn check_reference(reference_path: &str, computed: &JSValue) -> GradingResult<()> {
    let reference = read_summary(reference_path)?;
    let reference_pretty = serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    let computed_pretty = serde_json::to_string_pretty(computed).context(ParsingJsonSnafu {})?;
    if reference_pretty != computed_pretty {
        warn!(
            "check_reference: the computed summary does not match {}",
            reference_path
        );
        print_diff(&reference_pretty, &computed_pretty, "\n");
        whatever!("Difference detected between computed summary and reference summary");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcq_scoring::MarkingScheme;

    #[test]
    fn summary_json_has_the_exchange_shape() -> GradingResult<()> {
        let key = vec!["A".to_string(), "B".to_string()];
        let grader = Grader::new(&key, &MarkingScheme::DEFAULT_SCHEME)
            .whatever_context("building the grader")?;
        let entry = RosterEntry {
            identifier: "1901CS01".to_string(),
            name: "Asha Rao".to_string(),
        };
        let answers = vec![Some("A".to_string()), None];
        let outcome = grader.score(&answers).whatever_context("scoring")?;
        let rows = vec![SummaryRow::new(&entry, &outcome)];
        let js = build_summary_js("quiz", &grader, &rows);
        assert_eq!(js["exam"], "quiz");
        assert_eq!(js["questionCount"], 2);
        assert_eq!(js["maxScore"], 10);
        assert_eq!(js["results"][0]["identifier"], "1901CS01");
        assert_eq!(js["results"][0]["notAttempted"], 1);
        assert_eq!(js["results"][0]["score"], "5/10");
        Ok(())
    }
}
