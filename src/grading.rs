// Batch grading of multiple-choice exams.
//
// A run reads a roster and a response sheet, scores every submission
// against the answer key embedded in the first data row of the
// responses, and writes one mark sheet per student plus a consolidated
// summary. The scoring rules themselves live in the mcq_scoring crate.

use log::{debug, info, warn};
use snafu::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use mcq_scoring::{Grader, MarkingScheme, ScoringError};

pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod report;
pub mod summary;

pub const DEFAULT_OUT_DIR: &str = "output";
pub const DEFAULT_EXAM_LABEL: &str = "quiz";
// 1-based, following the column numbering of the spreadsheet tools the
// inputs come from.
pub const DEFAULT_ID_COLUMN: usize = 1;
pub const DEFAULT_FIRST_ANSWER_COLUMN: usize = 7;

// ********* Errors ***********

#[derive(Debug, Snafu)]
pub enum GradingError {
    // Errors opening and parsing the input files.
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet found in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening the CSV file: {source}"))]
    CsvOpen { source: csv::Error },
    #[snafu(display("Error parsing a CSV line: {source}"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} has fewer columns than the header"))]
    LineTooShort { lineno: usize },
    #[snafu(display("Unsupported cell content at line {lineno}: {content}"))]
    WrongCellType { lineno: usize, content: String },

    // Errors in the structure of the roster and the response sheet.
    #[snafu(display("No column named '{column}' in the header of {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("No student found in the roster {path}"))]
    EmptyRoster { path: String },
    #[snafu(display("Blank roll number at line {lineno} of the roster"))]
    BlankRosterId { lineno: usize },
    #[snafu(display("Duplicate roll number {identifier} at line {lineno} of the roster"))]
    DuplicateRosterId { identifier: String, lineno: usize },
    #[snafu(display("No answer key row found in {path}"))]
    MissingKeyRow { path: String },
    #[snafu(display("Blank answer key cell for question {question}"))]
    BlankKeyCell { question: usize },
    #[snafu(display("Column indexes are 1-based: {value} is not a valid value for {option}"))]
    InvalidColumnIndex { option: String, value: usize },

    // Errors aligning the submissions with the roster.
    #[snafu(display(
        "The submission at line {lineno} has roll number {identifier}, which is not on the roster"
    ))]
    UnknownResponseId { identifier: String, lineno: usize },

    // Scoring errors.
    #[snafu(display("The answer key is not usable: {source}"))]
    KeySetup { source: ScoringError },
    #[snafu(display("Error scoring the submission of {identifier}: {source}"))]
    Scoring {
        source: ScoringError,
        identifier: String,
    },

    // Errors writing the outputs.
    #[snafu(display("Error loading the logo {path}: {source}"))]
    LogoLoad {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error creating the output directory {path}: {source}"))]
    OutputDirCreate {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing the mark sheet for {identifier}: {source}"))]
    SheetWrite {
        source: rust_xlsxwriter::XlsxError,
        identifier: String,
    },
    #[snafu(display("Error writing the summary workbook {path}: {source}"))]
    SummaryWrite {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error writing the JSON summary {path}: {source}"))]
    JsonWrite {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the JSON summary: {source}"))]
    OpeningJson { source: std::io::Error },
    #[snafu(display("Error converting the summary to JSON: {source}"))]
    ParsingJson { source: serde_json::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type GradingResult<T> = Result<T, GradingError>;

// ********* Input data structures ***********

/// One student of the roster.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub identifier: String,
    pub name: String,
}

/// One roster line as read from the file, before validation.
#[derive(Debug, Clone)]
pub struct ParsedRosterRow {
    pub lineno: usize,
    pub identifier: String,
    pub name: String,
}

/// One data row of the response sheet, before the key row is split off.
#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub lineno: usize,
    pub identifier: String,
    pub answers: Vec<Option<String>>,
}

/// The submission of one student, aligned to the answer key length.
#[derive(Debug, Clone)]
pub struct StudentResponse {
    pub identifier: String,
    pub lineno: usize,
    pub answers: Vec<Option<String>>,
}

/// Everything a grading run needs, assembled from the command line.
#[derive(Debug, Clone)]
pub struct GradingOptions {
    pub roster_path: String,
    pub responses_path: String,
    pub out_dir: String,
    pub exam: String,
    pub logo_path: Option<String>,
    /// 1-based column of the roll number in the response sheet.
    pub id_column: usize,
    /// 1-based column of the first answer in the response sheet.
    pub first_answer_column: usize,
    pub out_json_path: Option<String>,
    pub reference_path: Option<String>,
}

impl GradingOptions {
    pub fn id_column_index(&self) -> GradingResult<usize> {
        ensure!(
            self.id_column >= 1,
            InvalidColumnIndexSnafu {
                option: "--id-column",
                value: self.id_column,
            }
        );
        Ok(self.id_column - 1)
    }

    pub fn first_answer_column_index(&self) -> GradingResult<usize> {
        ensure!(
            self.first_answer_column >= 1,
            InvalidColumnIndexSnafu {
                option: "--first-answer-column",
                value: self.first_answer_column,
            }
        );
        Ok(self.first_answer_column - 1)
    }
}

// ********* Reading and validating the inputs ***********

fn is_excel_path(path: &str) -> bool {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xlsm"),
        None => false,
    }
}

pub fn read_roster(path: &str) -> GradingResult<Vec<RosterEntry>> {
    let rows = if is_excel_path(path) {
        io_excel::read_roster_xlsx(path)?
    } else {
        io_csv::read_roster_csv(path)?
    };
    validate_roster(rows, path)
}

pub fn read_responses(path: &str, options: &GradingOptions) -> GradingResult<Vec<ParsedRow>> {
    if is_excel_path(path) {
        io_excel::read_responses_xlsx(path, options)
    } else {
        io_csv::read_responses_csv(path, options)
    }
}

fn validate_roster(rows: Vec<ParsedRosterRow>, path: &str) -> GradingResult<Vec<RosterEntry>> {
    ensure!(!rows.is_empty(), EmptyRosterSnafu { path });
    let mut seen: HashSet<String> = HashSet::new();
    let mut entries: Vec<RosterEntry> = Vec::with_capacity(rows.len());
    for row in rows {
        ensure!(
            !row.identifier.is_empty(),
            BlankRosterIdSnafu { lineno: row.lineno }
        );
        ensure!(
            seen.insert(row.identifier.clone()),
            DuplicateRosterIdSnafu {
                identifier: row.identifier.clone(),
                lineno: row.lineno,
            }
        );
        entries.push(RosterEntry {
            identifier: row.identifier,
            name: row.name,
        });
    }
    Ok(entries)
}

// Splits the first data row off as the answer key. Trailing blank cells
// of the key row are trimmed, a blank cell between answers is an error.
// The remaining rows are padded or truncated to the key length.
fn split_answer_key(
    rows: Vec<ParsedRow>,
    path: &str,
) -> GradingResult<(Vec<String>, Vec<StudentResponse>)> {
    let mut rows = rows.into_iter();
    let key_row = rows.next().context(MissingKeyRowSnafu { path })?;
    let key_lineno = key_row.lineno;
    let mut key_cells = key_row.answers;
    while let Some(None) = key_cells.last() {
        key_cells.pop();
    }
    let mut key: Vec<String> = Vec::with_capacity(key_cells.len());
    for (idx, cell) in key_cells.into_iter().enumerate() {
        match cell {
            Some(answer) => key.push(answer),
            None => return BlankKeyCellSnafu { question: idx + 1 }.fail(),
        }
    }
    debug!(
        "split_answer_key: the key at line {} defines {} questions",
        key_lineno,
        key.len()
    );
    let students: Vec<StudentResponse> = rows
        .map(|row| {
            let mut answers = row.answers;
            answers.truncate(key.len());
            answers.resize(key.len(), None);
            StudentResponse {
                identifier: row.identifier,
                lineno: row.lineno,
                answers,
            }
        })
        .collect();
    Ok((key, students))
}

// Indexes the submissions by roll number. A submission without a roster
// entry fails the run, a second submission for the same student is
// dropped with a warning.
fn index_responses(
    roster: &[RosterEntry],
    responses: Vec<StudentResponse>,
) -> GradingResult<HashMap<String, StudentResponse>> {
    let known: HashSet<&str> = roster.iter().map(|e| e.identifier.as_str()).collect();
    let mut indexed: HashMap<String, StudentResponse> = HashMap::new();
    for response in responses {
        ensure!(
            known.contains(response.identifier.as_str()),
            UnknownResponseIdSnafu {
                identifier: response.identifier.clone(),
                lineno: response.lineno,
            }
        );
        match indexed.entry(response.identifier.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(response);
            }
            Entry::Occupied(first) => {
                warn!(
                    "index_responses: dropping the duplicate submission for {} at line {} (keeping line {})",
                    response.identifier,
                    response.lineno,
                    first.get().lineno
                );
            }
        }
    }
    Ok(indexed)
}

// ********* The grading run ***********

/// Runs a full grading pass and returns the path of the summary
/// workbook. A student whose mark sheet cannot be written is skipped
/// with a warning, every other error fails the run.
pub fn run_grading(options: &GradingOptions) -> GradingResult<PathBuf> {
    info!("run_grading: reading the roster from {}", options.roster_path);
    let roster = read_roster(&options.roster_path)?;
    info!("run_grading: {} students on the roster", roster.len());

    let parsed = read_responses(&options.responses_path, options)?;
    let (key, responses) = split_answer_key(parsed, &options.responses_path)?;
    info!(
        "run_grading: {} questions on the key, {} submissions",
        key.len(),
        responses.len()
    );
    let scheme = MarkingScheme::DEFAULT_SCHEME;
    let grader = Grader::new(&key, &scheme).context(KeySetupSnafu {})?;
    let responses = index_responses(&roster, responses)?;

    fs::create_dir_all(&options.out_dir).context(OutputDirCreateSnafu {
        path: options.out_dir.clone(),
    })?;
    let logo = match &options.logo_path {
        Some(path) => Some(report::load_logo(path)?),
        None => None,
    };
    let styles = report::SheetStyles::new();
    let template = report::SheetTemplate {
        exam: &options.exam,
        key: grader.key(),
        scheme: &scheme,
        styles: &styles,
        logo: logo.as_ref(),
    };

    let out_dir = Path::new(&options.out_dir);
    let mut rows: Vec<summary::SummaryRow> = Vec::with_capacity(roster.len());
    let mut failed_sheets: usize = 0;
    for entry in &roster {
        let response = responses.get(&entry.identifier);
        let outcome = match response {
            Some(response) => {
                grader
                    .score(&response.answers)
                    .context(ScoringSnafu {
                        identifier: entry.identifier.clone(),
                    })?
            }
            None => {
                warn!(
                    "run_grading: no submission found for {}, marking absent",
                    entry.identifier
                );
                grader.absent()
            }
        };
        debug!(
            "run_grading: {} {} {}",
            entry.identifier,
            outcome.status_string(),
            outcome.score_string()
        );
        match template.write_student_sheet(out_dir, entry, &outcome, response) {
            Ok(path) => debug!("run_grading: wrote {:?}", path),
            Err(e) => {
                warn!("Skipping the mark sheet for {}: {}", entry.identifier, e);
                failed_sheets += 1;
            }
        }
        rows.push(summary::SummaryRow::new(entry, &outcome));
    }

    let summary_path = out_dir.join(summary::SUMMARY_FILE_NAME);
    summary::write_summary_workbook(&summary_path, &rows)?;
    let js = summary::build_summary_js(&options.exam, &grader, &rows);
    if let Some(path) = &options.out_json_path {
        summary::write_summary_json(path, &js)?;
        info!("run_grading: wrote the JSON summary to {}", path);
    }
    if let Some(path) = &options.reference_path {
        summary::check_reference(path, &js)?;
        info!("run_grading: the summary matches the reference {}", path);
    }
    if failed_sheets > 0 {
        warn!(
            "run_grading: {} mark sheets could not be written",
            failed_sheets
        );
    }
    info!(
        "run_grading: wrote {} mark sheets and the summary to {:?}",
        roster.len() - failed_sheets,
        summary_path
    );
    Ok(summary_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, DataType, Reader, Xlsx};
    use rust_xlsxwriter::Workbook;
    use std::fs;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const ROSTER_CSV: &str = "roll,name\n\
        1901CS01,Asha Rao\n\
        1901CS02,Binod Kumar\n\
        1901CS03,Chitra Iyer\n\
        1901CS04,Dina Das\n";

    const RESPONSES_CSV: &str = "\
Roll Number,Timestamp,Email Address,Name,Section,Marks,Q1,Q2,Q3,Q4
key,,,,,,A,B,C,D
1901CS01,2026-03-02 10:04:11,asha@example.com,Asha Rao,A,,A,B,X,
1901CS02,2026-03-02 10:05:37,binod@example.com,Binod Kumar,A,,A,B,C,D
1901CS03,2026-03-02 10:06:02,chitra@example.com,Chitra Iyer,B,,B,C,D,A
";

    fn write_inputs(dir: &Path, roster: &str, responses: &str) -> (String, String) {
        let roster_path = dir.join("master_roll.csv");
        let responses_path = dir.join("responses.csv");
        fs::write(&roster_path, roster).unwrap();
        fs::write(&responses_path, responses).unwrap();
        (
            roster_path.to_str().unwrap().to_string(),
            responses_path.to_str().unwrap().to_string(),
        )
    }

    fn options_for(dir: &Path, roster_path: &str, responses_path: &str) -> GradingOptions {
        GradingOptions {
            roster_path: roster_path.to_string(),
            responses_path: responses_path.to_string(),
            out_dir: dir.join("output").to_str().unwrap().to_string(),
            exam: "quiz".to_string(),
            logo_path: None,
            id_column: DEFAULT_ID_COLUMN,
            first_answer_column: DEFAULT_FIRST_ANSWER_COLUMN,
            out_json_path: None,
            reference_path: None,
        }
    }

    fn sheet_range(path: &Path) -> calamine::Range<DataType> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let sheets = workbook.worksheets();
        sheets[0].1.clone()
    }

    fn cell_str(range: &calamine::Range<DataType>, row: u32, col: u32) -> Option<String> {
        match range.get_value((row, col)) {
            Some(DataType::String(s)) => Some(s.clone()),
            Some(DataType::Float(f)) => Some(format!("{}", f)),
            Some(DataType::Int(i)) => Some(format!("{}", i)),
            Some(DataType::Empty) | None => None,
            Some(other) => Some(format!("{:?}", other)),
        }
    }

    #[test]
    fn grades_sample_cohort() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let (roster, responses) = write_inputs(dir.path(), ROSTER_CSV, RESPONSES_CSV);
        let options = options_for(dir.path(), &roster, &responses);
        let summary_path = run_grading(&options).unwrap();
        assert!(summary_path.exists());

        let sheet = sheet_range(&dir.path().join("output").join("1901CS01.xlsx"));
        assert_eq!(cell_str(&sheet, 4, 0).as_deref(), Some("Mark Sheet"));
        assert_eq!(cell_str(&sheet, 5, 1).as_deref(), Some("Asha Rao"));
        assert_eq!(cell_str(&sheet, 5, 4).as_deref(), Some("quiz"));
        assert_eq!(cell_str(&sheet, 6, 1).as_deref(), Some("1901CS01"));
        // Counts: 2 right, 1 wrong, 1 unattempted out of 4.
        assert_eq!(cell_str(&sheet, 9, 1).as_deref(), Some("2"));
        assert_eq!(cell_str(&sheet, 9, 2).as_deref(), Some("1"));
        assert_eq!(cell_str(&sheet, 9, 3).as_deref(), Some("1"));
        assert_eq!(cell_str(&sheet, 9, 4).as_deref(), Some("4"));
        // Marking scheme and totals.
        assert_eq!(cell_str(&sheet, 10, 1).as_deref(), Some("+5"));
        assert_eq!(cell_str(&sheet, 10, 2).as_deref(), Some("-1"));
        assert_eq!(cell_str(&sheet, 10, 3).as_deref(), Some("0"));
        assert_eq!(cell_str(&sheet, 11, 1).as_deref(), Some("10"));
        assert_eq!(cell_str(&sheet, 11, 2).as_deref(), Some("-1"));
        assert_eq!(cell_str(&sheet, 11, 3).as_deref(), Some("9/20"));
        // Answer blocks: submission next to the key.
        assert_eq!(cell_str(&sheet, 14, 0).as_deref(), Some("Student Ans"));
        assert_eq!(cell_str(&sheet, 14, 1).as_deref(), Some("Correct Ans"));
        assert_eq!(cell_str(&sheet, 15, 0).as_deref(), Some("A"));
        assert_eq!(cell_str(&sheet, 15, 1).as_deref(), Some("A"));
        assert_eq!(cell_str(&sheet, 17, 0).as_deref(), Some("X"));
        assert_eq!(cell_str(&sheet, 17, 1).as_deref(), Some("C"));
        // The unattempted question stays blank on the student side.
        assert_eq!(cell_str(&sheet, 18, 0), None);
        assert_eq!(cell_str(&sheet, 18, 1).as_deref(), Some("D"));
    }

    #[test]
    fn absent_student_gets_an_all_zero_sheet() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let (roster, responses) = write_inputs(dir.path(), ROSTER_CSV, RESPONSES_CSV);
        let options = options_for(dir.path(), &roster, &responses);
        run_grading(&options).unwrap();

        let sheet = sheet_range(&dir.path().join("output").join("1901CS04.xlsx"));
        assert_eq!(cell_str(&sheet, 5, 1).as_deref(), Some("Dina Das"));
        assert_eq!(cell_str(&sheet, 9, 1).as_deref(), Some("0"));
        assert_eq!(cell_str(&sheet, 9, 2).as_deref(), Some("0"));
        assert_eq!(cell_str(&sheet, 9, 3).as_deref(), Some("0"));
        assert_eq!(cell_str(&sheet, 11, 3).as_deref(), Some("0/20"));
        // The key is still rendered, the student column stays blank.
        assert_eq!(cell_str(&sheet, 15, 1).as_deref(), Some("A"));
        assert_eq!(cell_str(&sheet, 15, 0), None);
    }

    #[test]
    fn summary_covers_all_roster_entries() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let (roster, responses) = write_inputs(dir.path(), ROSTER_CSV, RESPONSES_CSV);
        let options = options_for(dir.path(), &roster, &responses);
        let summary_path = run_grading(&options).unwrap();

        let sheet = sheet_range(&summary_path);
        assert_eq!(cell_str(&sheet, 0, 0).as_deref(), Some("Roll Number"));
        assert_eq!(cell_str(&sheet, 0, 6).as_deref(), Some("Score"));
        // Rows follow the roster order, absentees included.
        assert_eq!(cell_str(&sheet, 1, 0).as_deref(), Some("1901CS01"));
        assert_eq!(cell_str(&sheet, 2, 0).as_deref(), Some("1901CS02"));
        assert_eq!(cell_str(&sheet, 3, 0).as_deref(), Some("1901CS03"));
        assert_eq!(cell_str(&sheet, 4, 0).as_deref(), Some("1901CS04"));
        assert_eq!(cell_str(&sheet, 1, 2).as_deref(), Some("2"));
        assert_eq!(cell_str(&sheet, 1, 5).as_deref(), Some("[2,1,1]"));
        assert_eq!(cell_str(&sheet, 1, 6).as_deref(), Some("9/20"));
        assert_eq!(cell_str(&sheet, 2, 6).as_deref(), Some("20/20"));
        assert_eq!(cell_str(&sheet, 3, 5).as_deref(), Some("[0,4,0]"));
        assert_eq!(cell_str(&sheet, 3, 6).as_deref(), Some("-4/20"));
        assert_eq!(cell_str(&sheet, 4, 5).as_deref(), Some("[0,0,0]"));
        assert_eq!(cell_str(&sheet, 4, 6).as_deref(), Some("0/20"));
    }

    #[test]
    fn splits_answer_columns_after_25() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let mut header = String::from("Roll Number,Timestamp,Email Address,Name,Section,Marks");
        let mut key_line = String::from("key,,,,,");
        let mut student_line = String::from("1901CS01,,,,,");
        for q in 1..=26 {
            header.push_str(&format!(",Q{}", q));
            let answer = match q {
                25 => "Y",
                26 => "Z",
                _ => "A",
            };
            key_line.push_str(&format!(",{}", answer));
            student_line.push_str(&format!(",{}", answer));
        }
        let responses_csv = format!("{}\n{}\n{}\n", header, key_line, student_line);
        let (roster, responses) = write_inputs(
            dir.path(),
            "roll,name\n1901CS01,Asha Rao\n",
            &responses_csv,
        );
        let options = options_for(dir.path(), &roster, &responses);
        run_grading(&options).unwrap();

        let sheet = sheet_range(&dir.path().join("output").join("1901CS01.xlsx"));
        // Question 25 closes the first block, question 26 opens the second.
        assert_eq!(cell_str(&sheet, 39, 0).as_deref(), Some("Y"));
        assert_eq!(cell_str(&sheet, 39, 1).as_deref(), Some("Y"));
        assert_eq!(cell_str(&sheet, 15, 3).as_deref(), Some("Z"));
        assert_eq!(cell_str(&sheet, 15, 4).as_deref(), Some("Z"));
        assert_eq!(cell_str(&sheet, 11, 3).as_deref(), Some("130/130"));
    }

    #[test]
    fn rejects_duplicate_roster_identifier() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let roster_csv = "roll,name\n1901CS01,Asha Rao\n1901CS01,Asha Rao\n";
        let (roster, responses) = write_inputs(dir.path(), roster_csv, RESPONSES_CSV);
        let options = options_for(dir.path(), &roster, &responses);
        let result = run_grading(&options);
        assert!(matches!(
            result,
            Err(GradingError::DuplicateRosterId { ref identifier, lineno })
                if identifier == "1901CS01" && lineno == 3
        ));
    }

    #[test]
    fn rejects_response_without_roster_entry() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let mut responses_csv = RESPONSES_CSV.to_string();
        responses_csv.push_str("1901ZZ99,,,Nobody,,,A,B,C,D\n");
        let (roster, responses) = write_inputs(dir.path(), ROSTER_CSV, &responses_csv);
        let options = options_for(dir.path(), &roster, &responses);
        let result = run_grading(&options);
        assert!(matches!(
            result,
            Err(GradingError::UnknownResponseId { ref identifier, lineno })
                if identifier == "1901ZZ99" && lineno == 6
        ));
    }

    #[test]
    fn first_response_wins_for_duplicate_submissions() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let mut responses_csv = RESPONSES_CSV.to_string();
        // A second, perfect submission for 1901CS01 must be ignored.
        responses_csv.push_str("1901CS01,2026-03-02 10:30:00,asha@example.com,Asha Rao,A,,A,B,C,D\n");
        let (roster, responses) = write_inputs(dir.path(), ROSTER_CSV, &responses_csv);
        let options = options_for(dir.path(), &roster, &responses);
        let summary_path = run_grading(&options).unwrap();
        let sheet = sheet_range(&summary_path);
        assert_eq!(cell_str(&sheet, 1, 6).as_deref(), Some("9/20"));
    }

    #[test]
    fn reference_check_detects_drift() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let (roster, responses) = write_inputs(dir.path(), ROSTER_CSV, RESPONSES_CSV);
        let json_path = dir.path().join("summary.json");
        let mut options = options_for(dir.path(), &roster, &responses);
        options.out_json_path = Some(json_path.to_str().unwrap().to_string());
        run_grading(&options).unwrap();

        options.out_json_path = None;
        options.reference_path = Some(json_path.to_str().unwrap().to_string());
        run_grading(&options).unwrap();

        let content = fs::read_to_string(&json_path).unwrap();
        fs::write(&json_path, content.replace("9/20", "8/20")).unwrap();
        let result = run_grading(&options);
        assert!(matches!(result, Err(GradingError::Whatever { .. })));
    }

    #[test]
    fn missing_logo_is_fatal() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let (roster, responses) = write_inputs(dir.path(), ROSTER_CSV, RESPONSES_CSV);
        let mut options = options_for(dir.path(), &roster, &responses);
        options.logo_path = Some(dir.path().join("no_such_logo.png").to_str().unwrap().to_string());
        let result = run_grading(&options);
        assert!(matches!(result, Err(GradingError::LogoLoad { .. })));
    }

    #[test]
    fn renders_with_logo() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let (roster, responses) = write_inputs(dir.path(), ROSTER_CSV, RESPONSES_CSV);
        let mut options = options_for(dir.path(), &roster, &responses);
        let logo = concat!(env!("CARGO_MANIFEST_DIR"), "/sample_input/logo.png");
        options.logo_path = Some(logo.to_string());
        run_grading(&options).unwrap();
        let sheet = sheet_range(&dir.path().join("output").join("1901CS01.xlsx"));
        assert_eq!(cell_str(&sheet, 4, 0).as_deref(), Some("Mark Sheet"));
    }

    #[test]
    fn reads_responses_from_excel_workbook() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let roster_path = dir.path().join("master_roll.xlsx");
        let responses_path = dir.path().join("responses.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "roll").unwrap();
        sheet.write_string(0, 1, "name").unwrap();
        // A numeric roll number must match its textual form.
        sheet.write_number(1, 0, 42).unwrap();
        sheet.write_string(1, 1, "Asha Rao").unwrap();
        workbook.save(&roster_path).unwrap();

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let header = [
            "Roll Number",
            "Timestamp",
            "Email Address",
            "Name",
            "Section",
            "Marks",
            "Q1",
            "Q2",
            "Q3",
            "Q4",
        ];
        for (col, name) in header.iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        sheet.write_string(1, 0, "key").unwrap();
        for (col, answer) in ["A", "B", "C", "D"].iter().enumerate() {
            sheet.write_string(1, (6 + col) as u16, *answer).unwrap();
        }
        sheet.write_number(2, 0, 42).unwrap();
        sheet.write_string(2, 6, "A").unwrap();
        sheet.write_string(2, 7, "B").unwrap();
        sheet.write_string(2, 8, "X").unwrap();
        workbook.save(&responses_path).unwrap();

        let options = options_for(
            dir.path(),
            roster_path.to_str().unwrap(),
            responses_path.to_str().unwrap(),
        );
        let summary_path = run_grading(&options).unwrap();
        let sheet = sheet_range(&summary_path);
        assert_eq!(cell_str(&sheet, 1, 0).as_deref(), Some("42"));
        assert_eq!(cell_str(&sheet, 1, 6).as_deref(), Some("9/20"));
    }

    #[test]
    fn sheet_failure_skips_student_but_completes_run() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        // The separator in the roll number makes the sheet path unwritable.
        let roster_csv = "roll,name\nbad/id,Broken Row\n1901CS01,Asha Rao\n";
        let responses_csv = "\
Roll Number,Timestamp,Email Address,Name,Section,Marks,Q1,Q2,Q3,Q4
key,,,,,,A,B,C,D
1901CS01,2026-03-02 10:04:11,asha@example.com,Asha Rao,A,,A,B,X,
";
        let (roster, responses) = write_inputs(dir.path(), roster_csv, responses_csv);
        let options = options_for(dir.path(), &roster, &responses);
        let summary_path = run_grading(&options).unwrap();

        let sheet = sheet_range(&summary_path);
        assert_eq!(cell_str(&sheet, 1, 0).as_deref(), Some("bad/id"));
        assert_eq!(cell_str(&sheet, 2, 0).as_deref(), Some("1901CS01"));
        assert!(dir.path().join("output").join("1901CS01.xlsx").exists());
    }

    #[test]
    fn empty_roster_is_rejected() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let (roster, responses) = write_inputs(dir.path(), "roll,name\n", RESPONSES_CSV);
        let options = options_for(dir.path(), &roster, &responses);
        let result = run_grading(&options);
        assert!(matches!(result, Err(GradingError::EmptyRoster { .. })));
    }

    #[test]
    fn blank_key_cell_is_rejected() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let responses_csv = "\
Roll Number,Timestamp,Email Address,Name,Section,Marks,Q1,Q2,Q3
key,,,,,,A,,C
1901CS01,,,,,,A,B,C
";
        let (roster, responses) = write_inputs(
            dir.path(),
            "roll,name\n1901CS01,Asha Rao\n",
            responses_csv,
        );
        let options = options_for(dir.path(), &roster, &responses);
        let result = run_grading(&options);
        assert!(matches!(
            result,
            Err(GradingError::BlankKeyCell { question: 2 })
        ));
    }

    #[test]
    fn honors_column_overrides() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let responses_csv = "\
Timestamp,Roll Number,Q1,Q2
,key,A,B
,1901CS01,A,B
";
        let (roster, responses) = write_inputs(
            dir.path(),
            "roll,name\n1901CS01,Asha Rao\n",
            responses_csv,
        );
        let mut options = options_for(dir.path(), &roster, &responses);
        options.id_column = 2;
        options.first_answer_column = 3;
        let summary_path = run_grading(&options).unwrap();
        let sheet = sheet_range(&summary_path);
        assert_eq!(cell_str(&sheet, 1, 6).as_deref(), Some("10/10"));
    }

    #[test]
    fn rejects_zero_column_index() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let (roster, responses) = write_inputs(dir.path(), ROSTER_CSV, RESPONSES_CSV);
        let mut options = options_for(dir.path(), &roster, &responses);
        options.id_column = 0;
        let result = run_grading(&options);
        assert!(matches!(
            result,
            Err(GradingError::InvalidColumnIndex { value: 0, .. })
        ));
    }
}
