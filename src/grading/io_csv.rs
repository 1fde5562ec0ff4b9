// Primitives for reading the roster and the response sheet from CSV files.

use log::debug;
use mcq_scoring::normalize_answer;

use crate::grading::{io_common::find_header_column, *};

pub fn read_roster_csv(path: &str) -> GradingResult<Vec<ParsedRosterRow>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context(CsvOpenSnafu {})?;
    let mut records = rdr.into_records();

    let header = records
        .next()
        .context(EmptyRosterSnafu { path })?
        .context(CsvLineParseSnafu {})?;
    let header_cells: Vec<String> = header.iter().map(|s| s.to_string()).collect();
    debug!("read_roster_csv: header: {:?}", header_cells);
    let roll_idx = find_header_column(&header_cells, "roll").context(MissingColumnSnafu {
        column: "roll",
        path,
    })?;
    let name_idx = find_header_column(&header_cells, "name").context(MissingColumnSnafu {
        column: "name",
        path,
    })?;

    let mut res: Vec<ParsedRosterRow> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header was consumed above and linenos are 1-based.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_roster_csv: lineno: {:?} row: {:?}", lineno, line);
        let identifier = line
            .get(roll_idx)
            .context(LineTooShortSnafu { lineno })?
            .trim()
            .to_string();
        let name = line
            .get(name_idx)
            .context(LineTooShortSnafu { lineno })?
            .trim()
            .to_string();
        res.push(ParsedRosterRow {
            lineno,
            identifier,
            name,
        });
    }
    Ok(res)
}

pub fn read_responses_csv(path: &str, options: &GradingOptions) -> GradingResult<Vec<ParsedRow>> {
    let id_idx = options.id_column_index()?;
    let answers_idx = options.first_answer_column_index()?;

    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context(CsvOpenSnafu {})?;

    let mut res: Vec<ParsedRow> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_responses_csv: lineno: {:?} row: {:?}", lineno, line);
        if lineno == 1 {
            // Column titles. The layout is positional, nothing to look up.
            continue;
        }
        let identifier = line
            .get(id_idx)
            .context(LineTooShortSnafu { lineno })?
            .trim()
            .to_string();
        let answers: Vec<Option<String>> =
            line.iter().skip(answers_idx).map(normalize_answer).collect();
        res.push(ParsedRow {
            lineno,
            identifier,
            answers,
        });
    }
    Ok(res)
}
