// Primitives for reading the roster and the response sheet from Excel
// workbooks, as downloaded from an online form provider.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;

use crate::grading::{
    io_common::{cell_to_string, find_header_column},
    *,
};

pub fn read_roster_xlsx(path: &str) -> GradingResult<Vec<ParsedRosterRow>> {
    let wrange = get_first_range(path)?;
    let mut rows = wrange.rows();

    let header = rows.next().context(EmptyRosterSnafu { path })?;
    let header_cells = header_names(header);
    debug!("read_roster_xlsx: header: {:?}", header_cells);
    let roll_idx = find_header_column(&header_cells, "roll").context(MissingColumnSnafu {
        column: "roll",
        path,
    })?;
    let name_idx = find_header_column(&header_cells, "name").context(MissingColumnSnafu {
        column: "name",
        path,
    })?;

    let mut res: Vec<ParsedRosterRow> = Vec::new();
    for (idx, row) in rows.enumerate() {
        let lineno = idx + 2;
        debug!("read_roster_xlsx: lineno: {:?} row: {:?}", lineno, row);
        let identifier = cell_to_string(
            row.get(roll_idx).context(LineTooShortSnafu { lineno })?,
            lineno,
        )?
        .unwrap_or_default();
        let name = cell_to_string(
            row.get(name_idx).context(LineTooShortSnafu { lineno })?,
            lineno,
        )?
        .unwrap_or_default();
        res.push(ParsedRosterRow {
            lineno,
            identifier,
            name,
        });
    }
    Ok(res)
}

pub fn read_responses_xlsx(path: &str, options: &GradingOptions) -> GradingResult<Vec<ParsedRow>> {
    let id_idx = options.id_column_index()?;
    let answers_idx = options.first_answer_column_index()?;

    let wrange = get_first_range(path)?;
    let mut rows = wrange.rows();
    let header = rows.next().context(MissingKeyRowSnafu { path })?;
    debug!("read_responses_xlsx: header: {:?}", header);

    let mut res: Vec<ParsedRow> = Vec::new();
    for (idx, row) in rows.enumerate() {
        let lineno = idx + 2;
        debug!("read_responses_xlsx: lineno: {:?} row: {:?}", lineno, row);
        let identifier = cell_to_string(
            row.get(id_idx).context(LineTooShortSnafu { lineno })?,
            lineno,
        )?
        .unwrap_or_default();
        let answers: Vec<Option<String>> = row
            .iter()
            .skip(answers_idx)
            .map(|cell| cell_to_string(cell, lineno))
            .collect::<GradingResult<Vec<Option<String>>>>()?;
        res.push(ParsedRow {
            lineno,
            identifier,
            answers,
        });
    }
    Ok(res)
}

fn header_names(header: &[DataType]) -> Vec<String> {
    header
        .iter()
        .map(|cell| match cell {
            DataType::String(s) => s.clone(),
            _ => String::new(),
        })
        .collect()
}

// Form exports hold a single worksheet; the first one is taken when the
// workbook carries several.
fn get_first_range(path: &str) -> GradingResult<calamine::Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let all_worksheets = workbook.worksheets();
    match all_worksheets.as_slice() {
        [] => EmptyExcelSnafu { path }.fail(),
        [(worksheet_name, wrange), ..] => {
            debug!(
                "get_first_range: path: {:?} worksheet: {:?}",
                path, worksheet_name
            );
            Ok(wrange.clone())
        }
    }
}
