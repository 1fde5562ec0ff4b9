// Helpers shared by the CSV and Excel readers.

use calamine::DataType;
use mcq_scoring::normalize_answer;

use crate::grading::*;

/// Decodes one spreadsheet cell into a trimmed optional string.
///
/// Blank cells decode to `None`. Numeric cells are rendered without a
/// trailing `.0` so that numeric identifiers and numeric answers match
/// their CSV spelling.
pub fn cell_to_string(cell: &DataType, lineno: usize) -> GradingResult<Option<String>> {
    match cell {
        DataType::String(s) => Ok(normalize_answer(s)),
        DataType::Float(x) => Ok(Some(format_number(*x))),
        DataType::Int(x) => Ok(Some(x.to_string())),
        DataType::Empty => Ok(None),
        _ => WrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn format_number(x: f64) -> String {
    if x.fract() == 0.0 {
        format!("{}", x as i64)
    } else {
        format!("{}", x)
    }
}

/// Finds the position of a named column in a header row, ignoring case
/// and surrounding whitespace.
pub fn find_header_column(header: &[String], name: &str) -> Option<usize> {
    header
        .iter()
        .position(|cell| cell.trim().eq_ignore_ascii_case(name))
}
