// Renders one mark sheet per student.
//
// The layout is a fixed template: a header block with the logo and the
// student identity, a bordered summary block with the counts and the
// marking scheme, and two side-by-side answer blocks of 25 questions
// each comparing the submission to the key.

use log::debug;
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatUnderline, Image, Workbook, XlsxError,
};
use snafu::prelude::*;
use std::path::{Path, PathBuf};

use crate::grading::{GradingResult, LogoLoadSnafu, RosterEntry, SheetWriteSnafu, StudentResponse};
use mcq_scoring::{AnswerVerdict, MarkingScheme, Outcome};

const GREEN: Color = Color::RGB(0x008000);
const RED: Color = Color::RGB(0xFF0000);
const BLUE: Color = Color::RGB(0x0000FF);

const SHEET_COLUMNS: u16 = 5;
const COLUMN_WIDTH: f64 = 17.0;

const TITLE_ROW: u32 = 4;
const NAME_ROW: u32 = 5;
const ROLL_ROW: u32 = 6;
const COUNTS_HEADER_ROW: u32 = 8;
const COUNTS_ROW: u32 = 9;
const MARKING_ROW: u32 = 10;
const TOTAL_ROW: u32 = 11;
const ANSWER_HEADER_ROW: u32 = 14;
const ANSWER_FIRST_ROW: u32 = 15;

// Columns of the two answer blocks: (student answer, correct answer).
const BLOCK_1: (u16, u16) = (0, 1);
const BLOCK_2: (u16, u16) = (3, 4);
const QUESTIONS_PER_BLOCK: usize = 25;

pub const LOGO_WIDTH: f64 = 610.0;
pub const LOGO_HEIGHT: f64 = 80.0;

/// The immutable style registry for mark sheets, built once per run and
/// shared by reference across all students.
pub struct SheetStyles {
    title: Format,
    heading: Format,
    content: Format,
    label: Format,
    table_header: Format,
    count_green: Format,
    count_red: Format,
    count_plain: Format,
    total_blue: Format,
    answer_green: Format,
    answer_red: Format,
    answer_blue: Format,
}

impl SheetStyles {
    pub fn new() -> SheetStyles {
        SheetStyles {
            title: Format::new()
                .set_font_name("Century")
                .set_font_size(18)
                .set_bold()
                .set_underline(FormatUnderline::Single)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::Bottom),
            heading: Format::new()
                .set_font_name("Calibri")
                .set_font_size(14)
                .set_bold()
                .set_align(FormatAlign::Right)
                .set_align(FormatAlign::Bottom),
            content: Format::new()
                .set_font_name("Calibri")
                .set_font_size(14)
                .set_bold()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::Bottom),
            label: bordered(
                Format::new()
                    .set_font_name("Calibri")
                    .set_font_size(14)
                    .set_bold()
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::Bottom),
            ),
            table_header: bordered(
                Format::new()
                    .set_font_name("Calibri")
                    .set_font_size(12)
                    .set_bold()
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::Bottom),
            ),
            count_green: bordered(data_format().set_font_color(GREEN)),
            count_red: bordered(data_format().set_font_color(RED)),
            count_plain: bordered(data_format()),
            total_blue: bordered(data_format().set_font_color(BLUE)),
            answer_green: data_format().set_font_color(GREEN),
            answer_red: data_format().set_font_color(RED),
            answer_blue: data_format().set_font_color(BLUE),
        }
    }
}

fn data_format() -> Format {
    Format::new()
        .set_font_name("Calibri")
        .set_font_size(12)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::Bottom)
}

fn bordered(format: Format) -> Format {
    format
        .set_border(FormatBorder::Medium)
        .set_border_color(Color::Black)
}

// Maps a question index to its sheet row and its (student, correct)
// columns. Questions 26 and up land in the second block, 25 rows up.
fn answer_slot(index: usize) -> (u32, u16, u16) {
    if index < QUESTIONS_PER_BLOCK {
        let (student_col, key_col) = BLOCK_1;
        (ANSWER_FIRST_ROW + index as u32, student_col, key_col)
    } else {
        let (student_col, key_col) = BLOCK_2;
        let row = ANSWER_FIRST_ROW + (index - QUESTIONS_PER_BLOCK) as u32;
        (row, student_col, key_col)
    }
}

/// Loads the logo once for the whole run, scaled to the header slot.
pub fn load_logo(path: &str) -> GradingResult<Image> {
    let image = Image::new(path)
        .context(LogoLoadSnafu { path })?
        .set_scale_to_size(LOGO_WIDTH, LOGO_HEIGHT, false);
    Ok(image)
}

/// The per-run constants of the mark sheet layout. One template serves
/// every student of the cohort.
pub struct SheetTemplate<'a> {
    pub exam: &'a str,
    pub key: &'a [String],
    pub scheme: &'a MarkingScheme,
    pub styles: &'a SheetStyles,
    pub logo: Option<&'a Image>,
}

impl<'a> SheetTemplate<'a> {
    /// Writes the mark sheet for one roster entry to
    /// `<out_dir>/<identifier>.xlsx` and returns the path.
    pub fn write_student_sheet(
        &self,
        out_dir: &Path,
        entry: &RosterEntry,
        outcome: &Outcome,
        response: Option<&StudentResponse>,
    ) -> GradingResult<PathBuf> {
        let path = out_dir.join(format!("{}.xlsx", entry.identifier));
        debug!("write_student_sheet: path: {:?}", path);
        let mut workbook = Workbook::new();
        self.render(&mut workbook, entry, outcome, response)
            .context(SheetWriteSnafu {
                identifier: entry.identifier.clone(),
            })?;
        workbook.save(&path).context(SheetWriteSnafu {
            identifier: entry.identifier.clone(),
        })?;
        Ok(path)
    }

    fn render(
        &self,
        workbook: &mut Workbook,
        entry: &RosterEntry,
        outcome: &Outcome,
        response: Option<&StudentResponse>,
    ) -> Result<(), XlsxError> {
        let styles = self.styles;
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Mark Sheet")?;
        for col in 0..SHEET_COLUMNS {
            worksheet.set_column_width(col, COLUMN_WIDTH)?;
        }
        if let Some(logo) = self.logo {
            worksheet.insert_image(0, 0, logo)?;
        }

        // Header block.
        worksheet.merge_range(
            TITLE_ROW,
            0,
            TITLE_ROW,
            SHEET_COLUMNS - 1,
            "Mark Sheet",
            &styles.title,
        )?;
        worksheet.write_string_with_format(NAME_ROW, 0, "Name :", &styles.heading)?;
        worksheet.merge_range(NAME_ROW, 1, NAME_ROW, 2, &entry.name, &styles.content)?;
        worksheet.write_string_with_format(NAME_ROW, 3, "Exam :", &styles.heading)?;
        worksheet.write_string_with_format(NAME_ROW, 4, self.exam, &styles.content)?;
        worksheet.write_string_with_format(ROLL_ROW, 0, "Roll Number :", &styles.heading)?;
        worksheet.write_string_with_format(ROLL_ROW, 1, &entry.identifier, &styles.content)?;

        // Summary block, bordered over A9:E12.
        worksheet.write_blank(COUNTS_HEADER_ROW, 0, &styles.table_header)?;
        worksheet.write_string_with_format(COUNTS_HEADER_ROW, 1, "Right", &styles.table_header)?;
        worksheet.write_string_with_format(COUNTS_HEADER_ROW, 2, "Wrong", &styles.table_header)?;
        worksheet.write_string_with_format(
            COUNTS_HEADER_ROW,
            3,
            "Not Attempt",
            &styles.table_header,
        )?;
        worksheet.write_string_with_format(COUNTS_HEADER_ROW, 4, "Max", &styles.table_header)?;

        worksheet.write_string_with_format(COUNTS_ROW, 0, "No.", &styles.label)?;
        worksheet.write_string_with_format(
            COUNTS_ROW,
            1,
            &outcome.right.to_string(),
            &styles.count_green,
        )?;
        worksheet.write_string_with_format(
            COUNTS_ROW,
            2,
            &outcome.wrong.to_string(),
            &styles.count_red,
        )?;
        worksheet.write_string_with_format(
            COUNTS_ROW,
            3,
            &outcome.unattempted.to_string(),
            &styles.count_plain,
        )?;
        worksheet.write_string_with_format(
            COUNTS_ROW,
            4,
            &self.key.len().to_string(),
            &styles.label,
        )?;

        worksheet.write_string_with_format(MARKING_ROW, 0, "Marking", &styles.label)?;
        worksheet.write_string_with_format(
            MARKING_ROW,
            1,
            &format!("+{}", self.scheme.correct),
            &styles.count_green,
        )?;
        worksheet.write_string_with_format(
            MARKING_ROW,
            2,
            &format!("-{}", self.scheme.wrong),
            &styles.count_red,
        )?;
        worksheet.write_string_with_format(
            MARKING_ROW,
            3,
            &self.scheme.unattempted.to_string(),
            &styles.count_plain,
        )?;
        worksheet.write_blank(MARKING_ROW, 4, &styles.count_plain)?;

        worksheet.write_string_with_format(TOTAL_ROW, 0, "Total", &styles.label)?;
        let earned = (outcome.right as i64) * self.scheme.correct;
        let deducted = (outcome.wrong as i64) * self.scheme.wrong;
        worksheet.write_string_with_format(
            TOTAL_ROW,
            1,
            &earned.to_string(),
            &styles.count_green,
        )?;
        worksheet.write_string_with_format(
            TOTAL_ROW,
            2,
            &format!("-{}", deducted),
            &styles.count_red,
        )?;
        worksheet.write_string_with_format(
            TOTAL_ROW,
            3,
            &outcome.score_string(),
            &styles.total_blue,
        )?;
        worksheet.write_blank(TOTAL_ROW, 4, &styles.count_plain)?;

        // Answer blocks.
        for (student_col, key_col) in [BLOCK_1, BLOCK_2] {
            worksheet.write_string_with_format(
                ANSWER_HEADER_ROW,
                student_col,
                "Student Ans",
                &styles.table_header,
            )?;
            worksheet.write_string_with_format(
                ANSWER_HEADER_ROW,
                key_col,
                "Correct Ans",
                &styles.table_header,
            )?;
        }
        for (idx, expected) in self.key.iter().enumerate() {
            let (row, _, key_col) = answer_slot(idx);
            worksheet.write_string_with_format(row, key_col, expected, &styles.answer_blue)?;
        }
        if let Some(response) = response {
            for (idx, verdict) in outcome.verdicts.iter().enumerate() {
                let (row, student_col, _) = answer_slot(idx);
                let submitted = response.answers.get(idx).and_then(|a| a.as_deref());
                match (verdict, submitted) {
                    (AnswerVerdict::Correct, Some(answer)) => {
                        worksheet.write_string_with_format(
                            row,
                            student_col,
                            answer,
                            &styles.answer_green,
                        )?;
                    }
                    (AnswerVerdict::Wrong, Some(answer)) => {
                        worksheet.write_string_with_format(
                            row,
                            student_col,
                            answer,
                            &styles.answer_red,
                        )?;
                    }
                    _ => {
                        // Unattempted, the cell stays blank.
                    }
                }
            }
        }
        Ok(())
    }
}
