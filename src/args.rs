use clap::Parser;

/// This is a negative-marking grading program for multiple-choice exams.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The roster of enrolled students, with a 'roll' and a 'name' column.
    /// CSV and Excel (xlsx) files are both accepted, based on the file extension.
    #[clap(short, long, value_parser)]
    pub roster: String,

    /// (file path) The response sheet. The first row holds the column titles, the first
    /// data row holds the answer key and every following row is one student's submission.
    /// CSV and Excel (xlsx) files are both accepted, based on the file extension.
    #[clap(short = 'i', long, value_parser)]
    pub responses: String,

    /// (directory path, default 'output') The directory receiving one mark sheet per
    /// roster entry plus the consolidated summary. Created if missing.
    #[clap(short, long, value_parser)]
    pub out_dir: Option<String>,

    /// (default 'quiz') The exam label printed on every mark sheet.
    #[clap(long, value_parser)]
    pub exam: Option<String>,

    /// (file path or empty) A logo image placed at the top of every mark sheet.
    #[clap(long, value_parser)]
    pub logo: Option<String>,

    /// (default 1) The 1-based column of the response sheet holding the student
    /// identifier.
    #[clap(long, value_parser)]
    pub id_column: Option<usize>,

    /// (default 7) The 1-based column of the response sheet where the per-question
    /// answers start. Everything before it is treated as metadata.
    #[clap(long, value_parser)]
    pub first_answer_column: Option<usize>,

    /// (file path or empty) If specified, the summary of the grading run will be written
    /// in JSON format to the given location.
    #[clap(long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, mcqgrade will check
    /// that the computed summary matches the reference.
    #[clap(long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
