mod args;
mod grading;

use clap::Parser;
use log::{info, LevelFilter};

use crate::grading::GradingOptions;

fn main() {
    let args = args::Args::parse();
    let mut log_builder = env_logger::Builder::from_default_env();
    if args.verbose {
        log_builder.filter_level(LevelFilter::Debug);
    }
    log_builder.init();
    info!("args: {:?}", args);

    let options = GradingOptions {
        roster_path: args.roster,
        responses_path: args.responses,
        out_dir: args
            .out_dir
            .unwrap_or_else(|| grading::DEFAULT_OUT_DIR.to_string()),
        exam: args
            .exam
            .unwrap_or_else(|| grading::DEFAULT_EXAM_LABEL.to_string()),
        logo_path: args.logo,
        id_column: args.id_column.unwrap_or(grading::DEFAULT_ID_COLUMN),
        first_answer_column: args
            .first_answer_column
            .unwrap_or(grading::DEFAULT_FIRST_ANSWER_COLUMN),
        out_json_path: args.out,
        reference_path: args.reference,
    };

    match grading::run_grading(&options) {
        Ok(summary_path) => {
            info!(
                "Grading complete, summary written to {}",
                summary_path.display()
            );
        }
        Err(e) => {
            eprintln!("An error occured {}", e);
            std::process::exit(1);
        }
    }
}
