use std::path::PathBuf;

use clap::Parser;
use quiz_runner::session::DEFAULT_TIME_LIMIT_SECS;
use quiz_runner::{logging, AppConfig, Quiz, DEFAULT_BANK_PATH};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the quiz sets from
    #[arg(short, long, default_value = DEFAULT_BANK_PATH)]
    bank: PathBuf,

    /// Seed for reproducible question order
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seconds on the clock for each quiz
    #[arg(short, long, default_value_t = DEFAULT_TIME_LIMIT_SECS,
          value_parser = clap::value_parser!(u32).range(1..))]
    time_limit: u32,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init(args.log_file.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let config = AppConfig {
        time_limit: args.time_limit,
        seed: args.seed,
    };
    let quiz = match Quiz::from_json(&args.bank, config) {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
