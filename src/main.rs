use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use eksisozluk_cli::{cli, info_time};

#[tokio::main]
async fn main() -> ExitCode {
    let start_time = Local::now();
    let args = cli::Cli::parse();

    match cli::run(args).await {
        Ok(()) => {
            info_time!(start_time, "Full program time:");
            ExitCode::SUCCESS
        }
        Err(e) => {
            info_time!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
