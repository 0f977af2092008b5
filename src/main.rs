mod cli;
mod config;
mod error;
mod gemini;
mod generator;
mod images;
mod prompts;
mod resume;
mod retry;
mod runner;
mod samples;
mod ui;

use clap::Parser;
use cli::Cli;
use console::Style;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = runner::run(cli).await {
        eprintln!("{} {err:#}", Style::new().red().bold().apply_to("error:"));
        std::process::exit(1);
    }
}
