use clap::Parser;
use clap::Subcommand;
use commands::watch::Watch;

mod branches;
mod commands;
mod config;
mod errors;
mod monitor;
mod notify;
mod runner;
mod scm;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "branchwatch")]
#[command(about = "Poll git branches, run tests on new commits and report to a webhook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Watch(Watch),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    let result = match args.command {
        Commands::Watch(watch) => watch.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
