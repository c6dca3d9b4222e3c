mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod ledger;
mod output;
mod pricing;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Settings;

fn main() {
    let cli = Cli::parse();
    let settings = Settings::load();

    if let Err(err) = app::run(cli, settings) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
