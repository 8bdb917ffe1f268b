use clap::Parser;
use vibesec_core::logging;

mod cli;

use crate::cli::{Cli, Outcome};

fn main() {
    let cli = Cli::parse();

    // Log to the state file; fall back to stderr if it can't be opened.
    if logging::init_logging(cli.verbose).is_err() {
        logging::init_logging_stderr(cli.verbose);
    }

    match cli.run() {
        Ok(Outcome::Clean) => {}
        Ok(Outcome::Flagged) => std::process::exit(2),
        Err(err) => {
            eprintln!("vibesec error: {:#}", err);
            std::process::exit(1);
        }
    }
}
