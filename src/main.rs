use std::process::ExitCode;

use clap::Parser;
use keyscan::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    keyscan::logging::init_logging(args.verbose);

    match keyscan::cli::run_cli(&args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
