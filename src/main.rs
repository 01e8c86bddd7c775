use clap::{ErrorKind, Parser};
use csvtrace::{init_logging, run, Opts};
use std::process::exit;

fn main() {
    let opts = match Opts::try_parse() {
        Ok(opts) => opts,

        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }

        // usage errors exit with 1 instead of clap's 2
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    };

    init_logging(&opts.log_level);

    if let Err(e) = run(&opts) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}
