//! argtree - parse command lines against a tree of subcommands

use std::process::ExitCode;

fn main() -> ExitCode {
    match argtree::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
