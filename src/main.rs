//! RWI Builder - compose documents from bracket-delimited components

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = rwi_builder::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
