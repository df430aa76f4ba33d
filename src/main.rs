//! Tasklight - interactive to-do list session for the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = tasklight::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
