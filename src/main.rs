//! todotxt - read, query and rewrite todo.txt files

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = todotxt::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
