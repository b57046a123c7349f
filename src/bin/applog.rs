#![deny(unsafe_code)]

use std::{env, io, process::ExitCode};

fn main() -> ExitCode {
    // Unlocked handles: the logger and its spinner thread write to the same
    // streams while `run` is executing.
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let status = cli::run(env::args_os(), &mut stdout, &mut stderr);
    cli::exit_code_from(status)
}
