//! agif - Command-line tool for inspecting and converting animated GIFs

use std::process::ExitCode;

use animgif::cli;

fn main() -> ExitCode {
    cli::run()
}
