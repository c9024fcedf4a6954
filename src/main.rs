//! # EduBASIC
//!
//! Runs a program file, or starts the interactive editor when no file is
//! given.
//!
//! ```text
//! edubasic [--seed N] [--steps N] [FILE]
//! ```

mod term;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    term::main(term::Options::parse());
}
