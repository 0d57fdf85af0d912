// crates/epos-rs-cli/src/main.rs
//! `eposcmd`: read and write EPOS object dictionary entries from the shell.

mod args;
mod commands;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use std::io;
use std::process::ExitCode;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn execute(cli: &Cli) -> Result<()> {
    let mut out = io::stdout().lock();
    match commands::port_of(&cli.command) {
        Some(port) => {
            let mut device = commands::connect(port, &cli.connection)?;
            commands::run(&mut device, &cli.command, &mut out)
        }
        None => commands::list_ports(&mut out),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
