mod cli;
mod commands;
mod config;
mod privilege;
mod progress;
mod prompt;
mod signal;
mod tasks;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command, MenuArgs};
use config::Config;
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub config: Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    signal::install();

    let command = cli.command.unwrap_or(Command::Menu(MenuArgs::default()));

    if let Command::Completions { shell } = command {
        generate(shell, &mut Cli::command(), "fedora-setup", &mut io::stdout());
        return Ok(());
    }

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: Config::load(cli.config.as_deref())?,
    };
    log::debug!("verbosity {}", ctx.verbose);

    match command {
        Command::Menu(args) => commands::menu::run(&ctx, args),
        Command::Run(args) => commands::run::run(&ctx, args),
        Command::Status(args) => commands::status::run(&ctx, args),
        Command::List(args) => commands::list::run(&ctx, args),
        Command::Completions { .. } => Ok(()),
    }
}
