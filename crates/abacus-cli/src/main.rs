//! Abacus CLI: arithmetic and scientific calculator
//!
//! ## Usage
//!
//! ```bash
//! abacus menu                     # Interactive numbered menu
//! abacus eval power 2 10          # One-shot evaluation
//! abacus serve --port 8080        # Web calculator and dashboard
//! abacus ops                      # List operations
//! ```

use abacus_cli::handlers::{execute_eval, execute_serve, list_operations};
use abacus_cli::logging::init_tracing;
use abacus_cli::{Cli, CliConfig, CliResult, ColorChoice, Commands, Menu, Verbosity};
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    console::set_colors_enabled(config.color.should_color());
    init_tracing(config.verbosity);

    match cli.command {
        Commands::Menu => run_menu(),
        Commands::Serve(args) => execute_serve(&config, &args),
        Commands::Eval(args) => {
            let mut stdout = io::stdout().lock();
            execute_eval(&args, &mut stdout)?;
            stdout.flush()?;
            Ok(())
        }
        Commands::Ops => list_operations(&mut io::stdout().lock()),
    }
}

fn run_menu() -> CliResult<()> {
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    Menu::new(stdin, stdout).run()
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(ColorChoice::from(cli.color.clone()))
}
