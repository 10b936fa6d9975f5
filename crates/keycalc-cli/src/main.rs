//! keycalc: keypad calculator
//!
//! ## Usage
//!
//! ```bash
//! keycalc tui                          # Interactive terminal calculator
//! keycalc press 12+30=                 # Feed keys, print the display
//! keycalc press 5 + 3 Enter --format json
//! keycalc --config keycalc.json config # Show effective configuration
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use keycalc_cli::{init_logging, load_config, run_press, run_tui, Cli, CliResult, Commands};

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
    let config = load_config(cli.config.as_deref())?;

    // The TUI owns the terminal, so it only ever logs to a file
    let to_stderr = !matches!(cli.command, Commands::Tui);
    init_logging(cli.verbose, &config, cli.log_file.as_deref(), to_stderr)?;

    match cli.command {
        Commands::Tui => run_tui(&config),
        Commands::Press(args) => run_press(&args, &mut io::stdout().lock()),
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
