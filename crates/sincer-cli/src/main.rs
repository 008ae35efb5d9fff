// crates/sincer-cli/src/main.rs - CLI Application Entry Point
//
// ARCHITECTURE OVERVIEW:
// ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────────┐
// │   User Input    │───▶│   CLI Parser     │───▶│  Command Handlers   │
// │ (clap commands) │    │  (cli.rs)        │    │ (commands/*.rs)     │
// └─────────────────┘    └──────────────────┘    └─────────────────────┘
//                                 │                        │
//                                 ▼                        ▼
//                        ┌──────────────────┐    ┌─────────────────────┐
//                        │     Context      │    │     Services        │
//                        │ (manager + path) │    │ (table rendering)   │
//                        └──────────────────┘    └─────────────────────┘
//
// One invocation runs exactly one command: load the config, apply the
// command, save, print. Results go to stdout, errors to stderr with exit
// code 1, logs (when enabled with -v or RUST_LOG) to stderr.
//
// EXAMPLE USAGE:
// ```bash
// sincer create coffee                       # start a timer at the top
// sincer add --below --date 2024-04-13 trip  # backdated, at the bottom
// sincer ls 'tim*'                           # list matching records
// sincer move coffee dmax                    # move to the bottom
// sincer rm 'timer-*'                        # delete every default-named timer
// ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod context;
mod services;

use cli::{Cli, Commands};
use context::Context;

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{}", console::style(format!("{:#}", err)).red());
        std::process::exit(1);
    }
}

/// Build the context and dispatch to the command handler
fn run(cli: Cli) -> Result<()> {
    let styled = console::colors_enabled();

    // Reset must be able to overwrite a config that no longer parses,
    // so it gets a context that never reads the file
    if let Commands::Reset = cli.command {
        let mut ctx = Context::without_loading(cli.config, styled, cli.dry_run);
        return commands::reset::handle(&mut ctx);
    }

    let mut ctx = Context::new(cli.config, styled, cli.dry_run)?;

    match cli.command {
        Commands::List { pattern, json } => commands::list::handle(&ctx, pattern, json),
        Commands::Create {
            name,
            date,
            color,
            below,
        } => commands::create::handle(&mut ctx, name, date, color, below),
        Commands::Change { name, date, color } => {
            commands::change::handle(&mut ctx, name, date, color)
        }
        Commands::Restart { name } => commands::change::handle_restart(&mut ctx, name),
        Commands::Rename { name, newname } => commands::rename::handle(&mut ctx, name, newname),
        Commands::Swap { mode, name, name2 } => commands::swap::handle(&mut ctx, mode, name, name2),
        Commands::Move { name, step } => commands::reorder::handle(&mut ctx, name, step),
        Commands::Remove { pattern } => commands::remove::handle(&mut ctx, pattern),
        Commands::Reset => unreachable!(), // Already handled above
    }
}

/// Send logs to stderr so stdout stays clean for piping
///
/// `RUST_LOG` wins when set; otherwise each `-v` raises the level one step
/// from `warn`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(console::colors_enabled_stderr())
        .init();
}
