pub mod commands;
pub mod logging;
pub mod types;

use clap::Parser;
use log::error;
use std::process::ExitCode;

/// Run the command-line interface
pub fn run() -> ExitCode {
    let cli = types::Cli::parse();

    // Initialize logging system
    logging::init_logging(logging::level_for(cli.debug, cli.quiet));

    // Configure backtrace
    logging::configure_backtrace(cli.trace);

    let source = cli.source.as_ref();
    let config_files = cli.config.as_ref();

    let result = match &cli.command {
        Some(types::Commands::Render {
            destination,
            in_place,
        }) => commands::handle_render_command(source, config_files, destination.as_ref(), *in_place),
        Some(types::Commands::Outline { file, format }) => {
            commands::handle_outline_command(source, config_files, file, *format)
        }
        Some(types::Commands::Config { action }) => {
            commands::handle_config_command(source, config_files, action)
        }
        None => commands::handle_render_command(source, config_files, None, false),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
