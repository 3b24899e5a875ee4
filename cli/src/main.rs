use anyhow::Context;
use clap::Parser;
use engine::deploy::Deployer;
use engine::session::HyprlandSession;
use hyprtheme::AppError;
use hyprtheme::args::{Cli, Command};
use hyprtheme::config::{self, setup};
use hyprtheme::{commands, logger};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let app_config = match config::load_config(cli.config.as_deref()).into_validated() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::from(2));
        }
    };

    logger::setup_logger(app_config.logging(), cli.verbose)
        .context("Failed to initialize logger")?;

    let config_home = setup::get_config_home().map_err(|_| AppError::NoConfigDir)?;
    let deployer = Deployer::from_config(
        app_config.engine_config(&config_home),
        Arc::new(HyprlandSession),
    );

    let mut stdout = io::stdout().lock();
    let result = match cli.command {
        Command::List { filter, json } => {
            commands::list(&deployer, filter.as_deref(), json, &mut stdout)
        }
        Command::Apply { id } => commands::apply(&deployer, &id, &mut stdout).await,
        Command::Turbo { mode } => commands::turbo(&deployer, mode, &mut stdout),
        Command::Status => commands::status(&deployer, &mut stdout),
        Command::Palette { image } => commands::palette(&deployer, &image, &mut stdout),
        Command::Config => commands::show_config(&app_config, &config_home, &mut stdout),
    };
    stdout.flush()?;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
