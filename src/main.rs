//! sysclip CLI entry point

use std::process::ExitCode;

use clap::Parser;

use sysclip::application::SystemClipboard;
use sysclip::cli::{
    app::{load_merged_config, run_command, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use sysclip::domain::config::AppConfig;
use sysclip::infrastructure::{create_clipboard, init_logging, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    let cli_config = AppConfig {
        delimiter: match &cli.command {
            Commands::Paste(args) => args.delimiter.clone(),
            _ => None,
        },
        log_level: cli.log_level.clone(),
    };
    let config = load_merged_config(cli_config).await;
    init_logging(config.log_level_or_default());

    if let Commands::Config { action } = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let clipboard = SystemClipboard::new(create_clipboard());
    run_command(cli.command, &clipboard, &config, &presenter).await
}
