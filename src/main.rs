use anyhow::Result;
use clap::Parser;

use subfollow::cli::{Cli, Commands, ConfigCommands};
use subfollow::logging::{self, LogTarget};
use subfollow::theme::current_theme;

mod commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    // The player owns the terminal, so its logs go to a file
    let target = match cli.command {
        Commands::Play { .. } => LogTarget::File(config.log_file()?),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(&config.logging.level, target) {
        let theme = current_theme();
        eprintln!("{}", theme.error_text(&format!("warning: {:#}", e)));
    }

    match cli.command {
        Commands::Play {
            file,
            interval,
            no_idle_inhibit,
        } => commands::play::handle(&file, interval, no_idle_inhibit, &config),
        Commands::Parse { file, json } => commands::parse::handle(&file, json),
        Commands::Speed { value, reset } => commands::speed::handle(value.as_deref(), reset, &config),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Path => commands::config::handle_path(cli.config.as_deref()),
            ConfigCommands::Init { force } => {
                commands::config::handle_init(cli.config.as_deref(), force)
            }
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
