//! Command-line interface definition.
//!
//! Lives in the library so `xtask` can render the man page from the same
//! definition the binary parses.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Long version string: crate version plus git SHA (dev builds) and build date.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("SUBFOLLOW_BUILD_DATE"),
    ")"
);

#[derive(Debug, Parser)]
#[command(name = "subfollow")]
#[command(author, version, long_version = LONG_VERSION)]
#[command(about = "Follow subtitle cues against a speed-adjustable playback clock")]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a subtitle file in the terminal, highlighting the current cue
    Play {
        /// Subtitle file (.srt), or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Tick interval in milliseconds (overrides config)
        #[arg(long, value_name = "MS")]
        interval: Option<u64>,

        /// Don't keep the screen awake while playing
        #[arg(long)]
        no_idle_inhibit: bool,
    },

    /// Parse a subtitle file and list its cues
    Parse {
        /// Subtitle file (.srt), or - for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print cues as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the stored playback speed
    Speed {
        /// New speed factor (e.g. 1.25)
        #[arg(value_name = "VALUE", conflicts_with = "reset")]
        value: Option<String>,

        /// Forget the stored speed and use the configured default
        #[arg(long)]
        reset: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn play_parses_flags() {
        let cli = Cli::parse_from(["subfollow", "play", "song.srt", "--interval", "100"]);
        match cli.command {
            Commands::Play {
                file,
                interval,
                no_idle_inhibit,
            } => {
                assert_eq!(file, PathBuf::from("song.srt"));
                assert_eq!(interval, Some(100));
                assert!(!no_idle_inhibit);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn speed_value_conflicts_with_reset() {
        let result = Cli::try_parse_from(["subfollow", "speed", "2", "--reset"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["subfollow", "config", "path", "--config", "/tmp/c.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Path)));
    }
}
