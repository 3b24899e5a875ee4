use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Apply directory-bundled themes to a Hyprland desktop.
#[derive(Debug, Parser)]
#[command(name = "hyprtheme", version, about)]
pub struct Cli {
    /// Configuration file to use instead of ~/.config/hyprtheme/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output; repeat for trace level
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List installed themes
    List {
        /// Only show themes whose id or name contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Print the resolved themes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Deploy a theme to every target
    Apply {
        /// Theme directory name below the themes root
        id: String,
    },

    /// Show or change turbo mode
    Turbo {
        #[arg(value_enum)]
        mode: Option<Toggle>,
    },

    /// Show the current theme, wallpaper and turbo state
    Status,

    /// Regenerate the palette stylesheet from an image
    Palette { image: PathBuf },

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}
