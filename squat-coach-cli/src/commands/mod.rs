mod config_cmd;
mod replay;
mod stream;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use replay::ReplayCommand;
pub use stream::StreamCommand;

use crate::config::Config;
use crate::ui;

#[derive(Parser)]
#[command(name = "squat-coach")]
#[command(about = "Squat rep counter and knee form checker for pose landmark streams", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "SQUAT_COACH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a recorded landmark stream frame by frame
    Replay(ReplayCommand),

    /// Analyze a live landmark stream from stdin, keeping only the latest frame
    Stream(StreamCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the configuration file location
    Path,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let config_path = self.config.as_deref();

        match self.command {
            Commands::Replay(cmd) => {
                let config = Config::load(config_path)?;
                ui::init_colors(&config.display);
                cmd.execute(&config).await
            }
            Commands::Stream(cmd) => {
                let config = Config::load(config_path)?;
                ui::init_colors(&config.display);
                cmd.execute(&config).await
            }
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config(config_path).await,
                ConfigSubcommands::Init { force } => config_cmd::init_config(config_path, force).await,
                ConfigSubcommands::Path => config_cmd::show_path(config_path).await,
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
