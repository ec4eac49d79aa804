use std::{
    io,
    path::{Path, PathBuf},
};

mod render;
mod session;
mod terminal;

use anyhow::Context;
use catalog::Config;
use clap::ArgAction;
use render::OutputFormat;
use session::Session;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How book and member listings are printed
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    format: OutputFormat,

    /// Write the effective configuration to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = self.load_config()?;
        if let Some(path) = &self.write_config {
            Self::write_config(&config, path)?;
            println!("Configuration written to {}", path.display());
            return Ok(());
        }

        let stdin = io::stdin();
        let stdout = io::stdout();
        Session::new(stdin.lock(), stdout.lock(), config, self.format).run()
    }

    #[instrument(level = "debug", skip(self))]
    fn load_config(&self) -> anyhow::Result<Config> {
        let Some(path) = &self.config else {
            return Ok(Config::default());
        };
        Config::load(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("could not load configuration from {}", path.display()))
    }

    /// Writes `config` as TOML, so a starting file can be edited by hand.
    #[instrument(level = "debug", skip(config))]
    fn write_config(config: &Config, path: &Path) -> anyhow::Result<()> {
        config
            .save(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("could not write configuration to {}", path.display()))
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stderr, so log lines never land in the middle of a prompt
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
