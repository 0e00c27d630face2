// slider-send: push a command file to the slider and print the replies
use anyhow::{Context, Result};
use clap::Parser;
use slider_client::{
    announce_host, command_lines, connect_device, InputSource, SenderConfig, StampedWriter,
};
use std::io;
use std::process;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "slider-send")]
#[command(about = "Send commands to the slider line by line", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Talk to 127.0.0.1 instead of slider.local
    #[arg(short, long)]
    local: bool,

    /// Command file, `-` for standard input
    #[arg(short, long, value_name = "FILE")]
    input: Option<String>,

    /// Hostname or address of the slider
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// TCP command port
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,

    /// Pause after closing the connection
    #[arg(long, value_name = "MS")]
    linger_ms: Option<u64>,

    /// Switch on debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command-line flags win over the environment, and `--local` wins over `--host`.
    fn apply(self, mut config: SenderConfig) -> SenderConfig {
        if let Some(host) = self.host {
            config.endpoint.host = host;
        }
        if let Some(port) = self.port {
            config.endpoint.port = port;
        }
        if self.local {
            config.use_local();
        }
        if let Some(input) = self.input {
            config.input = InputSource::from_arg(&input);
        }
        if let Some(ms) = self.linger_ms {
            config.linger = Duration::from_millis(ms);
        }
        config
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(config: SenderConfig) -> Result<()> {
    // Open the input first so a bad path fails before any traffic
    let input = config
        .input
        .open()
        .with_context(|| format!("cannot open input {}", config.input.describe()))?;

    // The host line goes out before the timestamps start
    announce_host(&config.endpoint, io::stdout()).context("cannot write to stdout")?;

    let out = StampedWriter::new(io::stdout());
    let mut sender = connect_device(&config, out)?;

    let summary = sender.run(command_lines(input))?;
    info!(
        commands = summary.commands_sent,
        replies = summary.replies,
        "session complete"
    );

    sender.finish(config.linger)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.apply(SenderConfig::from_env())) {
        error!("{:#}", e);
        process::exit(1);
    }
}
