// recv-log: print the slider's UDP log broadcasts with arrival time and delta
use anyhow::Result;
use clap::Parser;
use slider_listener::{DeltaClock, ListenerConfig, LogListener};
use std::io;
use std::process;
use tracing::error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "recv-log")]
#[command(about = "Print UDP log datagrams with timestamps", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// UDP port to listen on
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Largest datagram read in one go
    #[arg(long, value_name = "BYTES")]
    buffer_size: Option<usize>,

    /// Switch on debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command-line flags win over the environment.
    fn apply(self, mut config: ListenerConfig) -> ListenerConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(size) = self.buffer_size {
            config.set_buffer_size(size);
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

fn run(config: ListenerConfig, clock: DeltaClock) -> Result<()> {
    let mut listener = LogListener::bind(&config, clock, io::stdout())?;
    match listener.run()? {}
}

fn main() {
    // Deltas are measured from process start
    let clock = DeltaClock::start();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.apply(ListenerConfig::from_env());
    if let Err(e) = run(config, clock) {
        error!("{:#}", e);
        process::exit(1);
    }
}
