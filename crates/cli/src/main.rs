use clap::Parser;
use queried_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod server;

const PROJECT_URL: &str = "https://github.com/freman/queried";

#[derive(Parser)]
#[command(name = "queried")]
#[command(about = "Queried - DNS forwarder with per-zone overrides and upstreams")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Debug log level
    #[arg(long)]
    debug: bool,

    /// Show version and exit
    #[arg(short = 'V', long)]
    version: bool,
}

fn version_banner() -> String {
    format!(
        "queried - {} ({})\n{}",
        env!("CARGO_PKG_VERSION"),
        option_env!("QUERIED_COMMIT").unwrap_or("unknown"),
        PROJECT_URL
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version_banner());
        return Ok(());
    }

    let cli_overrides = CliOverrides { debug: cli.debug };
    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::log_config(&config, cli.debug);

    info!("Starting queried v{}", env!("CARGO_PKG_VERSION"));

    let handler = bootstrap::build_handler(&config)?;
    let supervisor = server::start_listeners(&config, handler)?;

    tokio::select! {
        result = supervisor.run() => {
            if let Err(e) = &result {
                error!(error = %e, "DNS server stopped");
            }
            result
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            Ok(())
        }
    }
}
