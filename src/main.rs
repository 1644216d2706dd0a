//! gqlpad - A lightweight GraphQL query console.

use gqlpad::cli::{Cli, Command};
use gqlpad::config::Config;
use gqlpad::console;
use gqlpad::error::Result;
use gqlpad::logging;
use gqlpad::transport::HttpFetcher;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    // A missing .env is normal
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    debug!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;

    // CLI flags (and GQLPAD_ENDPOINT) win over the config file
    cli.apply_to(&mut config.endpoint);
    info!("Endpoint: {}", config.endpoint.display_string());

    let fetcher = HttpFetcher::new(&config.endpoint)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Run(args) => {
            let requests = console::load_requests(&args)?;
            console::run_queries(&fetcher, &requests, !args.compact, &mut out).await
        }
        Command::Introspect(args) => console::introspect(&fetcher, args.raw, &mut out).await,
    }
}
