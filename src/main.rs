use clap::Parser;
use tracing::debug;

use career_compass::{app::App, cli, config::Config, log};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // API keys may live in a local .env file.
    let _ = dotenvy::dotenv();

    let args = cli::Args::parse();
    log::init_tracing(args.debug);

    let cfg = Config::load(&args)?;
    debug!(?cfg, "effective configuration");

    App::new(cfg).run(args.command).await
}
