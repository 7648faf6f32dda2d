use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use common::twitter::{StubSource, TwitterClient, TwitterSource};
use dotenv::dotenv;
use report_core::{generate_report, ReportConfig};
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about = "Activity report for a Twitter account", long_about = None)]
struct Args {
    /// Account to report on; the authenticated account when omitted
    #[clap(long, env = "TWEET_REPORT_SCREEN_NAME")]
    screen_name: Option<String>,

    /// TOML file with report settings
    #[clap(long, env = "TWEET_REPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Read fixtures from this directory instead of calling the API
    #[clap(long)]
    stub_dir: Option<PathBuf>,

    /// Also fetch followers and friends
    #[clap(long)]
    social_graph: bool,

    /// Write the JSON snapshot here instead of stdout
    #[clap(long, short)]
    output: Option<PathBuf>,
}

async fn build_source(config: &ReportConfig) -> Result<Box<dyn TwitterSource>> {
    if let Some(dir) = &config.stub_dir {
        info!("Using stub fixtures in {}", dir.display());
        let stub = StubSource::open(dir)
            .await
            .with_context(|| format!("Failed to load fixtures from {}", dir.display()))?;
        return Ok(Box::new(stub));
    }

    let token = config
        .bearer_token
        .as_deref()
        .context("TWITTER_BEARER_TOKEN is not set")?;
    Ok(Box::new(TwitterClient::with_base_url(token, &config.api_base_url)))
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::load(path).await?,
        None => ReportConfig::default(),
    }
    .with_env();

    if args.stub_dir.is_some() {
        config.stub_dir = args.stub_dir.clone();
    }
    if args.social_graph {
        config.include_social_graph = true;
    }
    config.validate()?;

    let source = build_source(&config).await?;
    let report = generate_report(source.as_ref(), args.screen_name.as_deref(), &config).await?;
    let json = report.to_json().context("Failed to serialize report")?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote report for @{} to {}", report.profile.screen_name, path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!("Report generation failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}
