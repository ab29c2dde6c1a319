mod app;
mod config;
mod credentials;
mod open_url;
mod render;
mod ui;
mod util;

use anyhow::{Context, Result};
use console::Term;
use snooze::HttpApi;
use std::env;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_ENV: &str = "SNOOZE_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // Parse a minimal CLI: optional --config <path> and --base-url <url>
    let mut args = env::args().skip(1);
    let mut config_override: Option<String> = None;
    let mut base_url_override: Option<String> = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(p) = args.next() { config_override = Some(p); }
            }
            "--base-url" => {
                if let Some(u) = args.next() { base_url_override = Some(u); }
            }
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            other => warn!(argument = other, "ignoring unknown argument"),
        }
    }

    let cfg = config::load(config_override, base_url_override)?;
    let api = HttpApi::new(&cfg.api).context("failed to set up the API client")?;
    let credentials = credentials::CredentialStore::in_dir(cfg.state_dir.clone());

    let _ = Term::stdout().clear_screen();
    println!("Loading stories...");
    let mut session = app::Session::start(api, cfg, credentials).await;
    session.run().await
}

// Logs go to stderr so they never interleave with the menus on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }
}

fn print_help() {
    println!("snooze");
    println!("Usage: snooze [--config <path>] [--base-url <url>]");
    println!("  --config <path>    Path to a config.toml");
    println!("  --base-url <url>   Stories API root (default {})", snooze::api::DEFAULT_BASE_URL);
    println!("Set {LOG_ENV}=debug to log API calls to stderr.");
}
