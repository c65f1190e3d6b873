use clap::Parser;
use anyhow::Result;
use dotenvy::dotenv;

mod access;
mod activity;
mod config;
mod console;
mod insights;
mod metrics;
mod output;
mod recommend;
mod snapshot;
mod telemetry;
mod triage;
mod util;

#[derive(Parser)]
#[command(name = "lfconsole", about = "Lost-and-found staff operations console")]
struct Cli {
    /// Caller role; only staff and admin may use the console
    #[arg(global = true, long, env = "CONSOLE_ROLE")]
    role: Option<String>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(flatten)]
    sources: console::SourceArgs,

    #[command(subcommand)]
    command: console::Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and CONSOLE_LOG_FORMAT
    telemetry::config::init_tracing();
    let cfg = config::ConsoleConfig::from_env();

    console::run(cli.command, cli.role.as_deref(), cli.sources, cfg).await
}
