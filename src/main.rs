mod cache;
mod commands;
mod config;
mod jira;
mod output;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sprintctl")]
#[command(about = "Fetch, cache and filter Jira sprint tickets")]
#[command(version)]
struct Cli {
  /// Show detailed progress information
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Fetch tickets from the current sprint, optionally filtered by status
  Fetch(commands::fetch::FetchArgs),
  /// Sprint overview with key status categories
  Pulse,
  /// Resolve and store the board id in a config file
  Init(commands::init::InitArgs),
}

fn init_tracing(verbose: bool) {
  let default_filter = if verbose {
    "sprintctl=debug"
  } else {
    "sprintctl=warn"
  };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let config = config::Config::load()?;

  match cli.command {
    Command::Fetch(args) => commands::fetch::run(args, &config).await,
    Command::Pulse => commands::pulse::run(&config).await,
    Command::Init(args) => commands::init::run(args, &config).await,
  }
}
