use clap::Parser;
use dotenvy::dotenv;
use tokio::io::BufReader;
use tracing::{error, info};

use console::{repl, AdminConsole, HttpRestaurantClient};

#[derive(Debug, clap::Parser)]
#[command(about = "Restaurant admin console")]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Base URL of the restaurant API.
    #[arg(long, env = "CONSOLE_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Print an argon2 hash for ADMIN_PASSWORD_HASH.
    HashPassword { password: String },
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_stderr();
    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!(service = "console", event = "run_failed", error = %e, "console exited with error");
        eprintln!("{e}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Some(Commands::HashPassword { password }) => {
            println!("{}", service::auth::hash_password(&password)?);
        }
        None => {
            info!(service = "console", event = "start", base_url = %args.base_url, "admin console starting");
            let client = HttpRestaurantClient::new(args.base_url)?;
            let mut console = AdminConsole::new(client);
            repl::run(&mut console, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
            info!(service = "console", event = "stop", "admin console closed");
        }
    }
    Ok(())
}
