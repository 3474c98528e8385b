use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lostfound::cmd::{cmd_config_show, cmd_mark_found, cmd_mark_lost, cmd_serve};
use lostfound::config::Config;

#[derive(Parser)]
#[command(name = "lostfound")]
#[command(about = "Lost/found status updates for pet records")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file (defaults to ./lostfound.yaml when present)
    #[arg(short, long, global = true, env = "LOSTFOUND_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "LOSTFOUND_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service (default)
    Serve {
        /// Address to listen on
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Mark a pet as lost
    MarkLost {
        /// Pet handle
        handle: String,

        /// Where the pet was last seen
        #[arg(short, long)]
        location: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a pet as found
    MarkFound {
        /// Pet handle
        handle: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lostfound=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env never overrides variables that are already set
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(e) = &dotenv
        && !e.not_found()
    {
        tracing::warn!("Failed to load .env: {e}");
    }

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_serve(&config).await
        }
        Commands::MarkLost {
            handle,
            location,
            json,
        } => cmd_mark_lost(&config, &handle, location, json).await,
        Commands::MarkFound { handle, json } => cmd_mark_found(&config, &handle, json).await,
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(&config, json),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
