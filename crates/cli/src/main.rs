//! Postboard CLI - seeding and ad-hoc access to the mock API.
//!
//! # Usage
//!
//! ```bash
//! # Seed the data file with the starting posts plus 10 generated ones
//! pb-cli seed --extra 10
//!
//! # Log in with a demo account
//! pb-cli login -e professor@exemplo.com -p demo123
//!
//! # Send a request through the router
//! pb-cli request GET '/api/posts?search=react'
//! ```
//!
//! # Commands
//!
//! - `seed` - Write seed posts to the configured data file
//! - `login` - Log in and print the token and user
//! - `request` - Dispatch one request and print the `{ok, status, body}` envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pb-cli")]
#[command(author, version, about = "Postboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the seed collection to the data file
    Seed {
        /// Also generate this many sample posts
        #[arg(long, default_value_t = 0)]
        extra: usize,

        /// Discard everything stored before seeding
        #[arg(long)]
        reset: bool,

        /// Data file (overrides `POSTBOARD_DATA_FILE`)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Log in with email and password
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Dispatch one request through the mock router
    Request {
        /// HTTP method (GET, POST, PUT, DELETE)
        method: String,

        /// Path with optional query, e.g. `/api/posts?search=git`
        path: String,

        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,

        /// Bearer token
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postboard_api=info,pb_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { extra, reset, file } => {
            commands::seed::posts(file, extra, reset)?;
        }
        Commands::Login { email, password } => {
            commands::login::login(&email, &password).await?;
        }
        Commands::Request {
            method,
            path,
            body,
            token,
        } => {
            commands::request::send(&method, &path, body, token).await?;
        }
    }
    Ok(())
}
