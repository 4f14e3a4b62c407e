use clap::{Parser, Subcommand};

use crate::auth::{JwtKeys, Role};
use crate::config::{self, AppConfig, StorageBackend};

#[derive(Parser)]
#[command(name = "commons-api")]
#[command(about = "Commons API - HTTP service for commons and commons membership")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides COMMONS_API_PORT)")]
        port: Option<u16>,

        #[arg(long, value_parser = parse_storage, help = "Storage backend: memory or postgres")]
        storage: Option<StorageBackend>,
    },

    #[command(about = "Mint a signed JWT for local use")]
    Token {
        #[arg(long, help = "User id placed in the token subject")]
        user_id: i64,

        #[arg(long, help = "Grant the ADMIN role in addition to USER")]
        admin: bool,

        #[arg(long, help = "Email claim")]
        email: Option<String>,
    },
}

fn parse_storage(s: &str) -> Result<StorageBackend, String> {
    s.parse().map_err(|e: config::ConfigError| e.to_string())
}

/// Apply command-line overrides on top of the environment config
fn serve_config(base: &AppConfig, port: Option<u16>, storage: Option<StorageBackend>) -> AppConfig {
    let mut config = base.clone();
    if let Some(port) = port {
        config.api.port = port;
    }
    if let Some(storage) = storage {
        config.storage = storage;
    }
    config
}

fn roles_for(admin: bool) -> Vec<Role> {
    if admin {
        vec![Role::User, Role::Admin]
    } else {
        vec![Role::User]
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let base = config::config();

    match cli.command {
        Commands::Serve { port, storage } => {
            let config = serve_config(base, port, storage);
            crate::server::serve(&config).await
        }
        Commands::Token { user_id, admin, email } => {
            let keys = JwtKeys::new(&base.security.jwt_secret, base.security.jwt_expiry_hours)?;
            let token = keys.issue(user_id, email, roles_for(admin))?;
            println!("{}", token);
            Ok(())
        }
    }
}
