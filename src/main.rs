use crate::config::Config;
use crate::db::connection::{init_db, Database};
use crate::domain::validation::FormOutcome;
use crate::router::{handle, App, Clock};
use anyhow::{bail, Context};
use astra::{Request, Server};
use std::net::SocketAddr;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn init_tracing(log_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    let (config, config_path) = Config::load()?;
    config.validate()?;
    init_tracing(&config.general.log_level);
    match &config_path {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let db = Database::new(config.database.path.clone());
    init_db(&db, &config.database.schema_path).context("Database initialization failed")?;

    let app = App::new(db, config);

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None | Some("serve") => serve(app),
        Some("create-admin") => {
            if args.len() < 4 {
                println!("Usage: farmer_registry create-admin <username> <password>");
                return Ok(());
            }
            cmd_create_admin(&app, &args[2], &args[3])
        }
        Some("help") | Some("-h") | Some("--help") => {
            print_help();
            Ok(())
        }
        Some(other) => {
            print_help();
            bail!("Unknown command: {other}")
        }
    }
}

fn serve(app: App) -> anyhow::Result<()> {
    let addr: SocketAddr = app
        .config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", app.config.server.bind))?;
    info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(app.config.server.max_workers);

    let result = server.serve(move |req: Request, _info| {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let resp = match handle(req, &app) {
            Ok(resp) => resp,
            Err(err) => responses::error_to_response(err),
        };
        debug!(%method, %path, status = resp.status().as_u16(), "response");
        resp
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
        return Err(e).context("Server failed");
    }

    info!("Server shut down cleanly.");
    Ok(())
}

fn cmd_create_admin(app: &App, username: &str, password: &str) -> anyhow::Result<()> {
    let now = Clock::system().now;
    let outcome = app
        .db
        .with_conn(|conn| app.accounts.create_admin(conn, username, password, now))?;

    match outcome {
        FormOutcome::Saved(account) => {
            println!("Created admin '{}'", account.username);
            Ok(())
        }
        FormOutcome::Rejected(result) => {
            for msg in &result.errors {
                println!("  - {msg}");
            }
            bail!("Admin account was not created")
        }
    }
}

fn print_help() {
    println!("farmer_registry - harvest tracking for farmer cooperatives");
    println!();
    println!("Usage:");
    println!("  farmer_registry [serve]                          Run the web server");
    println!("  farmer_registry create-admin <user> <password>   Create an admin account");
    println!("  farmer_registry help                             Show this message");
}
