use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use holonet::config::{Cli, Command, Config};
use holonet::db;
use holonet::db::seed::Catalog;
use holonet::routes;
use holonet::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    let db_path = config
        .db_path()
        .ok_or_else(|| anyhow::anyhow!("database path was not resolved"))?
        .to_path_buf();
    tracing::info!("Database: {}", db_path.display());

    // Initialize database
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;

    match cli.command.clone().unwrap_or(Command::Serve) {
        Command::Seed { file } => {
            let catalog = match file {
                Some(path) => Catalog::from_file(&path)?,
                None => Catalog::builtin()?,
            };
            // Hashing the catalog's user passwords is CPU-bound
            let cost = config.auth.bcrypt_cost;
            tokio::task::spawn_blocking(move || -> anyhow::Result<_> {
                let conn = pool.get()?;
                db::seed::apply(&conn, &catalog, cost)
            })
            .await??;
            Ok(())
        }
        Command::Serve => {
            let addr: SocketAddr =
                format!("{}:{}", config.server.host, config.server.port).parse()?;
            let app = routes::app(AppState::new(pool, config));

            tracing::info!("Listening on http://{}", addr);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
            Ok(())
        }
    }
}
