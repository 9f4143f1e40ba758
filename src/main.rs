//! Entry point: parse CLI, set up logging and dispatch to command handlers.

use anyhow::Context;
use apod_etl::{
    cli::{ApodCli, Commands},
    commands::{
        common::ConnIds, init_db::handle_init_db, latest::handle_latest, run::handle_run,
        schedule::handle_schedule,
    },
    ConnectionRegistry,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = ApodCli::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let registry = ConnectionRegistry::from_env();
    let conn_ids = ConnIds::resolve(app.http_conn_id, app.db_conn_id)
        .context("resolving connection ids")?;

    match app.command {
        Commands::InitDb => {
            handle_init_db(&registry, &conn_ids).context("creating the apod_data table")?
        }
        Commands::Run {
            options,
            date,
            json,
        } => {
            handle_run(&registry, &conn_ids, &options, date, json)
                .await
                .context("APOD run failed")?;
        }
        Commands::Schedule { options } => handle_schedule(&registry, &conn_ids, &options)
            .await
            .context("APOD scheduler stopped")?,
        Commands::Latest { limit, json } => {
            handle_latest(&registry, &conn_ids, limit, json)
                .context("reading stored APOD records")?;
        }
    }

    Ok(())
}
