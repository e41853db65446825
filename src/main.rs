//! FitTrack
//!
//! An MCP server for the daily nutrition ledger.

use std::path::PathBuf;
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use fittrack::build_info;
use fittrack::db::{self, Database};
use fittrack::ledger::{DailyLedger, LedgerStore, SystemClock};
use fittrack::mcp::FittrackService;

/// Get the database path from environment or use default
fn get_database_path() -> PathBuf {
    std::env::var("FITTRACK_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
                    path = grandparent.to_path_buf();
                }
            }

            path.push("data");
            path.push("fittrack.db");
            path
        })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr; stdout carries MCP traffic
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("fittrack=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let db_path = get_database_path();
    eprintln!("Database path: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = Database::new(&db_path)?;

    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    // Rollover runs once here, before any tool call
    let ledger = DailyLedger::open(LedgerStore::new(database, SystemClock));
    if let Some(archived) = ledger.archived_on_open() {
        eprintln!(
            "Archived {} ({}g protein, goal met: {})",
            archived.date, archived.total_protein, archived.met_protein_goal
        );
    }
    eprintln!("Today: {}", ledger.record().date);

    let service = FittrackService::new(db_path, ledger);
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
