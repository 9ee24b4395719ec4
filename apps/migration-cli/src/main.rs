use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use tracing::{error, info};
use tycoon_backend::config::db::DbProfile;
use tycoon_backend::infra::db::connect_db;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

/// In-memory SQLite is left out: each run would migrate a database that
/// disappears when the command exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Tycoon database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database type; connection details come from DATABASE_URL / SQLITE_FILE
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

fn profile_for(db: Db) -> Result<DbProfile, String> {
    match db {
        Db::Postgres => Ok(DbProfile::Postgres),
        Db::SqliteFile => std::env::var("SQLITE_FILE")
            .map(|file| DbProfile::SqliteFile { file })
            .map_err(|_| "SQLITE_FILE must be set for --db sqlite-file".to_string()),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,migration_cli=info,sqlx=warn")
        .init();

    let args = Args::parse();
    let profile = match profile_for(args.db) {
        Ok(profile) => profile,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    let conn = match connect_db(&profile).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "Could not connect to the database");
            std::process::exit(1);
        }
    };

    let command = MigrationCommand::from(args.command);
    if let Err(e) = migrate(&conn, command).await {
        error!(error = %e, ?command, "Migration failed");
        std::process::exit(1);
    }
    info!(?command, "Migration command completed");
}
