use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roombook::{api, config, db, models::CreateRoomInput};

#[derive(Parser)]
#[command(name = "roombook")]
#[command(about = "Room booking service with conflict-free reservations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the SQLite database
        #[arg(long)]
        db: Option<PathBuf>,

        /// Opening time of the daily booking window (HH:MM, UTC)
        #[arg(long, value_parser = parse_time)]
        opens_at: Option<NaiveTime>,

        /// Closing time of the daily booking window (HH:MM, UTC)
        #[arg(long, value_parser = parse_time)]
        closes_at: Option<NaiveTime>,
    },
    /// List bookable rooms
    Rooms {
        /// Path to the SQLite database
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Register a new bookable room
    AddRoom {
        /// Display name of the room
        name: String,

        /// Path to the SQLite database
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    config::parse_time_of_day("time", s).map_err(|e| e.to_string())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "roombook=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_database(path: Option<PathBuf>) -> anyhow::Result<db::Database> {
    let db = match path {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;
    Ok(db)
}

async fn serve(config: config::Config) -> anyhow::Result<()> {
    let db = open_database(config.database)?;
    let app = api::create_router(db, config.window);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", config.port)).await?;
    tracing::info!(
        "roombook listening on http://127.0.0.1:{} (bookings {})",
        config.port,
        config.window
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = config::Config::from_env().context("Invalid configuration")?;

    match cli.command {
        Some(Commands::Serve {
            port,
            db,
            opens_at,
            closes_at,
        }) => {
            if let Some(port) = port {
                config.port = port;
            }
            if db.is_some() {
                config.database = db;
            }
            let config = config
                .with_window(opens_at, closes_at)
                .context("Invalid booking window")?;
            serve(config).await?;
        }
        Some(Commands::Rooms { db }) => {
            let db = open_database(db.or(config.database))?;
            for room in db.get_all_rooms()? {
                println!("{}\t{}", room.id, room.name);
            }
        }
        Some(Commands::AddRoom { name, db }) => {
            let db = open_database(db.or(config.database))?;
            let room = db.create_room(CreateRoomInput { name })?;
            println!("Created room {}: {}", room.id, room.name);
        }
        None => serve(config).await?,
    }

    Ok(())
}
