//! Command-line companion for the MeetMate core.
//!
//! # Responsibility
//! - Run the offline action-item extraction path over local notes.
//! - Inspect persisted meeting sessions in a local database.
//! - Keep a minimal probe to verify `meetmate_core` linkage.

use clap::{Parser, Subcommand};
use meetmate_core::db::open_db;
use meetmate_core::{
    extract_action_items, SessionListQuery, SessionRepository, SqliteSessionRepository,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "meetmate")]
#[command(about = "Meeting companion: extract action items and inspect saved sessions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract action items from notes using the deterministic offline path
    Analyze {
        /// Notes file to read; stdin is used when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List persisted meeting sessions
    Sessions {
        /// Session database path
        #[arg(long, default_value = "meetmate.sqlite3")]
        db: PathBuf,

        /// Maximum number of sessions to print
        #[arg(long)]
        limit: Option<u32>,

        /// Include soft-deleted sessions
        #[arg(long)]
        include_deleted: bool,
    },

    /// Print one session as JSON
    Show {
        /// Stable session ID
        session_id: String,

        /// Session database path
        #[arg(long, default_value = "meetmate.sqlite3")]
        db: PathBuf,
    },

    /// Core wiring smoke probe
    Ping,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Analyze { file } => analyze(file),
        Commands::Sessions {
            db,
            limit,
            include_deleted,
        } => list_sessions(&db, limit, include_deleted),
        Commands::Show { session_id, db } => show_session(&session_id, &db),
        Commands::Ping => {
            println!("meetmate_core ping={}", meetmate_core::ping());
            println!("meetmate_core version={}", meetmate_core::core_version());
            Ok(())
        }
    }
}

fn analyze(file: Option<PathBuf>) -> Result<(), String> {
    let notes = match file {
        Some(path) => std::fs::read_to_string(&path)
            .map_err(|err| format!("cannot read `{}`: {err}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("cannot read stdin: {err}"))?;
            buffer
        }
    };

    let items = extract_action_items(&notes);
    let json =
        serde_json::to_string_pretty(&items).map_err(|err| format!("cannot serialize: {err}"))?;
    println!("{json}");
    Ok(())
}

fn list_sessions(db: &Path, limit: Option<u32>, include_deleted: bool) -> Result<(), String> {
    let conn = open_db(db).map_err(|err| err.to_string())?;
    let repo = SqliteSessionRepository::new(&conn);

    let query = SessionListQuery {
        include_deleted,
        limit,
        offset: 0,
    };
    let sessions = repo.list_sessions(&query).map_err(|err| err.to_string())?;

    if sessions.is_empty() {
        println!("no sessions");
        return Ok(());
    }

    for session in sessions {
        println!(
            "{}  notes_chars={} items={} screenshots={} summary={} email={}{}",
            session.uuid,
            session.notes.chars().count(),
            session.action_items.len(),
            session.screenshots.len(),
            session.summary.is_some(),
            session.email.is_some(),
            if session.is_deleted { "  [deleted]" } else { "" },
        );
    }
    Ok(())
}

fn show_session(session_id: &str, db: &Path) -> Result<(), String> {
    let id = Uuid::parse_str(session_id.trim())
        .map_err(|_| format!("invalid session id `{session_id}`"))?;

    let conn = open_db(db).map_err(|err| err.to_string())?;
    let repo = SqliteSessionRepository::new(&conn);

    let session = repo
        .get_session(id, true)
        .map_err(|err| err.to_string())?
        .ok_or_else(|| format!("session not found: {id}"))?;

    let json = serde_json::to_string_pretty(&session)
        .map_err(|err| format!("cannot serialize: {err}"))?;
    println!("{json}");
    Ok(())
}
