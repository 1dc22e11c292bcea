//! CLI smoke entry point.
//!
//! # Responsibility
//! - Start rolling file logs next to the database (or under the temp dir).
//! - Open a SQLite-backed store (in-memory when no path is given).
//! - Seed it on first run and print deterministic summary lines.
//!
//! Usage: `hotelstay_cli [DB_PATH] [BOOKING_ID STATUS]`

use hotelstay_core::{
    coerce_id, default_log_level, init_logging, BookingStatus, RecordStore, SqliteStore,
    StorageError,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const LOG_DIR_NAME: &str = "hotelstay-logs";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("hotelstay_cli error={message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let logs = log_dir(args.first().map(String::as_str));
    // Failed log setup does not stop the run.
    if let Err(err) = init_logging(default_log_level(), &logs.to_string_lossy()) {
        eprintln!("hotelstay_cli logging=disabled error={err}");
    }

    let storage = match args.first() {
        Some(path) => SqliteStore::open(path),
        None => SqliteStore::open_in_memory(),
    }
    .map_err(|err: StorageError| err.to_string())?;

    let store = RecordStore::new(storage);
    let report = store.initialize().map_err(|err| err.to_string())?;
    println!("hotelstay_core version={}", hotelstay_core::core_version());
    println!(
        "seed rooms_seeded={} bookings_seeded={}",
        report.rooms_seeded, report.bookings_seeded
    );

    if let [_, booking_id, status, ..] = args {
        let booking_id =
            coerce_id(booking_id).ok_or_else(|| format!("invalid booking id `{booking_id}`"))?;
        let status = parse_status(status)?;
        let outcome = store
            .set_booking_status(booking_id, status)
            .map_err(|err| err.to_string())?;
        println!(
            "booking id={booking_id} status={} updated={}",
            status.as_str(),
            outcome.is_updated()
        );
    }

    let stats = store.compute_stats().map_err(|err| err.to_string())?;
    println!(
        "stats total_rooms={} available_rooms={} total_bookings={} active_bookings={}",
        stats.total_rooms, stats.available_rooms, stats.total_bookings, stats.active_bookings
    );
    Ok(())
}

/// Absolute log directory: beside the database file, or under the temp dir
/// for in-memory runs.
fn log_dir(db_path: Option<&str>) -> PathBuf {
    let base = match db_path.map(Path::new).and_then(Path::parent) {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => std::env::temp_dir(),
    };
    let base = if base.is_absolute() {
        base
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&base))
            .unwrap_or(base)
    };
    base.join(LOG_DIR_NAME)
}

fn parse_status(raw: &str) -> Result<BookingStatus, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pending" => Ok(BookingStatus::Pending),
        "confirmed" => Ok(BookingStatus::Confirmed),
        "cancelled" => Ok(BookingStatus::Cancelled),
        "completed" => Ok(BookingStatus::Completed),
        other => Err(format!(
            "unsupported status `{other}`; expected pending|confirmed|cancelled|completed"
        )),
    }
}
