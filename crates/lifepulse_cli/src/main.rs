//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lifepulse_core` linkage.
//! - Print a seeded-store statistics probe for quick local sanity checks.

use chrono::Utc;
use lifepulse_core::db::open_db_in_memory;
use lifepulse_core::{DataStore, SqliteSlotRepository};

fn main() {
    println!("lifepulse_core version={}", lifepulse_core::core_version());

    let now = Utc::now();
    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open in-memory store: {err}");
            std::process::exit(1);
        }
    };
    let repo = match SqliteSlotRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("failed to bootstrap slot repository: {err}");
            std::process::exit(1);
        }
    };

    let store = DataStore::new(repo);
    let goals = store.load_goals(now).value;
    let reminders = store.load_reminders(now).value;

    println!("seeded goals={}", goals.len());
    println!("seeded reminders={}", reminders.len());
    println!(
        "seed completion_rate={:.3}",
        lifepulse_core::service::stats::completion_rate(&goals)
    );
}
