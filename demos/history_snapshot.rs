//! Snapshot persistence: a workout history that survives restarts.
//!
//! Run with: `cargo run --example history_snapshot`

use fitlog::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::temp_dir().join("fitlog_history_demo.fitlog");
    let _ = std::fs::remove_file(&path);

    // First session: record some workouts and close cleanly.
    {
        let mut log = Fitlog::open(&path)?;
        log.insert(Workout::new("2026-02-10").with_title("tempo run"))?;
        log.insert(Workout::new("2026-02-12").with_title("mobility"))?;
        log.close()?;
        println!("Wrote 2 sessions to {}", path.display());
    }

    // Second session: the history is back, insertion order intact.
    {
        let log = Fitlog::open(&path)?;
        println!("Reopened with {} sessions:", log.len());
        for session in log.workouts()? {
            println!("  {} {}", session.date, session.title.unwrap_or_default());
        }
    }

    std::fs::remove_file(&path)?;
    Ok(())
}
