//! Minimal tour: insert a few sessions and run the calendar-range queries.
//!
//! Run with: `cargo run --example getting_started`

use fitlog::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let mut log = Fitlog::memory()?;

    log.insert(Workout::new("2026-02-10").with_title("intervals"))?;
    log.insert(Workout::new("2026-01-15").with_title("long run"))?;
    log.insert(Workout::new("2025-08-15").with_title("open water swim"))?;

    println!("Stored {} sessions", log.len());

    for token in ["1m", "3m", "6m", "1y", "everything"] {
        let range = RangeToken::from_token(token);
        let dates = log.dates_in_range(range)?;
        println!("{:>10} -> {} session(s): {:?}", token, dates.len(), dates);
    }

    Ok(())
}
