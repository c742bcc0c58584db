use std::fs;
use std::path::Path;

use colored::Colorize;

use socrate_session::{NullSink, SessionConfig, SessionController, batch};

pub fn run(
    roster: &Path,
    output: &Path,
    count: usize,
    seed: Option<u64>,
    print: bool,
) -> Result<(), String> {
    let config = SessionConfig::batch()
        .with_roster_path(roster)
        .with_seed(seed);
    let mut session = SessionController::open(config, NullSink).map_err(|e| e.to_string())?;

    let callouts = batch::run(&mut session, count).map_err(|e| e.to_string())?;
    let text = batch::render(&callouts);

    // Callouts land on disk before the roster counts them.
    fs::write(output, &text).map_err(|e| format!("cannot write {}: {e}", output.display()))?;
    session
        .close()
        .map_err(|e| format!("failed to save roster: {e}"))?;

    if print {
        print!("{text}");
    }
    println!(
        "  {} {count} callouts to {}",
        "Wrote".bold(),
        output.display()
    );

    Ok(())
}
