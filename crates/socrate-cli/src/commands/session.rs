use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use socrate_session::{
    CallPolicy, Console, ConsoleAction, LogFile, SessionConfig, SessionController,
};

pub fn run(
    roster: &Path,
    log: &Path,
    seed: Option<u64>,
    policy: CallPolicy,
    exclusion: bool,
) -> Result<(), String> {
    let config = SessionConfig::interactive()
        .with_roster_path(roster)
        .with_seed(seed)
        .with_exclusion(exclusion)
        .with_call_policy(policy);

    let log_file =
        LogFile::append(log).map_err(|e| format!("cannot open {}: {e}", log.display()))?;
    let session = SessionController::open(config, log_file)
        .map_err(|e| format!("failed to start session: {e}"))?;

    println!(
        "  {} session with {} members",
        "Starting".bold(),
        session.roster().len()
    );
    println!("  Type 'help' for commands, 'quit' to save and exit.\n");

    let mut console = Console::new(session);
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    let action = loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break ConsoleAction::Quit, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        match console.process(&line) {
            Ok(ConsoleAction::Continue(output)) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
            }
            Ok(action) => break action,
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    };

    let session = console.into_session();
    if action == ConsoleAction::Abort {
        session.abort();
        println!("  Aborted; roster not saved.");
        return Ok(());
    }

    let callouts = session.callouts();
    session
        .close()
        .map_err(|e| format!("failed to save roster: {e}"))?;
    println!(
        "  {} roster to {} ({callouts} callouts)",
        "Saved".bold(),
        roster.display()
    );

    Ok(())
}
