//! Console driver: one session action per typed command.
//!
//! Wraps a [`SessionController`] and turns lines like `call`, `ok`, or
//! `absent` into state transitions, returning the text to show.

use crate::error::{SessionError, SessionResult};
use crate::journal::EventSink;
use crate::outcome::Outcome;
use crate::session::{SessionController, SessionState};

/// What the front-end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    /// Show this text and keep reading commands.
    Continue(String),
    /// Persist the roster and exit.
    Quit,
    /// Exit without persisting.
    Abort,
}

/// An interactive session.
pub struct Console<L> {
    session: SessionController<L>,
}

impl<L: EventSink> Console<L> {
    /// Drive `session` from typed commands.
    pub fn new(session: SessionController<L>) -> Self {
        Self { session }
    }

    /// The underlying session.
    pub fn session(&self) -> &SessionController<L> {
        &self.session
    }

    /// Give back the session, e.g. to close or abort it.
    pub fn into_session(self) -> SessionController<L> {
        self.session
    }

    /// Process one line of input.
    pub fn process(&mut self, input: &str) -> SessionResult<ConsoleAction> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(ConsoleAction::Continue(String::new()));
        }

        let cmd = trimmed.to_lowercase();
        if let Some(outcome) = Outcome::parse(&cmd) {
            return self.do_outcome(outcome).map(ConsoleAction::Continue);
        }

        match cmd.as_str() {
            "call" | "c" | "next" | "n" => self.do_call().map(ConsoleAction::Continue),
            "status" | "s" => Ok(ConsoleAction::Continue(self.do_status())),
            "roster" | "r" => Ok(ConsoleAction::Continue(self.do_roster())),
            "help" | "h" | "?" => Ok(ConsoleAction::Continue(help_text())),
            "quit" | "q" | "exit" => Ok(ConsoleAction::Quit),
            "abort" => Ok(ConsoleAction::Abort),
            _ => Err(SessionError::UnknownCommand(trimmed.to_string())),
        }
    }

    fn do_call(&mut self) -> SessionResult<String> {
        let callout = self.session.call()?;
        if !callout.fresh {
            return Ok(format!(
                "Still waiting on {}: ok, absent, or failed?",
                callout.entry.full_name()
            ));
        }
        let mut out = String::new();
        if callout.cycle_reset {
            out.push_str("Everyone has had a turn; starting over.\n");
        }
        out.push_str(&format!(
            "Calling on {} ({})",
            callout.entry.full_name(),
            callout.entry.index
        ));
        Ok(out)
    }

    fn do_outcome(&mut self, outcome: Outcome) -> SessionResult<String> {
        let entry = self.session.resolve(outcome)?;
        Ok(format!(
            "{}: {outcome} (called {}, failed {}, absent {})",
            entry.full_name(),
            entry.count_called,
            entry.count_failed,
            entry.count_absent
        ))
    }

    fn do_status(&self) -> String {
        let s = &self.session;
        let mut out = match s.state() {
            SessionState::Idle => "Waiting for 'call'.\n".to_string(),
            SessionState::AwaitingOutcome { .. } => match s.pending() {
                Some(entry) => format!("Called on: {entry}\n"),
                None => "Called on: unknown\n".to_string(),
            },
        };
        out.push_str(&format!("Callouts this session: {}\n", s.callouts()));
        out.push_str(&format!(
            "Already called this round: {}/{}",
            s.exclusion().len(),
            s.roster().len()
        ));
        out
    }

    fn do_roster(&self) -> String {
        let roster = self.session.roster();
        let total = roster.total_weight();
        let mut out = String::new();
        for e in roster {
            let marker = if self.session.exclusion().contains(e.index) {
                '*'
            } else {
                ' '
            };
            out.push_str(&format!(
                "{marker} {:>3}  {:<24} called {:>3}  failed {:>3}  absent {:>3}  p={:.3}\n",
                e.index,
                e.full_name(),
                e.count_called,
                e.count_failed,
                e.count_absent,
                e.weight() / total
            ));
        }
        out.trim_end().to_string()
    }
}

fn help_text() -> String {
    "\
Session Commands:
  call (c)        Call on the next member
  ok (o)          They answered
  failed (f)      They could not answer
  absent (a)      They are not here
  status (s)      Show who is called on
  roster (r)      Show everyone's history and odds (* = called this round)
  help            Show this help
  quit (q)        Save the roster and exit
  abort           Exit without saving"
        .to_string()
}
