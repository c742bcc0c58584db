//! Session controller.
//!
//! `SessionController` owns the roster for one run. Each selection cycle is
//! `call` (Idle → AwaitingOutcome) followed by one outcome (back to Idle).
//! Every transition goes to the event sink; the roster is persisted once, at
//! [`SessionController::close`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use socrate_core::{ExclusionSet, Roster, RosterEntry, selector};
use socrate_store::{RosterStore, StoreConfig};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::journal::{EventSink, LogEntry, LogEvent};
use crate::outcome::{CallPolicy, Outcome};

/// Where the current selection cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is called on.
    Idle,
    /// A member has been called on and their outcome is pending.
    AwaitingOutcome {
        /// Index of the called-on member.
        index: u32,
    },
}

/// The result of a `call` action.
#[derive(Debug, Clone, PartialEq)]
pub struct Callout {
    /// The called-on member.
    pub entry: RosterEntry,
    /// False when a callout was already pending and `call` did nothing.
    pub fresh: bool,
    /// Everyone had been called on, so the exclusion set was cleared first.
    pub cycle_reset: bool,
}

/// Drives draws, outcomes, logging, and persistence for one run.
pub struct SessionController<L> {
    store: RosterStore,
    roster: Roster,
    exclusion: ExclusionSet,
    use_exclusion: bool,
    policy: CallPolicy,
    state: SessionState,
    callouts: usize,
    rng: StdRng,
    log: L,
}

impl<L: EventSink> SessionController<L> {
    /// Load the roster named by `config` and start a session.
    ///
    /// Fails before any draw if the roster file is missing or malformed.
    pub fn open(config: SessionConfig, log: L) -> SessionResult<Self> {
        let store = RosterStore::new(config.store.clone());
        let roster = store.load()?;
        Self::start(roster, config, log)
    }

    /// Start a session over an already-loaded roster.
    pub fn start(roster: Roster, config: SessionConfig, log: L) -> SessionResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut session = Self {
            store: RosterStore::new(config.store),
            roster,
            exclusion: ExclusionSet::new(),
            use_exclusion: config.exclusion,
            policy: config.call_policy,
            state: SessionState::Idle,
            callouts: 0,
            rng,
            log,
        };
        info!(
            path = %session.store.path().display(),
            entries = session.roster.len(),
            exclusion = session.use_exclusion,
            "session started"
        );
        session.emit(LogEvent::Started, None)?;
        Ok(session)
    }

    /// The roster in its current state.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Where the roster will be persisted.
    pub fn store_config(&self) -> &StoreConfig {
        self.store.config()
    }

    /// Members already called on in this cycle.
    pub fn exclusion(&self) -> &ExclusionSet {
        &self.exclusion
    }

    /// Current cycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The member awaiting an outcome, if any.
    pub fn pending(&self) -> Option<&RosterEntry> {
        match self.state {
            SessionState::Idle => None,
            SessionState::AwaitingOutcome { index } => self.roster.get(index),
        }
    }

    /// Number of fresh callouts made this run.
    pub fn callouts(&self) -> usize {
        self.callouts
    }

    /// The event sink.
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Call on the next member.
    ///
    /// While an outcome is pending this does nothing and returns the member
    /// already called on.
    pub fn call(&mut self) -> SessionResult<Callout> {
        if let Some(entry) = self.pending() {
            return Ok(Callout {
                entry: entry.clone(),
                fresh: false,
                cycle_reset: false,
            });
        }

        let draw = selector::draw(&self.roster, &mut self.exclusion, &mut self.rng)?;
        let entry = self
            .roster
            .get(draw.index)
            .cloned()
            .ok_or(socrate_core::RosterError::UnknownIndex(draw.index))?;

        self.state = SessionState::AwaitingOutcome { index: draw.index };
        self.callouts += 1;
        self.emit(LogEvent::Called, Some(entry.to_string()))?;

        Ok(Callout {
            entry,
            fresh: true,
            cycle_reset: draw.cycle_reset,
        })
    }

    /// Record the pending member's outcome and return to idle.
    pub fn resolve(&mut self, outcome: Outcome) -> SessionResult<RosterEntry> {
        let SessionState::AwaitingOutcome { index } = self.state else {
            return Err(SessionError::NoPendingCallout);
        };

        let entry = self.roster.get_mut(index)?;
        self.policy.apply(outcome, entry);
        let updated = entry.clone();

        if self.use_exclusion {
            self.exclusion.insert(index);
        }
        self.state = SessionState::Idle;
        debug!(index, %outcome, weight = updated.weight(), "outcome recorded");
        self.emit(LogEvent::Resolved(outcome), Some(updated.to_string()))?;
        Ok(updated)
    }

    /// The pending member answered.
    pub fn acknowledge_ok(&mut self) -> SessionResult<RosterEntry> {
        self.resolve(Outcome::Ok)
    }

    /// The pending member is absent.
    pub fn mark_absent(&mut self) -> SessionResult<RosterEntry> {
        self.resolve(Outcome::Absent)
    }

    /// The pending member could not answer.
    pub fn mark_failed(&mut self) -> SessionResult<RosterEntry> {
        self.resolve(Outcome::Failed)
    }

    /// Call on a member and immediately count the call.
    pub fn call_and_count(&mut self) -> SessionResult<RosterEntry> {
        self.call()?;
        self.acknowledge_ok()
    }

    /// Finish the run: atomically persist the roster, then log the finish.
    ///
    /// A callout still awaiting its outcome is dropped without changes.
    pub fn close(mut self) -> SessionResult<Roster> {
        if let Some(entry) = self.pending() {
            debug!(index = entry.index, "discarding unresolved callout");
        }
        self.store.persist(&self.roster)?;
        self.emit(LogEvent::Finished, None)?;
        info!(callouts = self.callouts, "session finished");
        Ok(self.roster)
    }

    /// End the run without persisting anything.
    pub fn abort(self) -> Roster {
        info!(callouts = self.callouts, "session aborted; roster not saved");
        self.roster
    }

    fn emit(&mut self, event: LogEvent, subject: Option<String>) -> SessionResult<()> {
        self.log.record(&LogEntry::now(event, subject))?;
        Ok(())
    }
}
