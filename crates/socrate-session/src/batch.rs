//! Batch driver: generate a run of callouts up front.

use crate::error::SessionResult;
use crate::journal::EventSink;
use crate::session::SessionController;

/// Default batch output file name.
pub const DEFAULT_CALLOUT_PATH: &str = "callout.txt";

/// One line of batch output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchCallout {
    /// 1-based position in the batch.
    pub sequence: usize,
    /// Roster index of the member.
    pub index: u32,
    /// `First Last`.
    pub name: String,
}

/// `NN: II First Last`
impl std::fmt::Display for BatchCallout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}: {:02} {}", self.sequence, self.index, self.name)
    }
}

/// Draw `count` callouts, counting each as a call as soon as it is drawn.
///
/// Whether a member can come up twice depends on the session's exclusion
/// setting; batch sessions normally allow repeats.
pub fn run<L: EventSink>(
    session: &mut SessionController<L>,
    count: usize,
) -> SessionResult<Vec<BatchCallout>> {
    (1..=count)
        .map(|sequence| {
            let entry = session.call_and_count()?;
            Ok(BatchCallout {
                sequence,
                index: entry.index,
                name: entry.full_name(),
            })
        })
        .collect()
}

/// Render callouts one per line.
pub fn render(callouts: &[BatchCallout]) -> String {
    let mut out = String::new();
    for callout in callouts {
        out.push_str(&callout.to_string());
        out.push('\n');
    }
    out
}
