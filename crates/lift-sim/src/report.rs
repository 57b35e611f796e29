//! Aggregate statistics over the call history.

use std::fmt;

use lift_core::{Call, Tick, TICKS_PER_SECOND};

/// Wait and process-time statistics of one session.
///
/// Times are in ticks.  The wait and process metrics are `None` when no call
/// completed.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionReport {
    /// Instant the session ended.
    pub end:              Tick,
    /// Calls created.
    pub generated:        usize,
    /// Calls delivered to their destination.
    pub completed:        usize,
    pub avg_wait:         Option<f64>,
    pub max_wait:         Option<u64>,
    pub avg_process:      Option<f64>,
    pub max_process:      Option<u64>,
}

impl SessionReport {
    /// Aggregate over the completed calls in `history`.
    pub fn from_history(history: &[Call], end: Tick) -> Self {
        let (waits, processes): (Vec<u64>, Vec<u64>) = history
            .iter()
            .filter_map(|c| Some((c.wait_time()?, c.process_time()?)))
            .unzip();

        Self {
            end,
            generated:   history.len(),
            completed:   waits.len(),
            avg_wait:    mean(&waits),
            max_wait:    waits.iter().copied().max(),
            avg_process: mean(&processes),
            max_process: processes.iter().copied().max(),
        }
    }

    /// `completed / generated`, or `None` before the first call.
    pub fn completion_rate(&self) -> Option<f64> {
        (self.generated > 0).then(|| self.completed as f64 / self.generated as f64)
    }
}

fn mean(values: &[u64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<u64>() as f64 / values.len() as f64)
}

/// Ticks rendered as seconds, or `n/a`.
struct Secs(Option<f64>);

impl fmt::Display for Secs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ticks) => write!(f, "{:.1} s", ticks / TICKS_PER_SECOND as f64),
            None        => f.write_str("n/a"),
        }
    }
}

impl fmt::Display for SessionReport {
    /// One metric per line, in simulated seconds.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average wait time: {}", Secs(self.avg_wait))?;
        writeln!(f, "Maximum wait time: {}", Secs(self.max_wait.map(|t| t as f64)))?;
        writeln!(f, "Completion rate: {}/{}", self.completed, self.generated)?;
        writeln!(f, "Average process time: {}", Secs(self.avg_process))?;
        write!(f, "Maximum process time: {}", Secs(self.max_process.map(|t| t as f64)))
    }
}
