//! The `Session` struct: one configured run of the simulation.

use lift_clock::{RunStats, SimClock};
use lift_core::Tick;
use tracing::info;

use crate::{Building, Message, SessionConfig, SessionObserver, SessionReport, SimError, SimResult, Task, World};

/// A ready-to-run session.
///
/// Owns the clock, the building, and every task.  Create via
/// [`SessionBuilder`][crate::SessionBuilder]; a session runs once.
pub struct Session {
    pub(crate) config:   SessionConfig,
    pub(crate) clock:    SimClock<Message>,
    pub(crate) building: Building,
    /// Indexed by `ProcessId`.
    pub(crate) tasks:    Vec<Task>,
    pub(crate) ran:      bool,
}

impl Session {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the clock until `config.runtime` and return the statistics.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    /// A second call fails with [`SimError::State`].  If a task fails, the
    /// clock stays at the failing instant and the error is returned.
    pub fn run<O: SessionObserver>(&mut self, observer: &mut O) -> SimResult<SessionReport> {
        if self.ran {
            return Err(SimError::State("session has already been run".into()));
        }
        self.ran = true;

        let until = self.config.end_tick();
        info!(
            floors = self.config.floor_count,
            cars = self.building.cars().len(),
            runtime = %until,
            seed = self.config.seed,
            "session start"
        );

        let mut world = World { building: &mut self.building, observer: &mut *observer };
        let stats: RunStats = self.clock.run(until, &mut world, &mut self.tasks)?;

        let report = self.report();
        info!(
            tick = %self.clock.now(),
            resumptions = stats.resumptions,
            generated = report.generated,
            completed = report.completed,
            "session end"
        );
        observer.on_session_end(&report);
        Ok(report)
    }

    /// Statistics over the history so far.
    pub fn report(&self) -> SessionReport {
        SessionReport::from_history(self.building.history(), self.clock.now())
    }

    #[inline] pub fn now(&self) -> Tick { self.clock.now() }
    #[inline] pub fn config(&self) -> &SessionConfig { &self.config }
    #[inline] pub fn building(&self) -> &Building { &self.building }
    #[inline] pub fn has_run(&self) -> bool { self.ran }
}
