//! Fluent builder for constructing a [`Session`].

use lift_car::Car;
use lift_clock::SimClock;
use lift_core::{CarId, SimRng};
use lift_dispatch::{CallScript, CallSource, CarSelector};

use crate::task::{AdmissionTask, DispatcherTask, MovementTask, ScriptTask, SourceTask};
use crate::{Building, Message, Session, SessionConfig, SimError, SimResult, Task};

/// Fluent builder for [`Session`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                         |
/// |-------------------|-------------------------------------------------|
/// | `.script(s)`      | Random calls from `config.interarrival`         |
/// | `.selector(s)`    | `config.policy.selector()`                      |
///
/// # Example
///
/// ```rust,ignore
/// let mut session = SessionBuilder::new(config)
///     .script(load_script_csv(path)?)
///     .selector(LeastLoaded)
///     .build()?;
/// let report = session.run(&mut NoopObserver)?;
/// ```
pub struct SessionBuilder {
    config:   SessionConfig,
    script:   Option<CallScript>,
    selector: Option<Box<dyn CarSelector>>,
}

impl SessionBuilder {
    pub fn new(config: SessionConfig) -> Self {
        Self { config, script: None, selector: None }
    }

    /// Replay `script` instead of generating random calls.
    pub fn script(mut self, script: CallScript) -> Self {
        self.script = Some(script);
        self
    }

    /// Use a custom car-selection policy instead of `config.policy`.
    pub fn selector<S: CarSelector>(mut self, selector: S) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Validate inputs, create cars, channels, and tasks, and return a
    /// ready-to-run [`Session`].
    pub fn build(self) -> SimResult<Session> {
        let config = self.config;
        config.validate()?;

        // ── Cars ──────────────────────────────────────────────────────────
        let cars = config
            .cars
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let id = CarId::try_from(i).map_err(|_| SimError::Config(format!("car index {i} overflows CarId")))?;
                Ok(Car::new(id, spec.clone(), config.floor_count)?)
            })
            .collect::<SimResult<Vec<_>>>()?;
        let building = Building::new(config.floor_count, cars)?;

        // ── Call source ───────────────────────────────────────────────────
        let mut master = SimRng::new(config.seed);
        let mut clock: SimClock<Message> = SimClock::new();
        let inbound = clock.unbounded();
        let mut tasks = Vec::with_capacity(2 + 2 * config.cars.len());

        let source = match self.script {
            Some(script) => {
                script.validate(config.floor_count)?;
                Task::Script(ScriptTask::new(script, inbound))
            }
            None => {
                let source = CallSource::new(config.floor_count, config.interarrival)?;
                Task::Source(SourceTask::new(source, master.child(0), inbound))
            }
        };
        clock.spawn();
        tasks.push(source);

        // ── Per-car channels ──────────────────────────────────────────────
        let car_channels: Vec<_> = (0..config.cars.len())
            .map(|_| (clock.unbounded(), clock.bounded(1)))
            .collect();

        // ── Dispatcher ────────────────────────────────────────────────────
        let selector = self.selector.unwrap_or_else(|| config.policy.selector());
        let admission: Vec<_> = car_channels.iter().map(|&(calls, _)| calls).collect();
        clock.spawn();
        tasks.push(Task::Dispatcher(DispatcherTask::new(selector, master.child(1), inbound, admission)));

        // ── Admission and movement, per car ───────────────────────────────
        for (car, &(calls, wake)) in building.cars().iter().map(Car::id).zip(&car_channels) {
            clock.spawn();
            tasks.push(Task::Admission(AdmissionTask::new(car, calls, wake)));
            clock.spawn();
            tasks.push(Task::Movement(MovementTask::new(car, wake)));
        }

        Ok(Session { config, clock, building, tasks, ran: false })
    }
}
