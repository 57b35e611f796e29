//! The scheduler processes of a session.
//!
//! Each variant of [`Task`] is an explicit state machine implementing
//! [`Process`]: the fields remember where it stopped, and `resume` runs it
//! to the next suspension point.

use lift_car::Action;
use lift_clock::{ClockHandle, Process, Suspend, Wake};
use lift_core::{CallTicket, CarId, ChannelId, Floor, SimRng, Tick};
use lift_dispatch::{dispatch, CallScript, CallSource, CarSelector};
use tracing::debug;

use crate::{Building, SessionObserver, SimError, SimResult};

/// What travels on session channels.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Message {
    /// A call on its way to the dispatcher or to a car.
    Call(CallTicket),
    /// A car's admission process found it idle with new work.
    WorkAvailable,
}

/// Everything a task may touch while it runs.
pub struct World<'a> {
    pub building: &'a mut Building,
    pub observer: &'a mut dyn SessionObserver,
}

// ── Task ──────────────────────────────────────────────────────────────────────

/// One cooperatively scheduled activity of the session.
pub enum Task {
    Source(SourceTask),
    Script(ScriptTask),
    Dispatcher(DispatcherTask),
    Admission(AdmissionTask),
    Movement(MovementTask),
}

impl<'a> Process<World<'a>, Message> for Task {
    type Error = SimError;

    fn resume(
        &mut self,
        wake:  Wake<Message>,
        world: &mut World<'a>,
        clock: &mut ClockHandle<'_, Message>,
    ) -> SimResult<Suspend<Message>> {
        match self {
            Task::Source(t)     => t.resume(wake, world, clock.now()),
            Task::Script(t)     => t.resume(wake, world, clock.now()),
            Task::Dispatcher(t) => t.resume(wake, world, clock.now()),
            Task::Admission(t)  => t.resume(wake, world, clock),
            Task::Movement(t)   => t.resume(wake, world, clock.now()),
        }
    }
}

fn unexpected(task: &str, wake: &Wake<Message>) -> SimError {
    SimError::State(format!("{task} resumed with unexpected {wake:?}"))
}

// ── SourceTask ────────────────────────────────────────────────────────────────

/// Creates a random call every interarrival gap and sends it to the
/// dispatcher.
pub struct SourceTask {
    source:  CallSource,
    rng:     SimRng,
    inbound: ChannelId,
}

impl SourceTask {
    pub fn new(source: CallSource, rng: SimRng, inbound: ChannelId) -> Self {
        Self { source, rng, inbound }
    }

    fn resume(&mut self, wake: Wake<Message>, world: &mut World<'_>, now: Tick) -> SimResult<Suspend<Message>> {
        match wake {
            Wake::Start | Wake::Sent => Ok(Suspend::Timeout(self.source.next_gap(&mut self.rng))),
            Wake::Elapsed => {
                let call = self.source.generate(world.building.call_ids(), now, &mut self.rng)?;
                let ticket = record(world, call)?;
                Ok(Suspend::Send(self.inbound, Message::Call(ticket)))
            }
            other => Err(unexpected("call source", &other)),
        }
    }
}

fn record(world: &mut World<'_>, call: lift_core::Call) -> SimResult<CallTicket> {
    debug!(call = %call.id(), origin = call.origin(), destination = call.destination(), tick = %call.created(), "call generated");
    world.observer.on_call_created(&call);
    world.building.record(call)
}

// ── ScriptTask ────────────────────────────────────────────────────────────────

/// Replays a [`CallScript`], one call at a time, at the scripted instants.
pub struct ScriptTask {
    script:  CallScript,
    next:    usize,
    inbound: ChannelId,
}

impl ScriptTask {
    pub fn new(script: CallScript, inbound: ChannelId) -> Self {
        Self { script, next: 0, inbound }
    }

    fn resume(&mut self, wake: Wake<Message>, world: &mut World<'_>, now: Tick) -> SimResult<Suspend<Message>> {
        if matches!(wake, Wake::Received(_)) {
            return Err(unexpected("call script", &wake));
        }
        let Some(&scripted) = self.script.calls().get(self.next) else {
            return Ok(Suspend::Finish);
        };
        if scripted.at > now {
            return Ok(Suspend::Timeout(scripted.at - now));
        }
        self.next += 1;
        let id = world.building.call_ids().allocate();
        let call = lift_core::Call::new(id, scripted.origin, scripted.destination, now)?;
        let ticket = record(world, call)?;
        Ok(Suspend::Send(self.inbound, Message::Call(ticket)))
    }
}

// ── DispatcherTask ────────────────────────────────────────────────────────────

/// Receives calls, picks a car, and forwards each call to that car's
/// admission channel.
pub struct DispatcherTask {
    selector: Box<dyn CarSelector>,
    rng:      SimRng,
    inbound:  ChannelId,
    /// Admission channel per car, indexed by `CarId`.
    cars:     Vec<ChannelId>,
}

impl DispatcherTask {
    pub fn new(selector: Box<dyn CarSelector>, rng: SimRng, inbound: ChannelId, cars: Vec<ChannelId>) -> Self {
        Self { selector, rng, inbound, cars }
    }

    fn resume(&mut self, wake: Wake<Message>, world: &mut World<'_>, now: Tick) -> SimResult<Suspend<Message>> {
        match wake {
            Wake::Start | Wake::Sent => Ok(Suspend::Recv(self.inbound)),
            Wake::Received(Message::Call(ticket)) => {
                let car = dispatch(&self.selector, &ticket, world.building.cars(), &mut self.rng)?;
                world.building.assign(ticket.id, car)?;
                debug!(call = %ticket.id, car = %car, policy = self.selector.name(), tick = %now, "call assigned");
                world.observer.on_call_assigned(ticket.id, car, now);
                let channel = self.cars.get(car.index()).copied().ok_or_else(|| {
                    SimError::State(format!("selector returned {car}, which has no admission channel"))
                })?;
                Ok(Suspend::Send(channel, Message::Call(ticket)))
            }
            other => Err(unexpected("dispatcher", &other)),
        }
    }
}

// ── AdmissionTask ─────────────────────────────────────────────────────────────

/// Hands assigned calls to the car's call manager and nudges the movement
/// task when the car is idle.
pub struct AdmissionTask {
    car:   CarId,
    calls: ChannelId,
    wake:  ChannelId,
}

impl AdmissionTask {
    pub fn new(car: CarId, calls: ChannelId, wake: ChannelId) -> Self {
        Self { car, calls, wake }
    }

    fn resume(
        &mut self,
        wake:  Wake<Message>,
        world: &mut World<'_>,
        clock: &mut ClockHandle<'_, Message>,
    ) -> SimResult<Suspend<Message>> {
        match wake {
            Wake::Start => {}
            Wake::Received(Message::Call(ticket)) => {
                let bucket = world.building.admit(self.car, ticket)?;
                debug!(car = %self.car, call = %ticket.id, ?bucket, tick = %clock.now(), "call admitted");
                if world.building.car(self.car)?.heading().is_idle() {
                    // A full wake channel already holds a notification.
                    clock.try_send(self.wake, Message::WorkAvailable)?;
                }
            }
            other => return Err(unexpected("admission", &other)),
        }
        Ok(Suspend::Recv(self.calls))
    }
}

// ── MovementTask ──────────────────────────────────────────────────────────────

/// The car's main loop: travel, serve floors, turn, idle.
pub struct MovementTask {
    car:        CarId,
    wake:       ChannelId,
    /// Floor being approached while a travel interval runs.
    travelling: Option<Floor>,
    /// Floor whose stop has already been announced.
    serving:    Option<Floor>,
}

impl MovementTask {
    pub fn new(car: CarId, wake: ChannelId) -> Self {
        Self { car, wake, travelling: None, serving: None }
    }

    fn resume(&mut self, wake: Wake<Message>, world: &mut World<'_>, now: Tick) -> SimResult<Suspend<Message>> {
        match wake {
            Wake::Start | Wake::Received(Message::WorkAvailable) => {}
            Wake::Elapsed => {
                if let Some(target) = self.travelling.take() {
                    let floor = world.building.car_mut(self.car)?.step_toward(target)?;
                    debug!(car = %self.car, floor, tick = %now, "floor reached");
                }
            }
            other => return Err(unexpected("movement", &other)),
        }
        self.advance(world, now)
    }

    /// Run decisions until the car commits to something that takes time.
    fn advance(&mut self, world: &mut World<'_>, now: Tick) -> SimResult<Suspend<Message>> {
        loop {
            let car = world.building.car_mut(self.car)?;
            if car.heading().is_idle() {
                if car.wake().is_none() {
                    return Ok(Suspend::Recv(self.wake));
                }
                debug!(car = %self.car, heading = %car.heading(), floor = car.floor(), tick = %now, "leaving idle");
                world.observer.on_direction_change(car, now);
                continue;
            }

            match car.next_action()? {
                Action::Travel { target } => {
                    self.serving = None;
                    self.travelling = Some(target);
                    return Ok(Suspend::Timeout(car.spec().travel_ticks));
                }
                Action::Stop { floor } => {
                    if self.serving != Some(floor) {
                        self.serving = Some(floor);
                        debug!(car = %self.car, floor, tick = %now, "stop");
                        world.observer.on_stop(car, now);
                    }
                    return self.serve(world, now);
                }
                Action::Turn { direction } => {
                    self.serving = None;
                    debug!(car = %self.car, %direction, floor = car.floor(), tick = %now, "direction change");
                    world.observer.on_direction_change(car, now);
                }
                Action::Idle => {
                    self.serving = None;
                    debug!(car = %self.car, floor = car.floor(), tick = %now, "idle");
                    world.observer.on_direction_change(car, now);
                    return Ok(Suspend::Recv(self.wake));
                }
            }
        }
    }

    /// Serve one passenger at the current floor: drop-offs first.
    fn serve(&mut self, world: &mut World<'_>, now: Tick) -> SimResult<Suspend<Message>> {
        if let Some(call) = world.building.drop_off(self.car, now)? {
            let car = world.building.car(self.car)?;
            debug!(car = %self.car, %call, floor = car.floor(), occupancy = car.occupancy(), tick = %now, "drop-off");
            world.observer.on_dropoff(car, call, now);
            return Ok(Suspend::Timeout(car.spec().dropoff_ticks));
        }
        if let Some(call) = world.building.pick_up(self.car, now)? {
            let car = world.building.car(self.car)?;
            debug!(car = %self.car, %call, floor = car.floor(), occupancy = car.occupancy(), tick = %now, "pickup");
            world.observer.on_pickup(car, call, now);
            return Ok(Suspend::Timeout(car.spec().pickup_ticks));
        }
        let car = world.building.car(self.car)?;
        Err(SimError::State(format!("{} stopped at floor {} with nothing to serve", self.car, car.floor())))
    }
}
