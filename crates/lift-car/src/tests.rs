//! Unit tests for lift-car.

use lift_core::{CallId, CallTicket, CarId, Direction, Floor, Heading, SimRng};

use crate::*;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn ticket(id: u32, origin: Floor, destination: Floor) -> CallTicket {
    CallTicket { id: CallId(id), origin, destination }
}

fn car(spec: CarSpec) -> Car {
    Car::new(CarId(0), spec, 10).unwrap()
}

fn car_at(floor: Floor) -> Car {
    car(CarSpec { start_floor: Some(floor), ..CarSpec::default() })
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Served {
    Pickup(u32, Floor),
    Dropoff(u32, Floor),
}

/// Serve the current floor the way the movement loop does: every drop-off,
/// then pickups while there is room.
fn serve_floor(car: &mut Car, log: &mut Vec<Served>) {
    while let Some(t) = car.drop_off().unwrap() {
        log.push(Served::Dropoff(t.id.0, car.floor()));
    }
    while let Some(t) = car.pick_up().unwrap() {
        log.push(Served::Pickup(t.id.0, car.floor()));
    }
}

/// Run the car until idle.  `stops` records every floor served, split into
/// one list per sweep.
fn drive(car: &mut Car) -> (Vec<Served>, Vec<Vec<Floor>>) {
    let mut log = Vec::new();
    let mut sweeps = vec![Vec::new()];
    car.wake();
    for _ in 0..10_000 {
        match car.next_action().unwrap() {
            Action::Travel { target } => {
                car.step_toward(target).unwrap();
            }
            Action::Stop { floor } => {
                sweeps.last_mut().unwrap().push(floor);
                serve_floor(car, &mut log);
            }
            Action::Turn { .. } => sweeps.push(Vec::new()),
            Action::Idle => return (log, sweeps),
        }
    }
    panic!("car never went idle");
}

fn pickup_floors(log: &[Served]) -> Vec<Floor> {
    log.iter()
        .filter_map(|s| match *s {
            Served::Pickup(_, f) => Some(f),
            Served::Dropoff(..) => None,
        })
        .collect()
}

// ── CallManager ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod manager {
    use super::*;

    #[test]
    fn idle_car_files_calls_under_their_own_direction() {
        let mut m = CallManager::new(1, 10).unwrap();
        assert_eq!(m.add(ticket(0, 5, 2), Heading::Idle, 1).unwrap(), Bucket::Reachable(Direction::Down));
        assert_eq!(m.add(ticket(1, 3, 8), Heading::Idle, 9).unwrap(), Bucket::Reachable(Direction::Up));
    }

    #[test]
    fn opposite_direction_is_reachable() {
        let mut m = CallManager::new(1, 10).unwrap();
        let b = m.add(ticket(0, 9, 2), Heading::Up, 4).unwrap();
        assert_eq!(b, Bucket::Reachable(Direction::Down));
    }

    #[test]
    fn same_direction_depends_on_position() {
        let mut m = CallManager::new(1, 10).unwrap();
        assert_eq!(m.add(ticket(0, 7, 9), Heading::Up, 3).unwrap(), Bucket::Reachable(Direction::Up));
        assert_eq!(m.add(ticket(1, 3, 9), Heading::Up, 3).unwrap(), Bucket::Unreachable(Direction::Up));
        assert_eq!(m.add(ticket(2, 1, 5), Heading::Up, 3).unwrap(), Bucket::Unreachable(Direction::Up));
        assert_eq!(m.add(ticket(3, 2, 1), Heading::Down, 6).unwrap(), Bucket::Reachable(Direction::Down));
        assert_eq!(m.add(ticket(4, 8, 1), Heading::Down, 6).unwrap(), Bucket::Unreachable(Direction::Down));
    }

    #[test]
    fn rejects_calls_outside_range_or_without_direction() {
        let mut m = CallManager::new(3, 8).unwrap();
        assert!(matches!(m.add(ticket(0, 2, 5), Heading::Idle, 3), Err(CarError::InvalidCall(_))));
        assert!(matches!(m.add(ticket(1, 5, 9), Heading::Idle, 3), Err(CarError::InvalidCall(_))));
        assert!(matches!(m.add(ticket(2, 5, 5), Heading::Idle, 3), Err(CarError::InvalidCall(_))));
        assert!(m.is_empty());
    }

    #[test]
    fn empty_or_floorless_range_is_rejected() {
        assert!(matches!(CallManager::new(0, 5), Err(CarError::Config(_))));
        assert!(matches!(CallManager::new(6, 5), Err(CarError::Config(_))));
    }

    #[test]
    fn fresh_reachable_call_is_next_stop() {
        let mut m = CallManager::new(1, 10).unwrap();
        m.add(ticket(0, 6, 8), Heading::Idle, 1).unwrap();
        assert_eq!(m.next_stop(Direction::Up), Some(6));
        assert_eq!(m.next_stop(Direction::Down), None);
    }

    #[test]
    fn next_stop_takes_nearest_of_pickups_and_dropoffs() {
        let mut m = CallManager::new(1, 10).unwrap();
        m.add(ticket(0, 2, 6), Heading::Idle, 1).unwrap();
        m.add(ticket(1, 4, 5), Heading::Idle, 1).unwrap();
        assert_eq!(m.pop_pickup(Direction::Up, 2).unwrap(), Some(ticket(0, 2, 6)));
        // Pickup at 4 beats the drop-off at 6.
        assert_eq!(m.next_stop(Direction::Up), Some(4));
        assert_eq!(m.next_dropoff(Direction::Up), Some(6));
        m.pop_pickup(Direction::Up, 4).unwrap();
        assert_eq!(m.next_stop(Direction::Up), Some(5));
        // Going down the highest drop-off comes first.
        assert_eq!(m.next_stop(Direction::Down), Some(6));
    }

    #[test]
    fn swap_twice_restores_buckets() {
        let mut m = CallManager::new(1, 10).unwrap();
        m.add(ticket(0, 7, 9), Heading::Up, 3).unwrap();
        m.add(ticket(1, 2, 9), Heading::Up, 3).unwrap();
        let before = (m.locate(CallId(0)), m.locate(CallId(1)));

        m.swap_reachable(Direction::Up);
        assert_eq!(m.locate(CallId(0)), Some(Bucket::Unreachable(Direction::Up)));
        assert_eq!(m.locate(CallId(1)), Some(Bucket::Reachable(Direction::Up)));

        m.swap_reachable(Direction::Up);
        assert_eq!((m.locate(CallId(0)), m.locate(CallId(1))), before);
        assert_eq!(m.next_stop(Direction::Up), Some(7));
    }

    #[test]
    fn pickup_moves_ticket_to_dropoffs() {
        let mut m = CallManager::new(1, 10).unwrap();
        m.add(ticket(0, 5, 2), Heading::Idle, 1).unwrap();
        assert_eq!(m.pop_pickup(Direction::Up, 5).unwrap(), None);
        assert_eq!(m.pop_pickup(Direction::Down, 4).unwrap(), None);
        assert_eq!(m.pop_pickup(Direction::Down, 5).unwrap(), Some(ticket(0, 5, 2)));
        assert_eq!(m.locate(CallId(0)), Some(Bucket::Dropoff));
        assert_eq!((m.pending_pickups(), m.pending_dropoffs()), (0, 1));

        assert_eq!(m.pop_dropoff(3).unwrap(), None);
        assert_eq!(m.pop_dropoff(2).unwrap(), Some(ticket(0, 5, 2)));
        assert!(m.is_empty());
        assert!(!m.contains(CallId(0)));
    }

    #[test]
    fn same_floor_queue_is_fifo() {
        let mut m = CallManager::new(1, 10).unwrap();
        for id in 0..3 {
            m.add(ticket(id, 4, 8 + id), Heading::Idle, 1).unwrap();
        }
        assert_eq!(m.reachable_at(Direction::Up, 4).unwrap(), 3);
        let order: Vec<u32> = (0..3)
            .map(|_| m.pop_pickup(Direction::Up, 4).unwrap().unwrap().id.0)
            .collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn floor_outside_range_is_an_error() {
        let mut m = CallManager::new(2, 6).unwrap();
        let err = m.pop_dropoff(7).unwrap_err();
        assert_eq!(err, CarError::InvalidFloor { floor: 7, lower: 2, upper: 6 });
        assert!(err.is_fatal());
        assert!(m.reachable_at(Direction::Up, 1).is_err());
    }

    #[test]
    fn every_call_sits_in_exactly_one_bucket() {
        let mut rng = SimRng::new(7);
        let mut m = CallManager::new(1, 10).unwrap();
        let headings = [Heading::Idle, Heading::Up, Heading::Down];
        for id in 0..200 {
            let floors = rng.sample_distinct(10, 2);
            let t = ticket(id, floors[0] as Floor + 1, floors[1] as Floor + 1);
            let heading = headings[rng.gen_range(0..3)];
            let at = rng.gen_range(1..=10);
            m.add(t, heading, at).unwrap();
            if rng.random::<f64>() < 0.3 {
                m.pop_pickup(t.direction().unwrap(), t.origin).unwrap();
            }
            if rng.random::<f64>() < 0.2 {
                m.swap_reachable(Direction::ALL[rng.gen_range(0..2)]);
            }
        }
        for id in 0..200 {
            assert_eq!(m.occurrences(CallId(id)), 1, "call {id}");
        }
        assert_eq!(m.pending_pickups() + m.pending_dropoffs(), 200);
    }
}

// ── Car ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod car {
    use super::*;

    #[test]
    fn defaults() {
        let c = car(CarSpec::default());
        assert_eq!(c.floor(), 1);
        assert_eq!(c.heading(), Heading::Idle);
        assert_eq!(c.occupancy(), 0);
        assert_eq!(c.capacity(), None);
        assert!(!c.is_full());
        assert_eq!(c.service_range(), (1, 10));
        assert_eq!(c.spec().travel_ticks, 100);
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let bad = [
            CarSpec { capacity: Some(0), ..CarSpec::default() },
            CarSpec { travel_ticks: 0, ..CarSpec::default() },
            CarSpec { service_range: Some((0, 4)), ..CarSpec::default() },
            CarSpec { service_range: Some((5, 11)), ..CarSpec::default() },
            CarSpec { service_range: Some((6, 5)), ..CarSpec::default() },
            CarSpec { service_range: Some((3, 6)), start_floor: Some(2), ..CarSpec::default() },
        ];
        for spec in bad {
            assert!(matches!(Car::new(CarId(1), spec.clone(), 10), Err(CarError::Config(_))), "{spec:?}");
        }
    }

    #[test]
    fn service_range_sets_start_floor() {
        let c = car(CarSpec { service_range: Some((4, 8)), ..CarSpec::default() });
        assert_eq!(c.floor(), 4);
        assert!(c.serves(4, 8));
        assert!(!c.serves(3, 8));
    }

    #[test]
    fn idle_car_without_work_stays_idle() {
        let mut c = car_at(3);
        assert_eq!(c.wake(), None);
        assert_eq!(c.next_action().unwrap(), Action::Idle);
        assert_eq!(c.heading(), Heading::Idle);
    }

    #[test]
    fn wake_prefers_configured_direction() {
        let mut c = car_at(5);
        c.admit(ticket(0, 7, 2)).unwrap();
        c.admit(ticket(1, 3, 9)).unwrap();
        assert_eq!(c.wake(), Some(Direction::Up));

        let mut c = car(CarSpec { start_floor: Some(5), idle_preference: Direction::Down, ..CarSpec::default() });
        c.admit(ticket(0, 7, 2)).unwrap();
        c.admit(ticket(1, 3, 9)).unwrap();
        assert_eq!(c.wake(), Some(Direction::Down));
    }

    #[test]
    fn wake_falls_back_to_direction_with_work() {
        let mut c = car_at(1);
        c.admit(ticket(0, 5, 2)).unwrap();
        assert_eq!(c.wake(), Some(Direction::Down));
        assert_eq!(c.heading(), Heading::Down);
        // Already moving: no change.
        assert_eq!(c.wake(), None);
    }

    #[test]
    fn idle_call_is_served_by_repositioning_first() {
        let mut c = car_at(1);
        c.admit(ticket(0, 5, 2)).unwrap();
        let (log, _) = drive(&mut c);
        assert_eq!(log, vec![Served::Pickup(0, 5), Served::Dropoff(0, 2)]);
        assert_eq!(c.floor(), 2);
        assert_eq!(c.heading(), Heading::Idle);
        assert_eq!(c.occupancy(), 0);
        assert!(c.calls().is_empty());
    }

    #[test]
    fn step_toward_moves_one_floor() {
        let mut c = car_at(5);
        assert_eq!(c.step_toward(9).unwrap(), 6);
        assert_eq!(c.step_toward(1).unwrap(), 5);
        assert!(matches!(c.step_toward(5), Err(CarError::State { .. })));
    }

    #[test]
    fn step_outside_range_is_fatal() {
        let mut c = car(CarSpec { service_range: Some((3, 6)), start_floor: Some(6), ..CarSpec::default() });
        let err = c.step_toward(9).unwrap_err();
        assert!(matches!(err, CarError::State { .. }));
        assert!(err.is_fatal());
        assert_eq!(c.floor(), 6);
    }

    #[test]
    fn admission_uses_current_heading_and_floor() {
        let mut c = car_at(3);
        c.admit(ticket(0, 5, 6)).unwrap();
        c.wake();
        assert_eq!(c.admit(ticket(1, 2, 6)).unwrap(), Bucket::Unreachable(Direction::Up));
        assert_eq!(c.admit(ticket(2, 8, 1)).unwrap(), Bucket::Reachable(Direction::Down));
        assert_eq!(c.load(), 3);
    }
}

// ── SCAN order ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scan {
    use super::*;

    /// Car at floor 3 already sweeping up.
    fn sweeping_up_at_3() -> Car {
        let mut c = car_at(3);
        c.admit(ticket(100, 5, 6)).unwrap();
        assert_eq!(c.wake(), Some(Direction::Up));
        c
    }

    #[test]
    fn passed_call_waits_for_next_sweep() {
        let mut c = sweeping_up_at_3();
        assert_eq!(c.admit(ticket(0, 7, 9)).unwrap(), Bucket::Reachable(Direction::Up));
        assert_eq!(c.admit(ticket(1, 1, 5)).unwrap(), Bucket::Unreachable(Direction::Up));

        let (log, _) = drive(&mut c);
        assert_eq!(pickup_floors(&log), vec![5, 7, 1]);
        let nine = log.iter().position(|s| *s == Served::Dropoff(0, 9)).unwrap();
        let one = log.iter().position(|s| *s == Served::Pickup(1, 1)).unwrap();
        assert!(nine < one);
        assert_eq!(c.floor(), 5);
        assert_eq!(c.heading(), Heading::Idle);
    }

    #[test]
    fn opposite_call_waits_for_reversal() {
        let mut c = sweeping_up_at_3();
        c.admit(ticket(0, 7, 9)).unwrap();
        c.admit(ticket(1, 1, 5)).unwrap();
        assert_eq!(c.admit(ticket(2, 2, 1)).unwrap(), Bucket::Reachable(Direction::Down));

        let (log, sweeps) = drive(&mut c);
        assert_eq!(log, vec![
            Served::Pickup(100, 5),
            Served::Dropoff(100, 6),
            Served::Pickup(0, 7),
            Served::Dropoff(0, 9),
            Served::Pickup(2, 2),
            Served::Dropoff(2, 1),
            Served::Pickup(1, 1),
            Served::Dropoff(1, 5),
        ]);
        assert_eq!(sweeps, vec![vec![5, 6, 7, 9], vec![2, 1], vec![1, 5]]);
    }

    #[test]
    fn full_car_delivers_before_picking_up_again() {
        let mut c = car(CarSpec { capacity: Some(1), ..CarSpec::default() });
        c.admit(ticket(0, 1, 4)).unwrap();
        c.wake();
        assert_eq!(c.next_action().unwrap(), Action::Stop { floor: 1 });
        c.pick_up().unwrap();
        assert!(c.is_full());

        // Two more passengers show up at 4 while the car is on its way.
        assert_eq!(c.admit(ticket(1, 4, 8)).unwrap(), Bucket::Reachable(Direction::Up));
        assert_eq!(c.admit(ticket(2, 4, 6)).unwrap(), Bucket::Reachable(Direction::Up));
        while let Action::Travel { target } = c.next_action().unwrap() {
            c.step_toward(target).unwrap();
        }
        assert_eq!(c.floor(), 4);

        let mut log = Vec::new();
        serve_floor(&mut c, &mut log);
        assert_eq!(log, vec![Served::Dropoff(0, 4), Served::Pickup(1, 4)]);
        assert_eq!(c.occupancy(), 1);
        assert_eq!(c.calls().locate(CallId(2)), Some(Bucket::Reachable(Direction::Up)));

        // Full again: heads for the drop-off, not the waiting passenger.
        assert_eq!(c.next_action().unwrap(), Action::Travel { target: 8 });

        let (rest, _) = drive(&mut c);
        assert_eq!(rest, vec![
            Served::Dropoff(1, 8),
            Served::Pickup(2, 4),
            Served::Dropoff(2, 6),
        ]);
        assert!(c.calls().is_empty());
        assert_eq!(c.occupancy(), 0);
    }

    #[test]
    fn full_car_refuses_pickup_without_error() {
        let mut c = car(CarSpec { capacity: Some(1), start_floor: Some(2), ..CarSpec::default() });
        c.admit(ticket(0, 2, 5)).unwrap();
        c.admit(ticket(1, 2, 7)).unwrap();
        c.wake();
        assert!(c.pick_up().unwrap().is_some());
        assert_eq!(c.pick_up().unwrap(), None);
        assert_eq!(c.calls().reachable_at(Direction::Up, 2).unwrap(), 1);
    }

    #[test]
    fn stops_are_monotone_within_each_sweep() {
        let mut rng = SimRng::new(42);
        let mut c = car(CarSpec::default());
        let mut next_id = 0;
        let mut admit = |c: &mut Car, rng: &mut SimRng| {
            let floors = rng.sample_distinct(10, 2);
            c.admit(ticket(next_id, floors[0] as Floor + 1, floors[1] as Floor + 1)).unwrap();
            next_id += 1;
        };
        for _ in 0..5 {
            admit(&mut c, &mut rng);
        }
        c.wake();

        let mut sweep: Vec<Floor> = Vec::new();
        let mut served = 0;
        for step in 0..20_000 {
            if step % 7 == 0 && step < 3_000 {
                admit(&mut c, &mut rng);
                c.wake();
            }
            let direction = c.heading().direction();
            match c.next_action().unwrap() {
                Action::Travel { target } => {
                    c.step_toward(target).unwrap();
                }
                Action::Stop { floor } => {
                    if let (Some(d), Some(&last)) = (direction, sweep.last()) {
                        assert!(last == floor || d.is_ahead(last, floor), "{d} sweep {sweep:?} then {floor}");
                    }
                    sweep.push(floor);
                    let mut log = Vec::new();
                    serve_floor(&mut c, &mut log);
                    served += log.iter().filter(|s| matches!(s, Served::Dropoff(..))).count();
                }
                Action::Turn { .. } => sweep.clear(),
                Action::Idle => {
                    sweep.clear();
                    if step >= 3_000 {
                        break;
                    }
                }
            }
        }
        assert!(c.calls().is_empty());
        assert_eq!(served as u32, next_id);
    }
}
