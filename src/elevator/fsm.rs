/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, error, info, warn};
use std::collections::BTreeSet;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::controller::next_floor_label;
use crate::floor::Floor;
use crate::observer::{Event, Observer};
use crate::shared::ElevatorState::{
    ClosingDoors, MovingDown, MovingUp, OpeningDoors, StayWithOpenedDoors, Waiting,
};
use crate::shared::{validate_label, ControllerError, ElevatorId, ElevatorSnapshot, ElevatorState, FloorLabel};

/**
 * One elevator cabin and its motion/door state machine.
 *
 * The elevator only knows floors by label. It reads the floors during a tick
 * (call buttons, building height) but never writes to them: when it stops at a
 * floor, `update` returns that label and the controller applies the claim.
 *
 * # Fields
 * - `id`:                  Unique id within the bank (id offset + index).
 * - `state`:               Current state of the machine, see `ElevatorState::can_transition_to`.
 * - `running_floor`:       The floor the cabin is at.
 * - `running_destination`: The destination currently driven to, always a member of `destinations`.
 * - `destinations`:        Floors the elevator is committed to visit.
 * - `move_detected`:       Simulated occupancy sensor, keeps the doors open while set.
 */
#[derive(Debug, Clone)]
pub struct Elevator {
    id: ElevatorId,
    state: ElevatorState,
    running_floor: FloorLabel,
    running_destination: Option<FloorLabel>,
    destinations: BTreeSet<FloorLabel>,
    move_detected: bool,
}

impl Elevator {
    pub fn new(id: ElevatorId, running_floor: FloorLabel) -> Elevator {
        Elevator {
            id,
            state: Waiting,
            running_floor,
            running_destination: None,
            destinations: BTreeSet::new(),
            move_detected: false,
        }
    }

    /// Advances the machine by one tick. Returns the label of the floor the
    /// elevator stopped at, if it started opening its doors this tick.
    pub fn update(&mut self, floors: &[Floor], observer: &mut dyn Observer) -> Option<FloorLabel> {
        match self.state {
            MovingUp => self.set_new_floor(floors, true, observer),
            MovingDown => self.set_new_floor(floors, false, observer),
            OpeningDoors => {
                self.transition(StayWithOpenedDoors, observer);
                None
            }
            StayWithOpenedDoors => {
                if self.move_detected {
                    self.transition(StayWithOpenedDoors, observer);
                } else {
                    self.transition(ClosingDoors, observer);
                }
                None
            }
            ClosingDoors => {
                self.transition(Waiting, observer);
                None
            }
            Waiting => {
                if let Some(stop) = self.check_floor(floors, observer) {
                    return Some(stop);
                }
                self.pick_nearest_destination();
                match self.running_destination {
                    None => None,
                    Some(destination) if destination < self.running_floor => {
                        self.transition(MovingDown, observer);
                        None
                    }
                    Some(_) => {
                        self.transition(MovingUp, observer);
                        None
                    }
                }
            }
        }
    }

    /***************************************/
    /*              Buttons                */
    /***************************************/
    pub fn press_floor_button(&mut self, label: i64, n_floors: FloorLabel) -> Result<(), ControllerError> {
        let label = validate_label(label, n_floors)?;
        self.destinations.insert(label);
        info!("Button {} pressed in elevator #{}", label, self.id);
        Ok(())
    }

    /// Manual door close, only honoured while the doors stand open and nobody is in the way.
    pub fn press_closing_doors_button(&mut self) -> bool {
        if self.state == StayWithOpenedDoors && !self.move_detected {
            return self.enter(ClosingDoors).is_some();
        }
        debug!("Elevator #{} ignored the closing doors button while {}", self.id, self.state);
        false
    }

    pub fn press_opening_doors_button(&mut self) -> bool {
        if self.state == Waiting || self.state == ClosingDoors {
            return self.enter(OpeningDoors).is_some();
        }
        debug!("Elevator #{} ignored the opening doors button while {}", self.id, self.state);
        false
    }

    /// Emergency reset. Floors still claiming this elevator are detached by the controller.
    pub fn reset(&mut self) {
        warn!(
            "Elevator #{} reset at floor {} while {}",
            self.id, self.running_floor, self.state
        );
        self.destinations.clear();
        self.running_destination = None;
        self.state = Waiting;
    }

    /***************************************/
    /*           Destinations              */
    /***************************************/
    pub fn add_destination(&mut self, label: FloorLabel) {
        if self.running_destination.is_none() {
            self.running_destination = Some(label);
        }
        self.destinations.insert(label);
    }

    pub fn remove_destination(&mut self, label: FloorLabel) {
        self.destinations.remove(&label);
        if self.running_destination == Some(label) {
            self.running_destination = None;
        }
    }

    pub fn distance_to_floor(&self, label: FloorLabel) -> u8 {
        self.running_floor.abs_diff(label)
    }

    pub fn is_busy(&self) -> bool {
        self.state != Waiting
    }

    /***************************************/
    /*              Getters                */
    /***************************************/
    pub fn id(&self) -> ElevatorId {
        self.id
    }

    pub fn state(&self) -> ElevatorState {
        self.state
    }

    pub fn running_floor(&self) -> FloorLabel {
        self.running_floor
    }

    pub fn running_destination(&self) -> Option<FloorLabel> {
        self.running_destination
    }

    pub fn destinations(&self) -> impl Iterator<Item = FloorLabel> + '_ {
        self.destinations.iter().copied()
    }

    pub fn has_destination(&self, label: FloorLabel) -> bool {
        self.destinations.contains(&label)
    }

    pub fn is_move_detected(&self) -> bool {
        self.move_detected
    }

    pub fn set_move_detected(&mut self, value: bool) {
        self.move_detected = value;
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            id: self.id,
            floor: self.running_floor,
            state: self.state,
            running_destination: self.running_destination,
            destinations: self.destinations().collect(),
            move_detected: self.move_detected,
        }
    }

    /***************************************/
    /*          Private functions          */
    /***************************************/
    // Ties go to the lowest label, the set iterates in ascending order.
    fn pick_nearest_destination(&mut self) {
        self.destinations.remove(&self.running_floor);
        self.running_destination = None;

        for &label in self.destinations.iter() {
            let closer = match self.running_destination {
                None => true,
                Some(current) => self.distance_to_floor(label) < self.distance_to_floor(current),
            };
            if closer {
                self.running_destination = Some(label);
            }
        }
    }

    fn set_new_floor(
        &mut self,
        floors: &[Floor],
        moving_up: bool,
        observer: &mut dyn Observer,
    ) -> Option<FloorLabel> {
        let next_floor = next_floor_label(floors.len() as FloorLabel, self.running_floor, moving_up);
        let destination_kept = self
            .running_destination
            .map_or(false, |label| self.has_destination(label));

        match next_floor {
            Some(label) if destination_kept => {
                self.running_floor = label;
                let stop = self.check_floor(floors, observer);
                if stop.is_none() {
                    self.transition(self.state, observer);
                }
                stop
            }
            _ => {
                self.transition(Waiting, observer);
                None
            }
        }
    }

    // Moving up, only assigned destinations stop the cabin. Riders are more
    // likely to want to go down, so calls are collected on the way down.
    fn check_floor(&mut self, floors: &[Floor], observer: &mut dyn Observer) -> Option<FloorLabel> {
        let called = floors
            .get(self.running_floor as usize - 1)
            .map_or(false, |floor| floor.is_button_pressed());

        if !self.has_destination(self.running_floor) && !(called && self.state != MovingUp) {
            return None;
        }

        self.remove_destination(self.running_floor);
        self.transition(OpeningDoors, observer);
        observer.notify(Event::DoorsOpening {
            elevator: self.id,
            floor: self.running_floor,
        });
        Some(self.running_floor)
    }

    fn transition(&mut self, next: ElevatorState, observer: &mut dyn Observer) {
        if let Some(from) = self.enter(next) {
            observer.notify(Event::StateChanged {
                elevator: self.id,
                from,
                to: next,
                floor: self.running_floor,
            });
        }
    }

    fn enter(&mut self, next: ElevatorState) -> Option<ElevatorState> {
        if !self.state.can_transition_to(next) {
            error!(
                "Elevator #{} refused illegal transition {:?} -> {:?}",
                self.id, self.state, next
            );
            debug_assert!(false, "illegal transition {:?} -> {:?}", self.state, next);
            return None;
        }
        Some(std::mem::replace(&mut self.state, next))
    }

    /***************************************/
    /*           Test functions            */
    /***************************************/
    #[cfg(test)]
    pub fn test_set_state(&mut self, state: ElevatorState) {
        self.state = state;
    }

    #[cfg(test)]
    pub fn test_set_running_floor(&mut self, label: FloorLabel) {
        self.running_floor = label;
    }
}
