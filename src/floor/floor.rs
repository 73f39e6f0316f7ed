/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::info;
use std::collections::VecDeque;
use std::fmt::Write;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::Elevator;
use crate::shared::ElevatorState::{StayWithOpenedDoors, Waiting};
use crate::shared::{validate_label, ControllerError, FloorLabel, FloorSnapshot};

/***************************************/
/*               Enums                 */
/***************************************/
/// What a floor wants done this tick. Elevators are referenced by their index in the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorAction {
    Idle,
    NoFreeElevator,
    Assign(usize),
    Dispatch { elevator: usize, destination: FloorLabel },
    Release(usize),
}

/***************************************/
/*             Public API              */
/***************************************/
/**
 * A landing with its call button and the onward destinations of the people
 * waiting there.
 *
 * # Fields
 * - `label`:           Floor number, 1 is the ground floor.
 * - `button_pressed`:  Call button state.
 * - `waited_elevator`: Index of the elevator this floor currently holds responsible, if any.
 * - `wished_floors`:   Destinations queued here, handed out one per door opening.
 */
#[derive(Debug, Clone)]
pub struct Floor {
    label: FloorLabel,
    button_pressed: bool,
    waited_elevator: Option<usize>,
    wished_floors: VecDeque<FloorLabel>,
}

impl Floor {
    pub fn new(label: FloorLabel) -> Floor {
        Floor {
            label,
            button_pressed: false,
            waited_elevator: None,
            wished_floors: VecDeque::new(),
        }
    }

    pub fn press_the_button(&mut self) {
        info!("Call button pressed at floor {}", self.label);
        self.button_pressed = true;
    }

    /// Queues a passenger going from this floor to `destination` and calls an elevator.
    pub fn add_wished_floor(&mut self, destination: i64, n_floors: FloorLabel) -> Result<(), ControllerError> {
        let destination = validate_label(destination, n_floors)?;
        info!(
            "Someone at floor {} wants to go to floor {}",
            self.label, destination
        );
        self.wished_floors.push_back(destination);
        self.press_the_button();
        Ok(())
    }

    /**
     * Decides this floor's step from a read-only view of the bank.
     *
     * `is_claimed` tells whether some floor already holds an elevator. It must
     * reflect claims made earlier in the same tick, otherwise two floors could
     * pick the same idle elevator.
     */
    pub fn plan(&self, elevators: &[Elevator], is_claimed: impl Fn(usize) -> bool) -> FloorAction {
        match (self.waited_elevator, self.button_pressed) {
            (None, true) => match self.nearest_free_elevator(elevators, is_claimed) {
                Some(index) => FloorAction::Assign(index),
                None => FloorAction::NoFreeElevator,
            },
            (Some(index), false) => {
                let elevator = match elevators.get(index) {
                    Some(elevator) => elevator,
                    None => return FloorAction::Release(index),
                };
                if elevator.running_floor() != self.label {
                    return FloorAction::Release(index);
                }
                match elevator.state() {
                    StayWithOpenedDoors => match self.wished_floors.front() {
                        Some(&destination) => FloorAction::Dispatch {
                            elevator: index,
                            destination,
                        },
                        None => FloorAction::Idle,
                    },
                    // Door cycle over with nothing left to hand out
                    Waiting => FloorAction::Release(index),
                    _ => FloorAction::Idle,
                }
            }
            _ => FloorAction::Idle,
        }
    }

    /// Closest idle elevator nobody has claimed yet. Ties go to the lowest index.
    pub fn nearest_free_elevator(
        &self,
        elevators: &[Elevator],
        is_claimed: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        let mut nearest: Option<(usize, u8)> = None;
        for (index, elevator) in elevators.iter().enumerate() {
            if elevator.is_busy() || is_claimed(index) {
                continue;
            }
            let distance = elevator.distance_to_floor(self.label);
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }
        nearest.map(|(index, _)| index)
    }

    pub fn display_info(&self, elevators: &[Elevator]) -> String {
        let mut info = format!("Information for floor #{}\n", self.label);
        for elevator in elevators {
            let _ = writeln!(
                info,
                "\t - Elevator #{} at floor {}",
                elevator.id(),
                elevator.running_floor()
            );
        }
        info
    }

    pub fn take_wished_floor(&mut self) -> Option<FloorLabel> {
        self.wished_floors.pop_front()
    }

    pub fn clear_button(&mut self) {
        self.button_pressed = false;
    }

    pub fn set_waited_elevator(&mut self, index: Option<usize>) {
        self.waited_elevator = index;
    }

    pub fn take_waited_elevator(&mut self) -> Option<usize> {
        self.waited_elevator.take()
    }

    /***************************************/
    /*              Getters                */
    /***************************************/
    pub fn label(&self) -> FloorLabel {
        self.label
    }

    pub fn is_button_pressed(&self) -> bool {
        self.button_pressed
    }

    pub fn waited_elevator(&self) -> Option<usize> {
        self.waited_elevator
    }

    pub fn wished_floors(&self) -> impl Iterator<Item = FloorLabel> + '_ {
        self.wished_floors.iter().copied()
    }

    pub fn snapshot(&self, elevators: &[Elevator]) -> FloorSnapshot {
        FloorSnapshot {
            label: self.label,
            button_pressed: self.button_pressed,
            waited_elevator: self
                .waited_elevator
                .and_then(|index| elevators.get(index))
                .map(|elevator| elevator.id()),
            wished_floors: self.wished_floors().collect(),
        }
    }
}
