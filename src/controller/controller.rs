/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::Elevator;
use crate::floor::{Floor, FloorAction};
use crate::observer::{Event, Observer};
use crate::shared::{
    validate_label, BankSnapshot, ControllerError, ElevatorId, FloorLabel,
};

/***************************************/
/*             Public API              */
/***************************************/
/**
 * Owns one bank of elevators and the floors they serve, and runs the tick.
 *
 * Floors refer to elevators by index into `elevators`. Both collections are
 * built once in `new` and never resized, so an index handed out stays valid.
 * Every change that links a floor and an elevator goes through this struct.
 *
 * # Fields
 * - `floors`:      Floors ordered by label, `floors[0]` is floor 1.
 * - `elevators`:   Elevators ordered by id, `elevators[0]` has id `id_offset`.
 * - `id_offset`:   First elevator id, lets several banks share one id space.
 * - `tick`:        Number of completed calls to `update_state`.
 */
pub struct ElevatorController {
    floors: Vec<Floor>,
    elevators: Vec<Elevator>,
    id_offset: ElevatorId,
    tick: u64,
}

/// Neighbouring floor label, `None` past the top or bottom of the building.
pub fn next_floor_label(n_floors: FloorLabel, label: FloorLabel, moving_up: bool) -> Option<FloorLabel> {
    if label < 1 || label > n_floors {
        return None;
    }
    if moving_up {
        (label < n_floors).then(|| label + 1)
    } else {
        (label > 1).then(|| label - 1)
    }
}

impl ElevatorController {
    pub fn new(
        n_floors: usize,
        n_elevators: usize,
        id_offset: ElevatorId,
    ) -> Result<ElevatorController, ControllerError> {
        if n_floors < 1 || n_floors > FloorLabel::MAX as usize || n_elevators < 1 {
            return Err(ControllerError::InvalidBankSize {
                n_floors,
                n_elevators,
            });
        }

        let last_id = ElevatorId::try_from(n_elevators - 1)
            .ok()
            .and_then(|last| id_offset.checked_add(last));
        if last_id.is_none() {
            return Err(ControllerError::IdOverflow {
                id_offset,
                n_elevators,
            });
        }

        let elevators = (0..n_elevators)
            .map(|index| Elevator::new(id_offset + index as ElevatorId, 1))
            .collect();
        let floors = (1..=n_floors)
            .map(|label| Floor::new(label as FloorLabel))
            .collect();

        info!(
            "Elevator bank ready: {} floors, {} elevators, first id {}",
            n_floors, n_elevators, id_offset
        );

        Ok(ElevatorController {
            floors,
            elevators,
            id_offset,
            tick: 0,
        })
    }

    /// Advances the whole bank by one tick: every elevator first, then every floor.
    pub fn update_state(&mut self, observer: &mut dyn Observer) {
        self.tick += 1;
        observer.notify(Event::TickStarted(self.tick));

        self.update_elevators(observer);
        self.update_floors(observer);
    }

    pub fn update_elevators(&mut self, observer: &mut dyn Observer) {
        for index in 0..self.elevators.len() {
            if let Some(label) = self.elevators[index].update(&self.floors, observer) {
                self.claim_on_arrival(index, label);
            }
        }
    }

    /// Dispatch and arrival reconciliation for every floor, in label order.
    pub fn update_floors(&mut self, observer: &mut dyn Observer) {
        for index in 0..self.floors.len() {
            let action = self.floors[index].plan(&self.elevators, |elevator| self.is_elevator_bused(elevator));
            self.apply_floor_action(index, action, observer);
        }
    }

    /***************************************/
    /*           Request API               */
    /***************************************/
    pub fn add_wished_floors(&mut self, origin: i64, destination: i64) -> Result<(), ControllerError> {
        let n_floors = self.n_floors();
        let origin = validate_label(origin, n_floors)?;
        self.floors[origin as usize - 1].add_wished_floor(destination, n_floors)
    }

    pub fn press_floor_button(&mut self, elevator: ElevatorId, label: i64) -> Result<(), ControllerError> {
        let n_floors = self.n_floors();
        let index = self.elevator_index(elevator)?;
        self.elevators[index].press_floor_button(label, n_floors)
    }

    /// Emergency reset of one elevator. Any floor still waiting on it lets go,
    /// so its call is dispatched again on the next tick.
    pub fn press_call_button(&mut self, elevator: ElevatorId) -> Result<(), ControllerError> {
        let index = self.elevator_index(elevator)?;
        self.elevators[index].reset();

        for floor in 0..self.floors.len() {
            if self.floors[floor].waited_elevator() == Some(index) {
                self.release_claim(floor);
                debug!(
                    "Floor {} detached from elevator #{} after reset",
                    floor + 1,
                    elevator
                );
            }
        }
        Ok(())
    }

    pub fn press_opening_doors_button(&mut self, elevator: ElevatorId) -> Result<bool, ControllerError> {
        let index = self.elevator_index(elevator)?;
        Ok(self.elevators[index].press_opening_doors_button())
    }

    pub fn press_closing_doors_button(&mut self, elevator: ElevatorId) -> Result<bool, ControllerError> {
        let index = self.elevator_index(elevator)?;
        Ok(self.elevators[index].press_closing_doors_button())
    }

    pub fn set_move_detected(&mut self, elevator: ElevatorId, value: bool) -> Result<(), ControllerError> {
        let index = self.elevator_index(elevator)?;
        self.elevators[index].set_move_detected(value);
        Ok(())
    }

    /***************************************/
    /*            Lookup API               */
    /***************************************/
    pub fn get_floor_by_label(&self, label: i64) -> Result<&Floor, ControllerError> {
        let label = validate_label(label, self.n_floors())?;
        Ok(&self.floors[label as usize - 1])
    }

    #[allow(dead_code)]
    pub fn get_next_floor(&self, label: FloorLabel, moving_up: bool) -> Option<&Floor> {
        next_floor_label(self.n_floors(), label, moving_up).map(|next| &self.floors[next as usize - 1])
    }

    /// True when some floor currently holds the elevator at `index`.
    pub fn is_elevator_bused(&self, index: usize) -> bool {
        self.floors
            .iter()
            .any(|floor| floor.waited_elevator() == Some(index))
    }

    pub fn elevator(&self, id: ElevatorId) -> Result<&Elevator, ControllerError> {
        let index = self.elevator_index(id)?;
        Ok(&self.elevators[index])
    }

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn n_floors(&self) -> FloorLabel {
        self.floors.len() as FloorLabel
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn display_info(&self, label: i64) -> Result<String, ControllerError> {
        Ok(self.get_floor_by_label(label)?.display_info(&self.elevators))
    }

    pub fn snapshot(&self) -> BankSnapshot {
        BankSnapshot {
            tick: self.tick,
            elevators: self.elevators.iter().map(Elevator::snapshot).collect(),
            floors: self
                .floors
                .iter()
                .map(|floor| floor.snapshot(&self.elevators))
                .collect(),
        }
    }

    /***************************************/
    /*          Private functions          */
    /***************************************/
    fn elevator_index(&self, id: ElevatorId) -> Result<usize, ControllerError> {
        id.checked_sub(self.id_offset)
            .map(|index| index as usize)
            .filter(|&index| index < self.elevators.len())
            .ok_or(ControllerError::NoSuchElevator { id })
    }

    // The floor's call is consumed and the arriving elevator takes over its
    // claim. A floor further away that still waits on this elevator lets go and
    // dispatches again, an elevator is held by one floor at a time.
    fn claim_on_arrival(&mut self, elevator: usize, label: FloorLabel) {
        let floor = label as usize - 1;
        for other in 0..self.floors.len() {
            if other != floor && self.floors[other].waited_elevator() == Some(elevator) {
                self.release_claim(other);
                debug!(
                    "Floor {} gave up elevator #{}, it stopped at floor {}",
                    other + 1,
                    self.elevators[elevator].id(),
                    label
                );
            }
        }
        self.release_claim(floor);
        self.floors[floor].clear_button();
        self.floors[floor].set_waited_elevator(Some(elevator));
    }

    fn release_claim(&mut self, floor: usize) -> Option<usize> {
        let elevator = self.floors[floor].take_waited_elevator()?;
        let label = self.floors[floor].label();
        if let Some(elevator) = self.elevators.get_mut(elevator) {
            elevator.remove_destination(label);
        }
        Some(elevator)
    }

    fn apply_floor_action(&mut self, floor: usize, action: FloorAction, observer: &mut dyn Observer) {
        let label = self.floors[floor].label();

        match action {
            FloorAction::Idle => {}
            FloorAction::NoFreeElevator => {
                observer.notify(Event::SearchingElevator(label));
            }
            FloorAction::Assign(elevator) => {
                observer.notify(Event::SearchingElevator(label));
                self.floors[floor].set_waited_elevator(Some(elevator));
                self.elevators[elevator].add_destination(label);
                observer.notify(Event::ElevatorAssigned {
                    floor: label,
                    elevator: self.elevators[elevator].id(),
                });
            }
            FloorAction::Dispatch {
                elevator,
                destination,
            } => {
                let n_floors = self.n_floors();
                self.floors[floor].take_wished_floor();
                if let Err(e) = self.elevators[elevator].press_floor_button(destination as i64, n_floors) {
                    warn!("Dropped wished floor at floor {}: {}", label, e);
                }
                self.elevators[elevator].set_move_detected(false);
                self.release_claim(floor);
                // One destination per door opening, whoever is left calls again
                if self.floors[floor].wished_floors().next().is_some() {
                    self.floors[floor].press_the_button();
                }
                observer.notify(Event::WishedFloorDispatched {
                    floor: label,
                    elevator: self.elevators[elevator].id(),
                    destination,
                });
            }
            FloorAction::Release(elevator) => {
                self.release_claim(floor);
                if let Some(elevator) = self.elevators.get(elevator) {
                    observer.notify(Event::ClaimReleased {
                        floor: label,
                        elevator: elevator.id(),
                    });
                }
            }
        }
    }

    /***************************************/
    /*           Test functions            */
    /***************************************/
    #[cfg(test)]
    pub fn test_elevator_mut(&mut self, index: usize) -> &mut Elevator {
        &mut self.elevators[index]
    }
}
