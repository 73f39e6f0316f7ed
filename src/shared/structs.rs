/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
pub type FloorLabel = u8;
pub type ElevatorId = u32;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElevatorState {
    Waiting,
    MovingUp,
    MovingDown,
    OpeningDoors,
    StayWithOpenedDoors,
    ClosingDoors,
}

impl ElevatorState {
    /**
     * Edges of the elevator state machine.
     *
     * Staying in a moving state (one more floor) and staying with opened doors
     * (sensor still triggered) are listed as explicit self-loops. Every other
     * pair is illegal. The emergency reset does not go through this table.
     */
    pub fn can_transition_to(&self, next: ElevatorState) -> bool {
        use ElevatorState::*;

        match (*self, next) {
            (Waiting, MovingUp) | (Waiting, MovingDown) | (Waiting, OpeningDoors) => true,
            (MovingUp, MovingUp) | (MovingUp, Waiting) | (MovingUp, OpeningDoors) => true,
            (MovingDown, MovingDown) | (MovingDown, Waiting) | (MovingDown, OpeningDoors) => true,
            (OpeningDoors, StayWithOpenedDoors) => true,
            (StayWithOpenedDoors, StayWithOpenedDoors) | (StayWithOpenedDoors, ClosingDoors) => true,
            (ClosingDoors, Waiting) | (ClosingDoors, OpeningDoors) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ElevatorState::Waiting => "waiting for a command",
            ElevatorState::MovingUp => "moving up",
            ElevatorState::MovingDown => "moving down",
            ElevatorState::OpeningDoors => "opening doors",
            ElevatorState::StayWithOpenedDoors => "standing with opened doors",
            ElevatorState::ClosingDoors => "closing doors",
        };
        write!(f, "{}", text)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ElevatorSnapshot {
    pub id: ElevatorId,
    pub floor: FloorLabel,
    pub state: ElevatorState,
    #[serde(rename = "runningDestination")]
    pub running_destination: Option<FloorLabel>,
    pub destinations: Vec<FloorLabel>,
    #[serde(rename = "moveDetected")]
    pub move_detected: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FloorSnapshot {
    pub label: FloorLabel,
    #[serde(rename = "buttonPressed")]
    pub button_pressed: bool,
    #[serde(rename = "waitedElevator")]
    pub waited_elevator: Option<ElevatorId>,
    #[serde(rename = "wishedFloors")]
    pub wished_floors: Vec<FloorLabel>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BankSnapshot {
    pub tick: u64,
    pub elevators: Vec<ElevatorSnapshot>,
    pub floors: Vec<FloorSnapshot>,
}
