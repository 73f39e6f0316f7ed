/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ElevatorId, FloorLabel};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// A floor label outside `1..=n_floors` was handed to a request API.
    InvalidFloorReference { label: i64, n_floors: FloorLabel },

    /// No elevator in this bank carries the id.
    NoSuchElevator { id: ElevatorId },

    /// A bank needs at least one floor and one elevator.
    InvalidBankSize { n_floors: usize, n_elevators: usize },

    /// The elevator ids `id_offset..id_offset + n_elevators` do not fit in an `ElevatorId`.
    IdOverflow { id_offset: ElevatorId, n_elevators: usize },
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::InvalidFloorReference { label, n_floors } => write!(
                f,
                "Invalid floor: {} (valid floors are 1..={})",
                label, n_floors
            ),
            ControllerError::NoSuchElevator { id } => write!(f, "No elevator with id {}", id),
            ControllerError::InvalidBankSize {
                n_floors,
                n_elevators,
            } => write!(
                f,
                "Invalid bank size: {} floors, {} elevators (both must be at least 1)",
                n_floors, n_elevators
            ),
            ControllerError::IdOverflow {
                id_offset,
                n_elevators,
            } => write!(
                f,
                "Elevator ids overflow: {} elevators starting at id {}",
                n_elevators, id_offset
            ),
        }
    }
}

impl std::error::Error for ControllerError {}

/***************************************/
/*             Public API              */
/***************************************/
/// Checks a caller supplied label against the building and narrows it to a `FloorLabel`.
pub fn validate_label(label: i64, n_floors: FloorLabel) -> Result<FloorLabel, ControllerError> {
    if label < 1 || label > n_floors as i64 {
        return Err(ControllerError::InvalidFloorReference { label, n_floors });
    }
    Ok(label as FloorLabel)
}
