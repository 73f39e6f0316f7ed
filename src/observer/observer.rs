/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ElevatorId, ElevatorState, FloorLabel};

/***************************************/
/*       Public data structures        */
/***************************************/
/**
 * Everything the kernel reports while a tick runs.
 *
 * Events are produced in tick order: all elevator events of a tick come before
 * any floor event of the same tick.
 */
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TickStarted(u64),
    StateChanged {
        elevator: ElevatorId,
        from: ElevatorState,
        to: ElevatorState,
        floor: FloorLabel,
    },
    DoorsOpening {
        elevator: ElevatorId,
        floor: FloorLabel,
    },
    SearchingElevator(FloorLabel),
    ElevatorAssigned {
        floor: FloorLabel,
        elevator: ElevatorId,
    },
    WishedFloorDispatched {
        floor: FloorLabel,
        elevator: ElevatorId,
        destination: FloorLabel,
    },
    ClaimReleased {
        floor: FloorLabel,
        elevator: ElevatorId,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::TickStarted(tick) => write!(f, "Step #{}", tick),
            Event::StateChanged {
                elevator,
                to,
                floor,
                ..
            } => write!(f, "Elevator #{} is {}. Current floor: {}", elevator, to, floor),
            Event::DoorsOpening { elevator, floor } => write!(
                f,
                "Elevator #{} started opening doors. Current floor: {}",
                elevator, floor
            ),
            Event::SearchingElevator(floor) => {
                write!(f, "Floor {} is searching for a free elevator", floor)
            }
            Event::ElevatorAssigned { floor, elevator } => {
                write!(f, "Floor {} picked elevator #{}", floor, elevator)
            }
            Event::WishedFloorDispatched {
                floor,
                elevator,
                destination,
            } => write!(
                f,
                "Button {} pressed in elevator #{} at floor {}",
                destination, elevator, floor
            ),
            Event::ClaimReleased { floor, elevator } => {
                write!(f, "Floor {} released elevator #{}", floor, elevator)
            }
        }
    }
}

/// Sink for kernel events. Passed into every tick, never stored by the kernel.
pub trait Observer {
    fn notify(&mut self, event: Event);
}

/**
 * Forwards every event over a crossbeam channel.
 *
 * A disconnected receiver is not an error for the simulation: the event is
 * dropped and the tick continues.
 */
pub struct ChannelObserver {
    event_tx: cbc::Sender<Event>,
}

impl ChannelObserver {
    pub fn new(event_tx: cbc::Sender<Event>) -> ChannelObserver {
        ChannelObserver { event_tx }
    }
}

impl Observer for ChannelObserver {
    fn notify(&mut self, event: Event) {
        let _ = self.event_tx.send(event);
    }
}
