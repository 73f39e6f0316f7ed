/*
 * Unit tests for controller module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_controller_init
 * - test_controller_rejects_empty_bank
 * - test_controller_rejects_id_overflow
 * - test_controller_floor_lookup
 * - test_controller_next_floor_boundary
 * - test_controller_single_floor_building
 * - test_controller_reference_scenario
 * - test_controller_round_trip
 * - test_controller_queued_passengers
 * - test_controller_no_double_dispatch
 * - test_controller_dispatch_is_idempotent
 * - test_controller_call_button_reset
 * - test_controller_sensor_and_door_buttons
 * - test_controller_snapshot
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod controller_tests {
    use crate::controller::{next_floor_label, ElevatorController};
    use crate::observer::{ChannelObserver, Event};
    use crate::shared::ControllerError;
    use crate::shared::ElevatorState::{ClosingDoors, OpeningDoors, StayWithOpenedDoors, Waiting};
    use crossbeam_channel::unbounded;

    fn run_ticks(controller: &mut ElevatorController, ticks: usize) -> Vec<Event> {
        let (event_tx, event_rx) = unbounded::<Event>();
        let mut observer = ChannelObserver::new(event_tx);
        for _ in 0..ticks {
            controller.update_state(&mut observer);
        }
        drop(observer);
        event_rx.iter().collect()
    }

    fn door_openings(events: &[Event]) -> Vec<(u32, u8)> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::DoorsOpening { elevator, floor } => Some((*elevator, *floor)),
                _ => None,
            })
            .collect()
    }

    fn assert_single_claims(controller: &ElevatorController) {
        for index in 0..controller.elevators().len() {
            let claims = controller
                .floors()
                .iter()
                .filter(|floor| floor.waited_elevator() == Some(index))
                .count();
            assert!(claims <= 1, "elevator {} claimed by {} floors", index, claims);
        }
    }

    #[test]
    fn test_controller_init() {
        // Arrange
        let controller = ElevatorController::new(5, 3, 10).unwrap();

        // Assert
        assert_eq!(controller.n_floors(), 5);
        assert_eq!(controller.tick(), 0);
        let ids: Vec<u32> = controller.elevators().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![10, 11, 12]);
        for elevator in controller.elevators() {
            assert_eq!(elevator.running_floor(), 1);
            assert_eq!(elevator.state(), Waiting);
        }
        let labels: Vec<u8> = controller.floors().iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_controller_rejects_empty_bank() {
        // Act + Assert
        assert_eq!(
            ElevatorController::new(0, 2, 0).err(),
            Some(ControllerError::InvalidBankSize {
                n_floors: 0,
                n_elevators: 2
            })
        );
        assert!(ElevatorController::new(4, 0, 0).is_err());
        assert!(ElevatorController::new(300, 1, 0).is_err());
    }

    #[test]
    fn test_controller_rejects_id_overflow() {
        // Act + Assert
        assert_eq!(
            ElevatorController::new(3, 2, u32::MAX).err(),
            Some(ControllerError::IdOverflow {
                id_offset: u32::MAX,
                n_elevators: 2
            })
        );

        let controller = ElevatorController::new(3, 1, u32::MAX).unwrap();
        assert_eq!(controller.elevator(u32::MAX).unwrap().id(), u32::MAX);
        assert_eq!(
            controller.elevator(0).err(),
            Some(ControllerError::NoSuchElevator { id: 0 })
        );
    }

    #[test]
    fn test_controller_floor_lookup() {
        // Arrange
        let controller = ElevatorController::new(4, 1, 0).unwrap();

        // Act + Assert
        assert_eq!(controller.get_floor_by_label(1).unwrap().label(), 1);
        assert_eq!(controller.get_floor_by_label(4).unwrap().label(), 4);
        assert_eq!(
            controller.get_floor_by_label(0).err(),
            Some(ControllerError::InvalidFloorReference { label: 0, n_floors: 4 })
        );
        assert!(controller.get_floor_by_label(5).is_err());
        assert!(controller.display_info(5).is_err());
    }

    #[test]
    fn test_controller_next_floor_boundary() {
        // Purpose: Verify that the building edges are a boundary, not an error

        // Arrange
        let controller = ElevatorController::new(4, 1, 0).unwrap();

        // Act + Assert
        assert_eq!(controller.get_next_floor(2, true).map(|f| f.label()), Some(3));
        assert_eq!(controller.get_next_floor(2, false).map(|f| f.label()), Some(1));
        assert!(controller.get_next_floor(4, true).is_none());
        assert!(controller.get_next_floor(1, false).is_none());
        assert_eq!(next_floor_label(1, 1, true), None);
        assert_eq!(next_floor_label(1, 1, false), None);
    }

    #[test]
    fn test_controller_single_floor_building() {
        // Purpose: Verify that a single floor building only accepts floor 1

        // Arrange
        let mut controller = ElevatorController::new(1, 1, 0).unwrap();

        // Act + Assert
        assert_eq!(
            controller.add_wished_floors(1, 2),
            Err(ControllerError::InvalidFloorReference { label: 2, n_floors: 1 })
        );
        assert_eq!(
            controller.add_wished_floors(2, 1),
            Err(ControllerError::InvalidFloorReference { label: 2, n_floors: 1 })
        );
        assert!(controller.add_wished_floors(0, 1).is_err());
        assert!(!controller.floors()[0].is_button_pressed());
        assert_eq!(controller.add_wished_floors(1, 1), Ok(()));
    }

    #[test]
    fn test_controller_reference_scenario() {
        // Purpose: Verify the 20 floor, 2 elevator run with requests 1 -> 14 and 15 -> 1

        // Arrange
        let mut controller = ElevatorController::new(20, 2, 0).unwrap();
        controller.add_wished_floors(1, 14).unwrap();
        controller.add_wished_floors(15, 1).unwrap();

        // Act
        let events = run_ticks(&mut controller, 38);

        // Assert
        assert_eq!(
            door_openings(&events),
            vec![(0, 1), (1, 15), (0, 14), (1, 1)]
        );
        for floor in controller.floors() {
            assert!(!floor.is_button_pressed(), "floor {}", floor.label());
            assert_eq!(floor.wished_floors().count(), 0);
            assert_eq!(floor.waited_elevator(), None);
        }
        for elevator in controller.elevators() {
            assert_eq!(elevator.state(), Waiting);
            assert_eq!(elevator.destinations().count(), 0);
        }
        assert_eq!(controller.elevator(0).unwrap().running_floor(), 14);
        assert_eq!(controller.elevator(1).unwrap().running_floor(), 1);
        assert_eq!(controller.tick(), 38);
    }

    #[test]
    fn test_controller_round_trip() {
        // Purpose: Verify that a passenger is picked up at the origin and dropped at the destination

        // Arrange
        let mut controller = ElevatorController::new(8, 1, 0).unwrap();
        controller.add_wished_floors(4, 7).unwrap();

        // Act
        let pickup = run_ticks(&mut controller, 6);

        // Assert
        assert_eq!(door_openings(&pickup), vec![(0, 4)]);
        let origin = &controller.floors()[3];
        assert!(!origin.is_button_pressed());
        assert_eq!(origin.waited_elevator(), None);
        assert!(controller.elevator(0).unwrap().has_destination(7));

        // Act
        let drop_off = run_ticks(&mut controller, 14);

        // Assert
        assert_eq!(door_openings(&drop_off), vec![(0, 7)]);
        let elevator = controller.elevator(0).unwrap();
        assert_eq!(elevator.running_floor(), 7);
        assert_eq!(elevator.state(), Waiting);
    }

    #[test]
    fn test_controller_queued_passengers() {
        // Purpose: Verify that every queued passenger gets a door opening of their own

        // Arrange
        let mut controller = ElevatorController::new(6, 1, 0).unwrap();
        controller.add_wished_floors(1, 4).unwrap();
        controller.add_wished_floors(1, 6).unwrap();

        // Act
        let pickup = run_ticks(&mut controller, 2);

        // Assert
        assert!(controller.floors()[0].is_button_pressed());
        assert_eq!(controller.floors()[0].wished_floors().collect::<Vec<_>>(), vec![6]);

        // Act
        let rest = run_ticks(&mut controller, 23);

        // Assert
        assert_eq!(door_openings(&pickup), vec![(0, 1)]);
        assert_eq!(door_openings(&rest), vec![(0, 1), (0, 4), (0, 6)]);
        assert!(!controller.floors()[0].is_button_pressed());
        assert_eq!(controller.floors()[0].wished_floors().count(), 0);
        assert_eq!(controller.elevator(0).unwrap().state(), Waiting);
    }

    #[test]
    fn test_controller_no_double_dispatch() {
        // Purpose: Verify that no elevator is ever claimed by two floors

        // Arrange
        let mut controller = ElevatorController::new(12, 3, 0).unwrap();
        let requests = [(2, 9), (9, 2), (5, 1), (7, 8), (12, 3), (3, 11), (6, 6)];
        for (origin, destination) in requests {
            controller.add_wished_floors(origin, destination).unwrap();
        }
        let (event_tx, event_rx) = unbounded::<Event>();
        let mut observer = ChannelObserver::new(event_tx);

        // Act + Assert
        for _ in 0..150 {
            controller.update_state(&mut observer);
            assert_single_claims(&controller);
        }
        drop(observer);

        let events: Vec<Event> = event_rx.iter().collect();
        let openings = door_openings(&events);
        for (origin, destination) in requests {
            let picked = openings.iter().position(|&(_, floor)| floor == origin as u8);
            assert!(picked.is_some(), "floor {} never served", origin);
            assert!(
                openings[picked.unwrap()..]
                    .iter()
                    .any(|&(_, floor)| floor == destination as u8),
                "destination {} never reached",
                destination
            );
        }
        for floor in controller.floors() {
            assert!(!floor.is_button_pressed());
            assert_eq!(floor.wished_floors().count(), 0);
        }
    }

    #[test]
    fn test_controller_dispatch_is_idempotent() {
        // Purpose: Verify that running the dispatch twice assigns nothing twice

        // Arrange
        let mut controller = ElevatorController::new(10, 2, 0).unwrap();
        controller.add_wished_floors(5, 1).unwrap();
        controller.add_wished_floors(6, 1).unwrap();
        controller.add_wished_floors(7, 1).unwrap();
        let (event_tx, _event_rx) = unbounded::<Event>();
        let mut observer = ChannelObserver::new(event_tx);

        // Act
        controller.update_floors(&mut observer);
        let first: Vec<_> = controller.floors().iter().map(|f| f.waited_elevator()).collect();
        controller.update_floors(&mut observer);
        let second: Vec<_> = controller.floors().iter().map(|f| f.waited_elevator()).collect();

        // Assert
        assert_eq!(first, second);
        assert_eq!(first[4], Some(0));
        assert_eq!(first[5], Some(1));
        assert_eq!(first[6], None);
        assert_single_claims(&controller);
        assert!(controller.is_elevator_bused(0));
        assert!(controller.is_elevator_bused(1));
        assert_eq!(controller.elevators()[0].running_destination(), Some(5));
    }

    #[test]
    fn test_controller_call_button_reset() {
        // Purpose: Verify that a reset detaches the floor, which then calls again

        // Arrange
        let mut controller = ElevatorController::new(10, 1, 0).unwrap();
        controller.add_wished_floors(6, 2).unwrap();
        run_ticks(&mut controller, 3);
        assert_eq!(controller.floors()[5].waited_elevator(), Some(0));
        assert_eq!(controller.elevator(0).unwrap().running_floor(), 2);

        // Act
        controller.press_call_button(0).unwrap();

        // Assert
        let elevator = controller.elevator(0).unwrap();
        assert_eq!(elevator.state(), Waiting);
        assert_eq!(elevator.destinations().count(), 0);
        assert_eq!(controller.floors()[5].waited_elevator(), None);
        assert!(controller.floors()[5].is_button_pressed());
        assert_eq!(
            controller.press_call_button(5),
            Err(ControllerError::NoSuchElevator { id: 5 })
        );

        // Act
        run_ticks(&mut controller, 1);

        // Assert
        assert_eq!(controller.floors()[5].waited_elevator(), Some(0));
        assert!(controller.elevator(0).unwrap().has_destination(6));
    }

    #[test]
    fn test_controller_sensor_and_door_buttons() {
        // Purpose: Verify the per-elevator API addressed by id

        // Arrange
        let mut controller = ElevatorController::new(5, 2, 10).unwrap();

        // Act + Assert
        assert_eq!(controller.press_opening_doors_button(11), Ok(true));
        assert_eq!(controller.elevator(11).unwrap().state(), OpeningDoors);
        assert_eq!(controller.press_closing_doors_button(10), Ok(false));
        assert!(controller.elevator(9).is_err());
        assert!(controller.press_floor_button(12, 2).is_err());
        assert!(controller.press_floor_button(10, 6).is_err());

        run_ticks(&mut controller, 1);
        assert_eq!(controller.elevator(11).unwrap().state(), StayWithOpenedDoors);

        controller.set_move_detected(11, true).unwrap();
        run_ticks(&mut controller, 2);
        assert_eq!(controller.elevator(11).unwrap().state(), StayWithOpenedDoors);

        controller.set_move_detected(11, false).unwrap();
        assert_eq!(controller.press_closing_doors_button(11), Ok(true));
        assert_eq!(controller.elevator(11).unwrap().state(), ClosingDoors);

        controller.press_floor_button(10, 3).unwrap();
        run_ticks(&mut controller, 3);
        let elevator = controller.elevator(10).unwrap();
        assert_eq!(elevator.running_floor(), 3);
        assert_eq!(elevator.state(), OpeningDoors);
    }

    #[test]
    fn test_controller_snapshot() {
        // Purpose: Verify the snapshot handed to external displays

        // Arrange
        let mut controller = ElevatorController::new(20, 2, 0).unwrap();
        controller.add_wished_floors(1, 14).unwrap();
        controller.add_wished_floors(15, 1).unwrap();

        // Act
        run_ticks(&mut controller, 1);
        let snapshot = controller.snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();

        // Assert
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.elevators[0].state, OpeningDoors);
        assert_eq!(snapshot.floors[0].waited_elevator, Some(0));
        assert_eq!(snapshot.floors[0].wished_floors, vec![14]);
        assert_eq!(snapshot.floors[14].waited_elevator, Some(1));
        assert_eq!(json["elevators"][1]["destinations"][0], 15);
        assert_eq!(json["floors"][14]["buttonPressed"], true);
    }
}
