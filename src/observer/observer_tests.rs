/*
 * Unit tests for observer module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_channel_observer_forwards_in_order
 * - test_channel_observer_survives_closed_receiver
 * - test_event_display
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod observer_tests {
    use crate::observer::{ChannelObserver, Event, Observer};
    use crate::shared::ElevatorState::{MovingUp, Waiting};
    use crossbeam_channel::unbounded;

    #[test]
    fn test_channel_observer_forwards_in_order() {
        // Arrange
        let (event_tx, event_rx) = unbounded::<Event>();
        let mut observer = ChannelObserver::new(event_tx);

        // Act
        observer.notify(Event::TickStarted(1));
        observer.notify(Event::SearchingElevator(4));

        // Assert
        assert_eq!(event_rx.try_recv(), Ok(Event::TickStarted(1)));
        assert_eq!(event_rx.try_recv(), Ok(Event::SearchingElevator(4)));
        assert!(event_rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_observer_survives_closed_receiver() {
        // Arrange
        let (event_tx, event_rx) = unbounded::<Event>();
        let mut observer = ChannelObserver::new(event_tx);
        drop(event_rx);

        // Act + Assert
        observer.notify(Event::TickStarted(2));
    }

    #[test]
    fn test_event_display() {
        // Arrange
        let moving = Event::StateChanged {
            elevator: 1,
            from: Waiting,
            to: MovingUp,
            floor: 3,
        };
        let dispatched = Event::WishedFloorDispatched {
            floor: 15,
            elevator: 1,
            destination: 1,
        };

        // Assert
        assert_eq!(moving.to_string(), "Elevator #1 is moving up. Current floor: 3");
        assert_eq!(dispatched.to_string(), "Button 1 pressed in elevator #1 at floor 15");
        assert_eq!(Event::TickStarted(7).to_string(), "Step #7");
    }
}
