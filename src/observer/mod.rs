pub mod observer;
pub mod observer_tests;

pub use observer::ChannelObserver;
pub use observer::Event;
pub use observer::Observer;
