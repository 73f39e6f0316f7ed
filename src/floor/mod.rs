pub mod floor;

pub use floor::Floor;
pub use floor::FloorAction;
