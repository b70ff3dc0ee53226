//! Poll cycle state machine

pub mod events;
pub mod machine;

pub use events::CycleEvent;
pub use machine::CycleState;
