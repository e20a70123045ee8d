// Game layer: the state machine engine, the actors built on it and the
// encounter that ties them to one clock

pub mod bear;
pub mod encounter;
pub mod fsm;
pub mod player;

pub use encounter::Encounter;
pub use fsm::{State, StateMachine, Transition};

/// Unique identifier for an actor
pub type ActorId = u32;
