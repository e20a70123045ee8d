// Character behavior layer: player and bear state machines driven by a
// deterministic frame clock

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod game;

pub use error::BehaviorError;
