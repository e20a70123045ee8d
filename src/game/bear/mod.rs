// Bear enemy
//
// - `context`: perception, pose and the combat step the states drive
// - `state`: the Sleeping/WakingUp/Combat/ReturningToSpawn transition table
// - `controller`: per-frame target observation, hits and damage
// - `health`: hit points
// - `config`: tunables

pub mod config;
pub mod context;
pub mod controller;
pub mod health;
pub mod state;

pub use config::{BearConfig, BASE_BEAR};
pub use context::BearContext;
pub use controller::BearController;
pub use health::{BearHealth, DamageOutcome};
pub use state::BearState;
