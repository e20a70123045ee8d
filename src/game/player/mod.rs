// Player character
//
// - `animator`: facts, sticky guards and guarded animation commands
// - `state`: the Idle/Move/Jump/Victory/Die transition table
// - `controller`: per-frame intent, jump cooldown and double-jump timers
// - `config`: tunables

pub mod animator;
pub mod config;
pub mod controller;
pub mod state;

pub use animator::PlayerAnimator;
pub use config::{PlayerConfig, BASE_PLAYER};
pub use controller::{PlayerController, PlayerIntent};
pub use state::PlayerState;
