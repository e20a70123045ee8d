// Engine modules: frame clock, deferred events, animation commands,
// movement collaborators and their headless stand-ins

pub mod animation;
pub mod clock;
pub mod kinematics;
pub mod movement;
pub mod scheduler;

// Re-export commonly used types
pub use animation::{AnimCommand, AnimParam, AnimationSink, Animator};
pub use clock::{FrameClock, Tick, FIXED_TIMESTEP};
pub use kinematics::{KinematicAgent, SimulatedBody};
pub use movement::{MovementProvider, Navigator};
pub use scheduler::{DeferredQueue, TimerId};
