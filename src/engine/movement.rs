// Movement and navigation collaborator interfaces
//
// Locomotion and path following live outside the behavior layer. The state
// machines only see these narrow views of them.

use glam::Vec3;

/// Physics-driven locomotion of a player-like actor
pub trait MovementProvider {
    /// Whether the actor is standing on ground this frame
    fn is_grounded(&self) -> bool;

    /// Horizontal movement magnitude, in units per second
    fn current_speed(&self) -> f32;

    /// World position of the actor
    fn position(&self) -> Vec3;

    /// Apply a jump impulse
    fn jump(&mut self) {}
}

/// Path-following agent for AI-controlled actors
pub trait Navigator {
    /// World position of the agent
    fn position(&self) -> Vec3;

    /// Start or redirect travel towards `destination`
    fn set_destination(&mut self, destination: Vec3);

    /// Halt travel, keeping the current destination
    fn stop(&mut self);

    /// Continue travel after a `stop`
    fn resume(&mut self);

    /// Set travel speed, in units per second
    fn set_speed(&mut self, speed: f32);

    /// Set how close to the destination the agent stops
    fn set_stopping_distance(&mut self, distance: f32);

    /// Distance left to the current destination (0.0 without one)
    fn remaining_distance(&self) -> f32;
}
