// Deterministic stand-ins for the locomotion and navigation collaborators
//
// These are not a physics engine: a flat ground plane, constant gravity and
// straight-line steering are enough to drive the behavior layer headlessly.

use glam::Vec3;

use super::movement::{MovementProvider, Navigator};

/// Default gravity, in units per second squared
pub const GRAVITY: f32 = 9.81;

/// Height of the ground plane
const GROUND_HEIGHT: f32 = 0.0;

/// Input magnitudes below this count as "no input"
const INPUT_DEADZONE: f32 = 0.1;

/// Player-like body with planar movement and jumping
#[derive(Debug, Clone)]
pub struct SimulatedBody {
    position: Vec3,
    velocity: Vec3,
    /// Desired planar direction, normalized or zero
    move_input: Vec3,
    /// Ground speed in units per second
    move_speed: f32,
    /// Fraction of ground speed available in the air
    air_multiplier: f32,
    /// Upward velocity applied on jump
    jump_force: f32,
    grounded: bool,
}

impl SimulatedBody {
    /// Create a body standing at `position`
    pub fn new(position: Vec3, move_speed: f32, air_multiplier: f32, jump_force: f32) -> Self {
        Self {
            grounded: position.y <= GROUND_HEIGHT,
            position,
            velocity: Vec3::ZERO,
            move_input: Vec3::ZERO,
            move_speed,
            air_multiplier,
            jump_force,
        }
    }

    /// Set the desired movement direction on the ground plane
    pub fn set_move_input(&mut self, direction: Vec3) {
        let planar = Vec3::new(direction.x, 0.0, direction.z);
        self.move_input = if planar.length() > INPUT_DEADZONE {
            planar.normalize()
        } else {
            Vec3::ZERO
        };
    }

    /// Integrate one frame
    pub fn step(&mut self, dt: f32) {
        let speed = if self.grounded {
            self.move_speed
        } else {
            self.move_speed * self.air_multiplier
        };
        self.velocity.x = self.move_input.x * speed;
        self.velocity.z = self.move_input.z * speed;

        if !self.grounded {
            self.velocity.y -= GRAVITY * dt;
        }

        self.position += self.velocity * dt;

        if self.position.y <= GROUND_HEIGHT {
            self.position.y = GROUND_HEIGHT;
            self.velocity.y = self.velocity.y.max(0.0);
            self.grounded = self.velocity.y <= 0.0;
        } else {
            self.grounded = false;
        }
    }

    /// Teleport the body, clearing its velocity
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.grounded = position.y <= GROUND_HEIGHT;
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

impl MovementProvider for SimulatedBody {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn current_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn jump(&mut self) {
        if self.grounded {
            self.velocity.y = self.jump_force;
            self.grounded = false;
        }
    }
}

/// Navigation agent that walks straight at its destination
#[derive(Debug, Clone)]
pub struct KinematicAgent {
    position: Vec3,
    destination: Option<Vec3>,
    speed: f32,
    stopping_distance: f32,
    stopped: bool,
}

impl KinematicAgent {
    /// Create an idle agent at `position`
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            destination: None,
            speed: 0.0,
            stopping_distance: 0.0,
            stopped: true,
        }
    }

    /// Move towards the destination for one frame
    pub fn step(&mut self, dt: f32) {
        if self.stopped {
            return;
        }
        let Some(destination) = self.destination else {
            return;
        };

        let offset = destination - self.position;
        let distance = offset.length();
        let travel = distance - self.stopping_distance;
        if travel <= 0.0 {
            return;
        }

        let step = (self.speed * dt).min(travel);
        self.position += offset / distance * step;
    }

    /// Whether the agent is halted
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Current destination, if any
    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    /// Current travel speed
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Teleport the agent
    pub fn warp(&mut self, position: Vec3) {
        self.position = position;
    }
}

impl Navigator for KinematicAgent {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
        self.stopped = false;
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn resume(&mut self) {
        self.stopped = false;
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    fn set_stopping_distance(&mut self, distance: f32) {
        self.stopping_distance = distance.max(0.0);
    }

    fn remaining_distance(&self) -> f32 {
        self.destination
            .map(|destination| self.position.distance(destination))
            .unwrap_or(0.0)
    }
}
