// What the bear states read and command
//
// The controller refreshes the target observation once per frame before the
// state machine runs, so every rule in a frame sees the same distance.

use glam::{Quat, Vec3};

use crate::core::math::{angle_between, approx_equal, flat_direction, look_rotation, turn_towards};
use crate::engine::animation::{reset_triggers, AnimParam, AnimationSink, Animator};
use crate::engine::movement::Navigator;

use super::config::BearConfig;

/// Facing counts as settled below this angle, in radians
const FACING_EPSILON: f32 = 1e-3;

/// Slack on the "arrived home" test so a navigator that halts exactly at its
/// stopping distance still counts as arrived
const ARRIVAL_TOLERANCE: f32 = 1e-3;

#[derive(Debug)]
pub struct BearContext<N, A = Animator> {
    pub(super) config: BearConfig,
    nav: N,
    sink: A,
    rng: fastrand::Rng,

    // Pose
    rotation: Quat,
    /// Rotation the bear is gradually turning towards
    facing_goal: Option<Quat>,
    spawn_position: Vec3,
    spawn_rotation: Quat,

    // Target observation for the current frame
    target: Vec3,
    distance_to_target: f32,

    // Combat
    /// Clock time the next attack becomes available
    next_attack_time: f32,
    /// Whether the navigator is currently pursuing the target
    chasing: bool,
    attacks: u32,
}

impl<N: Navigator, A: AnimationSink> BearContext<N, A> {
    pub fn new(config: BearConfig, mut nav: N, sink: A, rotation: Quat, seed: u64) -> Self {
        nav.set_stopping_distance(config.stopping_distance);
        nav.set_speed(config.patrol_speed);
        let spawn_position = nav.position();

        Self {
            config,
            nav,
            sink,
            rng: fastrand::Rng::with_seed(seed),
            rotation,
            facing_goal: None,
            spawn_position,
            spawn_rotation: rotation,
            target: spawn_position,
            distance_to_target: f32::INFINITY,
            next_attack_time: 0.0,
            chasing: false,
            attacks: 0,
        }
    }

    pub fn config(&self) -> &BearConfig {
        &self.config
    }

    pub fn nav(&self) -> &N {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut N {
        &mut self.nav
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn facing_goal(&self) -> Option<Quat> {
        self.facing_goal
    }

    pub fn spawn_position(&self) -> Vec3 {
        self.spawn_position
    }

    pub fn spawn_rotation(&self) -> Quat {
        self.spawn_rotation
    }

    /// Distance to the target observed this frame
    pub fn distance_to_target(&self) -> f32 {
        self.distance_to_target
    }

    pub fn next_attack_time(&self) -> f32 {
        self.next_attack_time
    }

    pub fn is_chasing(&self) -> bool {
        self.chasing
    }

    /// Number of attacks launched so far
    pub fn attack_count(&self) -> u32 {
        self.attacks
    }

    pub fn distance_to_spawn(&self) -> f32 {
        self.nav.position().distance(self.spawn_position)
    }

    pub fn is_home(&self) -> bool {
        self.distance_to_spawn() <= self.config.stopping_distance + ARRIVAL_TOLERANCE
    }

    /// Record where the target is this frame
    pub(super) fn observe_target(&mut self, target: Vec3) {
        self.target = target;
        self.distance_to_target = self.nav.position().distance(target);
    }

    /// Clear every bear trigger, then fire `param`
    pub(super) fn play(&mut self, param: AnimParam) {
        reset_triggers(&mut self.sink, &AnimParam::BEAR_TRIGGERS);
        self.sink.set_trigger(param);
    }

    /// Fire a trigger without clearing the others
    pub(super) fn play_overlay(&mut self, param: AnimParam) {
        self.sink.set_trigger(param);
    }

    pub(super) fn set_speed(&mut self, speed: f32) {
        self.nav.set_speed(speed);
    }

    /// Stop navigating
    pub(super) fn halt(&mut self) {
        self.nav.stop();
        self.chasing = false;
    }

    /// Chase the target observed this frame
    pub(super) fn engage(&mut self) {
        self.face_target();
        self.nav.set_destination(self.target);
        self.nav.resume();
        self.chasing = true;
    }

    pub(super) fn head_home(&mut self) {
        self.chasing = false;
        self.nav.resume();
        self.nav.set_destination(self.spawn_position);
    }

    /// Start turning back to the rotation the bear spawned with
    pub(super) fn restore_facing(&mut self) {
        self.facing_goal = Some(self.spawn_rotation);
    }

    fn face_target(&mut self) {
        if let Some(direction) = flat_direction(self.nav.position(), self.target) {
            self.facing_goal = Some(look_rotation(direction));
        }
    }

    /// One frame of combat: face, then move, then attack
    pub(super) fn fight(&mut self, now: f32) {
        let target = self.target;
        self.face_target();

        if self.distance_to_target > self.config.attack_range {
            if !self.chasing {
                self.play(AnimParam::Run);
                self.engage();
            }
            self.nav.set_destination(target);
        } else {
            self.halt();
        }

        if self.distance_to_target <= self.config.attack_range && now >= self.next_attack_time {
            self.attack(now);
        }
    }

    fn attack(&mut self, now: f32) {
        let param = if self.rng.bool() {
            AnimParam::Attack1
        } else {
            AnimParam::Attack2
        };
        self.play(param);
        self.next_attack_time = now + self.config.attack_cooldown;
        self.attacks += 1;
        log::debug!("Bear attacks with {} at {:.2}", param, now);
    }

    /// Turn towards the facing goal by one frame
    pub(super) fn apply_facing(&mut self, dt: f32) {
        let Some(goal) = self.facing_goal else {
            return;
        };
        self.rotation = turn_towards(self.rotation, goal, dt, self.config.turn_speed);
        if approx_equal(angle_between(self.rotation, goal), 0.0, FACING_EPSILON) {
            self.facing_goal = None;
        }
    }
}
