// Player controller: per-frame intent, jump timing and the state machine

use glam::{Quat, Vec3};

use crate::core::math::{flat_direction, look_rotation, turn_towards};
use crate::engine::animation::{AnimationSink, Animator};
use crate::engine::clock::Tick;
use crate::engine::movement::MovementProvider;
use crate::engine::scheduler::{DeferredQueue, TimerId};
use crate::game::fsm::{StateMachine, Transition};
use crate::game::ActorId;

use super::animator::PlayerAnimator;
use super::config::PlayerConfig;
use super::state::PlayerState;

/// Planar input magnitude below which the player counts as standing still
const MOVE_DEADZONE: f32 = 0.1;

/// What the player wants to do this frame
///
/// Produced by whatever maps devices to intent; this crate never reads
/// devices itself.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    /// Desired movement direction on the ground plane (length <= 1)
    pub direction: Vec3,
    /// Jump button held
    pub jump: bool,
    /// Victory requested this frame
    pub victory: bool,
    /// Death requested this frame
    pub die: bool,
}

impl PlayerIntent {
    /// Intent to walk in `direction`
    pub fn walk(direction: Vec3) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Check if the intent asks for movement
    pub fn is_moving(&self) -> bool {
        Vec3::new(self.direction.x, 0.0, self.direction.z).length() > MOVE_DEADZONE
    }
}

/// Deferred player events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerTimer {
    /// Jump cooldown elapsed
    JumpReady,
    /// Double-jump flag should drop
    DoubleJumpWindow,
}

/// Player character: facts, behavior state and deferred timers
#[derive(Debug)]
pub struct PlayerController<M, A = Animator> {
    id: ActorId,
    config: PlayerConfig,
    animator: PlayerAnimator<M, A>,
    machine: StateMachine<PlayerState>,
    timers: DeferredQueue<PlayerTimer>,
    jump_cooldown: Option<TimerId>,
    /// Pending reset of the current jump's double-jump flag
    double_jump_window: Option<TimerId>,
    ready_to_jump: bool,
    jump_held: bool,
    facing: Quat,
}

impl<M: MovementProvider, A: AnimationSink> PlayerController<M, A> {
    /// Create a player and enter `Idle` immediately
    pub fn new(id: ActorId, config: PlayerConfig, sink: A, movement: Option<M>, now: f32) -> Self {
        let mut animator = PlayerAnimator::new(sink, movement);
        let machine = StateMachine::new("player", PlayerState::Idle, &mut animator, now);

        Self {
            id,
            config,
            animator,
            machine,
            timers: DeferredQueue::new(),
            jump_cooldown: None,
            double_jump_window: None,
            ready_to_jump: true,
            jump_held: false,
            facing: Quat::IDENTITY,
        }
    }

    /// Run one frame
    ///
    /// Order: due timers, movement sample, intent, facing, state machine.
    pub fn update(&mut self, intent: &PlayerIntent, tick: &Tick) -> Option<Transition<PlayerState>> {
        for event in self.timers.drain_due(tick.now) {
            self.handle_timer(event);
        }

        self.animator.sample_movement();
        self.apply_intent(intent, tick);
        self.update_facing(intent, tick);

        let outcome = self.machine.update(&mut self.animator, tick);

        // Landing ends the jump that owns the window
        if !self.animator.is_jumping() {
            self.cancel_double_jump_window();
        }
        outcome
    }

    fn cancel_double_jump_window(&mut self) {
        if let Some(id) = self.double_jump_window.take() {
            self.timers.cancel(id);
        }
    }

    fn handle_timer(&mut self, event: PlayerTimer) {
        match event {
            PlayerTimer::JumpReady => {
                self.jump_cooldown = None;
                self.ready_to_jump = true;
            }
            PlayerTimer::DoubleJumpWindow => {
                self.double_jump_window = None;
                self.animator.clear_double_jump();
            }
        }
    }

    fn apply_intent(&mut self, intent: &PlayerIntent, tick: &Tick) {
        let jump_pressed = intent.jump && !self.jump_held;
        self.jump_held = intent.jump;

        let grounded = self.animator.is_grounded();
        if intent.jump && self.ready_to_jump && grounded {
            self.try_jump(tick.now);
        } else if jump_pressed && !grounded && self.animator.trigger_double_jump() {
            self.double_jump_window = Some(self.timers.schedule(
                tick.now,
                self.config.double_jump_window,
                PlayerTimer::DoubleJumpWindow,
            ));
        }

        if intent.victory {
            self.animator.trigger_victory();
        }
        if intent.die {
            self.animator.trigger_die();
        }

        self.animator.set_is_moving(intent.is_moving());
    }

    fn try_jump(&mut self, now: f32) {
        if !self.animator.trigger_jump() {
            return;
        }
        self.ready_to_jump = false;
        self.cancel_double_jump_window();
        if let Some(movement) = self.animator.movement_mut() {
            movement.jump();
        }
        self.jump_cooldown = Some(self.timers.schedule(
            now,
            self.config.jump_cooldown,
            PlayerTimer::JumpReady,
        ));
    }

    fn update_facing(&mut self, intent: &PlayerIntent, tick: &Tick) {
        if self.animator.is_locked() || !intent.is_moving() {
            return;
        }
        if let Some(direction) = flat_direction(Vec3::ZERO, intent.direction) {
            self.facing = turn_towards(
                self.facing,
                look_rotation(direction),
                tick.dt,
                self.config.turn_speed,
            );
        }
    }

    /// Bring the player back from any state, clearing the sticky guards
    pub fn respawn(&mut self, now: f32) -> Transition<PlayerState> {
        log::info!("Player {} respawning", self.id);
        self.timers.cancel_all();
        self.jump_cooldown = None;
        self.double_jump_window = None;
        self.ready_to_jump = true;
        self.jump_held = false;
        self.animator.reset_states();
        self.machine.reset(PlayerState::Idle, &mut self.animator, now)
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.machine.state()
    }

    /// State machine, for inspection
    pub fn machine(&self) -> &StateMachine<PlayerState> {
        &self.machine
    }

    /// Facts and command sink
    pub fn animator(&self) -> &PlayerAnimator<M, A> {
        &self.animator
    }

    /// Mutable facts and command sink
    pub fn animator_mut(&mut self) -> &mut PlayerAnimator<M, A> {
        &mut self.animator
    }

    /// Facing orientation
    pub fn facing(&self) -> Quat {
        self.facing
    }

    /// Whether a new jump would be accepted cooldown-wise
    pub fn is_ready_to_jump(&self) -> bool {
        self.ready_to_jump
    }

    /// Whether the jump cooldown timer is still running
    pub fn is_jump_cooling_down(&self) -> bool {
        self.jump_cooldown
            .map(|id| self.timers.is_pending(id))
            .unwrap_or(false)
    }

    /// Player position, if a movement provider is attached
    pub fn position(&self) -> Option<Vec3> {
        self.animator.movement().map(|movement| movement.position())
    }

    /// Check if the player is alive
    pub fn is_alive(&self) -> bool {
        !self.animator.is_dead()
    }
}
