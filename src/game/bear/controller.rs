// Bear controller: target observation, damage and the state machine

use glam::{Quat, Vec3};

use crate::engine::animation::{AnimParam, AnimationSink, Animator};
use crate::engine::clock::Tick;
use crate::engine::movement::Navigator;
use crate::error::{Collaborator, WarnOnce};
use crate::game::fsm::{StateMachine, Transition};
use crate::game::ActorId;

use super::config::BearConfig;
use super::context::BearContext;
use super::health::{BearHealth, DamageOutcome};
use super::state::BearState;

/// A bear: perception, combat state and health
#[derive(Debug)]
pub struct BearController<N, A = Animator> {
    id: ActorId,
    ctx: BearContext<N, A>,
    machine: StateMachine<BearState>,
    health: BearHealth,
    target_warning: WarnOnce,
    /// Dead bears stop thinking
    enabled: bool,
}

impl<N: Navigator, A: AnimationSink> BearController<N, A> {
    /// Create a bear asleep at the navigator's position
    ///
    /// `seed` drives the choice between attack animations.
    pub fn new(
        id: ActorId,
        config: BearConfig,
        nav: N,
        sink: A,
        rotation: Quat,
        seed: u64,
        now: f32,
    ) -> Self {
        let health = BearHealth::new(config.max_health);
        let mut ctx = BearContext::new(config, nav, sink, rotation, seed);
        let machine = StateMachine::new("bear", BearState::Sleeping, &mut ctx, now);

        Self {
            id,
            ctx,
            machine,
            health,
            target_warning: WarnOnce::new(),
            enabled: true,
        }
    }

    /// Run one frame against the target position
    ///
    /// Without a target the frame is skipped entirely.
    pub fn update(&mut self, target: Option<Vec3>, tick: &Tick) -> Option<Transition<BearState>> {
        if !self.enabled {
            return None;
        }
        let Some(target) = target else {
            self.target_warning.missing("bear", Collaborator::Target);
            return None;
        };
        self.target_warning.recovered();

        self.ctx.observe_target(target);
        let outcome = self.machine.update(&mut self.ctx, tick);
        self.ctx.apply_facing(tick.dt);
        outcome
    }

    /// Flinch from a hit, waking the bear if it was asleep
    pub fn take_hit(&mut self, now: f32) -> Option<Transition<BearState>> {
        if !self.enabled {
            return None;
        }
        self.ctx.play_overlay(AnimParam::GetHitFront);
        if self.machine.state() == BearState::Sleeping {
            log::debug!("Bear {} woken by a hit", self.id);
            return Some(self.machine.change_state(BearState::WakingUp, &mut self.ctx, now));
        }
        None
    }

    /// Apply damage; at zero health the bear dies and stops updating
    pub fn take_damage(&mut self, amount: f32, now: f32) -> DamageOutcome {
        if !self.enabled {
            return DamageOutcome::Ignored;
        }

        let outcome = self.health.take_damage(amount);
        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt { remaining } => {
                log::debug!("Bear {} hit for {}, {} left", self.id, amount, remaining);
                self.ctx.play_overlay(AnimParam::GetHit);
                self.take_hit(now);
            }
            DamageOutcome::Killed => {
                log::info!("Bear {} died", self.id);
                self.ctx.play(AnimParam::Die);
                self.ctx.halt();
                self.enabled = false;
            }
        }
        outcome
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Get the current state
    pub fn state(&self) -> BearState {
        self.machine.state()
    }

    pub fn machine(&self) -> &StateMachine<BearState> {
        &self.machine
    }

    /// Perception, pose and command sinks
    pub fn context(&self) -> &BearContext<N, A> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut BearContext<N, A> {
        &mut self.ctx
    }

    pub fn health(&self) -> &BearHealth {
        &self.health
    }

    pub fn is_alive(&self) -> bool {
        self.enabled
    }

    pub fn position(&self) -> Vec3 {
        self.ctx.nav().position()
    }

    pub fn rotation(&self) -> Quat {
        self.ctx.rotation()
    }
}
