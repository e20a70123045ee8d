// Bear behavior states

use std::fmt;

use crate::engine::animation::{AnimParam, AnimationSink};
use crate::engine::clock::Tick;
use crate::engine::movement::Navigator;
use crate::game::fsm::State;

use super::context::BearContext;

/// Represents the current behavior of a bear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BearState {
    /// Dormant at the spawn point
    #[default]
    Sleeping,
    /// Playing the wake-up animation
    WakingUp,
    /// Chasing and attacking the target
    Combat,
    /// Walking back to the spawn point
    ReturningToSpawn,
}

impl BearState {
    pub const ALL: [BearState; 4] = [
        BearState::Sleeping,
        BearState::WakingUp,
        BearState::Combat,
        BearState::ReturningToSpawn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sleeping => "sleeping",
            Self::WakingUp => "waking up",
            Self::Combat => "combat",
            Self::ReturningToSpawn => "returning to spawn",
        }
    }

    /// Check if the bear is aware of the target
    pub fn is_awake(&self) -> bool {
        !matches!(self, Self::Sleeping)
    }
}

impl fmt::Display for BearState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<N: Navigator, A: AnimationSink> State<BearContext<N, A>> for BearState {
    fn enter(self, ctx: &mut BearContext<N, A>) {
        match self {
            Self::Sleeping => {
                ctx.halt();
                ctx.play(AnimParam::Sleep);
                ctx.set_speed(ctx.config.patrol_speed);
                ctx.restore_facing();
            }
            Self::WakingUp => {
                ctx.halt();
                ctx.play(AnimParam::Idle);
            }
            Self::Combat => {
                ctx.engage();
                ctx.play(AnimParam::Run);
                ctx.set_speed(ctx.config.combat_speed);
            }
            Self::ReturningToSpawn => {
                ctx.set_speed(ctx.config.patrol_speed);
                ctx.play(AnimParam::Run);
                ctx.head_home();
            }
        }
    }

    fn update(self, ctx: &mut BearContext<N, A>, tick: &Tick, elapsed: f32) -> Option<Self> {
        let distance = ctx.distance_to_target();
        match self {
            Self::Sleeping => {
                (distance <= ctx.config.sleeping_detection_range).then_some(Self::WakingUp)
            }
            Self::WakingUp => (elapsed >= ctx.config.wake_duration).then_some(Self::Combat),
            Self::Combat => {
                if distance > ctx.config.detection_range {
                    return Some(Self::ReturningToSpawn);
                }
                ctx.fight(tick.now);
                None
            }
            Self::ReturningToSpawn => {
                if ctx.is_home() {
                    Some(Self::Sleeping)
                } else if distance <= ctx.config.detection_range {
                    Some(Self::Combat)
                } else {
                    None
                }
            }
        }
    }
}
