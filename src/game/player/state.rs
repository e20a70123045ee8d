// Player behavior states

use std::fmt;

use crate::engine::animation::{AnimParam, AnimationSink};
use crate::engine::clock::Tick;
use crate::engine::movement::MovementProvider;
use crate::game::fsm::State;

use super::animator::PlayerAnimator;

/// Represents the current behavior of the player character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Standing still on ground
    #[default]
    Idle,
    /// Moving on ground
    Move,
    /// In the air after a jump
    Jump,
    /// Celebrating; terminal until reset
    Victory,
    /// Dead; terminal until reset
    Die,
}

impl PlayerState {
    pub const ALL: [PlayerState; 5] = [
        PlayerState::Idle,
        PlayerState::Move,
        PlayerState::Jump,
        PlayerState::Victory,
        PlayerState::Die,
    ];

    /// Get the display name for this state
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Move => "move",
            Self::Jump => "jump",
            Self::Victory => "victory",
            Self::Die => "die",
        }
    }

    /// Check if the player is in the air
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jump)
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<M: MovementProvider, A: AnimationSink> State<PlayerAnimator<M, A>> for PlayerState {
    fn enter(self, ctx: &mut PlayerAnimator<M, A>) {
        match self {
            Self::Idle => ctx.set_moving_animation(false),
            Self::Move => ctx.set_moving_animation(true),
            Self::Jump => ctx.play_jumping(),
            Self::Victory => ctx.play_trigger(AnimParam::Victory),
            Self::Die => ctx.play_trigger(AnimParam::Die),
        }
    }

    fn exit(self, _ctx: &mut PlayerAnimator<M, A>) {
        if self == Self::Die {
            log::warn!("Player leaving {} state", self);
        }
    }

    // First match wins, in the order listed per state
    fn handle_input(self, ctx: &mut PlayerAnimator<M, A>) -> Option<Self> {
        match self {
            Self::Idle => {
                if ctx.is_moving() {
                    Some(Self::Move)
                } else if ctx.is_jumping() {
                    Some(Self::Jump)
                } else if ctx.is_victorious() {
                    Some(Self::Victory)
                } else if ctx.is_dead() {
                    Some(Self::Die)
                } else {
                    None
                }
            }
            Self::Move => {
                if !ctx.is_moving() {
                    Some(Self::Idle)
                } else if ctx.is_jumping() {
                    Some(Self::Jump)
                } else if ctx.is_victorious() {
                    Some(Self::Victory)
                } else if ctx.is_dead() {
                    Some(Self::Die)
                } else {
                    None
                }
            }
            Self::Jump => {
                // No movement provider: stay airborne this frame
                if !ctx.ground_check()? {
                    return None;
                }

                log::trace!("Player landed");
                ctx.trigger_land();

                if ctx.is_dead() {
                    Some(Self::Die)
                } else if ctx.is_victorious() {
                    Some(Self::Victory)
                } else if ctx.is_moving() {
                    Some(Self::Move)
                } else {
                    Some(Self::Idle)
                }
            }
            Self::Victory | Self::Die => None,
        }
    }

    fn update(self, ctx: &mut PlayerAnimator<M, A>, _tick: &Tick, _elapsed: f32) -> Option<Self> {
        match self {
            Self::Move => ctx.set_movement_speed(ctx.current_speed()),
            Self::Jump if ctx.is_moving() => ctx.set_movement_speed(ctx.current_speed()),
            _ => {}
        }
        None
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Die)
    }
}
