// Player facts and guarded animation commands
//
// `PlayerAnimator` is the context the player states run against. Movement
// code writes facts into it through setters; states read those facts and
// emit animation commands through it. Death and victory are sticky: once
// either is raised, every movement-affecting setter becomes a no-op until
// `reset_states` is called.

use crate::engine::animation::{AnimParam, AnimationSink, Animator};
use crate::engine::movement::MovementProvider;
use crate::error::{Collaborator, WarnOnce};

#[derive(Debug)]
pub struct PlayerAnimator<M, A = Animator> {
    /// Where animation commands go
    sink: A,
    /// Physics locomotion, if attached
    movement: Option<M>,
    movement_warning: WarnOnce,

    // Facts
    is_moving: bool,
    is_jumping: bool,
    is_double_jumping: bool,
    is_dead: bool,
    is_victorious: bool,
    current_speed: f32,
    grounded: bool,
}

impl<M: MovementProvider, A: AnimationSink> PlayerAnimator<M, A> {
    pub fn new(sink: A, movement: Option<M>) -> Self {
        Self {
            sink,
            movement,
            movement_warning: WarnOnce::new(),
            is_moving: false,
            is_jumping: false,
            is_double_jumping: false,
            is_dead: false,
            is_victorious: false,
            current_speed: 0.0,
            grounded: false,
        }
    }

    /// Animation sink
    pub fn sink(&self) -> &A {
        &self.sink
    }

    /// Mutable animation sink
    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }

    /// Movement provider, if attached
    pub fn movement(&self) -> Option<&M> {
        self.movement.as_ref()
    }

    /// Mutable movement provider, if attached
    pub fn movement_mut(&mut self) -> Option<&mut M> {
        self.movement.as_mut()
    }

    /// Attach a movement provider, returning the previous one
    pub fn attach_movement(&mut self, movement: M) -> Option<M> {
        self.movement_warning.recovered();
        self.movement.replace(movement)
    }

    /// Detach the movement provider
    pub fn detach_movement(&mut self) -> Option<M> {
        self.movement.take()
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn is_double_jumping(&self) -> bool {
        self.is_double_jumping
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_victorious(&self) -> bool {
        self.is_victorious
    }

    /// Movement magnitude sampled at the start of the frame
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Grounded flag sampled at the start of the frame
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Whether a sticky guard is raised
    pub fn is_locked(&self) -> bool {
        self.is_dead || self.is_victorious
    }

    /// Copy speed and grounded state from the movement provider
    ///
    /// Without a provider the previous samples are kept.
    pub fn sample_movement(&mut self) {
        if let Some(movement) = &self.movement {
            self.current_speed = movement.current_speed();
            self.grounded = movement.is_grounded();
            self.movement_warning.recovered();
        } else {
            self.movement_warning.missing("player", Collaborator::Movement);
        }
    }

    /// Live ground query used by transition rules
    ///
    /// Returns `None` when no movement provider is attached, which callers
    /// treat as "condition not met".
    pub fn ground_check(&mut self) -> Option<bool> {
        match &self.movement {
            Some(movement) => {
                let grounded = movement.is_grounded();
                self.grounded = grounded;
                Some(grounded)
            }
            None => {
                self.movement_warning.missing("player", Collaborator::Movement);
                None
            }
        }
    }

    /// Record whether the player is trying to move
    pub fn set_is_moving(&mut self, is_moving: bool) {
        if self.is_locked() {
            return;
        }
        self.is_moving = is_moving;
        self.sink.set_bool(AnimParam::IsMoving, is_moving);
    }

    /// Push a movement speed to the animation graph
    pub fn set_movement_speed(&mut self, speed: f32) {
        if self.is_locked() {
            return;
        }
        self.sink.set_float(AnimParam::MoveSpeed, speed);
    }

    /// Set the moving animation flag without touching the fact
    pub fn set_moving_animation(&mut self, is_moving: bool) {
        if self.is_locked() {
            return;
        }
        self.sink.set_bool(AnimParam::IsMoving, is_moving);
    }

    /// Start a jump
    /// Returns true if the jump was accepted
    pub fn trigger_jump(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }
        self.is_jumping = true;
        self.sink.set_bool(AnimParam::IsJumping, true);
        self.sink.set_trigger(AnimParam::Jump);
        true
    }

    /// Start a double jump while already jumping
    /// Returns true if the double jump was accepted
    pub fn trigger_double_jump(&mut self) -> bool {
        if self.is_locked() || !self.is_jumping || self.is_double_jumping {
            return false;
        }
        self.is_double_jumping = true;
        self.sink.set_trigger(AnimParam::DoubleJump);
        true
    }

    /// Lower the double-jump flag once its window has passed
    pub fn clear_double_jump(&mut self) {
        self.is_double_jumping = false;
    }

    /// Finish a jump on touching ground
    pub fn trigger_land(&mut self) {
        if !self.is_jumping {
            return;
        }
        self.is_jumping = false;
        self.is_double_jumping = false;
        self.sink.set_bool(AnimParam::IsJumping, false);
        self.sink.set_trigger(AnimParam::Land);
    }

    /// Keep the jumping pose raised while in the air
    pub fn play_jumping(&mut self) {
        self.sink.set_bool(AnimParam::IsJumping, true);
    }

    /// Fire a one-shot trigger regardless of guards
    pub fn play_trigger(&mut self, param: AnimParam) {
        self.sink.set_trigger(param);
    }

    /// Raise the victory guard
    /// Returns true if this call raised it
    pub fn trigger_victory(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }
        log::info!("Player is victorious");
        self.is_victorious = true;
        true
    }

    /// Raise the death guard
    /// Returns true if this call raised it
    pub fn trigger_die(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }
        log::info!("Player died");
        self.is_dead = true;
        true
    }

    /// Clear every fact, including the sticky guards
    pub fn reset_states(&mut self) {
        self.is_dead = false;
        self.is_victorious = false;
        self.is_moving = false;
        self.is_jumping = false;
        self.is_double_jumping = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::AnimCommand;
    use crate::game::player::testing::FakeBody;

    fn animator() -> PlayerAnimator<FakeBody> {
        PlayerAnimator::new(Animator::new(), Some(FakeBody::grounded()))
    }

    #[test]
    fn test_set_is_moving_updates_fact_and_flag() {
        let mut anim = animator();
        anim.set_is_moving(true);
        assert!(anim.is_moving());
        assert_eq!(
            anim.sink().commands(),
            &[AnimCommand::SetBool(AnimParam::IsMoving, true)]
        );
    }

    #[test]
    fn test_jump_and_land() {
        let mut anim = animator();
        assert!(anim.trigger_jump());
        assert!(anim.is_jumping());
        assert!(anim.sink().get_bool(AnimParam::IsJumping));

        anim.trigger_land();
        assert!(!anim.is_jumping());
        assert!(!anim.sink().get_bool(AnimParam::IsJumping));
        assert_eq!(anim.sink().trigger_count(AnimParam::Land), 1);
    }

    #[test]
    fn test_land_without_jump_is_noop() {
        let mut anim = animator();
        anim.trigger_land();
        assert!(anim.sink().commands().is_empty());
    }

    #[test]
    fn test_double_jump_requires_jump() {
        let mut anim = animator();
        assert!(!anim.trigger_double_jump());

        anim.trigger_jump();
        assert!(anim.trigger_double_jump());
        assert!(!anim.trigger_double_jump(), "Only one double jump per jump");

        anim.clear_double_jump();
        assert!(!anim.is_double_jumping());
    }

    #[test]
    fn test_guards_are_sticky() {
        let mut anim = animator();
        assert!(anim.trigger_die());
        anim.sink_mut().clear_log();

        anim.set_is_moving(true);
        anim.set_movement_speed(4.0);
        anim.set_moving_animation(true);
        assert!(!anim.trigger_jump());
        assert!(!anim.trigger_double_jump());

        assert!(anim.sink().commands().is_empty());
        assert!(!anim.is_moving());
        assert!(!anim.trigger_victory(), "Death blocks victory");
        assert!(!anim.trigger_die(), "Guard is set once");
    }

    #[test]
    fn test_victory_blocks_movement() {
        let mut anim = animator();
        anim.set_is_moving(true);
        assert!(anim.trigger_victory());
        anim.sink_mut().clear_log();

        anim.set_is_moving(false);
        assert!(anim.is_moving(), "Facts freeze once victorious");
        assert!(anim.sink().commands().is_empty());
    }

    #[test]
    fn test_reset_states_clears_guards() {
        let mut anim = animator();
        anim.trigger_victory();
        anim.reset_states();
        assert!(!anim.is_locked());
        assert!(anim.trigger_jump());
    }

    #[test]
    fn test_missing_movement_means_no_ground() {
        let mut anim: PlayerAnimator<FakeBody> = PlayerAnimator::new(Animator::new(), None);
        assert_eq!(anim.ground_check(), None);
        anim.sample_movement();
        assert_eq!(anim.current_speed(), 0.0);

        anim.attach_movement(FakeBody::grounded());
        assert_eq!(anim.ground_check(), Some(true));
    }

    #[test]
    fn test_sample_movement_reads_provider() {
        let mut anim = animator();
        if let Some(body) = anim.movement_mut() {
            body.speed = 3.5;
        }
        anim.sample_movement();
        assert_eq!(anim.current_speed(), 3.5);
        assert!(anim.is_grounded());
    }
}
