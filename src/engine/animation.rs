// Animation command surface
//
// Behavior code never drives playback directly. It emits named commands
// (triggers, bool flags, float parameters) through an `AnimationSink`, and
// whatever owns the real animation graph decides what to do with them.

use std::collections::{HashMap, HashSet};
use std::fmt;

/// Symbolic animation parameter
///
/// The names are the stable identifiers shared with the animation graph.
/// The table is fixed at compile time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimParam {
    // Player
    IsMoving,
    MoveSpeed,
    IsJumping,
    Jump,
    DoubleJump,
    Land,
    Victory,
    Die,

    // Bear
    Idle,
    Run,
    Attack1,
    Attack2,
    Sleep,
    GetHit,
    GetHitFront,
}

impl AnimParam {
    /// Every parameter, in declaration order
    pub const ALL: [AnimParam; 15] = [
        AnimParam::IsMoving,
        AnimParam::MoveSpeed,
        AnimParam::IsJumping,
        AnimParam::Jump,
        AnimParam::DoubleJump,
        AnimParam::Land,
        AnimParam::Victory,
        AnimParam::Die,
        AnimParam::Idle,
        AnimParam::Run,
        AnimParam::Attack1,
        AnimParam::Attack2,
        AnimParam::Sleep,
        AnimParam::GetHit,
        AnimParam::GetHitFront,
    ];

    /// Triggers the bear clears before issuing a new one
    pub const BEAR_TRIGGERS: [AnimParam; 6] = [
        AnimParam::Idle,
        AnimParam::Run,
        AnimParam::Attack1,
        AnimParam::Attack2,
        AnimParam::Sleep,
        AnimParam::GetHitFront,
    ];

    /// Name of the parameter in the animation graph
    pub const fn name(self) -> &'static str {
        match self {
            Self::IsMoving => "IsMoving",
            Self::MoveSpeed => "MoveSpeed",
            Self::IsJumping => "IsJumping",
            Self::Jump => "Jump",
            Self::DoubleJump => "DoubleJump",
            Self::Land => "Land",
            Self::Victory => "Victory",
            Self::Die => "Die",
            Self::Idle => "Idle",
            Self::Run => "Run Forward",
            Self::Attack1 => "Attack1",
            Self::Attack2 => "Attack2",
            Self::Sleep => "Sleep",
            Self::GetHit => "Get Hit",
            Self::GetHitFront => "Get Hit Front",
        }
    }

    /// Look a parameter up by its graph name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.name() == name)
    }
}

impl fmt::Display for AnimParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receiver of animation commands
pub trait AnimationSink {
    /// Fire a one-shot trigger
    fn set_trigger(&mut self, param: AnimParam);

    /// Clear a trigger that has not been consumed yet
    fn reset_trigger(&mut self, param: AnimParam);

    /// Set a boolean parameter
    fn set_bool(&mut self, param: AnimParam, value: bool);

    /// Set a numeric parameter
    fn set_float(&mut self, param: AnimParam, value: f32);
}

/// A single command as seen by the sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimCommand {
    SetTrigger(AnimParam),
    ResetTrigger(AnimParam),
    SetBool(AnimParam, bool),
    SetFloat(AnimParam, f32),
}

impl AnimCommand {
    /// Parameter this command addresses
    pub fn param(&self) -> AnimParam {
        match *self {
            Self::SetTrigger(param)
            | Self::ResetTrigger(param)
            | Self::SetBool(param, _)
            | Self::SetFloat(param, _) => param,
        }
    }
}

/// Parameter store that records every command it receives
///
/// Stands in for the real animation graph: it keeps the latest value of
/// every parameter, the set of pending triggers, and an ordered command log
/// that callers can inspect or drain each frame.
#[derive(Debug, Default)]
pub struct Animator {
    /// Latest value of each bool parameter
    bools: HashMap<AnimParam, bool>,
    /// Latest value of each float parameter
    floats: HashMap<AnimParam, f32>,
    /// Triggers set but not consumed or reset
    triggers: HashSet<AnimParam>,
    /// Every command in arrival order
    log: Vec<AnimCommand>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a bool parameter (false if never set)
    pub fn get_bool(&self, param: AnimParam) -> bool {
        self.bools.get(&param).copied().unwrap_or(false)
    }

    /// Get a float parameter (0.0 if never set)
    pub fn get_float(&self, param: AnimParam) -> f32 {
        self.floats.get(&param).copied().unwrap_or(0.0)
    }

    /// Check if a trigger is pending
    pub fn is_trigger_set(&self, param: AnimParam) -> bool {
        self.triggers.contains(&param)
    }

    /// Consume a pending trigger, as the animation graph would on a transition
    /// Returns true if the trigger was pending
    pub fn consume_trigger(&mut self, param: AnimParam) -> bool {
        self.triggers.remove(&param)
    }

    /// All commands received so far
    pub fn commands(&self) -> &[AnimCommand] {
        &self.log
    }

    /// Take the command log, leaving it empty
    pub fn drain_commands(&mut self) -> Vec<AnimCommand> {
        std::mem::take(&mut self.log)
    }

    /// Forget recorded commands without touching parameter values
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Number of times `param` was fired as a trigger
    pub fn trigger_count(&self, param: AnimParam) -> usize {
        self.log
            .iter()
            .filter(|command| **command == AnimCommand::SetTrigger(param))
            .count()
    }
}

impl AnimationSink for Animator {
    fn set_trigger(&mut self, param: AnimParam) {
        self.triggers.insert(param);
        self.log.push(AnimCommand::SetTrigger(param));
    }

    fn reset_trigger(&mut self, param: AnimParam) {
        self.triggers.remove(&param);
        self.log.push(AnimCommand::ResetTrigger(param));
    }

    fn set_bool(&mut self, param: AnimParam, value: bool) {
        self.bools.insert(param, value);
        self.log.push(AnimCommand::SetBool(param, value));
    }

    fn set_float(&mut self, param: AnimParam, value: f32) {
        self.floats.insert(param, value);
        self.log.push(AnimCommand::SetFloat(param, value));
    }
}

/// Clear every trigger in `params`
pub fn reset_triggers<A: AnimationSink + ?Sized>(sink: &mut A, params: &[AnimParam]) {
    for &param in params {
        sink.reset_trigger(param);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_names_are_unique() {
        let names: HashSet<&str> = AnimParam::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names.len(), AnimParam::ALL.len());
    }

    #[test]
    fn test_param_lookup_by_name() {
        assert_eq!(AnimParam::from_name("Run Forward"), Some(AnimParam::Run));
        assert_eq!(AnimParam::from_name("IsMoving"), Some(AnimParam::IsMoving));
        assert_eq!(AnimParam::from_name("Dance"), None);
    }

    #[test]
    fn test_animator_records_commands_in_order() {
        let mut animator = Animator::new();
        animator.set_bool(AnimParam::IsMoving, true);
        animator.set_float(AnimParam::MoveSpeed, 2.5);
        animator.set_trigger(AnimParam::Jump);

        assert_eq!(
            animator.commands(),
            &[
                AnimCommand::SetBool(AnimParam::IsMoving, true),
                AnimCommand::SetFloat(AnimParam::MoveSpeed, 2.5),
                AnimCommand::SetTrigger(AnimParam::Jump),
            ]
        );
        assert!(animator.get_bool(AnimParam::IsMoving));
        assert_eq!(animator.get_float(AnimParam::MoveSpeed), 2.5);
    }

    #[test]
    fn test_trigger_consume_and_reset() {
        let mut animator = Animator::new();
        animator.set_trigger(AnimParam::Sleep);
        assert!(animator.is_trigger_set(AnimParam::Sleep));
        assert!(animator.consume_trigger(AnimParam::Sleep));
        assert!(!animator.consume_trigger(AnimParam::Sleep));

        animator.set_trigger(AnimParam::Run);
        reset_triggers(&mut animator, &AnimParam::BEAR_TRIGGERS);
        assert!(!animator.is_trigger_set(AnimParam::Run));
    }

    #[test]
    fn test_drain_keeps_values() {
        let mut animator = Animator::new();
        animator.set_bool(AnimParam::IsJumping, true);

        let drained = animator.drain_commands();
        assert_eq!(drained.len(), 1);
        assert!(animator.commands().is_empty());
        assert!(animator.get_bool(AnimParam::IsJumping));
    }

    #[test]
    fn test_trigger_count() {
        let mut animator = Animator::new();
        animator.set_trigger(AnimParam::Attack1);
        animator.reset_trigger(AnimParam::Attack1);
        animator.set_trigger(AnimParam::Attack1);
        assert_eq!(animator.trigger_count(AnimParam::Attack1), 2);
        assert_eq!(animator.commands()[1].param(), AnimParam::Attack1);
    }
}
