// Behavior state machine engine
//
// One `StateMachine` per actor owns the current state and the time it was
// entered. States are small `Copy` enums implementing `State<C>`, where `C`
// is the actor's context: the facts a state reads and the command sinks it
// writes to. States never call back into the machine; they return the state
// they want next and the machine sequences Exit(old) -> swap -> Enter(new)
// inside a single call, so no other code can observe a half-finished
// transition.

use std::fmt;
use std::mem;

use crate::engine::clock::Tick;

/// Behavior of one state variant over the actor context `C`
pub trait State<C>: Copy + Eq + fmt::Debug {
    /// Side effects on entering this state
    fn enter(self, ctx: &mut C);

    /// Side effects on leaving this state
    fn exit(self, _ctx: &mut C) {}

    /// Input-driven transition rules, evaluated first every frame
    fn handle_input(self, _ctx: &mut C) -> Option<Self> {
        None
    }

    /// Per-frame actions and time/threshold-driven transition rules
    ///
    /// `elapsed` is the time since this state was entered.
    fn update(self, ctx: &mut C, tick: &Tick, elapsed: f32) -> Option<Self>;

    /// Terminal states refuse `change_state`; only `reset` leaves them
    fn is_terminal(self) -> bool {
        false
    }
}

/// Outcome of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<S> {
    /// Exit/Enter ran and the state changed
    Changed { from: S, to: S },
    /// Requested the variant already active; nothing ran
    SameState(S),
    /// Current state is terminal; nothing ran
    Blocked { from: S, requested: S },
}

impl<S> Transition<S> {
    /// Check if the request actually changed state
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Host of a single actor's current behavior state
#[derive(Debug)]
pub struct StateMachine<S> {
    /// Actor name used in diagnostics
    label: &'static str,
    current: S,
    previous: S,
    /// Clock time the current state was entered
    entered_at: f32,
    /// Number of completed transitions
    transitions: u64,
}

impl<S: Copy + Eq + fmt::Debug> StateMachine<S> {
    /// Create a machine and enter `initial` immediately
    pub fn new<C>(label: &'static str, initial: S, ctx: &mut C, now: f32) -> Self
    where
        S: State<C>,
    {
        log::debug!("{}: starting in {:?}", label, initial);
        initial.enter(ctx);
        Self {
            label,
            current: initial,
            previous: initial,
            entered_at: now,
            transitions: 0,
        }
    }

    /// Get the current state
    pub fn state(&self) -> S {
        self.current
    }

    /// Get the state before the last transition
    pub fn previous_state(&self) -> S {
        self.previous
    }

    /// Clock time the current state was entered
    pub fn entered_at(&self) -> f32 {
        self.entered_at
    }

    /// Seconds spent in the current state as of `now`
    pub fn time_in_state(&self, now: f32) -> f32 {
        (now - self.entered_at).max(0.0)
    }

    /// Number of completed transitions since creation
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    /// Actor name used in diagnostics
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Request a transition to `next`
    ///
    /// A request for the active variant is absorbed without running
    /// Exit/Enter. A request out of a terminal state is refused.
    pub fn change_state<C>(&mut self, next: S, ctx: &mut C, now: f32) -> Transition<S>
    where
        S: State<C>,
    {
        if mem::discriminant(&self.current) == mem::discriminant(&next) {
            log::trace!("{}: already in {:?}", self.label, next);
            return Transition::SameState(next);
        }

        if self.current.is_terminal() {
            log::warn!(
                "{}: ignoring {:?} -> {:?}, {:?} is terminal",
                self.label,
                self.current,
                next,
                self.current
            );
            return Transition::Blocked {
                from: self.current,
                requested: next,
            };
        }

        self.swap(next, ctx, now)
    }

    /// Leave the current state unconditionally, even a terminal one
    ///
    /// Re-entering the same variant runs Exit and Enter again.
    pub fn reset<C>(&mut self, initial: S, ctx: &mut C, now: f32) -> Transition<S>
    where
        S: State<C>,
    {
        log::debug!("{}: reset from {:?}", self.label, self.current);
        self.swap(initial, ctx, now)
    }

    /// Run one frame: input rules, then the update of whichever state is
    /// current afterwards
    ///
    /// Returns the last transition that changed state this frame.
    pub fn update<C>(&mut self, ctx: &mut C, tick: &Tick) -> Option<Transition<S>>
    where
        S: State<C>,
    {
        let mut changed = None;

        if let Some(next) = self.current.handle_input(ctx) {
            let outcome = self.change_state(next, ctx, tick.now);
            if outcome.is_changed() {
                changed = Some(outcome);
            }
        }

        let elapsed = self.time_in_state(tick.now);
        if let Some(next) = self.current.update(ctx, tick, elapsed) {
            let outcome = self.change_state(next, ctx, tick.now);
            if outcome.is_changed() {
                changed = Some(outcome);
            }
        }

        changed
    }

    fn swap<C>(&mut self, next: S, ctx: &mut C, now: f32) -> Transition<S>
    where
        S: State<C>,
    {
        let from = self.current;
        from.exit(ctx);

        self.previous = from;
        self.current = next;
        self.entered_at = now;
        self.transitions += 1;
        log::debug!("{}: {:?} -> {:?}", self.label, from, next);

        next.enter(ctx);
        Transition::Changed { from, to: next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Lamp {
        Off,
        On,
        Burnt,
    }

    /// Test context: records lifecycle calls and exposes two facts
    #[derive(Default)]
    struct Room {
        calls: Vec<String>,
        switch_on: bool,
        lifetime: f32,
    }

    impl State<Room> for Lamp {
        fn enter(self, ctx: &mut Room) {
            ctx.calls.push(format!("enter {:?}", self));
        }

        fn exit(self, ctx: &mut Room) {
            ctx.calls.push(format!("exit {:?}", self));
        }

        fn handle_input(self, ctx: &mut Room) -> Option<Self> {
            match self {
                Lamp::Off if ctx.switch_on => Some(Lamp::On),
                Lamp::On if !ctx.switch_on => Some(Lamp::Off),
                _ => None,
            }
        }

        fn update(self, ctx: &mut Room, _tick: &Tick, elapsed: f32) -> Option<Self> {
            ctx.calls.push(format!("update {:?}", self));
            match self {
                Lamp::On if elapsed >= ctx.lifetime => Some(Lamp::Burnt),
                _ => None,
            }
        }

        fn is_terminal(self) -> bool {
            self == Lamp::Burnt
        }
    }

    fn room() -> Room {
        Room {
            lifetime: 10.0,
            ..Room::default()
        }
    }

    #[test]
    fn test_initial_state_entered_on_creation() {
        let mut ctx = room();
        let sm = StateMachine::new("lamp", Lamp::Off, &mut ctx, 0.0);
        assert_eq!(sm.state(), Lamp::Off);
        assert_eq!(ctx.calls, vec!["enter Off"]);
        assert_eq!(sm.transition_count(), 0);
    }

    #[test]
    fn test_same_state_is_noop() {
        let mut ctx = room();
        let mut sm = StateMachine::new("lamp", Lamp::Off, &mut ctx, 0.0);
        ctx.calls.clear();

        let outcome = sm.change_state(Lamp::Off, &mut ctx, 1.0);
        assert_eq!(outcome, Transition::SameState(Lamp::Off));
        assert!(!outcome.is_changed());
        assert!(ctx.calls.is_empty());
        assert_eq!(sm.entered_at(), 0.0, "No-op must not reset the timer");
    }

    #[test]
    fn test_exit_runs_before_enter() {
        let mut ctx = room();
        let mut sm = StateMachine::new("lamp", Lamp::Off, &mut ctx, 0.0);
        ctx.calls.clear();

        let outcome = sm.change_state(Lamp::On, &mut ctx, 2.0);
        assert_eq!(
            outcome,
            Transition::Changed {
                from: Lamp::Off,
                to: Lamp::On
            }
        );
        assert_eq!(ctx.calls, vec!["exit Off", "enter On"]);
        assert_eq!(sm.previous_state(), Lamp::Off);
        assert_eq!(sm.transition_count(), 1);
    }

    #[test]
    fn test_timestamp_reset_with_swap() {
        let mut ctx = room();
        let mut sm = StateMachine::new("lamp", Lamp::Off, &mut ctx, 0.0);
        assert_eq!(sm.time_in_state(3.0), 3.0);

        sm.change_state(Lamp::On, &mut ctx, 3.0);
        assert_eq!(sm.entered_at(), 3.0);
        assert_eq!(sm.time_in_state(3.0), 0.0);
        assert_eq!(sm.time_in_state(4.5), 1.5);
    }

    #[test]
    fn test_update_runs_input_then_update_of_new_state() {
        let mut ctx = room();
        let mut sm = StateMachine::new("lamp", Lamp::Off, &mut ctx, 0.0);
        ctx.calls.clear();
        ctx.switch_on = true;

        let outcome = sm.update(&mut ctx, &Tick::at(1.0, 0.1));
        assert_eq!(
            outcome,
            Some(Transition::Changed {
                from: Lamp::Off,
                to: Lamp::On
            })
        );
        assert_eq!(ctx.calls, vec!["exit Off", "enter On", "update On"]);
    }

    #[test]
    fn test_one_exit_and_enter_per_transition() {
        let mut ctx = room();
        let mut sm = StateMachine::new("lamp", Lamp::Off, &mut ctx, 0.0);
        ctx.switch_on = true;
        ctx.calls.clear();

        for frame in 1..=5 {
            sm.update(&mut ctx, &Tick::at(frame as f32 * 0.1, 0.1));
        }

        let exits = ctx.calls.iter().filter(|c| c.starts_with("exit")).count();
        let enters = ctx.calls.iter().filter(|c| c.starts_with("enter")).count();
        assert_eq!((exits, enters), (1, 1));
    }

    #[test]
    fn test_elapsed_drives_timed_transition() {
        let mut ctx = room();
        let mut sm = StateMachine::new("lamp", Lamp::On, &mut ctx, 0.0);
        ctx.switch_on = true;

        assert!(sm.update(&mut ctx, &Tick::at(9.5, 0.5)).is_none());
        assert!(sm.update(&mut ctx, &Tick::at(10.0, 0.5)).is_some());
        assert_eq!(sm.state(), Lamp::Burnt);
    }

    #[test]
    fn test_terminal_state_blocks_change() {
        let mut ctx = room();
        let mut sm = StateMachine::new("lamp", Lamp::Burnt, &mut ctx, 0.0);
        ctx.calls.clear();

        let outcome = sm.change_state(Lamp::Off, &mut ctx, 1.0);
        assert_eq!(
            outcome,
            Transition::Blocked {
                from: Lamp::Burnt,
                requested: Lamp::Off
            }
        );
        assert!(ctx.calls.is_empty());
        assert_eq!(sm.state(), Lamp::Burnt);
    }

    #[test]
    fn test_reset_leaves_terminal_state() {
        let mut ctx = room();
        let mut sm = StateMachine::new("lamp", Lamp::Burnt, &mut ctx, 0.0);
        ctx.calls.clear();

        let outcome = sm.reset(Lamp::Off, &mut ctx, 5.0);
        assert!(outcome.is_changed());
        assert_eq!(ctx.calls, vec!["exit Burnt", "enter Off"]);
        assert_eq!(sm.entered_at(), 5.0);
    }
}
