// One player against any number of bears, driven by a single frame clock

use glam::{Quat, Vec3};

use crate::engine::animation::{AnimCommand, Animator};
use crate::engine::clock::{FrameClock, Tick};
use crate::engine::kinematics::{KinematicAgent, SimulatedBody};
use crate::engine::scheduler::DeferredQueue;

use super::bear::{BearConfig, BearController, DamageOutcome};
use super::player::{PlayerConfig, PlayerController, PlayerIntent};
use super::ActorId;

pub type EncounterPlayer = PlayerController<SimulatedBody, Animator>;
pub type EncounterBear = BearController<KinematicAgent, Animator>;

/// Id reserved for the player; bears are numbered after it
const PLAYER_ID: ActorId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EncounterEvent {
    /// Remove a dead bear's body
    Despawn(ActorId),
}

/// Owns every actor and advances them in a fixed order each frame
#[derive(Debug)]
pub struct Encounter {
    clock: FrameClock,
    player: EncounterPlayer,
    bears: Vec<EncounterBear>,
    bear_config: BearConfig,
    events: DeferredQueue<EncounterEvent>,
    next_id: ActorId,
    /// Animation commands issued during the last frame, tagged by actor
    commands: Vec<(ActorId, AnimCommand)>,
    /// Base seed for bear attack choices
    seed: u64,
}

impl Encounter {
    pub fn new(
        player_config: PlayerConfig,
        bear_config: BearConfig,
        player_spawn: Vec3,
        seed: u64,
    ) -> Self {
        let body = SimulatedBody::new(
            player_spawn,
            player_config.move_speed,
            player_config.air_multiplier,
            player_config.jump_force,
        );
        let clock = FrameClock::new();
        let player = PlayerController::new(
            PLAYER_ID,
            player_config,
            Animator::new(),
            Some(body),
            clock.now(),
        );

        Self {
            clock,
            player,
            bears: Vec::new(),
            bear_config,
            events: DeferredQueue::new(),
            next_id: PLAYER_ID + 1,
            commands: Vec::new(),
            seed,
        }
    }

    /// Spawn a sleeping bear
    pub fn spawn_bear(&mut self, position: Vec3, rotation: Quat) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;

        let bear = BearController::new(
            id,
            self.bear_config.clone(),
            KinematicAgent::new(position),
            Animator::new(),
            rotation,
            self.seed.wrapping_add(u64::from(id)),
            self.clock.now(),
        );
        self.bears.push(bear);
        log::debug!("Spawned bear {} at {}", id, position);

        id
    }

    /// Get a bear by ID
    pub fn get(&self, id: ActorId) -> Option<&EncounterBear> {
        self.bears.iter().find(|b| b.id() == id)
    }

    /// Get a mutable bear by ID
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut EncounterBear> {
        self.bears.iter_mut().find(|b| b.id() == id)
    }

    /// Remove a bear
    pub fn remove(&mut self, id: ActorId) -> Option<EncounterBear> {
        let pos = self.bears.iter().position(|b| b.id() == id)?;
        Some(self.bears.remove(pos))
    }

    /// Get the number of bears
    pub fn count(&self) -> usize {
        self.bears.len()
    }

    pub fn bears(&self) -> &[EncounterBear] {
        &self.bears
    }

    pub fn player(&self) -> &EncounterPlayer {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut EncounterPlayer {
        &mut self.player
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Animation commands from the last frame, in issue order per actor
    ///
    /// Replaced on every tick; commands issued between ticks (damage, hits)
    /// show up with the next frame.
    pub fn commands(&self) -> &[(ActorId, AnimCommand)] {
        &self.commands
    }

    /// Damage a bear, scheduling its removal if the hit kills it
    pub fn damage_bear(&mut self, id: ActorId, amount: f32) -> Option<DamageOutcome> {
        let now = self.clock.now();
        let bear = self.bears.iter_mut().find(|b| b.id() == id)?;
        let outcome = bear.take_damage(amount, now);
        if outcome == DamageOutcome::Killed {
            self.events.schedule(
                now,
                self.bear_config.corpse_lifetime,
                EncounterEvent::Despawn(id),
            );
        }
        Some(outcome)
    }

    /// Run one frame
    ///
    /// Order: due events, player, player body, bears, bear agents, then the
    /// frame's animation commands are collected from every actor.
    pub fn tick(&mut self, intent: &PlayerIntent, dt: f32) -> Tick {
        let tick = self.clock.advance(dt);
        self.commands.clear();

        for event in self.events.drain_due(tick.now) {
            match event {
                EncounterEvent::Despawn(id) => {
                    if self.remove(id).is_some() {
                        log::debug!("Despawned bear {}", id);
                    }
                }
            }
        }

        // A locked player stops steering its body
        let direction = if self.player.animator().is_locked() {
            Vec3::ZERO
        } else {
            intent.direction
        };
        if let Some(body) = self.player.animator_mut().movement_mut() {
            body.set_move_input(direction);
        }
        self.player.update(intent, &tick);
        if let Some(body) = self.player.animator_mut().movement_mut() {
            body.step(tick.dt);
        }

        let target = self.player.position();
        for bear in &mut self.bears {
            bear.update(target, &tick);
            bear.context_mut().nav_mut().step(tick.dt);
        }

        self.collect_commands();
        tick
    }

    fn collect_commands(&mut self) {
        let player = self.player.animator_mut().sink_mut().drain_commands();
        self.commands
            .extend(player.into_iter().map(|command| (PLAYER_ID, command)));

        for bear in &mut self.bears {
            let id = bear.id();
            let drained = bear.context_mut().sink_mut().drain_commands();
            self.commands
                .extend(drained.into_iter().map(|command| (id, command)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::AnimParam;
    use crate::game::bear::{BearState, BASE_BEAR};
    use crate::game::player::{PlayerState, BASE_PLAYER};

    const DT: f32 = 0.125;

    fn encounter() -> Encounter {
        Encounter::new(BASE_PLAYER, BASE_BEAR, Vec3::new(0.0, 0.0, -12.0), 3)
    }

    fn run(encounter: &mut Encounter, intent: &PlayerIntent, seconds: f32) {
        for _ in 0..(seconds / DT) as usize {
            encounter.tick(intent, DT);
        }
    }

    #[test]
    fn test_spawn_get_remove() {
        let mut encounter = encounter();
        assert_eq!(encounter.count(), 0);

        let a = encounter.spawn_bear(Vec3::ZERO, Quat::IDENTITY);
        let b = encounter.spawn_bear(Vec3::X * 20.0, Quat::IDENTITY);
        assert_ne!(a, b);
        assert_ne!(a, encounter.player().id());
        assert_eq!(encounter.count(), 2);
        assert_eq!(encounter.get(b).map(|bear| bear.position()), Some(Vec3::X * 20.0));

        assert!(encounter.remove(a).is_some());
        assert!(encounter.remove(a).is_none());
        assert!(encounter.get(a).is_none());
        assert_eq!(encounter.count(), 1);
    }

    #[test]
    fn test_idle_player_leaves_bear_asleep() {
        let mut encounter = encounter();
        let bear = encounter.spawn_bear(Vec3::ZERO, Quat::IDENTITY);
        run(&mut encounter, &PlayerIntent::default(), 2.0);

        assert_eq!(encounter.player().state(), PlayerState::Idle);
        assert_eq!(encounter.get(bear).map(|b| b.state()), Some(BearState::Sleeping));
    }

    #[test]
    fn test_approaching_player_wakes_bear() {
        let mut encounter = encounter();
        let bear = encounter.spawn_bear(Vec3::ZERO, Quat::IDENTITY);
        run(&mut encounter, &PlayerIntent::walk(Vec3::Z), 1.0);

        assert_eq!(encounter.player().state(), PlayerState::Move);
        let state = encounter.get(bear).map(|b| b.state());
        assert_eq!(state, Some(BearState::WakingUp));

        // Stand still until the bear wakes up and starts swinging
        run(&mut encounter, &PlayerIntent::default(), 3.0);
        let bear = encounter.get(bear).unwrap();
        assert_eq!(bear.state(), BearState::Combat);
        assert!(bear.context().attack_count() >= 1);
    }

    #[test]
    fn test_killed_bear_despawns_after_corpse_lifetime() {
        let mut encounter = encounter();
        let bear = encounter.spawn_bear(Vec3::ZERO, Quat::IDENTITY);
        encounter.tick(&PlayerIntent::default(), DT);

        assert_eq!(encounter.damage_bear(bear, 1000.0), Some(DamageOutcome::Killed));
        assert_eq!(encounter.damage_bear(bear, 10.0), Some(DamageOutcome::Ignored));

        run(&mut encounter, &PlayerIntent::default(), BASE_BEAR.corpse_lifetime - DT);
        assert_eq!(encounter.count(), 1);

        encounter.tick(&PlayerIntent::default(), DT);
        assert_eq!(encounter.count(), 0);
        assert!(encounter.damage_bear(bear, 10.0).is_none());
    }

    #[test]
    fn test_dead_player_stops_moving() {
        let mut encounter = encounter();
        let walk = PlayerIntent::walk(Vec3::X);
        run(&mut encounter, &walk, 0.5);

        let dying = PlayerIntent {
            die: true,
            ..walk
        };
        encounter.tick(&dying, DT);
        assert_eq!(encounter.player().state(), PlayerState::Die);

        run(&mut encounter, &walk, 0.25);
        let before = encounter.player().position();
        run(&mut encounter, &walk, 0.5);
        assert_eq!(encounter.player().position(), before);
    }

    #[test]
    fn test_command_logs_do_not_accumulate() {
        let mut encounter = encounter();
        let bear = encounter.spawn_bear(Vec3::new(0.0, 0.0, -8.0), Quat::IDENTITY);
        let walk = PlayerIntent::walk(Vec3::X);

        let mut longest = 0;
        for _ in 0..2000 {
            encounter.tick(&walk, DT);
            longest = longest.max(encounter.commands().len());
        }
        assert!(longest < 20, "one frame produced {} commands", longest);

        // Nothing is left behind in the actors' own logs
        assert!(encounter.player().animator().sink().commands().is_empty());
        let bear = encounter.get(bear).unwrap();
        assert!(bear.context().sink().commands().is_empty());
    }

    #[test]
    fn test_frame_commands_tagged_by_actor() {
        let mut encounter = encounter();
        let bear = encounter.spawn_bear(Vec3::new(0.0, 0.0, -10.0), Quat::IDENTITY);
        encounter.tick(&PlayerIntent::walk(Vec3::Z), DT);

        let commands = encounter.commands();
        assert!(commands.contains(&(
            encounter.player().id(),
            AnimCommand::SetBool(AnimParam::IsMoving, true)
        )));
        assert!(commands.contains(&(bear, AnimCommand::SetTrigger(AnimParam::Idle))));

        encounter.tick(&PlayerIntent::walk(Vec3::Z), DT);
        assert!(!encounter
            .commands()
            .contains(&(bear, AnimCommand::SetTrigger(AnimParam::Idle))));
    }

    #[test]
    fn test_paused_clock_freezes_bears() {
        let mut encounter = encounter();
        let bear = encounter.spawn_bear(Vec3::new(0.0, 0.0, -10.0), Quat::IDENTITY);
        encounter.tick(&PlayerIntent::default(), DT);
        assert_eq!(encounter.get(bear).map(|b| b.state()), Some(BearState::WakingUp));

        encounter.clock_mut().pause();
        run(&mut encounter, &PlayerIntent::default(), 4.0);
        assert_eq!(encounter.get(bear).map(|b| b.state()), Some(BearState::WakingUp));

        encounter.clock_mut().resume();
        run(&mut encounter, &PlayerIntent::default(), 1.5);
        assert_eq!(encounter.get(bear).map(|b| b.state()), Some(BearState::Combat));
    }
}
