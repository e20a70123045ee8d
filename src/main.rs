use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use log::{debug, info};

use bear_trail::config;
use bear_trail::engine::animation::AnimCommand;
use bear_trail::engine::FIXED_TIMESTEP;
use bear_trail::game::bear::BearConfig;
use bear_trail::game::player::{PlayerConfig, PlayerIntent};
use bear_trail::game::{ActorId, Encounter};

/// One step of the scripted encounter
struct Phase {
    name: &'static str,
    seconds: f32,
    intent: PlayerIntent,
    /// Damage dealt to the bear when the phase starts
    strike: f32,
}

impl Phase {
    fn new(name: &'static str, seconds: f32, intent: PlayerIntent) -> Self {
        Self {
            name,
            seconds,
            intent,
            strike: 0.0,
        }
    }

    fn strike(mut self, damage: f32) -> Self {
        self.strike = damage;
        self
    }
}

fn script() -> Vec<Phase> {
    let jump = PlayerIntent {
        jump: true,
        ..PlayerIntent::default()
    };
    let celebrate = PlayerIntent {
        victory: true,
        ..PlayerIntent::default()
    };

    vec![
        Phase::new("approach", 1.6, PlayerIntent::walk(Vec3::Z)),
        Phase::new("stand ground", 3.0, PlayerIntent::default()),
        Phase::new("strike", 1.0, PlayerIntent::default()).strike(30.0),
        Phase::new("jump", 1.0, jump),
        Phase::new("retreat", 3.0, PlayerIntent::walk(Vec3::NEG_Z)),
        Phase::new("wait", 6.0, PlayerIntent::default()),
        Phase::new("celebrate", 1.0, celebrate),
    ]
}

fn run_phase(encounter: &mut Encounter, bear: ActorId, phase: &Phase) {
    info!("Phase '{}' for {:.1}s", phase.name, phase.seconds);

    if phase.strike > 0.0 {
        if let Some(outcome) = encounter.damage_bear(bear, phase.strike) {
            info!("Player strikes bear {}: {:?}", bear, outcome);
        }
    }

    let frames = (phase.seconds / FIXED_TIMESTEP).round() as usize;
    for _ in 0..frames {
        let player_before = encounter.player().state();
        let bear_before = encounter.get(bear).map(|b| b.state());

        let tick = encounter.tick(&phase.intent, FIXED_TIMESTEP);
        for (actor, command) in encounter.commands() {
            if let AnimCommand::SetTrigger(param) = command {
                debug!("[{:>6.2}s] actor {} trigger {:?}", tick.now, actor, param);
            }
        }

        let player_after = encounter.player().state();
        if player_after != player_before {
            info!("[{:>6.2}s] player: {} -> {}", tick.now, player_before, player_after);
        }
        let bear_after = encounter.get(bear).map(|b| b.state());
        if let (Some(before), Some(after)) = (bear_before, bear_after) {
            if before != after {
                info!("[{:>6.2}s] bear {}: {} -> {}", tick.now, bear, before, after);
            }
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Bear Trail...");

    let bear_config = match std::env::args().nth(1) {
        Some(path) => config::load::<BearConfig, _>(&path)
            .with_context(|| format!("Failed to load bear config from {}", path))?,
        None => BearConfig::default(),
    };

    let mut encounter = Encounter::new(
        PlayerConfig::default(),
        bear_config,
        Vec3::new(0.0, 0.0, -15.0),
        0xbea7,
    );
    let bear = encounter.spawn_bear(Vec3::ZERO, Quat::IDENTITY);

    for phase in script() {
        run_phase(&mut encounter, bear, &phase);
    }

    let player = encounter.player();
    info!(
        "Finished after {} frames: player {} at {:?}",
        encounter.clock().frame_count(),
        player.state(),
        player.position()
    );
    if let Some(bear) = encounter.get(bear) {
        info!(
            "Bear {} is {} with {:.0} hp after {} attacks",
            bear.id(),
            bear.state(),
            bear.health().current(),
            bear.context().attack_count()
        );
    }

    Ok(())
}
