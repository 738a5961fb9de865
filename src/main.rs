use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use glam::Vec2;
use log::info;

use rusted_platformer::engine::game_loop::GameLoop;
use rusted_platformer::engine::input::{Action, PlayerInput};
use rusted_platformer::game::characters::ControllerEvent;
use rusted_platformer::game::enemies::GhostEvent;
use rusted_platformer::game::world::Arena;
use rusted_platformer::game::{GameConfig, Upgrade};

/// Simulated frame length fed to the loop (a 60 Hz display)
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Demo length in frames
const DEMO_FRAMES: u32 = 600;

/// Actions held between two ticks (inclusive start, exclusive end)
const SCRIPT: &[(u64, u64, Action)] = &[
    (60, 150, Action::MoveRight),
    (100, 150, Action::Run),
    (120, 122, Action::Jump),
    (180, 182, Action::Punch),
    (200, 202, Action::Kick),
    (240, 300, Action::MoveLeft),
    (260, 262, Action::Jump),
    (268, 270, Action::Jump),
    (320, 360, Action::Down),
    (330, 332, Action::Jump),
];

fn build_arena(config: GameConfig) -> Result<Arena> {
    let mut arena = Arena::new(config, Vec2::new(0.0, 1.0))?;
    arena.add_ground(Vec2::new(0.0, -0.5), Vec2::new(40.0, 1.0));
    arena.add_ledge(Vec2::new(-8.0, 1.5), Vec2::new(2.0, 1.0));
    arena.add_ladder(Vec2::new(-4.0, 1.5), Vec2::new(0.6, 3.0));
    arena.add_platform(
        Vec2::new(10.0, 2.0),
        Vec2::new(3.0, 0.5),
        vec![Vec2::new(14.0, 2.0), Vec2::new(10.0, 2.0)],
        0,
    )?;
    arena.spawn_ghost(Vec2::new(4.0, 1.0));
    Ok(arena)
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Platformer...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(Path::new(&path))
            .with_context(|| format!("failed to load config {path}"))?,
        None => GameConfig::default(),
    };
    let save_path = args.next().map(PathBuf::from);

    let mut arena = build_arena(config)?;
    let mut game_loop = GameLoop::new();
    let mut input = PlayerInput::new(0);

    for _ in 0..DEMO_FRAMES {
        let ticks = game_loop.begin_frame(FRAME_TIME);
        for _ in 0..ticks {
            let tick = arena.tick_count();
            for &(start, end, action) in SCRIPT {
                if tick == start {
                    input.press(action);
                } else if tick == end {
                    input.release(action);
                }
            }
            if tick == 400 {
                arena.pick_up(Upgrade::DoubleJump);
            }

            let report = arena.step(game_loop.fixed_timestep(), &input.sample());
            input.update();

            for event in &report.player.events {
                match event {
                    ControllerEvent::StateChanged { from, to } => {
                        info!("[{tick}] player {} -> {}", from.label(), to.label());
                    }
                    ControllerEvent::Attacked(attack) => {
                        info!("[{tick}] {:?} hit {} target(s)", attack.kind, attack.hits);
                    }
                    other => info!("[{tick}] {other:?}"),
                }
            }
            for (index, event) in &report.ghost_events {
                if !matches!(event, GhostEvent::Healed { .. }) {
                    info!("[{tick}] ghost {index}: {event:?}");
                }
            }
        }
    }

    let hud = arena.hud();
    info!(
        "Finished after {} ticks ({:.2}s): {} | {}",
        game_loop.tick_count(),
        game_loop.sim_time(),
        hud.health_text,
        hud.charge_text
    );

    let store = arena.save();
    match save_path {
        Some(path) => {
            store.save_to_file(&path)?;
            info!("Saved {} entries to {}", store.len(), path.display());
        }
        None => info!("Save state:\n{}", store.to_ron()?),
    }

    Ok(())
}
