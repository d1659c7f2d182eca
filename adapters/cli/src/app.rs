//! Screen state machine driven once per rendered frame.

use anyhow::{Context, Result};
use car_dodger_core::{Arena, Steering};
use car_dodger_rendering::{lane_offset_for, FrameInput, LoopControl, Scene, SceneView};
use car_dodger_session::{Session, SessionConfig, StepOutcome};
use car_dodger_system_spawning as spawning;
use car_dodger_world::query;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

#[derive(Debug)]
enum Screen {
    Playing(Session),
    GameOver { final_score: u32 },
}

/// Owns the active screen and hands each session a fresh seed.
///
/// Every session of a run plays on the arena of the first one.
#[derive(Debug)]
pub(crate) struct App {
    seeds: ChaCha8Rng,
    arena: Arena,
    screen: Screen,
    clock: Duration,
}

impl App {
    /// Starts a run whose session seeds derive from `seed`.
    pub(crate) fn new(seed: u64) -> Result<Self> {
        let mut seeds = ChaCha8Rng::seed_from_u64(seed);
        let config = SessionConfig::with_seed(seeds.gen());
        let arena = config.arena();
        let session = Session::new(config).context("failed to start the first session")?;

        Ok(Self {
            seeds,
            arena,
            screen: Screen::Playing(session),
            clock: Duration::ZERO,
        })
    }

    /// Scene describing the current screen.
    pub(crate) fn scene(&self) -> Scene {
        let (lane_offset, view) = match &self.screen {
            Screen::Playing(session) => {
                let world = session.world();
                let view = SceneView::Playing {
                    player: query::player(world).rect(),
                    obstacles: query::obstacles(world)
                        .iter()
                        .map(|obstacle| obstacle.rect())
                        .collect(),
                    score: query::score(world),
                };
                (lane_offset_for(self.clock), view)
            }
            Screen::GameOver { final_score } => (
                0.0,
                SceneView::GameOver {
                    final_score: *final_score,
                },
            ),
        };
        Scene::new(self.arena, lane_offset, view)
    }

    /// Advances the active screen by one frame and rewrites `scene`.
    ///
    /// Fails only when a restart cannot build its session.
    pub(crate) fn frame(
        &mut self,
        dt: Duration,
        input: FrameInput,
        scene: &mut Scene,
    ) -> Result<LoopControl> {
        self.clock = self.clock.saturating_add(dt);

        if input.quit_requested {
            log::info!("window closed");
            return Ok(LoopControl::Exit);
        }

        let next = match &mut self.screen {
            Screen::Playing(session) => {
                match session.step(dt, Steering::new(input.move_left, input.move_right)) {
                    StepOutcome::Running => None,
                    StepOutcome::Crashed { score } => {
                        log::info!("game over with {score} points");
                        Some(Screen::GameOver { final_score: score })
                    }
                }
            }
            Screen::GameOver { .. } => {
                if input.cancel {
                    log::info!("leaving from the game over screen");
                    return Ok(LoopControl::Exit);
                }
                if input.confirm {
                    let spawn_config = spawning::Config::with_seed(self.seeds.gen());
                    let config = SessionConfig::new(self.arena, spawn_config);
                    let session = Session::new(config).context("failed to restart")?;
                    log::info!("restarting");
                    Some(Screen::Playing(session))
                } else {
                    None
                }
            }
        };

        if let Some(screen) = next {
            self.screen = screen;
        }
        *scene = self.scene();
        Ok(LoopControl::Continue)
    }
}
