#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-stepped orchestration of a single play session.
//!
//! A [`Session`] owns the world and the pure systems that drive it. Each call
//! to [`Session::step`] runs one frame in a fixed order: clock, steering,
//! spawning, obstacle motion with scoring and collision, then the difficulty
//! ramp. Rendering is left to adapters, which read the world through
//! [`car_dodger_world::query`].

use std::time::Duration;

use car_dodger_core::{Arena, Command, Event, Steering};
use car_dodger_system_difficulty::Difficulty;
use car_dodger_system_spawning::{self as spawning, ConfigError, Spawning};
use car_dodger_world::{self as world, query, World};
use thiserror::Error;

/// Errors raised while assembling a session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The spawning configuration cannot be used on the arena.
    #[error("invalid spawning configuration")]
    Spawning(#[from] ConfigError),
}

/// Parameters used to build every session of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    arena: Arena,
    spawning: spawning::Config,
}

impl SessionConfig {
    /// Creates a session configuration.
    #[must_use]
    pub const fn new(arena: Arena, spawning: spawning::Config) -> Self {
        Self { arena, spawning }
    }

    /// Default arena and spawn widths with the provided RNG seed.
    #[must_use]
    pub const fn with_seed(rng_seed: u64) -> Self {
        Self::new(Arena::DEFAULT, spawning::Config::with_seed(rng_seed))
    }

    /// Arena every session plays on.
    #[must_use]
    pub const fn arena(&self) -> Arena {
        self.arena
    }
}

/// Result of advancing the session by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The player is still on the road.
    Running,
    /// The player hit an obstacle; the session is over.
    Crashed {
        /// Score at the moment of the collision.
        score: u32,
    },
}

/// One continuous play attempt from spawn to collision.
#[derive(Debug)]
pub struct Session {
    world: World,
    spawning: Spawning,
    difficulty: Difficulty,
    events: Vec<Event>,
    commands: Vec<Command>,
    frames: u64,
}

impl Session {
    /// Builds a fresh session from the configuration.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let arena = config.arena();
        config.spawning.check_fits(arena)?;
        log::info!(
            "starting session on {}x{} arena",
            arena.width(),
            arena.height()
        );

        Ok(Self {
            world: World::with_arena(arena),
            spawning: Spawning::new(config.spawning),
            difficulty: Difficulty::new(),
            events: Vec::new(),
            commands: Vec::new(),
            frames: 0,
        })
    }

    /// Read-only access to the session world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Number of frames stepped so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Applies a command outside the regular frame order and returns the
    /// events it produced.
    ///
    /// Used to script sessions, e.g. placing obstacles at known positions.
    pub fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        events
    }

    /// Advances the session by one frame.
    ///
    /// `dt` is the wall-clock time since the previous frame and only feeds
    /// the spawn timer; obstacles move a fixed distance per call.
    pub fn step(&mut self, dt: Duration, steering: Steering) -> StepOutcome {
        self.frames = self.frames.saturating_add(1);
        self.events.clear();
        self.commands.clear();

        world::apply(&mut self.world, Command::Tick { dt }, &mut self.events);
        world::apply(
            &mut self.world,
            Command::SteerPlayer { steering },
            &mut self.events,
        );

        self.spawning.handle(
            &self.events,
            query::difficulty(&self.world),
            query::arena(&self.world),
            &mut self.commands,
        );
        self.flush_commands();

        let advanced_from = self.events.len();
        world::apply(&mut self.world, Command::AdvanceObstacles, &mut self.events);
        let advanced = &self.events[advanced_from..];

        for event in advanced {
            match event {
                Event::ObstacleExited { obstacle, score } => {
                    log::debug!("obstacle {} exited, score {score}", obstacle.get());
                }
                Event::PlayerCollided { obstacle, score } => {
                    log::info!(
                        "collided with obstacle {} after {} frames ({:?}), final score {score}",
                        obstacle.get(),
                        self.frames,
                        query::elapsed(&self.world)
                    );
                    return StepOutcome::Crashed { score: *score };
                }
                _ => {}
            }
        }

        self.difficulty.handle(advanced, &mut self.commands);
        self.flush_commands();

        StepOutcome::Running
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}
