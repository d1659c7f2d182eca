#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system responsible for emitting obstacle spawn commands.

use std::time::Duration;

use car_dodger_core::{Arena, Command, DifficultyLevel, Event};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Narrowest obstacle spawned by default.
pub const DEFAULT_MIN_WIDTH: u32 = 40;
/// Widest obstacle spawned by default.
pub const DEFAULT_MAX_WIDTH: u32 = 80;

/// Reasons a spawning configuration is rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The minimum width exceeds the maximum width.
    #[error("obstacle width range {min}..={max} is empty")]
    EmptyWidthRange {
        /// Requested minimum width.
        min: u32,
        /// Requested maximum width.
        max: u32,
    },
    /// Obstacles must cover at least one unit of road.
    #[error("obstacle width must be positive")]
    ZeroWidth,
    /// The widest obstacle would not fit between the road margins.
    #[error("obstacles up to {max_width} wide do not fit a road {road_width} wide")]
    WiderThanRoad {
        /// Requested maximum width.
        max_width: u32,
        /// Width of the road playable area.
        road_width: u32,
    },
}

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    min_width: u32,
    max_width: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration spawning obstacles with widths in
    /// `min_width..=max_width`.
    pub fn new(min_width: u32, max_width: u32, rng_seed: u64) -> Result<Self, ConfigError> {
        if min_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if min_width > max_width {
            return Err(ConfigError::EmptyWidthRange {
                min: min_width,
                max: max_width,
            });
        }

        Ok(Self {
            min_width,
            max_width,
            rng_seed,
        })
    }

    /// Creates a configuration using the default width range and the given seed.
    #[must_use]
    pub const fn with_seed(rng_seed: u64) -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            rng_seed,
        }
    }

    /// Verifies that the widest obstacle fits on the arena's road.
    pub fn check_fits(&self, arena: Arena) -> Result<(), ConfigError> {
        let road_width = arena.road_width();
        if self.max_width > road_width {
            return Err(ConfigError::WiderThanRoad {
                max_width: self.max_width,
                road_width,
            });
        }
        Ok(())
    }
}

/// Pure system that emits a spawn command whenever the spawn timer elapses.
#[derive(Debug)]
pub struct Spawning {
    min_width: u32,
    max_width: u32,
    timer: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            min_width: config.min_width,
            max_width: config.max_width,
            timer: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Time accumulated since the previous spawn.
    #[must_use]
    pub const fn timer(&self) -> Duration {
        self.timer
    }

    /// Consumes the frame's events and emits at most one spawn command.
    pub fn handle(
        &mut self,
        events: &[Event],
        difficulty: DifficultyLevel,
        arena: Arena,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                self.timer = self.timer.saturating_add(*dt);
            }
        }

        if self.timer < difficulty.spawn_interval() {
            return;
        }

        // The timer restarts from zero; overshoot is not carried over.
        self.timer = Duration::ZERO;

        let width = self.rng.gen_range(self.min_width..=self.max_width);
        let x_min = arena.road_left();
        let x_max = arena.road_right().saturating_sub(width).max(x_min);
        let x = self.rng.gen_range(x_min..=x_max);

        log::debug!(
            "spawning obstacle at x={x} width={width} speed={}",
            difficulty.obstacle_speed()
        );
        out.push(Command::SpawnObstacle {
            x: x as f32,
            width: width as f32,
            speed: difficulty.obstacle_speed(),
        });
    }
}
