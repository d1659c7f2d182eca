#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Car Dodger engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The session submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Title used for the game window.
pub const WINDOW_TITLE: &str = "Car Dodger";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Wall-clock time that elapsed since the previous frame.
        dt: Duration,
    },
    /// Applies the movement keys held during the current frame to the player.
    SteerPlayer {
        /// Logical movement keys held this frame.
        steering: Steering,
    },
    /// Requests that a new obstacle enters the road at the top of the screen.
    SpawnObstacle {
        /// Left edge of the obstacle in screen units.
        x: f32,
        /// Width of the obstacle in screen units.
        width: f32,
        /// Downward distance travelled by the obstacle on every frame.
        speed: f32,
    },
    /// Moves every obstacle, scores the ones that left the screen and checks
    /// the survivors against the player.
    AdvanceObstacles,
    /// Records the difficulty level used for future spawns.
    ConfigureDifficulty {
        /// Level that becomes active.
        level: DifficultyLevel,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of wall-clock time that elapsed in the frame.
        dt: Duration,
    },
    /// Confirms that an obstacle entered the road.
    ObstacleSpawned {
        /// Identifier allocated to the obstacle by the world.
        obstacle: ObstacleId,
        /// Area initially covered by the obstacle.
        rect: Rect,
        /// Downward distance travelled by the obstacle per frame.
        speed: f32,
    },
    /// Confirms that an obstacle left the bottom of the screen and was scored.
    ObstacleExited {
        /// Identifier of the obstacle that was removed.
        obstacle: ObstacleId,
        /// Score after crediting the obstacle.
        score: u32,
    },
    /// Announces that the player ran into an obstacle, ending the session.
    PlayerCollided {
        /// Identifier of the first obstacle found overlapping the player.
        obstacle: ObstacleId,
        /// Final score of the session.
        score: u32,
    },
    /// Announces that a new difficulty level became active.
    DifficultyChanged {
        /// Level that became active.
        level: DifficultyLevel,
    },
}

/// Unique identifier assigned to an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(u32);

impl ObstacleId {
    /// Creates a new obstacle identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Logical movement keys held during a frame.
///
/// Left and right are independent: holding both is legal and cancels out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Steering {
    left: bool,
    right: bool,
}

impl Steering {
    /// Steering with no movement keys held.
    pub const NONE: Self = Self::new(false, false);

    /// Creates a steering snapshot from the held logical keys.
    #[must_use]
    pub const fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }

    /// Whether the move-left action is held.
    #[must_use]
    pub const fn left(&self) -> bool {
        self.left
    }

    /// Whether the move-right action is held.
    #[must_use]
    pub const fn right(&self) -> bool {
        self.right
    }
}

/// Axis-aligned rectangle expressed in screen units with a top-left origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Top edge.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Right edge, exclusive.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge, exclusive.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns a copy of the rectangle moved to the provided top-left corner.
    #[must_use]
    pub const fn with_origin(self, x: f32, y: f32) -> Self {
        Self { x, y, ..self }
    }

    /// Returns a rectangle shrunk by `left`/`top` offsets with the given size,
    /// anchored relative to this rectangle's origin.
    #[must_use]
    pub fn inset(&self, left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(self.x + left, self.y + top, width, height)
    }

    /// Reports whether the two rectangles overlap on both axes.
    ///
    /// Edges are exclusive: rectangles that merely touch do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Screen dimensions and the road carved out of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arena {
    width: u32,
    height: u32,
    road_margin: u32,
}

impl Arena {
    /// Default 480x700 screen with 40 unit verges on each side.
    pub const DEFAULT: Self = Self::new(480, 700, 40);

    /// Creates a new arena description.
    #[must_use]
    pub const fn new(width: u32, height: u32, road_margin: u32) -> Self {
        Self {
            width,
            height,
            road_margin,
        }
    }

    /// Screen width in screen units.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Screen height in screen units.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Width of the verge on either side of the road.
    #[must_use]
    pub const fn road_margin(&self) -> u32 {
        self.road_margin
    }

    /// Leftmost column of the road playable area.
    #[must_use]
    pub const fn road_left(&self) -> u32 {
        self.road_margin
    }

    /// Rightmost column of the road playable area, exclusive.
    #[must_use]
    pub const fn road_right(&self) -> u32 {
        self.width.saturating_sub(self.road_margin)
    }

    /// Horizontal extent of the road playable area.
    #[must_use]
    pub const fn road_width(&self) -> u32 {
        self.road_right().saturating_sub(self.road_left())
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Obstacle speed and spawn cadence in effect for future spawns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyLevel {
    obstacle_speed: f32,
    spawn_interval: Duration,
}

impl DifficultyLevel {
    /// Level active at the start of every session.
    pub const INITIAL: Self = Self::new(4.0, Duration::from_millis(1000));

    /// Creates a new difficulty level.
    #[must_use]
    pub const fn new(obstacle_speed: f32, spawn_interval: Duration) -> Self {
        Self {
            obstacle_speed,
            spawn_interval,
        }
    }

    /// Downward distance travelled per frame by newly spawned obstacles.
    #[must_use]
    pub const fn obstacle_speed(&self) -> f32 {
        self.obstacle_speed
    }

    /// Minimum accumulated time between two spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self::INITIAL
    }
}
