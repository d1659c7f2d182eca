#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Car Dodger.
//!
//! The world owns the player, the obstacles on the road and the score. It is
//! only mutated through [`apply`] and only observed through [`query`].

use std::time::Duration;

use car_dodger_core::{Arena, Command, DifficultyLevel, Event, ObstacleId, Rect, Steering};

/// Width of the player's vehicle.
pub const PLAYER_WIDTH: f32 = 50.0;
/// Height of the player's vehicle.
pub const PLAYER_HEIGHT: f32 = 90.0;
/// Horizontal distance covered per frame for each held direction.
pub const PLAYER_SPEED: f32 = 6.0;
/// Gap left between the bottom of the player and the bottom of the screen.
pub const PLAYER_BOTTOM_OFFSET: f32 = 20.0;
/// Height shared by every obstacle.
pub const OBSTACLE_HEIGHT: f32 = 90.0;

/// Vehicle steered by the person playing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    rect: Rect,
    speed: f32,
}

impl Player {
    /// Creates a player centred horizontally near the bottom of the arena.
    #[must_use]
    pub fn spawn(arena: Arena) -> Self {
        let half_player = PLAYER_WIDTH as u32 / 2;
        let x = (arena.width() / 2).saturating_sub(half_player) as f32;
        let y = arena.height() as f32 - PLAYER_HEIGHT - PLAYER_BOTTOM_OFFSET;
        Self {
            rect: Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
        }
    }

    /// Area covered by the vehicle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Horizontal distance covered per frame for each held direction.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    fn steer(&mut self, steering: Steering, arena: Arena) {
        let mut x = self.rect.x();
        if steering.left() {
            x -= self.speed;
        }
        if steering.right() {
            x += self.speed;
        }
        let max_x = (arena.width() as f32 - self.rect.width()).max(0.0);
        self.rect = self.rect.with_origin(x.clamp(0.0, max_x), self.rect.y());
    }
}

/// Obstacle falling down the road.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    id: ObstacleId,
    rect: Rect,
    speed: f32,
}

impl Obstacle {
    /// Identifier allocated by the world when the obstacle spawned.
    #[must_use]
    pub const fn id(&self) -> ObstacleId {
        self.id
    }

    /// Area currently covered by the obstacle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Downward distance travelled per frame.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    // Motion is per frame, not scaled by elapsed time.
    fn advance(&mut self) {
        self.rect = self
            .rect
            .with_origin(self.rect.x(), self.rect.y() + self.speed);
    }
}

/// Represents the authoritative state of a single play session.
#[derive(Debug)]
pub struct World {
    arena: Arena,
    player: Player,
    obstacles: Vec<Obstacle>,
    score: u32,
    difficulty: DifficultyLevel,
    next_obstacle_id: u32,
    elapsed: Duration,
}

impl World {
    /// Creates a fresh session world on the default arena.
    #[must_use]
    pub fn new() -> Self {
        Self::with_arena(Arena::DEFAULT)
    }

    /// Creates a fresh session world on the provided arena.
    #[must_use]
    pub fn with_arena(arena: Arena) -> Self {
        Self {
            arena,
            player: Player::spawn(arena),
            obstacles: Vec::new(),
            score: 0,
            difficulty: DifficultyLevel::INITIAL,
            next_obstacle_id: 0,
            elapsed: Duration::ZERO,
        }
    }

    fn allocate_obstacle_id(&mut self) -> ObstacleId {
        let id = ObstacleId::new(self.next_obstacle_id);
        self.next_obstacle_id = self.next_obstacle_id.wrapping_add(1);
        id
    }

    fn advance_obstacles(&mut self, out_events: &mut Vec<Event>) {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.advance();
        }

        let bottom = self.arena.height() as f32;
        let (exited, remaining): (Vec<Obstacle>, Vec<Obstacle>) =
            std::mem::take(&mut self.obstacles)
                .into_iter()
                .partition(|obstacle| obstacle.rect.y() > bottom);
        self.obstacles = remaining;

        for obstacle in exited {
            self.score = self.score.saturating_add(1);
            out_events.push(Event::ObstacleExited {
                obstacle: obstacle.id,
                score: self.score,
            });
        }

        let player = self.player.rect();
        if let Some(hit) = self
            .obstacles
            .iter()
            .find(|obstacle| obstacle.rect.intersects(&player))
        {
            out_events.push(Event::PlayerCollided {
                obstacle: hit.id,
                score: self.score,
            });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.elapsed = world.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::SteerPlayer { steering } => {
            let arena = world.arena;
            world.player.steer(steering, arena);
        }
        Command::SpawnObstacle { x, width, speed } => {
            let id = world.allocate_obstacle_id();
            let rect = Rect::new(x, -OBSTACLE_HEIGHT, width, OBSTACLE_HEIGHT);
            world.obstacles.push(Obstacle { id, rect, speed });
            out_events.push(Event::ObstacleSpawned {
                obstacle: id,
                rect,
                speed,
            });
        }
        Command::AdvanceObstacles => world.advance_obstacles(out_events),
        Command::ConfigureDifficulty { level } => {
            world.difficulty = level;
            out_events.push(Event::DifficultyChanged { level });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{Obstacle, Player, World};
    use car_dodger_core::{Arena, DifficultyLevel};

    /// Screen and road dimensions the session plays on.
    #[must_use]
    pub fn arena(world: &World) -> Arena {
        world.arena
    }

    /// Provides read-only access to the player's vehicle.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Obstacles currently on the road, in spawn order.
    #[must_use]
    pub fn obstacles(world: &World) -> &[Obstacle] {
        &world.obstacles
    }

    /// Number of obstacles that left the bottom of the screen.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Difficulty level applied to future spawns.
    #[must_use]
    pub fn difficulty(world: &World) -> DifficultyLevel {
        world.difficulty
    }

    /// Total wall-clock time accumulated by the session.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(world: &mut World, x: f32, width: f32, speed: f32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::SpawnObstacle { x, width, speed }, &mut events);
        events
    }

    #[test]
    fn player_starts_centred_near_bottom() {
        let world = World::new();
        let rect = query::player(&world).rect();
        assert_eq!(rect.x(), 215.0);
        assert_eq!(rect.y(), 590.0);
        assert_eq!(rect.width(), PLAYER_WIDTH);
        assert_eq!(rect.height(), PLAYER_HEIGHT);
    }

    #[test]
    fn steering_moves_by_fixed_speed() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SteerPlayer {
                steering: Steering::new(true, false),
            },
            &mut events,
        );
        assert_eq!(query::player(&world).rect().x(), 209.0);

        apply(
            &mut world,
            Command::SteerPlayer {
                steering: Steering::new(false, true),
            },
            &mut events,
        );
        assert_eq!(query::player(&world).rect().x(), 215.0);
        assert!(events.is_empty(), "steering emits no events");
    }

    #[test]
    fn holding_both_directions_cancels_out() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SteerPlayer {
                steering: Steering::new(true, true),
            },
            &mut events,
        );
        assert_eq!(query::player(&world).rect().x(), 215.0);
    }

    #[test]
    fn steering_is_clamped_to_screen() {
        let mut world = World::new();
        let mut events = Vec::new();
        for _ in 0..100 {
            apply(
                &mut world,
                Command::SteerPlayer {
                    steering: Steering::new(false, true),
                },
                &mut events,
            );
        }
        assert_eq!(query::player(&world).rect().x(), 430.0);

        for _ in 0..100 {
            apply(
                &mut world,
                Command::SteerPlayer {
                    steering: Steering::new(true, false),
                },
                &mut events,
            );
        }
        assert_eq!(query::player(&world).rect().x(), 0.0);
    }

    #[test]
    fn spawned_obstacle_starts_above_screen() {
        let mut world = World::new();
        let events = spawn(&mut world, 100.0, 60.0, 4.0);

        let obstacles = query::obstacles(&world);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].rect().y(), -OBSTACLE_HEIGHT);
        assert_eq!(
            events,
            vec![Event::ObstacleSpawned {
                obstacle: ObstacleId::new(0),
                rect: Rect::new(100.0, -OBSTACLE_HEIGHT, 60.0, OBSTACLE_HEIGHT),
                speed: 4.0,
            }]
        );
    }

    #[test]
    fn obstacle_moves_by_speed_per_frame_regardless_of_dt() {
        let mut world = World::new();
        let _ = spawn(&mut world, 100.0, 60.0, 4.5);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(500),
            },
            &mut events,
        );
        apply(&mut world, Command::AdvanceObstacles, &mut events);
        apply(
            &mut world,
            Command::Tick { dt: Duration::ZERO },
            &mut events,
        );
        apply(&mut world, Command::AdvanceObstacles, &mut events);

        assert_eq!(query::obstacles(&world)[0].rect().y(), -OBSTACLE_HEIGHT + 9.0);
    }

    #[test]
    fn difficulty_changes_do_not_alter_spawned_obstacles() {
        let mut world = World::new();
        let _ = spawn(&mut world, 100.0, 60.0, 4.0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureDifficulty {
                level: DifficultyLevel::new(9.0, Duration::from_millis(400)),
            },
            &mut events,
        );
        apply(&mut world, Command::AdvanceObstacles, &mut events);

        assert_eq!(query::obstacles(&world)[0].speed(), 4.0);
        assert_eq!(query::difficulty(&world).obstacle_speed(), 9.0);
    }

    #[test]
    fn obstacle_leaving_screen_is_scored_once() {
        let mut world = World::new();
        // Lands exactly on the bottom edge after one frame, past it after two.
        let _ = spawn(&mut world, 40.0, 40.0, 790.0);
        let mut events = Vec::new();

        apply(&mut world, Command::AdvanceObstacles, &mut events);
        assert_eq!(query::score(&world), 0, "y == height is still on screen");

        apply(&mut world, Command::AdvanceObstacles, &mut events);
        assert_eq!(query::score(&world), 1);
        assert!(query::obstacles(&world).is_empty());
        assert_eq!(
            events,
            vec![Event::ObstacleExited {
                obstacle: ObstacleId::new(0),
                score: 1,
            }]
        );

        events.clear();
        apply(&mut world, Command::AdvanceObstacles, &mut events);
        assert_eq!(query::score(&world), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn survivors_keep_spawn_order() {
        let mut world = World::new();
        let _ = spawn(&mut world, 40.0, 40.0, 1.0);
        let _ = spawn(&mut world, 100.0, 40.0, 1000.0);
        let _ = spawn(&mut world, 200.0, 40.0, 2.0);
        let mut events = Vec::new();

        apply(&mut world, Command::AdvanceObstacles, &mut events);

        let ids: Vec<u32> = query::obstacles(&world)
            .iter()
            .map(|obstacle| obstacle.id().get())
            .collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(query::score(&world), 1);
    }

    #[test]
    fn overlapping_obstacle_reports_collision() {
        let mut world = World::new();
        // Bottom edge reaches y = 591 after one frame, overlapping the player at 590.
        let _ = spawn(&mut world, 200.0, 60.0, 591.0);
        let mut events = Vec::new();
        apply(&mut world, Command::AdvanceObstacles, &mut events);

        assert_eq!(
            events,
            vec![Event::PlayerCollided {
                obstacle: ObstacleId::new(0),
                score: 0,
            }]
        );
    }

    #[test]
    fn edge_touching_obstacle_does_not_collide() {
        let mut world = World::new();
        // Bottom edge lands exactly on the player's top edge.
        let _ = spawn(&mut world, 200.0, 60.0, 590.0);
        let mut events = Vec::new();
        apply(&mut world, Command::AdvanceObstacles, &mut events);

        assert!(events.is_empty());
    }

    #[test]
    fn tick_accumulates_elapsed_time() {
        let mut world = World::new();
        let mut events = Vec::new();
        for _ in 0..3 {
            apply(
                &mut world,
                Command::Tick {
                    dt: Duration::from_millis(16),
                },
                &mut events,
            );
        }
        assert_eq!(query::elapsed(&world), Duration::from_millis(48));
        assert_eq!(events.len(), 3);
    }
}
