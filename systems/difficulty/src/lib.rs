#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Score-driven difficulty ramp.
//!
//! The level is recomputed from the score whenever a frame ends with the score
//! on a positive multiple of ten. A frame whose exits carry the score past a
//! multiple leaves the level alone. Each multiple configures the world once,
//! however many frames the score rests on it.

use std::time::Duration;

use car_dodger_core::{Command, DifficultyLevel, Event};

/// Points needed to advance one difficulty tier.
pub const POINTS_PER_TIER: u32 = 10;
/// Obstacle speed gained per tier.
pub const SPEED_PER_TIER: f32 = 0.5;
/// Spawn interval removed per point of score.
pub const INTERVAL_STEP_PER_POINT: Duration = Duration::from_millis(10);
/// Shortest spawn interval the ramp produces.
pub const MIN_SPAWN_INTERVAL: Duration = Duration::from_millis(400);

/// Computes the difficulty level configured when the score reaches `score`.
///
/// Only evaluated on positive multiples of [`POINTS_PER_TIER`].
#[must_use]
pub fn level_for_score(score: u32) -> DifficultyLevel {
    let tier = score / POINTS_PER_TIER;
    let initial = DifficultyLevel::INITIAL;
    let speed = initial.obstacle_speed() + tier as f32 * SPEED_PER_TIER;
    let interval = initial
        .spawn_interval()
        .saturating_sub(INTERVAL_STEP_PER_POINT.saturating_mul(score))
        .max(MIN_SPAWN_INTERVAL);
    DifficultyLevel::new(speed, interval)
}

/// Pure system that reacts to scoring events and emits difficulty commands.
#[derive(Debug, Default)]
pub struct Difficulty {
    tier: u32,
}

impl Difficulty {
    /// Creates a ramp positioned at the first tier.
    #[must_use]
    pub const fn new() -> Self {
        Self { tier: 0 }
    }

    /// Tier most recently configured.
    #[must_use]
    pub const fn tier(&self) -> u32 {
        self.tier
    }

    /// Consumes the frame's events and emits a reconfiguration when the frame
    /// ends with the score on a new positive multiple of ten.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let Some(score) = events
            .iter()
            .filter_map(|event| match event {
                Event::ObstacleExited { score, .. } => Some(*score),
                _ => None,
            })
            .max()
        else {
            return;
        };

        if score == 0 || score % POINTS_PER_TIER != 0 {
            return;
        }
        let tier = score / POINTS_PER_TIER;
        if tier <= self.tier {
            return;
        }

        self.tier = tier;
        let level = level_for_score(score);
        log::info!(
            "difficulty tier {tier}: speed {} interval {:?}",
            level.obstacle_speed(),
            level.spawn_interval()
        );
        out.push(Command::ConfigureDifficulty { level });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_score_matches_initial_level() {
        assert_eq!(level_for_score(0), DifficultyLevel::INITIAL);
    }

    #[test]
    fn ramp_values_at_reference_scores() {
        let ten = level_for_score(10);
        assert_eq!(ten.obstacle_speed(), 4.5);
        assert_eq!(ten.spawn_interval(), Duration::from_millis(900));

        let fifty = level_for_score(50);
        assert_eq!(fifty.obstacle_speed(), 6.5);
        assert_eq!(fifty.spawn_interval(), Duration::from_millis(500));
    }

    #[test]
    fn spawn_interval_floors_at_minimum() {
        for score in [60, 70, 71, 150, 10_000, u32::MAX] {
            assert_eq!(level_for_score(score).spawn_interval(), MIN_SPAWN_INTERVAL);
        }
    }

    #[test]
    fn each_multiple_steps_speed_and_interval() {
        let twenty = level_for_score(20);
        assert_eq!(twenty.obstacle_speed(), 5.0);
        assert_eq!(twenty.spawn_interval(), Duration::from_millis(800));

        let forty = level_for_score(40);
        assert_eq!(forty.obstacle_speed(), 6.0);
        assert_eq!(forty.spawn_interval(), Duration::from_millis(600));
    }
}
