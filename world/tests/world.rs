use car_dodger_core::{Arena, Command, Event, Steering};
use car_dodger_world::{self as world, query, World, PLAYER_WIDTH};
use proptest::prelude::*;

fn steering_strategy() -> impl Strategy<Value = Steering> {
    (any::<bool>(), any::<bool>()).prop_map(|(left, right)| Steering::new(left, right))
}

proptest! {
    #[test]
    fn player_stays_on_screen(script in prop::collection::vec(steering_strategy(), 0..400)) {
        let mut world = World::new();
        let mut events = Vec::new();
        let max_x = Arena::DEFAULT.width() as f32 - PLAYER_WIDTH;

        for steering in script {
            world::apply(&mut world, Command::SteerPlayer { steering }, &mut events);
            let x = query::player(&world).rect().x();
            prop_assert!((0.0..=max_x).contains(&x), "player escaped to x = {x}");
        }
    }

    #[test]
    fn score_counts_each_exit_exactly_once(
        speeds in prop::collection::vec(1.0f32..80.0, 1..20),
        frames in 1usize..400,
    ) {
        let mut world = World::new();
        let mut events = Vec::new();
        // Park the spawns on the left verge so nothing touches the player.
        for speed in &speeds {
            world::apply(
                &mut world,
                Command::SpawnObstacle { x: 0.0, width: 10.0, speed: *speed },
                &mut events,
            );
        }

        let mut previous = 0;
        let mut exits = 0;
        for _ in 0..frames {
            events.clear();
            world::apply(&mut world, Command::AdvanceObstacles, &mut events);
            exits += events
                .iter()
                .filter(|event| matches!(event, Event::ObstacleExited { .. }))
                .count();
            let score = query::score(&world);
            prop_assert!(score >= previous);
            previous = score;
        }

        prop_assert_eq!(query::score(&world) as usize, exits);
        prop_assert_eq!(exits + query::obstacles(&world).len(), speeds.len());
    }
}

#[test]
fn obstacles_remaining_after_exit_are_still_collision_checked() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnObstacle {
            x: 0.0,
            width: 10.0,
            speed: 1000.0,
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SpawnObstacle {
            x: 220.0,
            width: 40.0,
            speed: 600.0,
        },
        &mut events,
    );
    events.clear();

    world::apply(&mut world, Command::AdvanceObstacles, &mut events);

    assert!(matches!(
        events.as_slice(),
        [
            Event::ObstacleExited { score: 1, .. },
            Event::PlayerCollided { score: 1, .. }
        ]
    ));
}
