use last_stand_core::{
    Command, Event, HunterId, HunterSnapshot, Point, TargetId, TargetSnapshot, WorldSnapshot,
    WEAPON_RANGE_SQUARED,
};
use last_stand_world::{self as world, query, World};
use proptest::prelude::*;

fn snapshot(defender: Point, targets: &[(u32, Point)], hunters: &[(u32, Point)]) -> WorldSnapshot {
    WorldSnapshot {
        defender,
        targets: targets
            .iter()
            .map(|&(id, position)| TargetSnapshot {
                id: TargetId::new(id),
                position,
            })
            .collect(),
        hunters: hunters
            .iter()
            .map(|&(id, position)| HunterSnapshot {
                id: HunterId::new(id),
                position,
            })
            .collect(),
    }
}

fn play(world: &mut World, destination: Point) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::AdvanceTurn { destination }, &mut events);
    events
}

#[test]
fn defender_takes_a_speed_capped_step() {
    let mut world = World::from_snapshot(&snapshot(
        Point::new(9_000, 4_500),
        &[(0, Point::new(0, 0))],
        &[(0, Point::new(15_000, 8_000))],
    ));

    let events = play(&mut world, Point::new(10_000, 5_500));

    assert_eq!(query::defender(&world), Point::new(9_707, 5_207));
    assert!(events.contains(&Event::DefenderAdvanced {
        from: Point::new(9_000, 4_500),
        to: Point::new(9_707, 5_207),
    }));
}

#[test]
fn only_the_coincident_target_is_consumed() {
    let mut world = World::from_snapshot(&snapshot(
        Point::new(5_000, 5_000),
        &[
            (0, Point::new(1_000, 1_000)),
            (1, Point::new(10_000, 8_000)),
        ],
        &[
            (0, Point::new(1_000, 1_300)),
            (1, Point::new(14_000, 8_000)),
        ],
    ));

    let events = play(&mut world, Point::new(5_000, 5_000));

    let remaining: Vec<TargetId> = query::targets(&world).iter().map(|t| t.id()).collect();
    assert_eq!(remaining, vec![TargetId::new(1)]);
    assert_eq!(query::hunters(&world).len(), 2);
    assert_eq!(
        query::hunter_position(&world, HunterId::new(1)),
        Some(Point::new(13_600, 8_000))
    );
    assert!(events.contains(&Event::TargetConsumed {
        target: TargetId::new(0),
        position: Point::new(1_000, 1_000),
    }));
}

#[test]
fn double_kill_awards_the_two_kill_combo() {
    let mut world = World::from_snapshot(&snapshot(
        Point::new(5_000, 5_000),
        &[(0, Point::new(0, 0)), (1, Point::new(15_000, 8_000))],
        &[
            (0, Point::new(5_000, 6_000)),
            (1, Point::new(6_000, 5_000)),
            (2, Point::new(12_000, 1_000)),
        ],
    ));

    let _ = play(&mut world, Point::new(5_000, 5_000));

    let survivors: Vec<HunterId> = query::hunters(&world).iter().map(|h| h.id()).collect();
    assert_eq!(survivors, vec![HunterId::new(2)]);
    assert_eq!(query::current_score(&world), 2 * 2 * 10 + 2 * 2 * 10 * 2);
}

#[test]
fn four_kills_escalate_through_the_combo_sequence() {
    let mut world = World::from_snapshot(&snapshot(
        Point::new(8_000, 4_500),
        &[(0, Point::new(0, 0))],
        &[
            (0, Point::new(8_500, 4_500)),
            (1, Point::new(7_500, 4_500)),
            (2, Point::new(8_000, 5_000)),
            (3, Point::new(8_000, 4_000)),
        ],
    ));

    let _ = play(&mut world, Point::new(8_000, 4_500));

    assert!(query::hunters(&world).is_empty());
    assert_eq!(query::current_score(&world), 10 * (1 + 2 + 3 + 5));
}

#[test]
fn a_kill_on_the_last_turn_of_the_last_target_reports_zero() {
    let mut world = World::from_snapshot(&snapshot(
        Point::new(5_000, 5_000),
        &[(0, Point::new(1_000, 1_000))],
        &[(0, Point::new(1_000, 1_200)), (1, Point::new(5_000, 5_500))],
    ));

    let events = play(&mut world, Point::new(5_000, 5_000));

    assert_eq!(query::accumulated_score(&world), 10);
    assert_eq!(query::current_score(&world), 0);
    assert_eq!(
        events.last(),
        Some(&Event::TurnResolved { turn: 1, score: 0 })
    );
}

fn numbered(points: Vec<Point>) -> Vec<(u32, Point)> {
    (0u32..).zip(points).collect()
}

fn field_point() -> impl Strategy<Value = Point> {
    (0i32..16_000, 0i32..9_000).prop_map(|(x, y)| Point::new(x, y))
}

fn clustered_point() -> impl Strategy<Value = Point> {
    (0i32..6, 0i32..6).prop_map(|(x, y)| Point::new(x * 300, y * 300))
}

proptest! {
    /// Every hunter in range is destroyed and none out of range is.
    #[test]
    fn shooting_is_complete(
        defender in field_point(),
        destination in field_point(),
        targets in prop::collection::vec(field_point(), 1..6),
        hunters in prop::collection::vec(field_point(), 1..12),
    ) {
        let targets = numbered(targets);
        let hunters = numbered(hunters);
        let mut world = World::from_snapshot(&snapshot(defender, &targets, &hunters));

        let events = play(&mut world, destination);
        let defender = query::defender(&world);

        for hunter in query::hunters(&world) {
            let position = hunter.position();
            prop_assert!(position.distance_squared(defender) > WEAPON_RANGE_SQUARED);
        }
        let mut destroyed = 0;
        for event in &events {
            if let Event::HunterDestroyed { position, .. } = event {
                prop_assert!(position.distance_squared(defender) <= WEAPON_RANGE_SQUARED);
                destroyed += 1;
            }
        }
        prop_assert_eq!(destroyed + query::hunters(&world).len(), hunters.len());
    }

    /// A target is removed exactly when a surviving hunter stands on it.
    #[test]
    fn consumption_is_exact(
        targets in prop::collection::vec(clustered_point(), 1..8),
        hunters in prop::collection::vec(clustered_point(), 1..8),
    ) {
        let targets = numbered(targets);
        let hunters = numbered(hunters);
        let far_corner = Point::new(15_999, 8_999);
        let mut world = World::from_snapshot(&snapshot(far_corner, &targets, &hunters));

        let events = play(&mut world, far_corner);
        let live_hunters: Vec<Point> = query::hunters(&world)
            .iter()
            .map(|h| h.position())
            .collect();

        for target in query::targets(&world) {
            prop_assert!(!live_hunters.contains(&target.position()));
        }
        let mut consumed = 0;
        for event in &events {
            if let Event::TargetConsumed { position, .. } = event {
                prop_assert!(live_hunters.contains(position));
                consumed += 1;
            }
        }
        prop_assert_eq!(consumed + query::targets(&world).len(), targets.len());
    }
}
