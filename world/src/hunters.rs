//! Hunter pursuit: quarry selection and capped movement.

use last_stand_core::{Event, Point, Quarry, HUNTER_SPEED};

use crate::{Hunter, Target};

/// Picks the entity a hunter standing at `position` chases this turn.
///
/// The nearest target wins unless the defender is strictly closer. Ties
/// between targets keep the earliest one in insertion order. Without any
/// target the defender is the only candidate.
pub(crate) fn select_quarry(
    position: Point,
    targets: &[Target],
    defender: Point,
) -> (Quarry, Point) {
    let mut best: Option<(&Target, i64)> = None;
    for target in targets {
        let distance = position.distance_squared(target.position);
        if best.map_or(true, |(_, nearest)| distance < nearest) {
            best = Some((target, distance));
        }
    }

    let defender_distance = position.distance_squared(defender);
    match best {
        Some((target, distance)) if defender_distance >= distance => {
            (Quarry::Target(target.id), target.position)
        }
        _ => (Quarry::Defender, defender),
    }
}

/// Moves every hunter one capped step toward its quarry.
///
/// Targets and the defender do not move during this sub-step, so each hunter's
/// choice is independent of the others.
pub(crate) fn advance_hunters(
    hunters: &mut [Hunter],
    targets: &[Target],
    defender: Point,
    out_events: &mut Vec<Event>,
) {
    for hunter in hunters.iter_mut() {
        let (quarry, destination) = select_quarry(hunter.position, targets, defender);
        let from = hunter.position;
        hunter.position = from.move_toward(destination, HUNTER_SPEED);
        out_events.push(Event::HunterAdvanced {
            hunter: hunter.id,
            from,
            to: hunter.position,
            quarry,
        });
    }
}
