//! Defender weapon resolution and combo scoring.

use last_stand_core::{kill_points, Event, Point, WEAPON_RANGE_SQUARED};

use crate::Hunter;

/// Destroys every hunter within weapon range of `defender` and returns the points earned.
///
/// Kills are sequenced from the last stored hunter to the first; the sequence
/// index selects the combo multiplier. `live_targets` is the target count at
/// the moment of shooting, before consumption.
pub(crate) fn resolve_shots(
    hunters: &mut Vec<Hunter>,
    defender: Point,
    live_targets: usize,
    out_events: &mut Vec<Event>,
) -> u64 {
    let mut awarded: u64 = 0;
    let mut combo_index: u32 = 0;

    for index in (0..hunters.len()).rev() {
        let position = hunters[index].position;
        if position.distance_squared(defender) > WEAPON_RANGE_SQUARED {
            continue;
        }

        let hunter = hunters.remove(index);
        let points = kill_points(live_targets, combo_index as usize);
        awarded = awarded.saturating_add(points);
        out_events.push(Event::HunterDestroyed {
            hunter: hunter.id,
            position,
            combo_index,
            points,
        });
        combo_index = combo_index.saturating_add(1);
    }

    awarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use last_stand_core::HunterId;

    fn hunter(id: u32, x: i32, y: i32) -> Hunter {
        Hunter {
            id: HunterId::new(id),
            position: Point::new(x, y),
        }
    }

    #[test]
    fn range_boundary_is_inclusive() {
        let mut hunters = vec![hunter(0, 2_000, 0), hunter(1, 2_001, 0)];
        let mut events = Vec::new();

        let awarded = resolve_shots(&mut hunters, Point::new(0, 0), 1, &mut events);

        assert_eq!(awarded, 10);
        assert_eq!(hunters, vec![hunter(1, 2_001, 0)]);
    }

    #[test]
    fn combo_indices_follow_reverse_storage_order() {
        let mut hunters = vec![hunter(7, 100, 0), hunter(8, 9_000, 0), hunter(9, 0, 100)];
        let mut events = Vec::new();

        let awarded = resolve_shots(&mut hunters, Point::new(0, 0), 2, &mut events);

        assert_eq!(awarded, 40 + 80);
        assert_eq!(hunters, vec![hunter(8, 9_000, 0)]);
        assert_eq!(
            events,
            vec![
                Event::HunterDestroyed {
                    hunter: HunterId::new(9),
                    position: Point::new(0, 100),
                    combo_index: 0,
                    points: 40,
                },
                Event::HunterDestroyed {
                    hunter: HunterId::new(7),
                    position: Point::new(100, 0),
                    combo_index: 1,
                    points: 80,
                },
            ]
        );
    }

    #[test]
    fn out_of_range_hunters_score_nothing() {
        let mut hunters = vec![hunter(0, 5_000, 5_000)];
        let mut events = Vec::new();

        let awarded = resolve_shots(&mut hunters, Point::new(0, 0), 3, &mut events);

        assert_eq!(awarded, 0);
        assert_eq!(hunters.len(), 1);
        assert!(events.is_empty());
    }
}
