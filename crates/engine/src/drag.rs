//! Drag constraint - walk toward a pointer target one cell at a time
//!
//! A dragged piece follows the pointer but may not jump over anything. Each
//! step moves one unit along the axis with the larger remaining distance (x on
//! ties); if that cell is illegal the other axis is tried once, and the walk
//! stops when neither works. The last legal anchor is the drop position.

use dog_rescue_core::types::Pos;

/// Furthest anchor reachable from `from` toward `target`
///
/// `can_move` answers whether the piece may sit at an anchor. `from` itself
/// is never re-checked. At most `|dx| + |dy|` steps are taken.
pub fn constrain_drag(from: Pos, target: Pos, mut can_move: impl FnMut(Pos) -> bool) -> Pos {
    let mut current = from;
    let (dx, dy) = delta(from, target);
    let max_steps = dx.unsigned_abs() + dy.unsigned_abs();

    for _ in 0..max_steps {
        let (dx, dy) = delta(current, target);
        if dx == 0 && dy == 0 {
            break;
        }

        // Every step moves toward `target`, so the sum stays within i32.
        let (sx, sy) = (dx.signum() as i32, dy.signum() as i32);
        let x_first = dx.abs() >= dy.abs() && dx != 0;
        let primary = if x_first {
            Pos::new(current.x + sx, current.y)
        } else {
            Pos::new(current.x, current.y + sy)
        };
        if can_move(primary) {
            current = primary;
            continue;
        }

        let fallback = if x_first && dy != 0 {
            Some(Pos::new(current.x, current.y + sy))
        } else if !x_first && dx != 0 {
            Some(Pos::new(current.x + sx, current.y))
        } else {
            None
        };
        match fallback {
            Some(next) if can_move(next) => current = next,
            _ => break,
        }
    }

    current
}

/// Remaining distance, widened so opposite `i32` extremes cannot overflow
fn delta(from: Pos, to: Pos) -> (i64, i64) {
    (
        i64::from(to.x) - i64::from(from.x),
        i64::from(to.y) - i64::from(from.y),
    )
}
