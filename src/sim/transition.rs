//! Walking from one room into the next
//!
//! The exit check runs against the current room's door. After a transition
//! the new room keeps the exited one in `previous` until the next transition,
//! so walking back through that door can still be detected after the room
//! has stopped being drawn.

use super::collision::closed_gate_hit;
use super::events::DeathCause;
use super::level::{Level, LevelId};
use super::segment::{Segment, intersect};
use super::snake::Snake;
use super::visible::VisibleLevels;
use crate::tuning::Tuning;
use glam::Vec2;

/// Distance within which a point counts as lying on a door
const DOOR_TOLERANCE: f32 = 1e-3;

/// Head went through the exit door, and no closed gate stands in the way
pub fn crosses_exit(snake: &Snake, level: &Level) -> bool {
    intersect(snake.current_segment(), &level.door().segment) && closed_gate_hit(snake, level).is_none()
}

/// What happened when the current room was exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// New room is current and visible
    Entered {
        id: LevelId,
        number: u32,
        /// Older room dropped from the visible set to make way
        dropped: Option<LevelId>,
    },
    /// The exited room was the last one
    Completed,
}

/// Leave `current` and make a fresh instance of its next room current
pub fn enter_next(current: &mut Level, id: LevelId, visible: &mut VisibleLevels) -> ExitOutcome {
    current.active = false;
    let Some(next) = current.template.next.clone() else {
        return ExitOutcome::Completed;
    };

    let mut exited = std::mem::replace(current, Level::new(id, next));
    // Only one room of history is kept
    let dropped = exited
        .previous
        .take()
        .map(|older| older.id)
        .filter(|&older| visible.remove(older));
    visible.push(current.id);
    current.previous = Some(Box::new(exited));

    ExitOutcome::Entered {
        id,
        number: current.number(),
        dropped,
    }
}

/// Result of the per-tick look back at the previous room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviousDoorReport {
    /// Head walked back through the cleared door
    pub obstacle: Option<DeathCause>,
    /// Previous room left the visible set this tick
    pub hidden: Option<LevelId>,
}

/// Track the head and body against the door of the room just exited
pub fn track_previous(
    snake: &Snake,
    level: &mut Level,
    visible: &mut VisibleLevels,
    tuning: &Tuning,
) -> PreviousDoorReport {
    let mut report = PreviousDoorReport::default();
    let Some(previous) = level.previous.as_deref_mut() else {
        return report;
    };

    let door = previous.door().segment;
    let inside = previous.template.start_position;
    if previous.head_out
        && tuning.past_door_is_fatal
        && walks_back_through(snake.current_segment(), &door, inside)
    {
        report.obstacle = Some(DeathCause::PastDoor);
    }
    previous.head_out = true;

    if visible.contains(previous.id) && !snake.intersects_segments(&[door], false) {
        previous.snake_fully_out = true;
        visible.remove(previous.id);
        report.hidden = Some(previous.id);
    }

    report
}

/// Head segment goes back through `door` towards the room containing `inside`
///
/// A head segment that merely starts on the door line is the continuation of
/// the frame that ended there. It only counts if it heads back inside.
fn walks_back_through(head: &Segment, door: &Segment, inside: Vec2) -> bool {
    if !intersect(head, door) {
        return false;
    }
    if door.distance_to_point(head.start) > DOOR_TOLERANCE {
        return true;
    }
    let side = |p: Vec2| (door.end - door.start).perp_dot(p - door.start);
    door.distance_to_point(head.end) > DOOR_TOLERANCE && side(head.end) * side(inside) > 0.0
}
