//! Obstacle detection against the current room
//!
//! Walls are tested strictly (the nose counts), gates and buttons against
//! the trail only. When several obstacles are hit in the same tick the first
//! one in wall, blue gate, yellow gate, own tail order is reported.

use super::events::DeathCause;
use super::level::{Gate, Level};
use super::snake::Snake;
use crate::tuning::Tuning;

const GATES: [Gate; 2] = [Gate::Blue, Gate::Yellow];

/// Refresh both pressed flags from the snake's current shape
pub fn update_buttons(snake: &Snake, level: &mut Level) {
    for gate in GATES {
        let pressed = snake.intersects_segments(&level.button(gate).segments, false);
        level.set_pressed(gate, pressed);
    }
}

/// First closed gate the snake is lying across, if any
pub fn closed_gate_hit(snake: &Snake, level: &Level) -> Option<Gate> {
    GATES.into_iter().find(|&gate| {
        !level.is_pressed(gate) && snake.intersects_segments(level.door().gate_segments(gate), false)
    })
}

pub fn wall_hit(snake: &Snake, level: &Level) -> bool {
    level
        .walls()
        .iter()
        .any(|wall| snake.intersects_segments(&wall.segments, true))
}

/// First obstacle hit in the current room
pub fn find_obstacle(snake: &Snake, level: &Level, tuning: &Tuning) -> Option<DeathCause> {
    if wall_hit(snake, level) {
        return Some(DeathCause::Wall);
    }
    if let Some(gate) = closed_gate_hit(snake, level) {
        return Some(DeathCause::ClosedDoor(gate));
    }
    if tuning.self_collision && snake.crosses_itself() {
        return Some(DeathCause::OwnTail);
    }
    None
}
