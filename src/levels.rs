//! Built-in level chain
//!
//! Rooms are stacked vertically: each room's exit door is the opening in the
//! floor of the next one. Screen coordinates, so "up" is negative y.

use std::sync::Arc;

use glam::Vec2;

use crate::sim::{Button, Cupcake, Door, LevelTemplate, Segment, Wall};

/// Half the width of every room
const ROOM_HALF_WIDTH: f32 = 200.0;
/// Half the width of every door opening
const DOOR_HALF_WIDTH: f32 = 50.0;
/// Depth of the alcove in front of a gated door
const ALCOVE_DEPTH: f32 = 30.0;
/// Half the side of a button's square hit region
const BUTTON_HALF_SIZE: f32 = 20.0;

/// Which gates guard a room's exit
#[derive(Debug, Clone, Copy)]
struct Gates {
    blue: Option<Vec2>,
    yellow: Option<Vec2>,
}

impl Gates {
    const NONE: Gates = Gates {
        blue: None,
        yellow: None,
    };

    fn any(&self) -> bool {
        self.blue.is_some() || self.yellow.is_some()
    }
}

fn horizontal(y: f32, x0: f32, x1: f32) -> Segment {
    Segment::new(Vec2::new(x0, y), Vec2::new(x1, y))
}

/// Wall along `y` with a door-sized opening in the middle
fn wall_with_opening(y: f32) -> [Wall; 2] {
    [
        Wall::polyline(&[Vec2::new(-ROOM_HALF_WIDTH, y), Vec2::new(-DOOR_HALF_WIDTH, y)]),
        Wall::polyline(&[Vec2::new(DOOR_HALF_WIDTH, y), Vec2::new(ROOM_HALF_WIDTH, y)]),
    ]
}

/// Room spanning `floor` (bottom) to `ceiling` (top)
#[allow(clippy::too_many_arguments)]
fn room(
    number: u32,
    name: &str,
    floor: f32,
    ceiling: f32,
    closed_floor: bool,
    gates: Gates,
    cupcakes: &[(f32, f32)],
    next: Option<Arc<LevelTemplate>>,
) -> Arc<LevelTemplate> {
    let mut walls = vec![
        Wall::polyline(&[Vec2::new(-ROOM_HALF_WIDTH, floor), Vec2::new(-ROOM_HALF_WIDTH, ceiling)]),
        Wall::polyline(&[Vec2::new(ROOM_HALF_WIDTH, floor), Vec2::new(ROOM_HALF_WIDTH, ceiling)]),
    ];
    if closed_floor {
        walls.push(Wall::polyline(&[
            Vec2::new(-ROOM_HALF_WIDTH, floor),
            Vec2::new(ROOM_HALF_WIDTH, floor),
        ]));
    } else {
        walls.extend(wall_with_opening(floor));
    }
    walls.extend(wall_with_opening(ceiling));

    let mut door = Door {
        segment: horizontal(ceiling, -DOOR_HALF_WIDTH, DOOR_HALF_WIDTH),
        ..Default::default()
    };
    if gates.any() {
        // Alcove sides keep the snake from slipping round the gates
        for x in [-DOOR_HALF_WIDTH, DOOR_HALF_WIDTH] {
            walls.push(Wall::polyline(&[
                Vec2::new(x, ceiling + ALCOVE_DEPTH),
                Vec2::new(x, ceiling),
            ]));
        }
    }
    if gates.blue.is_some() {
        door.blue_segments = vec![horizontal(ceiling + 20.0, -DOOR_HALF_WIDTH, DOOR_HALF_WIDTH)];
    }
    if gates.yellow.is_some() {
        door.yellow_segments = vec![horizontal(ceiling + 10.0, -DOOR_HALF_WIDTH, DOOR_HALF_WIDTH)];
    }

    let button = |at: Option<Vec2>| {
        at.map(|center| Button::square(center, BUTTON_HALF_SIZE))
            .unwrap_or_default()
    };

    Arc::new(LevelTemplate {
        number,
        name: name.to_string(),
        start_position: Vec2::new(0.0, floor - 60.0),
        door,
        blue_button: button(gates.blue),
        yellow_button: button(gates.yellow),
        walls,
        cupcakes: cupcakes.iter().map(|&(x, y)| Cupcake::new(x, y)).collect(),
        next,
    })
}

/// First room of the built-in chain
pub fn builtin() -> Arc<LevelTemplate> {
    let third = room(
        3,
        "Two Keys",
        -800.0,
        -1200.0,
        false,
        Gates {
            blue: Some(Vec2::new(-140.0, -950.0)),
            yellow: Some(Vec2::new(140.0, -950.0)),
        },
        &[
            (0.0, -880.0),
            (-100.0, -880.0),
            (100.0, -880.0),
            (-140.0, -1050.0),
            (0.0, -1050.0),
            (140.0, -1050.0),
        ],
        None,
    );

    let second = room(
        2,
        "Blue Door",
        -400.0,
        -800.0,
        false,
        Gates {
            blue: Some(Vec2::new(140.0, -520.0)),
            yellow: None,
        },
        &[(0.0, -600.0), (-130.0, -700.0), (130.0, -650.0)],
        Some(third),
    );

    let first = room(
        1,
        "Cupcakes",
        100.0,
        -400.0,
        true,
        Gates::NONE,
        &[(0.0, -150.0), (-120.0, -250.0), (120.0, -300.0)],
        Some(second),
    );

    log::debug!("Built-in chain: {} rooms", first.chain_len());
    first
}
