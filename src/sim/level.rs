//! Level layouts and level instances
//!
//! A `LevelTemplate` is authored once and shared. A `Level` is one
//! playthrough of a template: it owns its own cupcakes and the per-visit
//! flags, and while the player is walking out of the previous room it also
//! owns that room (`previous`).

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::segment::Segment;

/// Gate colors, each opened by the button of the same color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    Blue,
    Yellow,
}

/// Exit door: the primary segment triggers the transition, the colored
/// sub-segments block the way while their button is released
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub segment: Segment,
    #[serde(default)]
    pub blue_segments: Vec<Segment>,
    #[serde(default)]
    pub yellow_segments: Vec<Segment>,
}

impl Door {
    pub fn gate_segments(&self, gate: Gate) -> &[Segment] {
        match gate {
            Gate::Blue => &self.blue_segments,
            Gate::Yellow => &self.yellow_segments,
        }
    }
}

/// Button hit region; pressed while the snake lies across it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Button {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Button {
    /// Axis-aligned square outline centred on `center`
    pub fn square(center: Vec2, half_size: f32) -> Self {
        let min = center - Vec2::splat(half_size);
        let max = center + Vec2::splat(half_size);
        let corners = [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];
        let segments = (0..4)
            .map(|i| Segment::new(corners[i], corners[(i + 1) % 4]))
            .collect();
        Self { segments }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub segments: Vec<Segment>,
}

impl Wall {
    /// Open polyline through the given points
    pub fn polyline(points: &[Vec2]) -> Self {
        let segments = points
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .collect();
        Self { segments }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cupcake {
    pub pos: Vec2,
}

impl Cupcake {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y) }
    }
}

/// Authored level data errors
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level {number} has a zero-length exit door")]
    DegenerateDoor { number: u32 },
}

/// Authored, immutable room layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTemplate {
    /// Stage number (1 is the first room)
    pub number: u32,
    #[serde(default)]
    pub name: String,
    pub start_position: Vec2,
    pub door: Door,
    #[serde(default)]
    pub blue_button: Button,
    #[serde(default)]
    pub yellow_button: Button,
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub cupcakes: Vec<Cupcake>,
    /// Room behind the exit door; `None` for the final room
    #[serde(default)]
    pub next: Option<Arc<LevelTemplate>>,
}

impl LevelTemplate {
    /// Parse a chain of authored rooms (nested through `next`)
    pub fn from_json(json: &str) -> Result<Arc<Self>, LevelError> {
        let template: Self = serde_json::from_str(json)?;
        template.validate()?;
        log::info!(
            "Loaded level chain starting at {} ({} rooms)",
            template.number,
            template.chain_len()
        );
        Ok(Arc::new(template))
    }

    /// Every room in the chain needs a usable exit door
    pub fn validate(&self) -> Result<(), LevelError> {
        let mut room = Some(self);
        while let Some(template) = room {
            if template.door.segment.is_degenerate() {
                return Err(LevelError::DegenerateDoor {
                    number: template.number,
                });
            }
            room = template.next.as_deref();
        }
        Ok(())
    }

    /// Number of rooms from this one to the end of the chain
    pub fn chain_len(&self) -> usize {
        let mut count = 0;
        let mut room = Some(self);
        while let Some(template) = room {
            count += 1;
            room = template.next.as_deref();
        }
        count
    }
}

/// Unique id of a level instance within one game
pub type LevelId = u32;

/// One playthrough of a room
#[derive(Debug, Clone)]
pub struct Level {
    pub id: LevelId,
    pub template: Arc<LevelTemplate>,
    /// Remaining cupcakes (this visit only)
    pub cupcakes: Vec<Cupcake>,
    pub blue_pressed: bool,
    pub yellow_pressed: bool,
    /// False once the player walked out through the exit door
    pub active: bool,
    /// Head has cleared this room's door on the way out
    pub head_out: bool,
    /// Whole body has cleared this room's door
    pub snake_fully_out: bool,
    /// Room the player just came from, held while walking out of it
    pub previous: Option<Box<Level>>,
}

impl Level {
    pub fn new(id: LevelId, template: Arc<LevelTemplate>) -> Self {
        Self {
            id,
            cupcakes: template.cupcakes.clone(),
            template,
            blue_pressed: false,
            yellow_pressed: false,
            active: true,
            head_out: false,
            snake_fully_out: false,
            previous: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.template.number
    }

    pub fn door(&self) -> &Door {
        &self.template.door
    }

    pub fn walls(&self) -> &[Wall] {
        &self.template.walls
    }

    pub fn button(&self, gate: Gate) -> &Button {
        match gate {
            Gate::Blue => &self.template.blue_button,
            Gate::Yellow => &self.template.yellow_button,
        }
    }

    pub fn is_pressed(&self, gate: Gate) -> bool {
        match gate {
            Gate::Blue => self.blue_pressed,
            Gate::Yellow => self.yellow_pressed,
        }
    }

    pub fn set_pressed(&mut self, gate: Gate, pressed: bool) {
        match gate {
            Gate::Blue => self.blue_pressed = pressed,
            Gate::Yellow => self.yellow_pressed = pressed,
        }
    }
}
