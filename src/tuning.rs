//! Gameplay tuning
//!
//! All balance numbers the simulation reads. Defaults come from `consts`;
//! authored overrides are JSON with any subset of fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Time ===
    /// Elapsed time per tick is clamped to this (seconds)
    pub max_dt: f32,
    /// Head speed (world units per second)
    pub grow_speed: f32,

    // === Cupcakes ===
    /// Eat distance (strictly less than)
    pub chomp_radius: f32,
    /// Growth budget per cupcake
    pub cupcake_growth: f32,

    // === Snake ===
    pub initial_length: f32,
    pub initial_radius: f32,
    pub initial_heading: Vec2,
    pub turn_radius: f32,

    // === Rules ===
    /// Crossing your own trail kills
    pub self_collision: bool,
    /// Walking back through a door you already cleared kills
    pub past_door_is_fatal: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_dt: MAX_DT,
            grow_speed: GROW_SPEED,

            chomp_radius: CHOMP_RADIUS,
            cupcake_growth: CUPCAKE_GROWTH,

            initial_length: INITIAL_SNAKE_LENGTH,
            initial_radius: INITIAL_SNAKE_RADIUS,
            initial_heading: INITIAL_HEADING,
            turn_radius: TURN_RADIUS,

            self_collision: true,
            past_door_is_fatal: true,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded tuning: grow_speed={}, max_dt={}, turn_radius={}",
            tuning.grow_speed,
            tuning.max_dt,
            tuning.turn_radius
        );
        Ok(tuning)
    }

    /// Growth length for an elapsed time, after clamping
    #[inline]
    pub fn grow_length(&self, dt: f32) -> f32 {
        self.grow_speed * dt.min(self.max_dt)
    }
}
