//! Cupcake Snake - a room-to-room snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake geometry, collisions, level transitions, game state)
//! - `levels`: Built-in level chain and authored level data
//! - `tuning`: Data-driven game balance

pub mod levels;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Largest elapsed time a single tick may simulate (seconds)
    pub const MAX_DT: f32 = 0.5;
    /// Head advance speed (world units per second)
    pub const GROW_SPEED: f32 = 150.0;

    /// Head-to-cupcake distance below which a cupcake is eaten
    pub const CHOMP_RADIUS: f32 = 30.0;
    /// Growth budget credited per cupcake
    pub const CUPCAKE_GROWTH: f32 = 100.0;

    /// Snake defaults at stage start
    pub const INITIAL_SNAKE_LENGTH: f32 = 150.0;
    pub const INITIAL_SNAKE_RADIUS: f32 = 30.0;
    /// Screen coordinates: y grows downward, so this points up
    pub const INITIAL_HEADING: Vec2 = Vec2::new(0.0, -1.0);

    /// Radius of the circle the head follows while a turn key is held
    pub const TURN_RADIUS: f32 = 40.0;
}
