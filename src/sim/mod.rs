//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is clamped, never accumulated across frames
//! - Stable iteration order (levels, segments and cupcakes keep insertion order)
//! - No rendering, audio or platform dependencies; those subscribe to events

pub mod collision;
pub mod consume;
pub mod events;
pub mod level;
pub mod motion;
pub mod segment;
pub mod snake;
pub mod state;
pub mod tick;
pub mod transition;
pub mod visible;

pub use events::{DeathCause, EventBus, GameEvent};
pub use level::{Button, Cupcake, Door, Gate, Level, LevelError, LevelId, LevelTemplate, Wall};
pub use motion::{Motion, Steering, resolve_motion};
pub use segment::{Segment, intersect};
pub use snake::Snake;
pub use state::GameState;
pub use tick::tick;
pub use visible::VisibleLevels;
