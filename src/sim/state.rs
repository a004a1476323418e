//! Game state
//!
//! One `GameState` lives for the whole session. It is created once, handed to
//! whatever needs it (input handler, renderer), reset per stage through
//! `start_level`, and only mutated by its own methods.

use std::sync::Arc;

use super::events::{DeathCause, EventBus, GameEvent};
use super::level::{Level, LevelId, LevelTemplate};
use super::motion::{Motion, Steering};
use super::snake::Snake;
use super::tick::tick;
use super::visible::VisibleLevels;
use crate::tuning::Tuning;

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    pub tuning: Tuning,
    pub(crate) steering: Steering,
    /// Growth earned from cupcakes but not yet added to the trail
    pub(crate) remaining_length_to_grow: f32,
    pub(crate) alive: bool,
    pub(crate) running: bool,
    /// Stage number of the current level (0 before any stage started)
    pub(crate) level: u32,
    pub(crate) current_level: Option<Level>,
    pub(crate) snake: Snake,
    pub(crate) visible_levels: VisibleLevels,
    pub(crate) death_cause: Option<DeathCause>,
    pub(crate) events: EventBus,
    next_level_id: LevelId,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        let snake = Snake::new(
            glam::Vec2::ZERO,
            tuning.initial_heading,
            tuning.initial_length,
            tuning.initial_radius,
            tuning.turn_radius,
        );
        Self {
            tuning,
            steering: Steering::default(),
            remaining_length_to_grow: 0.0,
            alive: true,
            running: false,
            level: 0,
            current_level: None,
            snake,
            visible_levels: VisibleLevels::new(),
            death_cause: None,
            events: EventBus::new(),
            next_level_id: 1,
        }
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        tick(self, dt);
    }

    /// Begin (or restart) a stage from its template
    pub fn start_level(&mut self, template: &Arc<LevelTemplate>) {
        for id in self.visible_levels.clear() {
            self.events.emit(GameEvent::LevelHidden { id });
        }

        let level = Level::new(self.next_level_id(), Arc::clone(template));
        let start = level.template.start_position;
        self.show_level(&level);
        self.level = level.number();
        self.current_level = Some(level);

        self.snake.reinitialize(
            start,
            self.tuning.initial_heading,
            self.tuning.initial_length,
            self.tuning.initial_radius,
        );
        self.remaining_length_to_grow = 0.0;
        self.death_cause = None;
        self.alive = true;
        self.running = true;

        log::info!("Stage {} started ({})", self.level, template.name);
    }

    /// Allocate a new level instance id
    pub(crate) fn next_level_id(&mut self) -> LevelId {
        let id = self.next_level_id;
        self.next_level_id += 1;
        id
    }

    pub(crate) fn show_level(&mut self, level: &Level) {
        if self.visible_levels.push(level.id) {
            self.events.emit(GameEvent::LevelShown {
                id: level.id,
                number: level.number(),
            });
        }
    }

    // === Input ===

    pub fn set_left(&mut self, pressed: bool) {
        self.steering.set_left(pressed);
    }

    pub fn set_right(&mut self, pressed: bool) {
        self.steering.set_right(pressed);
    }

    pub fn set_steering(&mut self, left: bool, right: bool) {
        self.steering.set(left, right);
    }

    /// Pause or resume; a dead snake stays dead until `start_level`
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Listen to game events (called synchronously from `step`)
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.events.subscribe(listener);
    }

    // === Queries for presentation ===

    pub fn left(&self) -> bool {
        self.steering.left()
    }

    pub fn right(&self) -> bool {
        self.steering.right()
    }

    pub fn motion(&self) -> Motion {
        self.steering.motion()
    }

    pub fn ever_turned(&self) -> bool {
        self.steering.ever_turned()
    }

    pub fn remaining_length_to_grow(&self) -> f32 {
        self.remaining_length_to_grow
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.current_level.as_ref()
    }

    pub fn current_level_mut(&mut self) -> Option<&mut Level> {
        self.current_level.as_mut()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death_cause
    }

    pub fn visible_level_ids(&self) -> &[LevelId] {
        self.visible_levels.ids()
    }

    /// Levels to draw, in visible-set order
    pub fn visible_levels(&self) -> impl Iterator<Item = &Level> {
        let current = self.current_level.as_ref();
        let previous = current.and_then(|level| level.previous.as_deref());
        self.visible_levels
            .ids()
            .iter()
            .filter_map(move |&id| [current, previous].into_iter().flatten().find(|level| level.id == id))
    }
}
