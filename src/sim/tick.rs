//! Per-frame simulation step
//!
//! One call per animation frame. Everything the presentation layer can see
//! is consistent again when `tick` returns.

use super::collision::{find_obstacle, update_buttons};
use super::consume::consume_cupcakes;
use super::events::{DeathCause, GameEvent};
use super::state::GameState;
use super::transition::{ExitOutcome, crosses_exit, enter_next, track_previous};

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, dt: f32) {
    if !state.running || !state.alive || dt <= 0.0 {
        return;
    }
    let Some(mut level) = state.current_level.take() else {
        return;
    };

    // Cupcakes are eaten at the start-of-frame head, so the credit already
    // pays for this frame's growth
    let eaten = consume_cupcakes(&mut level.cupcakes, state.snake.position(), state.tuning.chomp_radius);
    if eaten > 0 {
        state.remaining_length_to_grow += eaten as f32 * state.tuning.cupcake_growth;
        log::debug!(
            "Ate {} cupcake(s), growth budget {}",
            eaten,
            state.remaining_length_to_grow
        );
        state.events.emit(GameEvent::CupcakesEaten { count: eaten });
    }

    // Long frames are cut short so thin geometry can't be skipped over.
    // Shrink only once the growth budget is used up.
    let grow_length = state.tuning.grow_length(dt);
    let shrink_length = (grow_length - state.remaining_length_to_grow).max(0.0);
    state.snake.advance(grow_length, shrink_length, state.steering.motion());
    state.remaining_length_to_grow = (state.remaining_length_to_grow - grow_length).max(0.0);

    update_buttons(&state.snake, &mut level);

    // At most one transition per frame
    if crosses_exit(&state.snake, &level) {
        let id = state.next_level_id();
        match enter_next(&mut level, id, &mut state.visible_levels) {
            ExitOutcome::Entered { id, number, dropped } => {
                if let Some(dropped) = dropped {
                    state.events.emit(GameEvent::LevelHidden { id: dropped });
                }
                state.events.emit(GameEvent::LevelShown { id, number });
                state.level = number;
                log::info!("Entered stage {} ({})", number, level.template.name);
            }
            ExitOutcome::Completed => {
                log::info!("Final stage {} cleared", state.level);
                state.running = false;
                state.events.emit(GameEvent::Completed);
            }
        }
    }

    let mut obstacle = find_obstacle(&state.snake, &level, &state.tuning);

    let report = track_previous(&state.snake, &mut level, &mut state.visible_levels, &state.tuning);
    if let Some(hidden) = report.hidden {
        log::debug!("Level {} fully vacated", hidden);
        state.events.emit(GameEvent::LevelHidden { id: hidden });
    }
    obstacle = obstacle.or(report.obstacle);

    state.current_level = Some(level);

    if let Some(hit) = obstacle {
        let cause = if state.steering.ever_turned() {
            hit
        } else {
            DeathCause::NeverTurned
        };
        log::info!("Snake died on stage {}: {:?} (shown as {:?})", state.level, hit, cause);
        state.death_cause = Some(cause);
        state.alive = false;
        state.events.emit(GameEvent::Death {
            cause,
            message: cause.message().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{Button, Cupcake, Door, Gate, LevelTemplate, Wall};
    use crate::sim::segment::Segment;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    const SIXTIETH: f32 = 1.0 / 60.0;

    fn horizontal(y: f32, half: f32) -> Segment {
        Segment::new(Vec2::new(-half, y), Vec2::new(half, y))
    }

    /// Open room starting at the origin with its exit door straight ahead
    fn room(number: u32, door_y: f32) -> LevelTemplate {
        LevelTemplate {
            number,
            name: format!("Room {number}"),
            start_position: Vec2::ZERO,
            door: Door {
                segment: horizontal(door_y, 100.0),
                ..Default::default()
            },
            blue_button: Button::default(),
            yellow_button: Button::default(),
            walls: Vec::new(),
            cupcakes: Vec::new(),
            next: None,
        }
    }

    fn started(template: LevelTemplate) -> GameState {
        let mut state = GameState::default();
        state.start_level(&Arc::new(template));
        state
    }

    fn recorder(state: &mut GameState) -> Rc<RefCell<Vec<GameEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        state.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        seen
    }

    #[test]
    fn test_no_progress_unless_running_and_alive() {
        let mut idle = GameState::default();
        idle.step(SIXTIETH);
        assert_eq!(idle.snake().position(), Vec2::ZERO);

        let mut state = started(room(1, -1000.0));
        state.set_running(false);
        state.step(0.1);
        assert_eq!(state.snake().position(), Vec2::ZERO);

        state.set_running(true);
        state.alive = false;
        state.step(0.1);
        assert_eq!(state.snake().position(), Vec2::ZERO);

        state.alive = true;
        state.step(0.0);
        assert_eq!(state.snake().position(), Vec2::ZERO);
        state.step(0.1);
        assert!((state.snake().position().y + 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_cupcake_scenario_from_rest() {
        let mut template = room(1, -1000.0);
        template.cupcakes = vec![Cupcake::new(10.0, 0.0)];
        let mut state = started(template);
        let seen = recorder(&mut state);

        state.step(1.0);

        assert!(state.current_level().unwrap().cupcakes.is_empty());
        assert!((state.remaining_length_to_grow() - 25.0).abs() < 1e-4);
        assert!(state.is_alive());
        assert_eq!(*seen.borrow(), vec![GameEvent::CupcakesEaten { count: 1 }]);
        // Fed: nothing retracted, the target grew by the full frame
        assert!((state.snake().target_length() - 225.0).abs() < 1e-3);
    }

    #[test]
    fn test_cupcake_eat_radius() {
        let mut template = room(1, -1000.0);
        template.cupcakes = vec![Cupcake::new(29.999, 0.0)];
        let mut state = started(template);
        state.step(0.001);
        assert!(state.current_level().unwrap().cupcakes.is_empty());
        // Credit is 100 less this frame's growth of 0.15
        assert!((state.remaining_length_to_grow() - 99.85).abs() < 1e-3);

        let mut template = room(1, -1000.0);
        template.cupcakes = vec![Cupcake::new(30.0, 0.0)];
        let mut state = started(template);
        state.step(0.001);
        assert_eq!(state.current_level().unwrap().cupcakes.len(), 1);
        assert_eq!(state.remaining_length_to_grow(), 0.0);
    }

    #[test]
    fn test_unfed_snake_keeps_its_length() {
        let mut state = started(room(1, -1000.0));
        for _ in 0..30 {
            state.step(0.05);
        }
        // 30 frames of 7.5: the trail caught up with its 150 target
        assert!((state.snake().length() - 150.0).abs() < 1e-2);
        assert!((state.snake().target_length() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_wall_hit_before_any_turn_shows_steering_hint() {
        let mut template = room(1, -1000.0);
        template.walls = vec![Wall { segments: vec![horizontal(-100.0, 200.0)] }];
        let mut state = started(template);
        let seen = recorder(&mut state);

        state.step(0.5);

        assert!(!state.is_alive());
        assert_eq!(state.death_cause(), Some(DeathCause::NeverTurned));
        assert_eq!(
            *seen.borrow(),
            vec![GameEvent::Death {
                cause: DeathCause::NeverTurned,
                message: "Try the left/right arrow keys or the on-screen buttons".to_string(),
            }]
        );

        // Dead is terminal until restarted
        let before = state.snake().position();
        state.step(0.5);
        assert_eq!(state.snake().position(), before);
    }

    #[test]
    fn test_wall_hit_after_turning_reports_wall() {
        let mut template = room(1, -1000.0);
        template.walls = vec![Wall { segments: vec![horizontal(-100.0, 200.0)] }];
        let mut state = started(template);
        state.set_right(true);
        state.set_right(false);

        state.step(0.5);

        assert!(!state.is_alive());
        assert_eq!(state.death_cause(), Some(DeathCause::Wall));
    }

    #[test]
    fn test_ungated_exit_transitions() {
        let mut first = room(1, -50.0);
        first.next = Some(Arc::new(room(2, -1000.0)));
        let mut state = started(first);
        let seen = recorder(&mut state);

        state.step(0.5);

        assert!(state.is_alive());
        assert_eq!(state.level(), 2);
        let current = state.current_level().unwrap();
        assert_eq!(current.number(), 2);
        let previous = current.previous.as_ref().unwrap();
        assert!(!previous.active);
        assert!(previous.head_out);
        assert_eq!(state.visible_level_ids(), &[1, 2]);
        assert_eq!(*seen.borrow(), vec![GameEvent::LevelShown { id: 2, number: 2 }]);
    }

    #[test]
    fn test_closed_gate_blocks_exit() {
        let mut first = room(1, -50.0);
        first.door.blue_segments = vec![horizontal(-50.0, 100.0)];
        first.next = Some(Arc::new(room(2, -1000.0)));
        let mut state = started(first);
        state.set_left(true);
        state.set_left(false);

        state.step(0.5);

        assert!(!state.is_alive());
        assert_eq!(state.death_cause(), Some(DeathCause::ClosedDoor(Gate::Blue)));
        assert_eq!(state.level(), 1);
        assert!(state.current_level().unwrap().previous.is_none());
        assert_eq!(state.visible_level_ids().len(), 1);
    }

    #[test]
    fn test_pressed_button_lets_snake_through() {
        let mut first = room(1, -100.0);
        first.door.blue_segments = vec![horizontal(-100.0, 100.0)];
        first.blue_button = Button { segments: vec![horizontal(-20.0, 10.0)] };
        first.next = Some(Arc::new(room(2, -1000.0)));
        let mut state = started(first);

        state.step(0.5);
        assert!(state.current_level().unwrap().blue_pressed);
        assert_eq!(state.level(), 1);

        // Body still lies across the button while the head crosses the door
        state.step(0.5);
        assert!(state.is_alive());
        assert_eq!(state.level(), 2);
    }

    #[test]
    fn test_previous_level_hidden_exactly_once() {
        let mut first = room(1, -50.0);
        first.next = Some(Arc::new(room(2, -5000.0)));
        let mut state = started(first);
        let seen = recorder(&mut state);

        for _ in 0..10 {
            state.step(0.5);
        }

        assert!(state.is_alive());
        assert_eq!(state.visible_level_ids(), &[2]);
        assert!(state.current_level().unwrap().previous.as_ref().unwrap().snake_fully_out);
        let hidden: Vec<_> = seen
            .borrow()
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelHidden { .. }))
            .cloned()
            .collect();
        assert_eq!(hidden, vec![GameEvent::LevelHidden { id: 1 }]);
        let drawn: Vec<_> = state.visible_levels().map(|level| level.number()).collect();
        assert_eq!(drawn, vec![2]);
    }

    #[test]
    fn test_walking_back_through_cleared_door() {
        let mut first = room(1, -50.0);
        first.next = Some(Arc::new(room(2, -5000.0)));
        let mut state = started(first);

        state.step(0.5);
        assert_eq!(state.level(), 2);

        // Hard left: the head swings round and comes back down through y = -50
        state.set_left(true);
        for _ in 0..4 {
            state.step(0.5);
            if !state.is_alive() {
                break;
            }
        }

        assert!(!state.is_alive());
        assert_eq!(state.death_cause(), Some(DeathCause::PastDoor));
    }

    #[test]
    fn test_frame_ending_on_door_then_walking_on() {
        let mut first = room(1, -75.0);
        first.next = Some(Arc::new(room(2, -1000.0)));
        let mut state = started(first);
        state.set_right(true);
        state.set_right(false);

        // 0.5s at 150 units per second stops exactly on the door line
        state.step(0.5);
        assert_eq!(state.level(), 2);
        assert!(state.is_alive());

        state.step(0.5);
        assert!(state.is_alive());
        assert_eq!(state.death_cause(), None);
        assert_eq!(state.level(), 2);
    }

    #[test]
    fn test_new_room_cupcakes_are_eaten_next_frame() {
        let mut second = room(2, -1000.0);
        second.cupcakes = vec![Cupcake::new(0.0, -80.0)];
        let mut first = room(1, -50.0);
        first.next = Some(Arc::new(second));
        let mut state = started(first);

        // Entering frame: the head ends 5 units short of the cupcake
        state.step(0.5);
        assert_eq!(state.level(), 2);
        assert_eq!(state.current_level().unwrap().cupcakes.len(), 1);

        state.step(SIXTIETH);
        assert!(state.current_level().unwrap().cupcakes.is_empty());
        assert!(state.remaining_length_to_grow() > 0.0);
    }

    #[test]
    fn test_vanishing_frame_is_harmless() {
        let mut state = started(room(1, -1000.0));
        for _ in 0..5 {
            state.step(0.1);
        }
        state.step(1e-9);
        state.step(0.1);
        assert!(state.is_alive());
        assert_eq!(state.death_cause(), None);
        assert!((state.snake().position().y + 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_final_door_completes_game() {
        let mut state = started(room(3, -50.0));
        let seen = recorder(&mut state);

        state.step(0.5);

        assert!(!state.is_running());
        assert!(state.is_alive());
        assert_eq!(*seen.borrow(), vec![GameEvent::Completed]);
    }

    proptest! {
        #[test]
        fn prop_long_frames_are_clamped(dt in 0.5f32..10.0) {
            let mut state = started(room(1, -1000.0));
            state.step(dt);
            // Straight up from the origin at 150 units per second for 0.5s
            prop_assert!((state.snake().position().y + 75.0).abs() < 1e-3);
        }

        #[test]
        fn prop_growth_budget_never_negative(
            frames in proptest::collection::vec((0.0f32..1.0, any::<bool>(), any::<bool>()), 1..40),
            cupcakes in proptest::collection::vec((-200.0f32..200.0, -400.0f32..0.0), 0..10),
        ) {
            let mut template = room(1, -10_000.0);
            template.cupcakes = cupcakes.into_iter().map(|(x, y)| Cupcake::new(x, y)).collect();
            let mut state = GameState::new(Tuning { self_collision: false, ..Tuning::default() });
            state.start_level(&Arc::new(template));

            for (dt, left, right) in frames {
                state.set_steering(left, right);
                state.step(dt);
                prop_assert!(state.remaining_length_to_grow() >= 0.0);
                prop_assert!(state.snake().length() >= 0.0);
            }
        }
    }
}
