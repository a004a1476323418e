//! Game events and the synchronous event channel
//!
//! Subscribers are called in subscription order, inside the `step` (or
//! `start_level`) call that produced the event. Nothing is queued.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::level::{Gate, LevelId};

/// Why the snake died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Wall,
    /// Crushed by a gate whose button was released
    ClosedDoor(Gate),
    /// Walked back through a door already cleared
    PastDoor,
    OwnTail,
    /// Any death before the player ever steered
    NeverTurned,
}

impl DeathCause {
    /// Message shown on the game-over screen
    pub fn message(self) -> &'static str {
        match self {
            DeathCause::Wall => "Bumping into a wall didn't seem that dangerous!",
            DeathCause::ClosedDoor(_) => "Looks like there's no open-door policy here.",
            DeathCause::PastDoor => "My mother always said to not dwell in the past.",
            DeathCause::OwnTail => "Snakes are not supposed to eat themselves.",
            DeathCause::NeverTurned => "Try the left/right arrow keys or the on-screen buttons",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Notifications for presentation and audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// One or more cupcakes eaten this tick (chomp cue)
    CupcakesEaten { count: usize },
    /// Level added to the visible set
    LevelShown { id: LevelId, number: u32 },
    /// Level dropped from the visible set
    LevelHidden { id: LevelId },
    /// Snake died
    Death {
        cause: DeathCause,
        message: String,
    },
    /// Walked out of the final room
    Completed,
}

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Fan-out to zero or more listeners
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: GameEvent) {
        log::trace!("event: {:?}", event);
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_every_listener_sees_every_event_in_order() {
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));

        let mut bus = EventBus::new();
        {
            let first = first.clone();
            bus.subscribe(move |e| first.borrow_mut().push(e.clone()));
        }
        {
            let second = second.clone();
            bus.subscribe(move |e| second.borrow_mut().push(e.clone()));
        }
        assert_eq!(bus.listener_count(), 2);

        bus.emit(GameEvent::CupcakesEaten { count: 2 });
        bus.emit(GameEvent::Completed);

        let expected = vec![GameEvent::CupcakesEaten { count: 2 }, GameEvent::Completed];
        assert_eq!(*first.borrow(), expected);
        assert_eq!(*second.borrow(), expected);
    }

    #[test]
    fn test_emit_without_listeners() {
        let mut bus = EventBus::new();
        bus.emit(GameEvent::LevelHidden { id: 1 });
    }

    #[test]
    fn test_death_messages() {
        assert_eq!(
            DeathCause::NeverTurned.to_string(),
            "Try the left/right arrow keys or the on-screen buttons"
        );
        assert_eq!(
            DeathCause::ClosedDoor(Gate::Blue).message(),
            DeathCause::ClosedDoor(Gate::Yellow).message()
        );
        assert_ne!(DeathCause::Wall.message(), DeathCause::PastDoor.message());
    }
}
