//! Keyboard input
//!
//! Event handlers only flip held-key flags or queue signals. The queue is
//! drained one signal per tick by the frame driver.

use std::collections::VecDeque;

use crate::sim::{Signal, Steering};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    /// Start / pause / resume
    Confirm,
    Restart,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" | "a" | "A" => Key::Left,
            "ArrowRight" | "Right" | "d" | "D" => Key::Right,
            " " | "Spacebar" => Key::Confirm,
            "Escape" => Key::Restart,
            _ => Key::Other,
        }
    }
}

/// Where keyboard focus was when the event fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Game,
    /// A text-entry field such as the identity form
    TextField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub pressed: bool,
    /// Auto-repeat from a held key
    pub repeat: bool,
    pub focus: Focus,
}

impl KeyEvent {
    pub fn press(key: Key) -> Self {
        Self {
            key,
            pressed: true,
            repeat: false,
            focus: Focus::Game,
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            pressed: false,
            ..Self::press(key)
        }
    }

    pub fn in_text_field(mut self) -> Self {
        self.focus = Focus::TextField;
        self
    }
}

/// Held keys and queued signals
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub moving_left: bool,
    pub moving_right: bool,
    pending: VecDeque<Signal>,
}

impl InputState {
    /// Bound on queued signals so a stalled tab cannot pile them up
    const MAX_PENDING: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key event. Returns true if the game consumed it and the host
    /// should suppress the default action.
    ///
    /// Signal keys typed into a text field belong to the field, so the
    /// space bar can still be typed into a name.
    pub fn handle(&mut self, event: KeyEvent) -> bool {
        match event.key {
            Key::Left => {
                self.moving_left = event.pressed;
                event.focus == Focus::Game
            }
            Key::Right => {
                self.moving_right = event.pressed;
                event.focus == Focus::Game
            }
            Key::Confirm | Key::Restart => {
                if event.focus == Focus::TextField {
                    return false;
                }
                if event.pressed && !event.repeat {
                    let signal = if event.key == Key::Confirm {
                        Signal::Confirm
                    } else {
                        Signal::Restart
                    };
                    self.push_signal(signal);
                }
                true
            }
            Key::Other => false,
        }
    }

    pub fn push_signal(&mut self, signal: Signal) {
        if self.pending.len() >= Self::MAX_PENDING {
            log::warn!("Dropping {:?}, signal queue full", signal);
            return;
        }
        self.pending.push_back(signal);
    }

    /// Next queued signal, if any
    pub fn next_signal(&mut self) -> Option<Signal> {
        self.pending.pop_front()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn steering(&self) -> Steering {
        Steering {
            moving_left: self.moving_left,
            moving_right: self.moving_right,
        }
    }

    /// Forget held keys (focus lost, session reset)
    pub fn release_all(&mut self) {
        self.moving_left = false;
        self.moving_right = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::Left);
        assert_eq!(Key::from_dom_key("ArrowRight"), Key::Right);
        assert_eq!(Key::from_dom_key(" "), Key::Confirm);
        assert_eq!(Key::from_dom_key("Escape"), Key::Restart);
        assert_eq!(Key::from_dom_key("q"), Key::Other);
    }

    #[test]
    fn test_arrows_set_and_clear_flags() {
        let mut input = InputState::new();
        input.handle(KeyEvent::press(Key::Left));
        input.handle(KeyEvent::press(Key::Right));
        assert_eq!(
            input.steering(),
            Steering {
                moving_left: true,
                moving_right: true
            }
        );
        input.handle(KeyEvent::release(Key::Right));
        assert_eq!(input.steering(), Steering::LEFT);
        input.release_all();
        assert_eq!(input.steering(), Steering::NONE);
    }

    #[test]
    fn test_confirm_queues_one_signal_per_press() {
        let mut input = InputState::new();
        assert!(input.handle(KeyEvent::press(Key::Confirm)));
        let repeat = KeyEvent {
            repeat: true,
            ..KeyEvent::press(Key::Confirm)
        };
        input.handle(repeat);
        input.handle(KeyEvent::release(Key::Confirm));
        assert_eq!(input.next_signal(), Some(Signal::Confirm));
        assert_eq!(input.next_signal(), None);
    }

    #[test]
    fn test_signals_ignored_while_typing() {
        let mut input = InputState::new();
        assert!(!input.handle(KeyEvent::press(Key::Confirm).in_text_field()));
        assert!(!input.handle(KeyEvent::press(Key::Restart).in_text_field()));
        assert!(!input.has_pending());
    }

    #[test]
    fn test_signal_queue_is_bounded() {
        let mut input = InputState::new();
        for _ in 0..20 {
            input.push_signal(Signal::Confirm);
        }
        let mut drained = 0;
        while input.next_signal().is_some() {
            drained += 1;
        }
        assert_eq!(drained, 8);
    }
}
