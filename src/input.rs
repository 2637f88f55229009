// Input Module for gridcatch
//
// Keyboard input is split into two steps: a key source produces `Key`s and a
// `KeyMap` turns each key into an `Action`. The map is plain data, so the
// bindings can be inspected and tested without a terminal.

use crate::core::Result;
use crate::geometry::Direction;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::{HashMap, VecDeque};

/// A key press, reduced to what the game cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Esc,
    CtrlC,
    Char(char),
    Other,
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::CtrlC,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Esc => Key::Esc,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

/// What the session loop should do with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Quit,
    Ignore,
}

/// Key bindings. Unbound keys map to `Action::Ignore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: HashMap<Key, Action>,
}

impl KeyMap {
    /// A map with no bindings at all.
    pub fn empty() -> Self {
        KeyMap {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key: Key, action: Action) {
        self.bindings.insert(key, action);
    }

    pub fn action_for(&self, key: Key) -> Action {
        self.bindings.get(&key).copied().unwrap_or(Action::Ignore)
    }
}

impl Default for KeyMap {
    /// Arrow keys move; Esc, `q` and Ctrl-C quit.
    fn default() -> Self {
        let mut map = KeyMap::empty();
        map.bind(Key::Up, Action::Move(Direction::Up));
        map.bind(Key::Down, Action::Move(Direction::Down));
        map.bind(Key::Left, Action::Move(Direction::Left));
        map.bind(Key::Right, Action::Move(Direction::Right));
        map.bind(Key::Esc, Action::Quit);
        map.bind(Key::Char('q'), Action::Quit);
        // Raw mode swallows SIGINT
        map.bind(Key::CtrlC, Action::Quit);
        map
    }
}

/// Blocking source of key presses.
pub trait KeySource {
    fn read_key(&mut self) -> Result<Key>;
}

/// Reads key presses from the terminal via crossterm.
///
/// Mouse, focus, paste and resize events are skipped, as are key releases
/// on terminals that report them.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(Key::from(key));
                }
            }
        }
    }
}

/// Replays a fixed key sequence, then reports `Key::Esc` forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
}

impl ScriptedKeys {
    pub fn new<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        ScriptedKeys {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> Result<Key> {
        Ok(self.keys.pop_front().unwrap_or(Key::Esc))
    }
}
