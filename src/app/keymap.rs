//! Key mapping for trek.
//!
//! Bindings are fixed. [Keymap::fixed] builds them from short key descriptions such as
//! `"j"`, `"down"` or `"<c-c>"`, and [Keymap::lookup] resolves crossterm key events in
//! browsing mode. The search and filter prompts handle their keys directly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Every action reachable from browsing mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    MoveSelection(isize),
    JumpTop,
    JumpBottom,
    Enter,
    Back,
    Forward,
    ToggleHidden,
    JumpHome,
    StartSearch,
    StartFilter,
    Cancel,
    Quit,
}

/// Key + modifiers as used in the keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    #[rustfmt::skip]
    pub fn fixed() -> Self {
        let mut map = HashMap::new();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        bind!(&["j", "down"],                   Action::MoveSelection(1));
        bind!(&["k", "up"],                     Action::MoveSelection(-1));
        bind!(&["g", "home"],                   Action::JumpTop);
        bind!(&["G", "end"],                    Action::JumpBottom);
        bind!(&["l", "right", "enter"],         Action::Enter);
        bind!(&["h", "left", "backspace"],      Action::Back);
        bind!(&["L"],                           Action::Forward);
        bind!(&["."],                           Action::ToggleHidden);
        bind!(&["~"],                           Action::JumpHome);
        bind!(&["/"],                           Action::StartSearch);
        bind!(&["f"],                           Action::StartFilter);
        bind!(&["esc"],                         Action::Cancel);
        bind!(&["q", "<c-c>"],                  Action::Quit);

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        // Terminals report shifted symbols ('G', '~') with or without SHIFT
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::fixed()
    }
}

fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;

    let mut input = s;
    if let Some(inner) = s.strip_prefix('<').and_then(|r| r.strip_suffix('>')) {
        let mut parts: Vec<&str> = inner.split('-').collect();
        input = parts.pop()?;
        for prefix in parts {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
    }

    let code = match input.to_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "backspace" | "back" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "space" | "spc" => KeyCode::Char(' '),
        _ => {
            let mut chars = input.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    Some(Key { code, modifiers })
}

fn bind(key_list: &[&str], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        if let Some(key) = parse_key(k) {
            map.insert(key, action);
        }
    }
}
