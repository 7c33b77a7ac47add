//! Keyboard-to-keypad bindings
//!
//! Maps keyboard keys to keypad symbols so a bound key behaves like holding
//! the on-screen button. Bindings are last-write-wins and live only for the
//! session.
//!
//! Release semantics differ from the on-screen buttons on purpose: a bound
//! key's release silences only when its symbol matches the most recently
//! pressed digit, while an on-screen button release always silences. Holding
//! a button and a bound key together therefore behaves differently depending
//! on which one is let go first, matching the reference behavior.

use std::collections::HashMap;

use eframe::egui;

use crate::audio::{SignalState, Symbol};

/// Session-scoped key bindings.
#[derive(Default)]
pub struct KeyMap {
    bindings: HashMap<egui::Key, Symbol>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to a symbol. Rebinding the same key overwrites.
    pub fn bind(&mut self, key: egui::Key, symbol: Symbol) {
        log::info!("Bound {:?} to '{}'", key, symbol.to_char());
        self.bindings.insert(key, symbol);
    }

    pub fn symbol_for(&self, key: egui::Key) -> Option<Symbol> {
        self.bindings.get(&key).copied()
    }

    /// Keys currently bound to the given symbol (for the button tooltip).
    pub fn keys_for(&self, symbol: Symbol) -> Vec<egui::Key> {
        let mut keys: Vec<egui::Key> = self
            .bindings
            .iter()
            .filter(|(_, &s)| s == symbol)
            .map(|(&k, _)| k)
            .collect();
        keys.sort_by_key(|k| *k as u32);
        keys
    }

    /// A bound key went down: press its digit.
    pub fn key_pressed(&self, key: egui::Key, state: &SignalState) {
        if let Some(symbol) = self.symbol_for(key) {
            state.press_digit(symbol);
        }
    }

    /// A bound key came up: silence whatever is sounding, but only if this
    /// key's symbol is the most recently pressed digit. The comparison is
    /// against the loaded pair alone, not the mode, so a key release can
    /// also cut short a dial/ring/busy tone started after the press.
    pub fn key_released(&self, key: egui::Key, state: &SignalState) {
        if let Some(symbol) = self.symbol_for(key) {
            if state.loaded_symbol() == Some(symbol) {
                state.release_digit(symbol);
            }
        }
    }
}
