// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key classification.
//!
//! The backend recognizes exactly two semantic signals:
//!
//! - [`KeySignal::Activate`] (Enter): arms a source on key down, and commits
//!   or toggles the drag on the shared commit listener.
//! - [`KeySignal::Cancel`] (Escape): cancels an in-flight drag from the global
//!   surface.
//!
//! Every other key is ignored by the backend.

use crate::surface::Event;

/// A logical key carried by a keyboard event.
///
/// Only [`Key::Enter`] and [`Key::Escape`] have meaning to the backend; the
/// remaining variants exist so hosts can forward their key stream unfiltered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The Enter / Return key.
    Enter,
    /// The Escape key.
    Escape,
    /// The Tab key.
    Tab,
    /// The space bar.
    Space,
    /// An arrow key or other navigation key.
    Navigation,
    /// A printable character.
    Character(char),
    /// Any other key the host does not classify further.
    Other,
}

/// Semantic signal recognized by the backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeySignal {
    /// Start (arm) or commit a drag.
    Activate,
    /// Cancel an in-flight drag.
    Cancel,
}

impl KeySignal {
    /// Classify a key, returning `None` for keys the backend ignores.
    pub const fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Enter => Some(Self::Activate),
            Key::Escape => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Returns `true` if `event` is a key event carrying the activation key.
///
/// Both key down and key up qualify; the listener the event arrived on decides
/// what the signal means.
pub fn starts_drag<N>(event: &Event<N>) -> bool {
    event.signal() == Some(KeySignal::Activate)
}

/// Returns `true` if `event` is a key event carrying the cancel key.
pub fn ends_drag<N>(event: &Event<N>) -> bool {
    event.signal() == Some(KeySignal::Cancel)
}
