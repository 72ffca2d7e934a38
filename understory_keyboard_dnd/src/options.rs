// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend configuration and preview render hints.

use alloc::string::{String, ToString};

use crate::error::Error;

/// A validated, non-empty CSS-like selector.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selector(String);

impl Selector {
    /// Create a selector, trimming surrounding whitespace.
    ///
    /// Returns [`Error::EmptySelector`] if nothing is left.
    pub fn new(selector: &str) -> Result<Self, Error> {
        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptySelector);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The selector text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Behavior flags for the keyboard backend.
///
/// The default moves focus nowhere.
///
/// ```
/// use understory_keyboard_dnd::options::KeyboardOptions;
///
/// let options = KeyboardOptions::default()
///     .with_focus_on_begin_drag("#drop-zones")?
///     .with_focus_on_cancel_drag("#toolbox")?;
/// assert_eq!(options.focus_on_begin_drag.as_ref().map(|s| s.as_str()), Some("#drop-zones"));
/// # Ok::<(), understory_keyboard_dnd::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyboardOptions {
    /// Element to focus right after a drag begins.
    pub focus_on_begin_drag: Option<Selector>,
    /// Element to focus after a drag is cancelled.
    pub focus_on_cancel_drag: Option<Selector>,
}

impl KeyboardOptions {
    /// Focus the first element matching `selector` after a drag begins.
    pub fn with_focus_on_begin_drag(mut self, selector: &str) -> Result<Self, Error> {
        self.focus_on_begin_drag = Some(Selector::new(selector)?);
        Ok(self)
    }

    /// Focus the first element matching `selector` after a drag is cancelled.
    pub fn with_focus_on_cancel_drag(mut self, selector: &str) -> Result<Self, Error> {
        self.focus_on_cancel_drag = Some(Selector::new(selector)?);
        Ok(self)
    }
}

/// Render hints stored alongside a drag preview node.
///
/// The backend never reads these; they are kept for collaborators that draw
/// drag feedback.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PreviewOptions {
    /// Horizontal anchor within the preview, from 0.0 (left) to 1.0 (right).
    pub anchor_x: f64,
    /// Vertical anchor within the preview, from 0.0 (top) to 1.0 (bottom).
    pub anchor_y: f64,
    /// Horizontal offset applied after anchoring, in client units.
    pub offset_x: f64,
    /// Vertical offset applied after anchoring, in client units.
    pub offset_y: f64,
    /// Whether the preview should be captured in its dragging state.
    pub capture_dragging_state: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            anchor_x: 0.5,
            anchor_y: 0.5,
            offset_x: 0.0,
            offset_y: 0.0,
            capture_dragging_state: false,
        }
    }
}
