// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag-and-drop coordination engine, as seen by the backend.
//!
//! The engine owns the canonical drag state. The backend only dispatches
//! lifecycle actions through [`DragDropActions`] and asks two questions
//! through [`DragDropMonitor`].

use core::fmt;

use kurbo::Point;

/// Options passed along with [`DragDropActions::begin_drag`].
pub struct BeginDragOptions<'a, K> {
    /// Pointer-equivalent position at the moment the drag begins.
    pub client_offset: Option<Point>,
    /// Resolve the current client offset of a registered source.
    pub source_client_offset: &'a dyn Fn(&K) -> Option<Point>,
    /// Whether the engine should publish the source as part of beginning.
    ///
    /// The keyboard backend always passes `false` and publishes separately.
    pub publish_source: bool,
}

impl<K> fmt::Debug for BeginDragOptions<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeginDragOptions")
            .field("client_offset", &self.client_offset)
            .field("source_client_offset", &"<fn>")
            .field("publish_source", &self.publish_source)
            .finish()
    }
}

/// Options passed along with [`DragDropActions::hover`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HoverOptions {
    /// Pointer-equivalent position of the hover.
    pub client_offset: Option<Point>,
}

/// Lifecycle actions the backend dispatches.
pub trait DragDropActions<K> {
    /// Begin dragging `source_ids`.
    fn begin_drag(&mut self, source_ids: &[K], options: BeginDragOptions<'_, K>);
    /// Publish the current drag source.
    fn publish_drag_source(&mut self);
    /// Hover over `target_ids`; an empty slice means no target.
    fn hover(&mut self, target_ids: &[K], options: HoverOptions);
    /// Drop on the currently hovered targets.
    fn drop(&mut self);
    /// End the current drag.
    fn end_drag(&mut self);
}

/// Drag state queries the backend consults.
pub trait DragDropMonitor {
    /// Whether a drag is in progress.
    fn is_dragging(&self) -> bool;
    /// Whether the current drag already completed a drop.
    fn did_drop(&self) -> bool;
}
