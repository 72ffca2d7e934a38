// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Keyboard DnD: drag and drop without a pointer.
//!
//! ## Overview
//!
//! This crate translates focus, blur and key events into the small set of
//! lifecycle actions a drag-and-drop coordination engine understands:
//! `begin_drag`, `publish_drag_source`, `hover`, `drop` and `end_drag`.
//! Users who cannot operate a pointing device get the same source → target
//! interaction that pointer backends provide.
//!
//! It does not own a node tree, perform hit testing, or draw drag feedback.
//! The host supplies an [`EventSurface`](surface::EventSurface) for geometry,
//! hit testing and listener bookkeeping, and an engine implementing
//! [`DragDropActions`](engine::DragDropActions) and
//! [`DragDropMonitor`](engine::DragDropMonitor).
//!
//! ## Interaction
//!
//! 1) Enter goes down on a registered source: the source is *armed*.
//! 2) Enter comes up: the drag begins. Focus optionally jumps to
//!    [`KeyboardOptions::focus_on_begin_drag`](options::KeyboardOptions::focus_on_begin_drag).
//! 3) Tabbing onto a drop target hovers it; tabbing away hovers nothing. The
//!    focused element's top-left corner stands in for the pointer position.
//! 4) Enter on a target drops and ends the drag. Escape anywhere ends an
//!    undropped drag instead.
//!
//! ## Wiring
//!
//! Listeners are [`Listener`](surface::Listener) tokens rather than closures.
//! The backend attaches them through the surface; the host routes each native
//! event back through [`KeyboardBackend::handle_event`](backend::KeyboardBackend::handle_event).
//!
//! ```
//! use understory_keyboard_dnd::{InstallSlot, KeyboardBackend, KeyboardOptions};
//! # use kurbo::{Point, Rect};
//! # use understory_keyboard_dnd::engine::{BeginDragOptions, DragDropActions, DragDropMonitor, HoverOptions};
//! # use understory_keyboard_dnd::surface::{EventKind, EventSurface, Listener, ListenerTarget, NodeTree};
//! # #[derive(Default)] struct Engine { dragging: bool }
//! # impl DragDropActions<&'static str> for Engine {
//! #     fn begin_drag(&mut self, _: &[&'static str], _: BeginDragOptions<'_, &'static str>) { self.dragging = true; }
//! #     fn publish_drag_source(&mut self) {}
//! #     fn hover(&mut self, _: &[&'static str], _: HoverOptions) {}
//! #     fn drop(&mut self) {}
//! #     fn end_drag(&mut self) { self.dragging = false; }
//! # }
//! # impl DragDropMonitor for Engine {
//! #     fn is_dragging(&self) -> bool { self.dragging }
//! #     fn did_drop(&self) -> bool { false }
//! # }
//! # #[derive(Default)] struct Window { listeners: Vec<(ListenerTarget<u32>, EventKind, Listener<&'static str>)> }
//! # impl NodeTree for Window {
//! #     type Node = u32;
//! #     fn is_element(&self, _: &u32) -> bool { true }
//! #     fn parent_element(&self, _: &u32) -> Option<u32> { None }
//! #     fn bounding_rect(&self, _: &u32) -> Rect { Rect::ZERO }
//! #     fn element_from_point(&self, _: Point) -> Option<u32> { None }
//! #     fn contains(&self, a: &u32, b: &u32) -> bool { a == b }
//! # }
//! # impl EventSurface<&'static str> for Window {
//! #     fn add_listener(&mut self, t: ListenerTarget<u32>, k: EventKind, l: Listener<&'static str>) { self.listeners.push((t, k, l)); }
//! #     fn remove_listener(&mut self, t: ListenerTarget<u32>, k: EventKind, l: &Listener<&'static str>) {
//! #         self.listeners.retain(|e| !(e.0 == t && e.1 == k && e.2 == *l));
//! #     }
//! #     fn query_selector(&self, _: &str) -> Option<u32> { None }
//! #     fn focus(&mut self, _: &u32) {}
//! # }
//! let mut window = Window::default();
//! let mut slot = InstallSlot::new();
//! let mut backend = KeyboardBackend::new(Engine::default(), KeyboardOptions::default());
//!
//! backend.install(&mut slot, &mut window)?;
//! let disposer = backend.connect_source(&mut window, "card", 7);
//!
//! // A second backend on the same slot is a configuration error.
//! let mut other = KeyboardBackend::new(Engine::default(), KeyboardOptions::default());
//! assert!(other.install(&mut slot, &mut window).is_err());
//!
//! backend.dispose(&mut window, disposer);
//! backend.uninstall(&mut slot, &mut window);
//! assert!(window.listeners.is_empty());
//! # Ok::<(), understory_keyboard_dnd::Error>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and `tracing`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod install;
pub mod keys;
pub mod options;
pub mod registry;
pub mod surface;

#[cfg(test)]
mod harness;

pub use backend::{DragPhase, KeyboardBackend};
pub use error::Error;
pub use geometry::node_client_offset;
pub use install::InstallSlot;
pub use keys::{ends_drag, starts_drag};
pub use options::KeyboardOptions;
