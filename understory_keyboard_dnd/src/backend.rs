// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The keyboard drag state machine.
//!
//! ## Phases
//!
//! - [`DragPhase::Idle`]: nothing armed.
//! - [`DragPhase::Armed`]: Enter went down on a source; the engine has not
//!   been told anything yet.
//! - [`DragPhase::Dragging`]: the engine reports a drag in progress.
//! - [`DragPhase::Considering`]: dragging, with a drop target focused.
//!
//! ## Signals
//!
//! | Listener | Event | Effect |
//! |---|---|---|
//! | [`Listener::ArmSource`] | Enter down on a source | arm that source (last one wins) |
//! | [`Listener::Commit`] | Enter up on a source, Enter down on a target | begin if not dragging, else drop + end |
//! | [`Listener::TargetFocus`] | focus on a target | hover that target if the hit test lands on it |
//! | [`Listener::TargetBlur`] | blur on a target | hover nothing |
//! | [`Listener::Cancel`] | Escape down anywhere | end an undropped drag |
//!
//! The commit listener is one decision point, not two transitions: whether it
//! begins or finishes a drag depends only on [`DragDropMonitor::is_dragging`]
//! at the moment the signal is handled.
//!
//! Within a handler, local state is updated before anything is dispatched to
//! the engine, and `drop` always precedes `end_drag`.

use core::hash::Hash;

use kurbo::Point;
use smallvec::{SmallVec, smallvec};
use tracing::{debug, info, trace, warn};

use crate::engine::{BeginDragOptions, DragDropActions, DragDropMonitor, HoverOptions};
use crate::error::Error;
use crate::geometry::node_client_offset;
use crate::install::InstallSlot;
use crate::keys::{ends_drag, starts_drag};
use crate::options::{KeyboardOptions, PreviewOptions, Selector};
use crate::registry::{Disposer, Registry};
use crate::surface::{Event, EventKind, EventSurface, Listener, ListenerTarget, Response};

/// Identifier list; keyboard drags carry a single id.
type Ids<K> = SmallVec<[K; 1]>;

/// Observable phase of the backend, combining local state with the engine's.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No source armed and no drag in progress.
    Idle,
    /// A source is armed; the drag has not begun.
    Armed,
    /// A drag is in progress with no target under consideration.
    Dragging,
    /// A drag is in progress and a drop target is focused.
    Considering,
}

/// Keyboard drag-and-drop backend.
///
/// `K` identifies sources and targets, `N` is the host node handle and `M` is
/// the coordination engine.
#[derive(Debug)]
pub struct KeyboardBackend<K, N, M> {
    manager: M,
    options: KeyboardOptions,
    registry: Registry<K, N>,
    active_source_ids: Option<Ids<K>>,
    considered_target_ids: Option<Ids<K>>,
    pointer_offset: Option<Point>,
    installed: bool,
}

impl<K, N, M> KeyboardBackend<K, N, M>
where
    K: Clone + Eq + Hash,
    N: Clone + PartialEq,
    M: DragDropActions<K> + DragDropMonitor,
{
    /// Create a backend dispatching to `manager`.
    pub fn new(manager: M, options: KeyboardOptions) -> Self {
        Self {
            manager,
            options,
            registry: Registry::new(),
            active_source_ids: None,
            considered_target_ids: None,
            pointer_offset: None,
            installed: false,
        }
    }

    /// Install the global cancel listener.
    ///
    /// Without a global surface this does nothing and succeeds, and so does
    /// installing a backend that is already installed. Fails with
    /// [`Error::AlreadyInstalled`] if `slot` is already held by another backend.
    pub fn install<S>(&mut self, slot: &mut InstallSlot, surface: &mut S) -> Result<(), Error>
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        if self.installed {
            debug!("keyboard drag backend already installed");
            return Ok(());
        }
        if !surface.has_global_surface() {
            debug!("no global input surface; keyboard backend stays inert");
            return Ok(());
        }
        slot.acquire()?;
        self.installed = true;
        surface.add_listener(ListenerTarget::Global, EventKind::KeyDown, Listener::Cancel);
        info!("keyboard drag backend installed");
        Ok(())
    }

    /// Remove the global cancel listener and forget the pointer offset.
    ///
    /// Node registrations are untouched; their disposers clean them up.
    pub fn uninstall<S>(&mut self, slot: &mut InstallSlot, surface: &mut S)
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        if !surface.has_global_surface() {
            return;
        }
        self.pointer_offset = None;
        if self.installed {
            self.installed = false;
            slot.release();
            surface.remove_listener(ListenerTarget::Global, EventKind::KeyDown, &Listener::Cancel);
            info!("keyboard drag backend uninstalled");
        }
    }

    /// Register a drag source node.
    pub fn connect_source<S>(&mut self, surface: &mut S, id: K, node: N) -> Disposer<K, N>
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        self.registry.connect_source(surface, id, node)
    }

    /// Register a preview node and its render hints. No listeners are attached.
    pub fn connect_preview(&mut self, id: K, node: N, options: PreviewOptions) -> Disposer<K, N> {
        self.registry.connect_preview(id, node, options)
    }

    /// Register a drop target node.
    ///
    /// Without a document the returned disposer is inert and nothing is
    /// attached.
    pub fn connect_target<S>(&mut self, surface: &mut S, id: K, node: N) -> Disposer<K, N>
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        self.registry.connect_target(surface, id, node)
    }

    /// Undo a `connect_*` call.
    pub fn dispose<S>(&mut self, surface: &mut S, disposer: Disposer<K, N>)
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        self.registry.dispose(surface, disposer);
    }

    /// Handle `event` delivered to `listener`.
    pub fn handle_event<S>(
        &mut self,
        surface: &mut S,
        listener: &Listener<K>,
        event: &Event<N>,
    ) -> Response
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        match listener {
            Listener::ArmSource(id) => self.arm_source(id, event),
            Listener::Commit => self.commit_or_finish(surface, event),
            Listener::TargetFocus(id) => self.target_focus(surface, id, event),
            Listener::TargetBlur => self.target_blur(surface, event),
            Listener::Cancel => self.cancel(surface, event),
        }
    }

    fn arm_source(&mut self, id: &K, event: &Event<N>) -> Response {
        if event.kind() != EventKind::KeyDown || !starts_drag(event) {
            return Response::Ignored;
        }
        self.active_source_ids = Some(smallvec![id.clone()]);
        self.considered_target_ids = Some(SmallVec::new());
        debug!("source armed");
        Response::Handled
    }

    fn commit_or_finish<S>(&mut self, surface: &mut S, event: &Event<N>) -> Response
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        if !surface.has_document() || !starts_drag(event) {
            return Response::Ignored;
        }

        if !self.manager.is_dragging() {
            let Some(source_ids) = self.active_source_ids.as_deref() else {
                trace!("commit signal with nothing armed");
                return Response::Ignored;
            };
            let sources = &self.registry;
            let tree: &S = surface;
            let source_client_offset = |id: &K| {
                sources
                    .source(id)
                    .and_then(|node| node_client_offset(tree, node))
            };
            debug!("beginning keyboard drag");
            self.manager.begin_drag(
                source_ids,
                BeginDragOptions {
                    client_offset: self.pointer_offset,
                    source_client_offset: &source_client_offset,
                    publish_source: false,
                },
            );
            if let Some(selector) = &self.options.focus_on_begin_drag {
                focus_first::<K, _>(surface, selector);
            }
        } else {
            self.pointer_offset = None;
            self.active_source_ids = None;
            self.considered_target_ids = None;
            debug!("dropping keyboard drag");
            self.manager.drop();
            self.manager.end_drag();
        }

        if self.manager.is_dragging() {
            self.manager.publish_drag_source();
        }
        Response::Handled
    }

    fn target_focus<S>(&mut self, surface: &mut S, id: &K, event: &Event<N>) -> Response
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        if !surface.has_document() || !self.manager.is_dragging() {
            return Response::Ignored;
        }
        let Some(node) = self.registry.target(id) else {
            return Response::Ignored;
        };
        let hit = node_client_offset(&*surface, event.target())
            .and_then(|point| surface.element_from_point(point));
        let on_target = hit.is_some_and(|hit| hit == *node || surface.contains(node, &hit));
        if !on_target {
            trace!("focused target is not under its own offset");
            return Response::Ignored;
        }

        let Some(considered) = self.considered_target_ids.as_mut() else {
            return Response::Ignored;
        };
        *considered = smallvec![id.clone()];
        if let Some(offset) = node_client_offset(&*surface, event.target()) {
            self.pointer_offset = Some(offset);
        }
        debug!("hovering focused target");
        self.manager.hover(
            core::slice::from_ref(id),
            HoverOptions {
                client_offset: self.pointer_offset,
            },
        );
        Response::DefaultPrevented
    }

    fn target_blur<S>(&mut self, surface: &mut S, event: &Event<N>) -> Response
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        if !self.manager.is_dragging() {
            return Response::Ignored;
        }
        if let Some(offset) = node_client_offset(&*surface, event.target()) {
            self.pointer_offset = Some(offset);
        }
        if let Some(considered) = self.considered_target_ids.as_mut() {
            considered.clear();
        }
        debug!("focus left target");
        self.manager.hover(
            &[],
            HoverOptions {
                client_offset: self.pointer_offset,
            },
        );
        Response::DefaultPrevented
    }

    fn cancel<S>(&mut self, surface: &mut S, event: &Event<N>) -> Response
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        if !ends_drag(event) {
            return Response::Ignored;
        }
        if !self.manager.is_dragging() || self.manager.did_drop() {
            self.active_source_ids = None;
            return Response::Handled;
        }

        self.pointer_offset = None;
        self.active_source_ids = None;
        self.considered_target_ids = None;
        debug!("cancelling keyboard drag");
        self.manager.end_drag();
        if let Some(selector) = &self.options.focus_on_cancel_drag {
            focus_first::<K, _>(surface, selector);
        }
        Response::DefaultPrevented
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        if self.manager.is_dragging() {
            match &self.considered_target_ids {
                Some(ids) if !ids.is_empty() => DragPhase::Considering,
                _ => DragPhase::Dragging,
            }
        } else if self.active_source_ids.is_some() {
            DragPhase::Armed
        } else {
            DragPhase::Idle
        }
    }

    /// Sources armed to begin a drag.
    pub fn active_source_ids(&self) -> Option<&[K]> {
        self.active_source_ids.as_deref()
    }

    /// Targets currently considered for a drop.
    pub fn considered_target_ids(&self) -> Option<&[K]> {
        self.considered_target_ids.as_deref()
    }

    /// Last pointer-equivalent position.
    pub fn pointer_offset(&self) -> Option<Point> {
        self.pointer_offset
    }

    /// Whether this backend holds its install slot.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// The node registered for source `id`.
    pub fn source_node(&self, id: &K) -> Option<&N> {
        self.registry.source(id)
    }

    /// The node registered for target `id`.
    pub fn target_node(&self, id: &K) -> Option<&N> {
        self.registry.target(id)
    }

    /// The preview node registered for source `id`.
    pub fn preview_node(&self, id: &K) -> Option<&N> {
        self.registry.preview(id).map(|(node, _)| node)
    }

    /// The preview render hints registered for source `id`.
    pub fn preview_options(&self, id: &K) -> Option<&PreviewOptions> {
        self.registry.preview(id).map(|(_, options)| options)
    }

    /// Configured behavior flags.
    pub fn options(&self) -> &KeyboardOptions {
        &self.options
    }

    /// The coordination engine.
    pub fn manager(&self) -> &M {
        &self.manager
    }

    /// Mutable access to the coordination engine.
    pub fn manager_mut(&mut self) -> &mut M {
        &mut self.manager
    }
}

fn focus_first<K, S>(surface: &mut S, selector: &Selector)
where
    S: EventSurface<K> + ?Sized,
{
    match surface.query_selector(selector.as_str()) {
        Some(node) => surface.focus(&node),
        None => warn!(selector = selector.as_str(), "no element matches focus selector"),
    }
}
