// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event substrate the backend runs on.
//!
//! The backend does not own a node tree, perform hit testing, or deliver
//! events. It describes what it needs through two traits:
//!
//! - [`NodeTree`]: read-only geometry. Element checks, parent lookup, bounding
//!   boxes, point-to-element hit testing, and descendant containment.
//! - [`EventSurface`]: everything that mutates or observes the environment.
//!   Listener registration, focus moves, selector lookup, and whether a
//!   window/document exists at all.
//!
//! ## Listeners are tokens
//!
//! Instead of closures, the backend registers [`Listener`] tokens for an
//! [`EventKind`] on a [`ListenerTarget`]. When a native event fires, the host
//! looks up the tokens registered for that target and kind and hands each one
//! back to [`KeyboardBackend::handle_event`](crate::backend::KeyboardBackend::handle_event)
//! together with the [`Event`]. Key events are expected to reach node
//! listeners first and the [`ListenerTarget::Global`] listeners last, the same
//! way a DOM key event bubbles to the window.

use kurbo::{Point, Rect};

use crate::keys::{Key, KeySignal};

/// Read-only geometry and hit testing over host nodes.
pub trait NodeTree {
    /// Host node handle. Cheap to clone, compared by identity.
    type Node: Clone + PartialEq;

    /// Whether `node` is an element with its own bounding box.
    ///
    /// Text-like leaves return `false`.
    fn is_element(&self, node: &Self::Node) -> bool;

    /// The nearest ancestor element of `node`, if any.
    fn parent_element(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Client-space bounding box of an element.
    ///
    /// Only called for nodes where [`is_element`](Self::is_element) is `true`.
    fn bounding_rect(&self, element: &Self::Node) -> Rect;

    /// The topmost element at `point` in client space, if any.
    fn element_from_point(&self, point: Point) -> Option<Self::Node>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
}

/// Listener registration, focus control, and environment presence.
///
/// `K` is the caller's source/target identifier type.
pub trait EventSurface<K>: NodeTree {
    /// Whether a global input surface (a window) exists.
    ///
    /// Without one, installing the backend is a no-op.
    fn has_global_surface(&self) -> bool {
        true
    }

    /// Whether a document context exists.
    ///
    /// Without one, drop targets are never wired up and commit signals are
    /// ignored.
    fn has_document(&self) -> bool {
        true
    }

    /// Attach `listener` for events of `kind` on `target`.
    fn add_listener(
        &mut self,
        target: ListenerTarget<Self::Node>,
        kind: EventKind,
        listener: Listener<K>,
    );

    /// Detach a listener previously attached with the same arguments.
    ///
    /// Removing a listener that is not attached must be a no-op.
    fn remove_listener(
        &mut self,
        target: ListenerTarget<Self::Node>,
        kind: EventKind,
        listener: &Listener<K>,
    );

    /// The first element matching a CSS-like `selector`.
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// Move input focus to `node`.
    fn focus(&mut self, node: &Self::Node);
}

/// Kind of event a listener is attached for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Key pressed.
    KeyDown,
    /// Key released.
    KeyUp,
    /// Node gained focus.
    Focus,
    /// Node lost focus.
    Blur,
}

/// Where a listener is attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListenerTarget<N> {
    /// The global input surface (the window).
    Global,
    /// A specific node.
    Node(N),
}

/// A listener token, bound to the data its handler needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Listener<K> {
    /// Key down on a drag source: arms that source.
    ArmSource(K),
    /// Shared commit/toggle listener (key up on sources, key down on targets).
    Commit,
    /// Focus arriving on a drop target.
    TargetFocus(K),
    /// Focus leaving any drop target.
    TargetBlur,
    /// Global cancel listener.
    Cancel,
}

/// An input event delivered to a listener.
///
/// `target` is the node the event was dispatched to, which may be a
/// descendant of the node the listener is attached on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event<N> {
    /// Key pressed.
    KeyDown {
        /// Event target.
        target: N,
        /// Logical key.
        key: Key,
    },
    /// Key released.
    KeyUp {
        /// Event target.
        target: N,
        /// Logical key.
        key: Key,
    },
    /// Focus gained.
    Focus {
        /// Event target.
        target: N,
    },
    /// Focus lost.
    Blur {
        /// Event target.
        target: N,
    },
}

impl<N> Event<N> {
    /// The node the event was dispatched to.
    pub const fn target(&self) -> &N {
        match self {
            Self::KeyDown { target, .. }
            | Self::KeyUp { target, .. }
            | Self::Focus { target }
            | Self::Blur { target } => target,
        }
    }

    /// The listener kind this event is delivered to.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::KeyUp { .. } => EventKind::KeyUp,
            Self::Focus { .. } => EventKind::Focus,
            Self::Blur { .. } => EventKind::Blur,
        }
    }

    /// The key carried by a key event.
    pub const fn key(&self) -> Option<Key> {
        match self {
            Self::KeyDown { key, .. } | Self::KeyUp { key, .. } => Some(*key),
            Self::Focus { .. } | Self::Blur { .. } => None,
        }
    }

    /// The semantic signal carried by a key event, if recognized.
    pub fn signal(&self) -> Option<KeySignal> {
        self.key().and_then(KeySignal::from_key)
    }
}

/// What a handler did with an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Response {
    /// The event did not concern the backend.
    Ignored,
    /// The backend acted on the event.
    Handled,
    /// The backend acted on the event and the host should suppress its
    /// default action.
    DefaultPrevented,
}

impl Response {
    /// Whether the host should suppress the event's default action.
    pub const fn is_default_prevented(self) -> bool {
        matches!(self, Self::DefaultPrevented)
    }
}
