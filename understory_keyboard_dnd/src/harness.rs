// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory document and recording engine for tests.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::backend::KeyboardBackend;
use crate::engine::{BeginDragOptions, DragDropActions, DragDropMonitor, HoverOptions};
use crate::keys::Key;
use crate::surface::{
    Event, EventKind, EventSurface, Listener, ListenerTarget, NodeTree, Response,
};

pub(crate) type Id = &'static str;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Clone, Debug)]
struct NodeData {
    parent: Option<NodeId>,
    /// `None` for text leaves.
    rect: Option<Rect>,
    selector: Option<String>,
}

/// A tiny DOM: elements with boxes, text leaves without, listeners per node.
///
/// Hit testing returns the last-inserted element containing the point, so
/// later siblings paint over earlier ones and children over parents.
#[derive(Debug)]
pub(crate) struct TestDom {
    nodes: Vec<NodeData>,
    listeners: Vec<(ListenerTarget<NodeId>, EventKind, Listener<Id>)>,
    window: bool,
    document: bool,
    pub(crate) focus_log: Vec<NodeId>,
}

impl TestDom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: alloc::vec![NodeData {
                parent: None,
                rect: Some(Rect::new(0.0, 0.0, 1000.0, 1000.0)),
                selector: None,
            }],
            listeners: Vec::new(),
            window: true,
            document: true,
            focus_log: Vec::new(),
        }
    }

    pub(crate) fn without_document() -> Self {
        Self {
            document: false,
            ..Self::new()
        }
    }

    pub(crate) fn without_window() -> Self {
        Self {
            window: false,
            document: false,
            ..Self::new()
        }
    }

    pub(crate) fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push(&mut self, parent: Option<NodeId>, rect: Option<Rect>) -> NodeId {
        self.nodes.push(NodeData {
            parent,
            rect,
            selector: None,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn element(&mut self, parent: NodeId, rect: Rect) -> NodeId {
        self.push(Some(parent), Some(rect))
    }

    pub(crate) fn text(&mut self, parent: NodeId) -> NodeId {
        self.push(Some(parent), None)
    }

    pub(crate) fn detached_text(&mut self) -> NodeId {
        self.push(None, None)
    }

    pub(crate) fn set_selector(&mut self, node: NodeId, selector: &str) {
        self.nodes[node.0].selector = Some(selector.to_string());
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn listeners_on(&self, target: &ListenerTarget<NodeId>) -> usize {
        self.listeners.iter().filter(|(t, ..)| t == target).count()
    }

    /// Deliver `event` the way a browser would.
    ///
    /// Key events visit the target, its ancestors, then the window. Focus and
    /// blur only visit the target.
    pub(crate) fn dispatch<M>(
        &mut self,
        backend: &mut KeyboardBackend<Id, NodeId, M>,
        event: Event<NodeId>,
    ) -> Vec<Response>
    where
        M: DragDropActions<Id> + DragDropMonitor,
    {
        let kind = event.kind();
        let mut path = alloc::vec![ListenerTarget::Node(*event.target())];
        if matches!(kind, EventKind::KeyDown | EventKind::KeyUp) {
            let mut cursor = self.nodes[event.target().0].parent;
            while let Some(node) = cursor {
                path.push(ListenerTarget::Node(node));
                cursor = self.nodes[node.0].parent;
            }
            path.push(ListenerTarget::Global);
        }

        let mut matched = Vec::new();
        for at in &path {
            for (t, k, l) in &self.listeners {
                if t == at && *k == kind {
                    matched.push(l.clone());
                }
            }
        }
        matched
            .iter()
            .map(|listener| backend.handle_event(self, listener, &event))
            .collect()
    }

    pub(crate) fn press<M>(&mut self, backend: &mut KeyboardBackend<Id, NodeId, M>, node: NodeId, key: Key)
    where
        M: DragDropActions<Id> + DragDropMonitor,
    {
        self.dispatch(backend, Event::KeyDown { target: node, key });
        self.dispatch(backend, Event::KeyUp { target: node, key });
    }

    /// Move focus from `from` (if any) to `to`, firing blur then focus.
    pub(crate) fn tab<M>(
        &mut self,
        backend: &mut KeyboardBackend<Id, NodeId, M>,
        from: Option<NodeId>,
        to: NodeId,
    ) where
        M: DragDropActions<Id> + DragDropMonitor,
    {
        if let Some(from) = from {
            self.dispatch(backend, Event::Blur { target: from });
        }
        self.dispatch(backend, Event::Focus { target: to });
    }
}

impl NodeTree for TestDom {
    type Node = NodeId;

    fn is_element(&self, node: &NodeId) -> bool {
        self.nodes[node.0].rect.is_some()
    }

    fn parent_element(&self, node: &NodeId) -> Option<NodeId> {
        let mut cursor = self.nodes[node.0].parent;
        while let Some(parent) = cursor {
            if self.is_element(&parent) {
                return Some(parent);
            }
            cursor = self.nodes[parent.0].parent;
        }
        None
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        self.nodes[element.0].rect.unwrap_or(Rect::ZERO)
    }

    fn element_from_point(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, n)| n.rect.is_some_and(|r| r.contains(point)))
            .map(|(i, _)| NodeId(i))
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if current == *ancestor {
                return true;
            }
            cursor = self.nodes[current.0].parent;
        }
        false
    }
}

impl EventSurface<Id> for TestDom {
    fn has_global_surface(&self) -> bool {
        self.window
    }

    fn has_document(&self) -> bool {
        self.document
    }

    fn add_listener(&mut self, target: ListenerTarget<NodeId>, kind: EventKind, listener: Listener<Id>) {
        self.listeners.push((target, kind, listener));
    }

    fn remove_listener(
        &mut self,
        target: ListenerTarget<NodeId>,
        kind: EventKind,
        listener: &Listener<Id>,
    ) {
        if let Some(pos) = self
            .listeners
            .iter()
            .position(|(t, k, l)| *t == target && *k == kind && l == listener)
        {
            self.listeners.remove(pos);
        }
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.selector.as_deref() == Some(selector))
            .map(NodeId)
    }

    fn focus(&mut self, node: &NodeId) {
        self.focus_log.push(*node);
    }
}

/// An action observed by [`RecordingManager`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Action {
    BeginDrag {
        source_ids: Vec<Id>,
        client_offset: Option<Point>,
        /// `source_client_offset` evaluated for each source id.
        source_offsets: Vec<Option<Point>>,
        publish_source: bool,
    },
    PublishDragSource,
    Hover {
        target_ids: Vec<Id>,
        client_offset: Option<Point>,
    },
    Drop,
    EndDrag,
}

/// Engine stand-in that records every action and tracks drag state.
#[derive(Debug)]
pub(crate) struct RecordingManager {
    pub(crate) actions: Vec<Action>,
    pub(crate) dragging: bool,
    pub(crate) dropped: bool,
    /// Whether `begin_drag` actually starts a drag.
    pub(crate) can_drag: bool,
}

impl RecordingManager {
    pub(crate) fn new() -> Self {
        Self {
            actions: Vec::new(),
            dragging: false,
            dropped: false,
            can_drag: true,
        }
    }

    pub(crate) fn take(&mut self) -> Vec<Action> {
        core::mem::take(&mut self.actions)
    }
}

impl DragDropActions<Id> for RecordingManager {
    fn begin_drag(&mut self, source_ids: &[Id], options: BeginDragOptions<'_, Id>) {
        self.actions.push(Action::BeginDrag {
            source_ids: source_ids.to_vec(),
            client_offset: options.client_offset,
            source_offsets: source_ids
                .iter()
                .map(|id| (options.source_client_offset)(id))
                .collect(),
            publish_source: options.publish_source,
        });
        self.dragging = self.can_drag;
        self.dropped = false;
    }

    fn publish_drag_source(&mut self) {
        self.actions.push(Action::PublishDragSource);
    }

    fn hover(&mut self, target_ids: &[Id], options: HoverOptions) {
        self.actions.push(Action::Hover {
            target_ids: target_ids.to_vec(),
            client_offset: options.client_offset,
        });
    }

    fn drop(&mut self) {
        self.actions.push(Action::Drop);
        self.dropped = true;
    }

    fn end_drag(&mut self) {
        self.actions.push(Action::EndDrag);
        self.dragging = false;
        self.dropped = false;
    }
}

impl DragDropMonitor for RecordingManager {
    fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn did_drop(&self) -> bool {
        self.dropped
    }
}
