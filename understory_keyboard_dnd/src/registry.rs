// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node registrations and their disposers.
//!
//! Every `connect_*` call records the node under its identifier, attaches the
//! listeners that node needs, and returns a [`Disposer`] describing exactly
//! what was attached. Disposing detaches those listeners and drops the entry,
//! unless the identifier has since been connected again, in which case the
//! newer entry is left alone. Entries are told apart by a generation number,
//! so reconnecting an id to the very same node still counts as newer.

use core::hash::Hash;

use hashbrown::HashMap;

use crate::options::PreviewOptions;
use crate::surface::{EventKind, EventSurface, Listener, ListenerTarget};

/// Handle returned by the `connect_*` operations.
///
/// Pass it to [`KeyboardBackend::dispose`](crate::backend::KeyboardBackend::dispose)
/// once the node leaves the drag surface. Consuming it makes a double dispose
/// impossible; disposing after the registration is already gone only detaches
/// listeners, which the surface treats as a no-op.
#[derive(Debug)]
#[must_use = "dropping a disposer leaves its listeners attached"]
pub struct Disposer<K, N> {
    binding: Binding<K, N>,
}

#[derive(Debug)]
enum Binding<K, N> {
    Source { id: K, node: N, generation: u64 },
    Preview { id: K, generation: u64 },
    Target { id: K, node: N, generation: u64 },
    Inert,
}

impl<K, N> Disposer<K, N> {
    pub(crate) const fn inert() -> Self {
        Self {
            binding: Binding::Inert,
        }
    }

    /// Whether disposing does nothing, because nothing was attached.
    pub const fn is_inert(&self) -> bool {
        matches!(self.binding, Binding::Inert)
    }
}

#[derive(Clone, Debug)]
struct Entry<N> {
    node: N,
    generation: u64,
}

#[derive(Clone, Debug)]
struct Preview<N> {
    node: N,
    options: PreviewOptions,
    generation: u64,
}

/// Node bookkeeping for sources, previews and targets.
#[derive(Clone, Debug)]
pub(crate) struct Registry<K, N> {
    sources: HashMap<K, Entry<N>>,
    previews: HashMap<K, Preview<N>>,
    targets: HashMap<K, Entry<N>>,
    next_generation: u64,
}

impl<K, N> Registry<K, N>
where
    K: Clone + Eq + Hash,
    N: Clone + PartialEq,
{
    pub(crate) fn new() -> Self {
        Self {
            sources: HashMap::new(),
            previews: HashMap::new(),
            targets: HashMap::new(),
            next_generation: 0,
        }
    }

    pub(crate) fn source(&self, id: &K) -> Option<&N> {
        self.sources.get(id).map(|e| &e.node)
    }

    pub(crate) fn target(&self, id: &K) -> Option<&N> {
        self.targets.get(id).map(|e| &e.node)
    }

    pub(crate) fn preview(&self, id: &K) -> Option<(&N, &PreviewOptions)> {
        self.previews.get(id).map(|p| (&p.node, &p.options))
    }

    fn bump(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        generation
    }

    pub(crate) fn connect_source<S>(&mut self, surface: &mut S, id: K, node: N) -> Disposer<K, N>
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        let generation = self.bump();
        self.sources.insert(
            id.clone(),
            Entry {
                node: node.clone(),
                generation,
            },
        );
        surface.add_listener(
            ListenerTarget::Node(node.clone()),
            EventKind::KeyDown,
            Listener::ArmSource(id.clone()),
        );
        surface.add_listener(
            ListenerTarget::Node(node.clone()),
            EventKind::KeyUp,
            Listener::Commit,
        );
        Disposer {
            binding: Binding::Source {
                id,
                node,
                generation,
            },
        }
    }

    pub(crate) fn connect_preview(
        &mut self,
        id: K,
        node: N,
        options: PreviewOptions,
    ) -> Disposer<K, N> {
        let generation = self.bump();
        self.previews.insert(
            id.clone(),
            Preview {
                node,
                options,
                generation,
            },
        );
        Disposer {
            binding: Binding::Preview { id, generation },
        }
    }

    pub(crate) fn connect_target<S>(&mut self, surface: &mut S, id: K, node: N) -> Disposer<K, N>
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        if !surface.has_document() {
            return Disposer::inert();
        }
        let generation = self.bump();
        let at = ListenerTarget::Node(node.clone());
        surface.add_listener(at.clone(), EventKind::Focus, Listener::TargetFocus(id.clone()));
        surface.add_listener(at.clone(), EventKind::Blur, Listener::TargetBlur);
        surface.add_listener(at, EventKind::KeyDown, Listener::Commit);
        self.targets.insert(
            id.clone(),
            Entry {
                node: node.clone(),
                generation,
            },
        );
        Disposer {
            binding: Binding::Target {
                id,
                node,
                generation,
            },
        }
    }

    pub(crate) fn dispose<S>(&mut self, surface: &mut S, disposer: Disposer<K, N>)
    where
        S: EventSurface<K, Node = N> + ?Sized,
    {
        match disposer.binding {
            Binding::Source {
                id,
                node,
                generation,
            } => {
                if self.sources.get(&id).is_some_and(|e| e.generation == generation) {
                    self.sources.remove(&id);
                }
                let at = ListenerTarget::Node(node);
                surface.remove_listener(at.clone(), EventKind::KeyDown, &Listener::ArmSource(id));
                surface.remove_listener(at, EventKind::KeyUp, &Listener::Commit);
            }
            Binding::Preview { id, generation } => {
                if self.previews.get(&id).is_some_and(|p| p.generation == generation) {
                    self.previews.remove(&id);
                }
            }
            Binding::Target {
                id,
                node,
                generation,
            } => {
                if self.targets.get(&id).is_some_and(|e| e.generation == generation) {
                    self.targets.remove(&id);
                }
                let at = ListenerTarget::Node(node);
                surface.remove_listener(at.clone(), EventKind::Focus, &Listener::TargetFocus(id));
                surface.remove_listener(at.clone(), EventKind::Blur, &Listener::TargetBlur);
                surface.remove_listener(at, EventKind::KeyDown, &Listener::Commit);
            }
            Binding::Inert => {}
        }
    }
}
