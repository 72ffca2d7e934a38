// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A full keyboard drag over an in-memory page.
//!
//! The page has one card (a drag source) and two bins (drop targets). The
//! script arms the card, begins the drag, tabs across both bins, and drops on
//! the second one. Every action the engine receives is printed.
//!
//! Run:
//! - `cargo run -p understory_keyboard_dnd_demos --example keyboard_drag`

use kurbo::{Point, Rect};
use understory_keyboard_dnd::engine::{
    BeginDragOptions, DragDropActions, DragDropMonitor, HoverOptions,
};
use understory_keyboard_dnd::keys::Key;
use understory_keyboard_dnd::surface::{
    Event, EventKind, EventSurface, Listener, ListenerTarget, NodeTree,
};
use understory_keyboard_dnd::{InstallSlot, KeyboardBackend, KeyboardOptions};

/// One element per node; a node's parent is stored alongside its box.
struct Page {
    boxes: Vec<(Option<usize>, Rect, &'static str)>,
    listeners: Vec<(ListenerTarget<usize>, EventKind, Listener<&'static str>)>,
}

impl Page {
    fn add(&mut self, parent: Option<usize>, rect: Rect, selector: &'static str) -> usize {
        self.boxes.push((parent, rect, selector));
        self.boxes.len() - 1
    }

    /// Route `event` to matching listeners, bubbling key events to the window.
    fn fire(&mut self, backend: &mut KeyboardBackend<&'static str, usize, Engine>, event: Event<usize>) {
        let kind = event.kind();
        let mut path = vec![ListenerTarget::Node(*event.target())];
        if matches!(kind, EventKind::KeyDown | EventKind::KeyUp) {
            let mut cursor = self.boxes[*event.target()].0;
            while let Some(node) = cursor {
                path.push(ListenerTarget::Node(node));
                cursor = self.boxes[node].0;
            }
            path.push(ListenerTarget::Global);
        }
        let matched: Vec<_> = path
            .iter()
            .flat_map(|at| {
                self.listeners
                    .iter()
                    .filter(move |(t, k, _)| t == at && *k == kind)
                    .map(|(_, _, l)| l.clone())
            })
            .collect();
        for listener in matched {
            if backend.handle_event(self, &listener, &event).is_default_prevented() {
                println!("  (default prevented)");
            }
        }
    }
}

impl NodeTree for Page {
    type Node = usize;

    fn is_element(&self, _: &usize) -> bool {
        true
    }

    fn parent_element(&self, node: &usize) -> Option<usize> {
        self.boxes[*node].0
    }

    fn bounding_rect(&self, element: &usize) -> Rect {
        self.boxes[*element].1
    }

    fn element_from_point(&self, point: Point) -> Option<usize> {
        self.boxes.iter().rposition(|(_, r, _)| r.contains(point))
    }

    fn contains(&self, ancestor: &usize, node: &usize) -> bool {
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if current == *ancestor {
                return true;
            }
            cursor = self.boxes[current].0;
        }
        false
    }
}

impl EventSurface<&'static str> for Page {
    fn add_listener(
        &mut self,
        target: ListenerTarget<usize>,
        kind: EventKind,
        listener: Listener<&'static str>,
    ) {
        self.listeners.push((target, kind, listener));
    }

    fn remove_listener(
        &mut self,
        target: ListenerTarget<usize>,
        kind: EventKind,
        listener: &Listener<&'static str>,
    ) {
        self.listeners
            .retain(|(t, k, l)| !(*t == target && *k == kind && l == listener));
    }

    fn query_selector(&self, selector: &str) -> Option<usize> {
        self.boxes.iter().position(|(_, _, s)| *s == selector)
    }

    fn focus(&mut self, node: &usize) {
        println!("  focus -> {}", self.boxes[*node].2);
    }
}

/// Prints every action and keeps just enough state to answer the monitor.
#[derive(Default)]
struct Engine {
    dragging: bool,
    dropped: bool,
}

impl DragDropActions<&'static str> for Engine {
    fn begin_drag(&mut self, source_ids: &[&'static str], options: BeginDragOptions<'_, &'static str>) {
        let offsets: Vec<_> = source_ids
            .iter()
            .map(|id| (options.source_client_offset)(id))
            .collect();
        println!(
            "  begin_drag {source_ids:?} client_offset={:?} source_offsets={offsets:?}",
            options.client_offset
        );
        self.dragging = true;
        self.dropped = false;
    }

    fn publish_drag_source(&mut self) {
        println!("  publish_drag_source");
    }

    fn hover(&mut self, target_ids: &[&'static str], options: HoverOptions) {
        println!("  hover {target_ids:?} client_offset={:?}", options.client_offset);
    }

    fn drop(&mut self) {
        println!("  drop");
        self.dropped = true;
    }

    fn end_drag(&mut self) {
        println!("  end_drag");
        self.dragging = false;
        self.dropped = false;
    }
}

impl DragDropMonitor for Engine {
    fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn did_drop(&self) -> bool {
        self.dropped
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut page = Page {
        boxes: Vec::new(),
        listeners: Vec::new(),
    };
    let body = page.add(None, Rect::new(0.0, 0.0, 800.0, 600.0), "body");
    let card = page.add(Some(body), Rect::new(20.0, 20.0, 120.0, 80.0), "#card");
    let bins = page.add(Some(body), Rect::new(200.0, 0.0, 800.0, 300.0), "#bins");
    let bin_a = page.add(Some(bins), Rect::new(220.0, 20.0, 420.0, 220.0), "#bin-a");
    let bin_b = page.add(Some(bins), Rect::new(440.0, 20.0, 640.0, 220.0), "#bin-b");

    let options = KeyboardOptions::default()
        .with_focus_on_begin_drag("#bin-a")?
        .with_focus_on_cancel_drag("#card")?;
    let mut slot = InstallSlot::new();
    let mut backend = KeyboardBackend::new(Engine::default(), options);
    backend.install(&mut slot, &mut page)?;

    let card_disposer = backend.connect_source(&mut page, "card", card);
    let a_disposer = backend.connect_target(&mut page, "bin-a", bin_a);
    let b_disposer = backend.connect_target(&mut page, "bin-b", bin_b);

    println!("Enter on the card:");
    page.fire(&mut backend, Event::KeyDown { target: card, key: Key::Enter });
    page.fire(&mut backend, Event::KeyUp { target: card, key: Key::Enter });
    println!("phase: {:?}", backend.phase());

    println!("Focus bin A:");
    page.fire(&mut backend, Event::Blur { target: card });
    page.fire(&mut backend, Event::Focus { target: bin_a });
    println!("phase: {:?}", backend.phase());

    println!("Tab to bin B:");
    page.fire(&mut backend, Event::Blur { target: bin_a });
    page.fire(&mut backend, Event::Focus { target: bin_b });

    println!("Enter on bin B:");
    page.fire(&mut backend, Event::KeyDown { target: bin_b, key: Key::Enter });
    println!("phase: {:?}", backend.phase());

    backend.dispose(&mut page, card_disposer);
    backend.dispose(&mut page, a_disposer);
    backend.dispose(&mut page, b_disposer);
    backend.uninstall(&mut slot, &mut page);
    println!("listeners left: {}", page.listeners.len());
    Ok(())
}
