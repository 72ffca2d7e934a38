// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-equivalent offsets from focused-node geometry.

use kurbo::Point;

use crate::surface::NodeTree;

/// Resolve the client offset of `node`: the top-left corner of its bounding box.
///
/// Text-like leaves have no box of their own, so a non-element `node` resolves
/// through its parent element. Returns `None` when no element is found.
pub fn node_client_offset<T>(tree: &T, node: &T::Node) -> Option<Point>
where
    T: NodeTree + ?Sized,
{
    let rect = if tree.is_element(node) {
        tree.bounding_rect(node)
    } else {
        tree.bounding_rect(&tree.parent_element(node)?)
    };
    Some(rect.origin())
}
