// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! A module containing boilerplate implementations of standard traits such as Display, From etc etc

use super::{FEdgeId, SVertexId, ViewEdge, ViewEdgeId, ViewMap, ViewShapeId, ViewVertexId};
use std::fmt;

impl fmt::Display for SVertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SVertex#{}", self.index())
    }
}

impl fmt::Display for FEdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FEdge#{}", self.index())
    }
}

impl fmt::Display for ViewVertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewVertex#{}", self.index())
    }
}

impl fmt::Display for ViewEdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewEdge#{}", self.index())
    }
}

impl fmt::Display for ViewShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewShape#{}", self.index())
    }
}

impl fmt::Display for ViewEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn endpoint(v: Option<ViewVertexId>) -> String {
            v.map_or_else(|| "-".to_string(), |v| v.to_string())
        }
        write!(
            f,
            "ViewEdge {} ({} -> {}) qi:{} fedges:{} {:?}",
            self.id,
            endpoint(self.vertex_a),
            endpoint(self.vertex_b),
            self.qi,
            self.fedges.len(),
            self.nature
        )
    }
}

impl fmt::Display for ViewMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ViewMap shapes:{} view_edges:{} view_vertices:{} fedges:{} svertices:{}",
            self.shapes.len(),
            self.view_edges.len(),
            self.view_vertices.len(),
            self.fedges.len(),
            self.svertices.len()
        )
    }
}
