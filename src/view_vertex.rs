// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! Nodes of the view graph.
//!
//! A [`ViewVertex`] is either a [`NonTVertex`], wrapping a single SVertex where view edges
//! meet, or a [`TVertex`], the apparent crossing of two projected edges where one hides the
//! other.

#[cfg(test)]
mod tests;

use crate::{
    id::Id,
    nature::Nature,
    view_map::{FEdgeId, SVertexId, ViewEdgeId, ViewMap},
};
use smallvec::SmallVec;

/// A view edge seen from a view vertex. `incoming` is true when the edge ends at the vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirectedViewEdge {
    pub edge: ViewEdgeId,
    pub incoming: bool,
}

impl DirectedViewEdge {
    pub fn new(edge: ViewEdgeId, incoming: bool) -> Self {
        Self { edge, incoming }
    }

    pub fn incoming(edge: ViewEdgeId) -> Self {
        Self::new(edge, true)
    }

    pub fn outgoing(edge: ViewEdgeId) -> Self {
        Self::new(edge, false)
    }
}

/// A view vertex wrapping exactly one SVertex.
#[derive(Clone, Debug, PartialEq)]
pub struct NonTVertex {
    id: Id,
    svertex: SVertexId,
    edges: SmallVec<[DirectedViewEdge; 4]>,
}

impl NonTVertex {
    pub fn new(id: Id, svertex: SVertexId) -> Self {
        Self {
            id,
            svertex,
            edges: SmallVec::new(),
        }
    }

    #[inline(always)]
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn set_id(&mut self, id: Id) {
        self.id = id
    }

    #[inline(always)]
    pub fn svertex(&self) -> SVertexId {
        self.svertex
    }

    pub fn set_svertex(&mut self, svertex: SVertexId) {
        self.svertex = svertex
    }

    /// The incident view edges in insertion order
    pub fn edges(&self) -> &[DirectedViewEdge] {
        &self.edges
    }

    /// Adds an incident edge, returns false if it was already registered
    pub fn add_edge(&mut self, edge: DirectedViewEdge) -> bool {
        if self.edges.contains(&edge) {
            return false;
        }
        self.edges.push(edge);
        true
    }
}

/// A T-junction: the apparent crossing of two projected edges.
///
/// The front edge pair (`front_edge_a`, `front_edge_b`) hides part of the back edge pair. The two
/// back edges are the halves of a split edge and carry the invisibilities `N` and `N+1`. The
/// vertex refers to two SVertices that coincide in 2D: `front_svertex`, closer to the viewpoint,
/// and `back_svertex`, farther away. It does not own them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TVertex {
    id: Id,
    front_svertex: Option<SVertexId>,
    back_svertex: Option<SVertexId>,
    front_edge_a: Option<DirectedViewEdge>,
    front_edge_b: Option<DirectedViewEdge>,
    back_edge_a: Option<DirectedViewEdge>,
    back_edge_b: Option<DirectedViewEdge>,
}

impl TVertex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the id
    #[inline(always)]
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn set_id(&mut self, id: Id) {
        self.id = id
    }

    #[inline(always)]
    pub fn front_svertex(&self) -> Option<SVertexId> {
        self.front_svertex
    }

    pub fn set_front_svertex(&mut self, svertex: SVertexId) {
        self.front_svertex = Some(svertex)
    }

    #[inline(always)]
    pub fn back_svertex(&self) -> Option<SVertexId> {
        self.back_svertex
    }

    pub fn set_back_svertex(&mut self, svertex: SVertexId) {
        self.back_svertex = Some(svertex)
    }

    pub fn front_edge_a(&self) -> Option<DirectedViewEdge> {
        self.front_edge_a
    }

    pub fn front_edge_b(&self) -> Option<DirectedViewEdge> {
        self.front_edge_b
    }

    pub fn back_edge_a(&self) -> Option<DirectedViewEdge> {
        self.back_edge_a
    }

    pub fn back_edge_b(&self) -> Option<DirectedViewEdge> {
        self.back_edge_b
    }

    pub fn set_front_edge_a(&mut self, edge: DirectedViewEdge) {
        self.front_edge_a = Some(edge)
    }

    pub fn set_front_edge_b(&mut self, edge: DirectedViewEdge) {
        self.front_edge_b = Some(edge)
    }

    pub fn set_back_edge_a(&mut self, edge: DirectedViewEdge) {
        self.back_edge_a = Some(edge)
    }

    pub fn set_back_edge_b(&mut self, edge: DirectedViewEdge) {
        self.back_edge_b = Some(edge)
    }

    /// The four slots in canonical order: front A, front B, back A, back B
    fn slots(&self) -> [Option<DirectedViewEdge>; 4] {
        [
            self.front_edge_a,
            self.front_edge_b,
            self.back_edge_a,
            self.back_edge_b,
        ]
    }

    /// The set edges in canonical order `[front A, front B, back A, back B]`
    pub fn edges(&self) -> SmallVec<[DirectedViewEdge; 4]> {
        self.slots().into_iter().flatten().collect()
    }

    pub fn is_front_edge(&self, edge: ViewEdgeId) -> bool {
        [self.front_edge_a, self.front_edge_b]
            .iter()
            .flatten()
            .any(|d| d.edge == edge)
    }

    pub fn is_back_edge(&self, edge: ViewEdgeId) -> bool {
        [self.back_edge_a, self.back_edge_b]
            .iter()
            .flatten()
            .any(|d| d.edge == edge)
    }

    /// Returns the partner of `edge` within its pair: front A <-> front B, back A <-> back B.
    /// Returns None if `edge` is none of the four edges.
    pub fn mate(&self, edge: ViewEdgeId) -> Option<ViewEdgeId> {
        let is = |slot: Option<DirectedViewEdge>| slot.is_some_and(|d| d.edge == edge);
        let partner = if is(self.front_edge_a) {
            self.front_edge_b
        } else if is(self.front_edge_b) {
            self.front_edge_a
        } else if is(self.back_edge_a) {
            self.back_edge_b
        } else if is(self.back_edge_b) {
            self.back_edge_a
        } else {
            None
        };
        partner.map(|d| d.edge)
    }

    /// Returns the SVertex (front or back) belonging to `fedge`.
    ///
    /// The choice follows the view edge owning the FEdge: a front view edge maps to
    /// `front_svertex`, a back view edge to `back_svertex`. Any other FEdge, including handles
    /// unknown to `map`, yields None.
    pub fn get_svertex(&self, map: &ViewMap, fedge: FEdgeId) -> Option<SVertexId> {
        let view_edge = map.fedge(fedge).ok()?.view_edge();
        if self.is_front_edge(view_edge) {
            self.front_svertex
        } else if self.is_back_edge(view_edge) {
            self.back_svertex
        } else {
            None
        }
    }

    /// Replaces every slot referring to `old` with `new`, keeping the direction.
    /// Returns true if any slot was changed.
    pub fn replace_edge(&mut self, old: ViewEdgeId, new: ViewEdgeId) -> bool {
        let mut changed = false;
        for slot in [
            &mut self.front_edge_a,
            &mut self.front_edge_b,
            &mut self.back_edge_a,
            &mut self.back_edge_b,
        ] {
            if let Some(d) = slot {
                if d.edge == old {
                    d.edge = new;
                    changed = true;
                }
            }
        }
        changed
    }
}

/// A node of the view graph.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewVertex {
    NonT(NonTVertex),
    T(TVertex),
}

impl ViewVertex {
    pub fn id(&self) -> Id {
        match self {
            ViewVertex::NonT(v) => v.id(),
            ViewVertex::T(v) => v.id(),
        }
    }

    pub fn set_id(&mut self, id: Id) {
        match self {
            ViewVertex::NonT(v) => v.set_id(id),
            ViewVertex::T(v) => v.set_id(id),
        }
    }

    pub fn nature(&self) -> Nature {
        match self {
            ViewVertex::NonT(_) => Nature::S_VERTEX | Nature::VIEW_VERTEX | Nature::NON_T_VERTEX,
            ViewVertex::T(_) => Nature::S_VERTEX | Nature::VIEW_VERTEX | Nature::T_VERTEX,
        }
    }

    /// The incident view edges. For a TVertex the order is
    /// `[front A, front B, back A, back B]`, for a NonTVertex it is insertion order.
    pub fn incident_edges(&self) -> SmallVec<[DirectedViewEdge; 4]> {
        match self {
            ViewVertex::NonT(v) => v.edges().iter().copied().collect(),
            ViewVertex::T(v) => v.edges(),
        }
    }

    /// The SVertex representing this node in 2D; the front SVertex for a TVertex
    pub fn svertex(&self) -> Option<SVertexId> {
        match self {
            ViewVertex::NonT(v) => Some(v.svertex()),
            ViewVertex::T(v) => v.front_svertex(),
        }
    }

    pub fn is_tvertex(&self) -> bool {
        matches!(self, ViewVertex::T(_))
    }

    pub fn as_tvertex(&self) -> Option<&TVertex> {
        match self {
            ViewVertex::T(v) => Some(v),
            ViewVertex::NonT(_) => None,
        }
    }

    pub fn as_tvertex_mut(&mut self) -> Option<&mut TVertex> {
        match self {
            ViewVertex::T(v) => Some(v),
            ViewVertex::NonT(_) => None,
        }
    }

    pub fn as_non_tvertex(&self) -> Option<&NonTVertex> {
        match self {
            ViewVertex::NonT(v) => Some(v),
            ViewVertex::T(_) => None,
        }
    }

    pub fn as_non_tvertex_mut(&mut self) -> Option<&mut NonTVertex> {
        match self {
            ViewVertex::NonT(v) => Some(v),
            ViewVertex::T(_) => None,
        }
    }
}

impl From<TVertex> for ViewVertex {
    fn from(v: TVertex) -> Self {
        ViewVertex::T(v)
    }
}

impl From<NonTVertex> for ViewVertex {
    fn from(v: NonTVertex) -> Self {
        ViewVertex::NonT(v)
    }
}
