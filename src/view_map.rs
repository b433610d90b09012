// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! The view map: arena storage for SVertices, FEdges, ViewVertices, ViewEdges and ViewShapes.
//!
//! All entities are owned by [`ViewMap`] and referenced through typed index handles. The
//! ownership relations of the graph (a shape owns its view edges, a view edge owns its FEdges)
//! are recorded as handle lists. A `ViewMap` is only ever produced by [`ViewMapBuilder::build`],
//! which validates the graph, and it offers no mutation afterwards.

mod builder;
#[cfg(test)]
pub(crate) mod fixtures;
mod impls;

pub use builder::ViewMapBuilder;

use crate::{
    ViewMapError,
    id::Id,
    nature::Nature,
    utils::push_unique,
    view_vertex::{DirectedViewEdge, TVertex, ViewVertex},
};
use itertools::{Either, Itertools};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use vector_traits::glam::DVec3;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            #[inline(always)]
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_handle!(
    /// Handle of an [`SVertex`] inside a [`ViewMap`]
    SVertexId
);
define_handle!(
    /// Handle of an [`FEdge`] inside a [`ViewMap`]
    FEdgeId
);
define_handle!(
    /// Handle of a [`ViewVertex`] inside a [`ViewMap`]
    ViewVertexId
);
define_handle!(
    /// Handle of a [`ViewEdge`] inside a [`ViewMap`]
    ViewEdgeId
);
define_handle!(
    /// Handle of a [`ViewShape`] inside a [`ViewMap`]
    ViewShapeId
);

/// A sampled 3D point with its 2D projection.
///
/// `point_2d` holds the projected x and y, the z component is the projected depth.
#[derive(Clone, Debug, PartialEq)]
pub struct SVertex {
    pub(crate) id: Id,
    pub(crate) point_3d: DVec3,
    pub(crate) point_2d: DVec3,
    pub(crate) fedges: SmallVec<[FEdgeId; 2]>,
}

impl SVertex {
    #[inline(always)]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline(always)]
    pub fn point_3d(&self) -> DVec3 {
        self.point_3d
    }

    #[inline(always)]
    pub fn point_2d(&self) -> DVec3 {
        self.point_2d
    }

    /// The FEdges terminated by this vertex
    pub fn fedges(&self) -> &[FEdgeId] {
        &self.fedges
    }
}

/// A feature edge segment between two SVertices.
#[derive(Clone, Debug, PartialEq)]
pub struct FEdge {
    pub(crate) id: Id,
    pub(crate) vertex_a: SVertexId,
    pub(crate) vertex_b: SVertexId,
    pub(crate) view_edge: ViewEdgeId,
    pub(crate) next_edge: Option<FEdgeId>,
    pub(crate) previous_edge: Option<FEdgeId>,
    pub(crate) nature: Nature,
    pub(crate) occluders: Vec<ViewShapeId>,
}

impl FEdge {
    #[inline(always)]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline(always)]
    pub fn vertex_a(&self) -> SVertexId {
        self.vertex_a
    }

    #[inline(always)]
    pub fn vertex_b(&self) -> SVertexId {
        self.vertex_b
    }

    /// The view edge this segment belongs to
    #[inline(always)]
    pub fn view_edge(&self) -> ViewEdgeId {
        self.view_edge
    }

    #[inline(always)]
    pub fn next_edge(&self) -> Option<FEdgeId> {
        self.next_edge
    }

    #[inline(always)]
    pub fn previous_edge(&self) -> Option<FEdgeId> {
        self.previous_edge
    }

    #[inline(always)]
    pub fn nature(&self) -> Nature {
        self.nature
    }

    /// The shapes occluding this segment, in the order the builder recorded them
    pub fn occluders(&self) -> &[ViewShapeId] {
        &self.occluders
    }
}

/// A maximal chain of FEdges between two view vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewEdge {
    pub(crate) id: Id,
    pub(crate) vertex_a: Option<ViewVertexId>,
    pub(crate) vertex_b: Option<ViewVertexId>,
    pub(crate) fedges: Vec<FEdgeId>,
    pub(crate) qi: u32,
    pub(crate) shape: ViewShapeId,
    pub(crate) occludee: Option<ViewShapeId>,
    pub(crate) nature: Nature,
}

impl ViewEdge {
    #[inline(always)]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline(always)]
    pub fn vertex_a(&self) -> Option<ViewVertexId> {
        self.vertex_a
    }

    #[inline(always)]
    pub fn vertex_b(&self) -> Option<ViewVertexId> {
        self.vertex_b
    }

    pub fn fedges(&self) -> &[FEdgeId] {
        &self.fedges
    }

    pub fn fedge_a(&self) -> Option<FEdgeId> {
        self.fedges.first().copied()
    }

    pub fn fedge_b(&self) -> Option<FEdgeId> {
        self.fedges.last().copied()
    }

    /// Quantitative invisibility: the number of surfaces hiding this edge
    #[inline(always)]
    pub fn qi(&self) -> u32 {
        self.qi
    }

    #[inline(always)]
    pub fn shape(&self) -> ViewShapeId {
        self.shape
    }

    /// The shape this edge lies on top of, if any
    #[inline(always)]
    pub fn occludee(&self) -> Option<ViewShapeId> {
        self.occludee
    }

    #[inline(always)]
    pub fn nature(&self) -> Nature {
        self.nature
    }
}

/// The view edges and vertices produced for one source object.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewShape {
    pub(crate) id: Id,
    pub(crate) name: String,
    pub(crate) edges: Vec<ViewEdgeId>,
    pub(crate) vertices: Vec<ViewVertexId>,
}

impl ViewShape {
    #[inline(always)]
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn edges(&self) -> &[ViewEdgeId] {
        &self.edges
    }

    pub fn vertices(&self) -> &[ViewVertexId] {
        &self.vertices
    }
}

/// A validated, immutable view map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewMap {
    pub(crate) shapes: Vec<ViewShape>,
    pub(crate) svertices: Vec<SVertex>,
    pub(crate) fedges: Vec<FEdge>,
    pub(crate) view_vertices: Vec<ViewVertex>,
    pub(crate) view_edges: Vec<ViewEdge>,
}

impl ViewMap {
    pub fn svertex(&self, id: SVertexId) -> Result<&SVertex, ViewMapError> {
        self.svertices
            .get(id.index())
            .ok_or_else(|| ViewMapError::InvalidHandle(format!("{id:?}")))
    }

    pub fn fedge(&self, id: FEdgeId) -> Result<&FEdge, ViewMapError> {
        self.fedges
            .get(id.index())
            .ok_or_else(|| ViewMapError::InvalidHandle(format!("{id:?}")))
    }

    pub fn view_vertex(&self, id: ViewVertexId) -> Result<&ViewVertex, ViewMapError> {
        self.view_vertices
            .get(id.index())
            .ok_or_else(|| ViewMapError::InvalidHandle(format!("{id:?}")))
    }

    /// Returns the view vertex as a [`TVertex`], or an `InvalidArgument` error if the vertex is a
    /// non-T vertex.
    pub fn tvertex(&self, id: ViewVertexId) -> Result<&TVertex, ViewMapError> {
        self.view_vertex(id)?.as_tvertex().ok_or_else(|| {
            ViewMapError::InvalidArgument(format!("{id:?} is not a TVertex"))
        })
    }

    pub fn view_edge(&self, id: ViewEdgeId) -> Result<&ViewEdge, ViewMapError> {
        self.view_edges
            .get(id.index())
            .ok_or_else(|| ViewMapError::InvalidHandle(format!("{id:?}")))
    }

    pub fn shape(&self, id: ViewShapeId) -> Result<&ViewShape, ViewMapError> {
        self.shapes
            .get(id.index())
            .ok_or_else(|| ViewMapError::InvalidHandle(format!("{id:?}")))
    }

    pub fn svertex_count(&self) -> usize {
        self.svertices.len()
    }

    pub fn fedge_count(&self) -> usize {
        self.fedges.len()
    }

    pub fn view_vertex_count(&self) -> usize {
        self.view_vertices.len()
    }

    pub fn view_edge_count(&self) -> usize {
        self.view_edges.len()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn view_edges(&self) -> impl Iterator<Item = (ViewEdgeId, &ViewEdge)> {
        self.view_edges
            .iter()
            .enumerate()
            .map(|(i, e)| (ViewEdgeId::new(i), e))
    }

    pub fn view_vertices(&self) -> impl Iterator<Item = (ViewVertexId, &ViewVertex)> {
        self.view_vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (ViewVertexId::new(i), v))
    }

    pub fn shapes(&self) -> impl Iterator<Item = (ViewShapeId, &ViewShape)> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(i, s)| (ViewShapeId::new(i), s))
    }

    /// All the T-junctions of the map
    pub fn tvertices(&self) -> impl Iterator<Item = (ViewVertexId, &TVertex)> {
        self.view_vertices()
            .filter_map(|(i, v)| v.as_tvertex().map(|t| (i, t)))
    }

    /// The view edges meeting at `vertex`, see [`ViewVertex::incident_edges`]
    pub fn incident_edges(
        &self,
        vertex: ViewVertexId,
    ) -> Result<SmallVec<[DirectedViewEdge; 4]>, ViewMapError> {
        Ok(self.view_vertex(vertex)?.incident_edges())
    }

    /// The view edges owned by `shape`
    pub fn shape_edges(&self, shape: ViewShapeId) -> Result<&[ViewEdgeId], ViewMapError> {
        Ok(self.shape(shape)?.edges())
    }

    /// The SVertex sequence of a view edge, from `A` to `B`, both ends included.
    pub fn view_edge_vertices(&self, edge: ViewEdgeId) -> Result<Vec<SVertexId>, ViewMapError> {
        let view_edge = self.view_edge(edge)?;
        let mut rv = Vec::with_capacity(view_edge.fedges.len() + 1);
        if let Some(first) = view_edge.fedge_a() {
            rv.push(self.fedge(first)?.vertex_a);
        }
        for fedge in view_edge.fedges.iter() {
            rv.push(self.fedge(*fedge)?.vertex_b);
        }
        Ok(rv)
    }

    /// A view edge is closed when its last SVertex is its first one
    pub fn view_edge_is_closed(&self, edge: ViewEdgeId) -> Result<bool, ViewMapError> {
        let vertices = self.view_edge_vertices(edge)?;
        Ok(vertices.len() > 2 && vertices.first() == vertices.last())
    }

    /// Projected 2D length of a view edge
    pub fn view_edge_length_2d(&self, edge: ViewEdgeId) -> Result<f64, ViewMapError> {
        let mut length = 0.0;
        for (a, b) in self.view_edge_vertices(edge)?.into_iter().tuple_windows() {
            length += self
                .svertex(a)?
                .point_2d
                .truncate()
                .distance(self.svertex(b)?.point_2d.truncate());
        }
        Ok(length)
    }

    /// Appends the shapes occluding `edge` to `rv`, walking its FEdges from `A` to `B`, or from
    /// `B` to `A` unless `forward`. Shapes already in `seen` are skipped.
    pub(crate) fn extend_view_edge_occluders(
        &self,
        edge: ViewEdgeId,
        forward: bool,
        rv: &mut Vec<ViewShapeId>,
        seen: &mut FxHashSet<ViewShapeId>,
    ) -> Result<(), ViewMapError> {
        let fedges = self.view_edge(edge)?.fedges.iter();
        let ordered = if forward {
            Either::Left(fedges)
        } else {
            Either::Right(fedges.rev())
        };
        for fedge in ordered {
            for shape in self.fedge(*fedge)?.occluders.iter() {
                push_unique(rv, seen, *shape);
            }
        }
        Ok(())
    }
}
