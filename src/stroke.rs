// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! Strokes: parameterized polylines derived from view edges or chains.

mod iterator;
#[cfg(test)]
mod tests;

pub use iterator::StrokeVertexIterator;

use crate::{
    ViewMapError,
    chain::{Chain, ChainLink, oriented_svertices},
    id::Id,
    view_map::{SVertexId, ViewEdgeId, ViewMap},
};
use itertools::Itertools;
use vector_traits::glam::{DVec2, DVec3};

/// Visual attributes carried by each stroke vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeAttribute {
    pub color: [f32; 3],
    pub alpha: f32,
    /// thickness on the right and on the left of the stroke
    pub thickness: [f32; 2],
    pub visible: bool,
}

impl Default for StrokeAttribute {
    fn default() -> Self {
        Self {
            color: [0.0, 0.0, 0.0],
            alpha: 1.0,
            thickness: [1.0, 1.0],
            visible: true,
        }
    }
}

/// A vertex of a [`Stroke`].
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeVertex {
    projected: DVec3,
    point_3d: DVec3,
    curvilinear_abscissa: f64,
    stroke_length: f64,
    attribute: StrokeAttribute,
    svertex: Option<SVertexId>,
    view_edge: Option<ViewEdgeId>,
}

impl StrokeVertex {
    fn new(
        projected: DVec3,
        point_3d: DVec3,
        svertex: Option<SVertexId>,
        view_edge: Option<ViewEdgeId>,
    ) -> Self {
        Self {
            projected,
            point_3d,
            curvilinear_abscissa: 0.0,
            stroke_length: 0.0,
            attribute: StrokeAttribute::default(),
            svertex,
            view_edge,
        }
    }

    /// The 2D position
    #[inline(always)]
    pub fn point_2d(&self) -> DVec2 {
        self.projected.truncate()
    }

    /// Projected x, y and depth
    #[inline(always)]
    pub fn projected(&self) -> DVec3 {
        self.projected
    }

    #[inline(always)]
    pub fn point_3d(&self) -> DVec3 {
        self.point_3d
    }

    #[inline(always)]
    pub fn x(&self) -> f64 {
        self.projected.x
    }

    #[inline(always)]
    pub fn y(&self) -> f64 {
        self.projected.y
    }

    /// Curvilinear abscissa: the 2D arc length from the first vertex of the stroke
    #[inline(always)]
    pub fn t(&self) -> f64 {
        self.curvilinear_abscissa
    }

    /// The total length of the stroke this vertex belongs to
    #[inline(always)]
    pub fn stroke_length(&self) -> f64 {
        self.stroke_length
    }

    /// Normalized parameter `t / length`, in `[0, 1]`. Zero for a stroke of no length.
    pub fn u(&self) -> f64 {
        normalized(self.curvilinear_abscissa, self.stroke_length)
    }

    pub fn attribute(&self) -> &StrokeAttribute {
        &self.attribute
    }

    pub fn attribute_mut(&mut self) -> &mut StrokeAttribute {
        &mut self.attribute
    }

    /// The SVertex this vertex was sampled from, None for free-floating strokes
    pub fn svertex(&self) -> Option<SVertexId> {
        self.svertex
    }

    /// The view edge this vertex was sampled from, None for free-floating strokes
    pub fn view_edge(&self) -> Option<ViewEdgeId> {
        self.view_edge
    }
}

#[inline]
pub(crate) fn normalized(t: f64, length: f64) -> f64 {
    if length > 0.0 {
        (t / length).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// An ordered sequence of [`StrokeVertex`] with arc length parameterization.
///
/// The curvilinear abscissa `t` of each vertex is the cumulative 2D distance from the first
/// vertex, so `t` is non-decreasing along the stroke and `u = t / length` is in `[0, 1]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    id: Id,
    vertices: Vec<StrokeVertex>,
    length: f64,
    links: Vec<ChainLink>,
}

impl Stroke {
    /// A free-floating stroke, not backed by any view edge
    pub fn from_points(id: Id, points: impl IntoIterator<Item = DVec2>) -> Self {
        let vertices = points
            .into_iter()
            .map(|p| StrokeVertex::new(p.extend(0.0), p.extend(0.0), None, None))
            .collect();
        Self::with_vertices(id, vertices, Vec::new())
    }

    /// A stroke sampled from the SVertices of one view edge, from `A` to `B`.
    /// The stroke takes the id of the view edge.
    pub fn from_view_edge(map: &ViewMap, edge: ViewEdgeId) -> Result<Self, ViewMapError> {
        let id = map.view_edge(edge)?.id();
        Self::from_links(map, id, &[ChainLink::new(edge, true)])
    }

    /// A stroke sampled along a chain. The stroke takes the id of the chain.
    pub fn from_chain(map: &ViewMap, chain: &Chain) -> Result<Self, ViewMapError> {
        Self::from_links(map, chain.id(), chain.links())
    }

    fn from_links(map: &ViewMap, id: Id, links: &[ChainLink]) -> Result<Self, ViewMapError> {
        let mut vertices = Vec::new();
        for (sv, edge) in oriented_svertices(map, links)? {
            let svertex = map.svertex(sv)?;
            vertices.push(StrokeVertex::new(
                svertex.point_2d(),
                svertex.point_3d(),
                Some(sv),
                Some(edge),
            ));
        }
        Ok(Self::with_vertices(id, vertices, links.to_vec()))
    }

    fn with_vertices(id: Id, vertices: Vec<StrokeVertex>, links: Vec<ChainLink>) -> Self {
        let mut rv = Self {
            id,
            vertices,
            length: 0.0,
            links,
        };
        rv.update_length();
        rv
    }

    /// Recomputes the curvilinear abscissa of every vertex and the total length
    fn update_length(&mut self) {
        let mut abscissae = Vec::with_capacity(self.vertices.len());
        let mut t = 0.0;
        abscissae.push(t);
        for (a, b) in self.vertices.iter().tuple_windows() {
            t += a.point_2d().distance(b.point_2d());
            abscissae.push(t);
        }
        self.length = t;
        for (v, t) in self.vertices.iter_mut().zip(abscissae) {
            v.curvilinear_abscissa = t;
            v.stroke_length = self.length;
        }
    }

    #[inline(always)]
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn set_id(&mut self, id: Id) {
        self.id = id
    }

    /// The 2D length of the stroke
    #[inline(always)]
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[StrokeVertex] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<&StrokeVertex> {
        self.vertices.get(index)
    }

    /// Mutable access to a vertex, limited to its attribute so the parameterization stays valid
    pub fn attribute_mut(&mut self, index: usize) -> Option<&mut StrokeAttribute> {
        self.vertices.get_mut(index).map(StrokeVertex::attribute_mut)
    }

    /// The oriented view edges this stroke was sampled from; empty for a free-floating stroke
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// A forward cursor at the first vertex
    pub fn vertices_begin(&self) -> StrokeVertexIterator<'_> {
        StrokeVertexIterator::new(self)
    }

    /// A reversed cursor at the past-the-end position; host iteration yields the vertices from
    /// last to first.
    pub fn vertices_end(&self) -> StrokeVertexIterator<'_> {
        StrokeVertexIterator::past_the_end(self).reversed()
    }

    /// A forward cursor at `index`, `index == len()` being the past-the-end position
    pub fn cursor_at(&self, index: usize) -> Result<StrokeVertexIterator<'_>, ViewMapError> {
        StrokeVertexIterator::at(self, index)
    }
}
