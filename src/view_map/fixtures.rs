// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! Small hand built view maps shared by the unit tests.

use super::{SVertexId, ViewEdgeId, ViewMap, ViewMapBuilder, ViewShapeId, ViewVertexId};
use crate::{
    ViewMapError,
    id::Id,
    nature::Nature,
    view_vertex::{DirectedViewEdge, TVertex},
};
use vector_traits::glam::dvec3;

/// A vertical front line crossing a horizontal back line at the origin.
///
/// ```text
///                 front_b (qi 0)
///                    |
///  back_a (qi 0) ----T---- back_b (qi 1)
///                    |
///                 front_a (qi 0)
/// ```
/// `back_a` and `back_b` run left to right with two FEdges each, `front_a` and `front_b` run
/// bottom to top with one FEdge each. The free-standing `occluded` edge has two FEdges with the
/// occluder lists `[x, y]` and `[y, z]`.
#[allow(dead_code)]
pub(crate) struct Crossing {
    pub map: ViewMap,
    pub front_shape: ViewShapeId,
    pub back_shape: ViewShapeId,
    pub x: ViewShapeId,
    pub y: ViewShapeId,
    pub z: ViewShapeId,
    pub front_a: ViewEdgeId,
    pub front_b: ViewEdgeId,
    pub back_a: ViewEdgeId,
    pub back_b: ViewEdgeId,
    pub occluded: ViewEdgeId,
    pub tvertex: ViewVertexId,
    pub front_svertex: SVertexId,
    pub back_svertex: SVertexId,
    /// left, right, bottom, top
    pub ends: [ViewVertexId; 4],
}

pub(crate) fn crossing() -> Result<Crossing, ViewMapError> {
    let mut b = ViewMapBuilder::new();
    let front_shape = b.add_shape(Id::new(0, 0), "front");
    let back_shape = b.add_shape(Id::new(1, 0), "back");
    let x = b.add_shape(Id::new(2, 0), "x");
    let y = b.add_shape(Id::new(3, 0), "y");
    let z = b.add_shape(Id::new(4, 0), "z");

    let back = 5.0;
    let front = 1.0;
    let p = |px: f64, py: f64, depth: f64| (dvec3(px, py, -depth), dvec3(px, py, depth));
    let mut next_id = 0_u32;

    let back_a = b.add_view_edge(Id::new(0, 0), back_shape, 0, Nature::SILHOUETTE)?;
    let back_a_sv = b.add_polyline(
        back_a,
        &[p(-2.0, 0.0, back), p(-1.0, 0.0, back), p(0.0, 0.0, back)],
        &mut next_id,
    )?;
    let back_svertex = back_a_sv[2];

    let back_b = b.add_view_edge(Id::new(1, 0), back_shape, 1, Nature::SILHOUETTE)?;
    let back_b_sv = [
        b.add_svertex(Id::from(next_id), dvec3(1.0, 0.0, -back), dvec3(1.0, 0.0, back)),
        b.add_svertex(Id::from(next_id + 1), dvec3(2.0, 0.0, -back), dvec3(2.0, 0.0, back)),
    ];
    let _ = b.add_fedge(Id::from(next_id + 2), back_b, back_svertex, back_b_sv[0])?;
    let _ = b.add_fedge(Id::from(next_id + 3), back_b, back_b_sv[0], back_b_sv[1])?;
    next_id += 4;

    let front_a = b.add_view_edge(Id::new(2, 0), front_shape, 0, Nature::CREASE)?;
    let front_a_sv = b.add_polyline(
        front_a,
        &[p(0.0, -2.0, front), p(0.0, 0.0, front)],
        &mut next_id,
    )?;
    let front_svertex = front_a_sv[1];
    let front_b = b.add_view_edge(Id::new(3, 0), front_shape, 0, Nature::CREASE)?;
    let front_b_sv = b.add_polyline(front_b, &[p(0.0, 2.0, front)], &mut next_id)?;
    let _ = b.add_fedge(Id::from(next_id), front_b, front_svertex, front_b_sv[0])?;
    next_id += 1;

    let occluded = b.add_view_edge(Id::new(4, 0), back_shape, 2, Nature::BORDER)?;
    let occluded_sv = [
        b.add_svertex(Id::from(next_id), dvec3(-2.0, 3.0, -back), dvec3(-2.0, 3.0, back)),
        b.add_svertex(Id::from(next_id + 1), dvec3(0.0, 3.0, -back), dvec3(0.0, 3.0, back)),
        b.add_svertex(Id::from(next_id + 2), dvec3(2.0, 3.0, -back), dvec3(2.0, 3.0, back)),
    ];
    let first = b.add_fedge(Id::from(next_id + 3), occluded, occluded_sv[0], occluded_sv[1])?;
    let second = b.add_fedge(Id::from(next_id + 4), occluded, occluded_sv[1], occluded_sv[2])?;
    b.set_fedge_occluders(first, vec![x, y])?;
    b.set_fedge_occluders(second, vec![y, z])?;

    let mut t = TVertex::new();
    t.set_id(Id::new(100, 0));
    t.set_front_svertex(front_svertex);
    t.set_back_svertex(back_svertex);
    t.set_front_edge_a(DirectedViewEdge::incoming(front_a));
    t.set_front_edge_b(DirectedViewEdge::outgoing(front_b));
    t.set_back_edge_a(DirectedViewEdge::incoming(back_a));
    t.set_back_edge_b(DirectedViewEdge::outgoing(back_b));
    let tvertex = b.add_tvertex(t, back_shape)?;

    let left = b.add_non_tvertex(Id::new(0, 0), back_a_sv[0], back_shape)?;
    let right = b.add_non_tvertex(Id::new(1, 0), back_b_sv[1], back_shape)?;
    let bottom = b.add_non_tvertex(Id::new(2, 0), front_a_sv[0], front_shape)?;
    let top = b.add_non_tvertex(Id::new(3, 0), front_b_sv[0], front_shape)?;
    b.set_view_edge_endpoints(back_a, Some(left), Some(tvertex))?;
    b.set_view_edge_endpoints(back_b, Some(tvertex), Some(right))?;
    b.set_view_edge_endpoints(front_a, Some(bottom), Some(tvertex))?;
    b.set_view_edge_endpoints(front_b, Some(tvertex), Some(top))?;

    b.set_view_edge_occluders(back_b, &[front_shape])?;
    b.set_occludee(front_a, Some(back_shape))?;
    b.set_occludee(front_b, Some(back_shape))?;

    let map = b.build()?;

    Ok(Crossing {
        map,
        front_shape,
        back_shape,
        x,
        y,
        z,
        front_a,
        front_b,
        back_a,
        back_b,
        occluded,
        tvertex,
        front_svertex,
        back_svertex,
        ends: [left, right, bottom, top],
    })
}
