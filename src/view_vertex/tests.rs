// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

use super::{DirectedViewEdge, NonTVertex, TVertex, ViewVertex};
use crate::{
    ViewMapError,
    id::Id,
    nature::Nature,
    view_map::{FEdgeId, SVertexId, ViewEdgeId, fixtures::crossing},
};

fn edge(i: usize) -> ViewEdgeId {
    ViewEdgeId::new(i)
}

/// front A = 0, front B = 1, back A = 2, back B = 3
fn unattached_tvertex() -> TVertex {
    let mut t = TVertex::new();
    t.set_front_edge_a(DirectedViewEdge::incoming(edge(0)));
    t.set_front_edge_b(DirectedViewEdge::outgoing(edge(1)));
    t.set_back_edge_a(DirectedViewEdge::incoming(edge(2)));
    t.set_back_edge_b(DirectedViewEdge::outgoing(edge(3)));
    t
}

#[test]
fn test_mate() {
    let t = unattached_tvertex();
    assert_eq!(Some(edge(1)), t.mate(edge(0)));
    assert_eq!(Some(edge(0)), t.mate(edge(1)));
    assert_eq!(Some(edge(3)), t.mate(edge(2)));
    assert_eq!(Some(edge(2)), t.mate(edge(3)));
    assert_eq!(None, t.mate(edge(4)));
}

#[test]
fn test_mate_is_an_involution_within_pairs() {
    let t = unattached_tvertex();
    for e in (0..4).map(edge) {
        let mate = t.mate(e).unwrap();
        assert_ne!(e, mate);
        assert_eq!(Some(e), t.mate(mate));
        assert_eq!(t.is_front_edge(e), t.is_front_edge(mate));
        assert_eq!(t.is_back_edge(e), t.is_back_edge(mate));
    }
}

#[test]
fn test_mate_of_partial_vertex() {
    let mut t = TVertex::new();
    assert_eq!(None, t.mate(edge(0)));
    t.set_front_edge_a(DirectedViewEdge::incoming(edge(0)));
    // the partner slot is unset
    assert_eq!(None, t.mate(edge(0)));
    assert_eq!(1, t.edges().len());
}

#[test]
fn test_edges_canonical_order() {
    let mut t = TVertex::new();
    // set in scrambled order, listed as front A, front B, back A, back B
    t.set_back_edge_b(DirectedViewEdge::outgoing(edge(3)));
    t.set_front_edge_b(DirectedViewEdge::outgoing(edge(1)));
    t.set_back_edge_a(DirectedViewEdge::incoming(edge(2)));
    t.set_front_edge_a(DirectedViewEdge::incoming(edge(0)));
    let order: Vec<_> = t.edges().iter().map(|d| d.edge).collect();
    assert_eq!(vec![edge(0), edge(1), edge(2), edge(3)], order);
    assert!(t.edges()[0].incoming);
    assert!(!t.edges()[1].incoming);
}

#[test]
fn test_replace_edge() {
    let mut t = unattached_tvertex();
    assert!(t.replace_edge(edge(2), edge(7)));
    assert_eq!(Some(edge(3)), t.mate(edge(7)));
    assert_eq!(None, t.mate(edge(2)));
    // the direction of the slot is kept
    assert_eq!(Some(DirectedViewEdge::incoming(edge(7))), t.back_edge_a());
    assert!(!t.replace_edge(edge(2), edge(8)));
}

#[test]
fn test_get_svertex() -> Result<(), ViewMapError> {
    let c = crossing()?;
    let t = c.map.tvertex(c.tvertex)?;
    let front_fedge = c.map.view_edge(c.front_a)?.fedge_b().unwrap();
    let back_fedge = c.map.view_edge(c.back_b)?.fedge_a().unwrap();
    let other_fedge = c.map.view_edge(c.occluded)?.fedge_a().unwrap();
    assert_eq!(Some(c.front_svertex), t.get_svertex(&c.map, front_fedge));
    assert_eq!(Some(c.back_svertex), t.get_svertex(&c.map, back_fedge));
    assert_eq!(None, t.get_svertex(&c.map, other_fedge));
    // unknown handles are no error
    assert_eq!(None, t.get_svertex(&c.map, FEdgeId::new(10_000)));
    Ok(())
}

#[test]
fn test_set_svertex_does_not_alias() {
    let mut t = TVertex::new();
    let mut sv = SVertexId::new(3);
    t.set_front_svertex(sv);
    sv = SVertexId::new(4);
    t.set_back_svertex(sv);
    assert_eq!(Some(SVertexId::new(3)), t.front_svertex());
    assert_eq!(Some(SVertexId::new(4)), t.back_svertex());
}

#[test]
fn test_id_is_copied() {
    let mut t = TVertex::new();
    let mut id = Id::new(3, 4);
    t.set_id(id);
    id.set_first(10);
    assert_eq!(Id::new(3, 4), t.id());

    // mutating a returned id leaves the vertex untouched
    let mut returned = t.id();
    returned.set_second(99);
    assert_eq!(Id::new(3, 4), t.id());
}

#[test]
fn test_non_tvertex_edges() {
    let mut v = NonTVertex::new(Id::new(1, 0), SVertexId::new(0));
    assert!(v.add_edge(DirectedViewEdge::outgoing(edge(0))));
    assert!(v.add_edge(DirectedViewEdge::incoming(edge(1))));
    assert!(!v.add_edge(DirectedViewEdge::incoming(edge(1))));
    assert_eq!(2, v.edges().len());
    v.set_svertex(SVertexId::new(5));
    assert_eq!(SVertexId::new(5), v.svertex());
}

#[test]
fn test_view_vertex_variants() {
    let t: ViewVertex = unattached_tvertex().into();
    let n: ViewVertex = NonTVertex::new(Id::new(2, 0), SVertexId::new(1)).into();
    assert!(t.is_tvertex());
    assert!(!n.is_tvertex());
    assert!(t.nature().contains(Nature::T_VERTEX));
    assert!(t.nature().contains(Nature::VIEW_VERTEX));
    assert!(!t.nature().contains(Nature::NON_T_VERTEX));
    assert!(n.nature().contains(Nature::NON_T_VERTEX));
    assert_eq!(4, t.incident_edges().len());
    assert!(n.incident_edges().is_empty());
    assert_eq!(Some(SVertexId::new(1)), n.svertex());
    assert!(t.as_non_tvertex().is_none());
    assert!(n.as_tvertex().is_none());
}

#[test]
fn test_crossing_incident_edges() -> Result<(), ViewMapError> {
    let c = crossing()?;
    let incident: Vec<_> = c.map.incident_edges(c.tvertex)?.to_vec();
    assert_eq!(
        vec![
            DirectedViewEdge::incoming(c.front_a),
            DirectedViewEdge::outgoing(c.front_b),
            DirectedViewEdge::incoming(c.back_a),
            DirectedViewEdge::outgoing(c.back_b),
        ],
        incident
    );
    assert_eq!(Some(c.front_svertex), c.map.view_vertex(c.tvertex)?.svertex());
    Ok(())
}
