// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

use super::{Chain, ChainLink, chain_view_edges};
use crate::{
    ViewMapError,
    id::Id,
    nature::Nature,
    stroke::Stroke,
    view_map::{ViewEdgeId, ViewMap, ViewMapBuilder, fixtures::crossing},
};
use vector_traits::{approx::assert_ulps_eq, glam::dvec3};

/// `s0 -> s1 <- s2` and, with `branch`, `s1 -> s3`. Every SVertex is a NonTVertex.
fn polyline_star(branch: bool) -> Result<(ViewMap, Vec<ViewEdgeId>), ViewMapError> {
    let mut b = ViewMapBuilder::new();
    let shape = b.add_shape(Id::new(0, 0), "star");
    let points = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 1.0)];
    let sv: Vec<_> = points
        .iter()
        .enumerate()
        .map(|(n, (x, y))| b.add_svertex(Id::from(n as u32), dvec3(*x, *y, 0.0), dvec3(*x, *y, 0.0)))
        .collect();
    let mut vv = Vec::new();
    for (n, s) in sv.iter().enumerate() {
        vv.push(b.add_non_tvertex(Id::from(n as u32), *s, shape)?);
    }
    let mut pairs = vec![(0, 1), (2, 1)];
    if branch {
        pairs.push((1, 3));
    }
    let mut edges = Vec::new();
    for (n, (from, to)) in pairs.into_iter().enumerate() {
        let e = b.add_view_edge(Id::from(n as u32), shape, 0, Nature::CREASE)?;
        let _ = b.add_fedge(Id::from(n as u32), e, sv[from], sv[to])?;
        b.set_view_edge_endpoints(e, Some(vv[from]), Some(vv[to]))?;
        edges.push(e);
    }
    Ok((b.build()?, edges))
}

#[test]
fn test_chain_through_non_tvertex() -> Result<(), ViewMapError> {
    let (map, edges) = polyline_star(false)?;
    let chains = chain_view_edges(&map, |_| true)?;
    assert_eq!(1, chains.len());
    assert_eq!(
        &[ChainLink::new(edges[0], true), ChainLink::new(edges[1], false)],
        chains[0].links()
    );
    assert_eq!(Id::new(0, 0), chains[0].id());

    // the junction SVertex is sampled once
    let stroke = Stroke::from_chain(&map, &chains[0])?;
    assert_eq!(3, stroke.len());
    assert_ulps_eq!(2.0, stroke.length());
    assert_eq!(Some(edges[1]), stroke.vertices()[2].view_edge());
    Ok(())
}

#[test]
fn test_chain_stops_at_branch() -> Result<(), ViewMapError> {
    let (map, _) = polyline_star(true)?;
    let chains = chain_view_edges(&map, |_| true)?;
    assert_eq!(3, chains.len());
    assert!(chains.iter().all(|c| c.len() == 1));
    let ids: Vec<_> = chains.iter().map(Chain::id).collect();
    assert_eq!(vec![Id::new(0, 0), Id::new(1, 0), Id::new(2, 0)], ids);
    Ok(())
}

#[test]
fn test_chain_through_tvertex() -> Result<(), ViewMapError> {
    let c = crossing()?;
    let chains = chain_view_edges(&c.map, |_| true)?;
    let links: Vec<Vec<_>> = chains.iter().map(|ch| ch.links().to_vec()).collect();
    assert_eq!(
        vec![
            vec![ChainLink::new(c.back_a, true), ChainLink::new(c.back_b, true)],
            vec![ChainLink::new(c.front_a, true), ChainLink::new(c.front_b, true)],
            vec![ChainLink::new(c.occluded, true)],
        ],
        links
    );
    Ok(())
}

#[test]
fn test_chain_predicate() -> Result<(), ViewMapError> {
    let c = crossing()?;
    // only visible edges
    let chains = chain_view_edges(&c.map, |e| e.qi() == 0)?;
    assert_eq!(2, chains.len());
    assert_eq!(&[ChainLink::new(c.back_a, true)], chains[0].links());
    assert_eq!(2, chains[1].len());
    Ok(())
}

#[test]
fn test_push_requires_continuity() -> Result<(), ViewMapError> {
    let (map, edges) = polyline_star(false)?;
    let mut chain = Chain::new(Id::new(5, 0));
    assert!(chain.is_empty());
    chain.push(&map, ChainLink::new(edges[0], true))?;
    assert!(matches!(
        chain.push(&map, ChainLink::new(edges[1], true)),
        Err(ViewMapError::InvalidArgument(_))
    ));
    chain.push(&map, ChainLink::new(edges[1], false))?;
    assert_eq!(2, chain.len());
    assert!(matches!(
        Chain::new(Id::default()).push(&map, ChainLink::new(ViewEdgeId::new(99), true)),
        Err(ViewMapError::InvalidHandle(_))
    ));

    // nothing continues a dangling end
    let c = crossing()?;
    let mut dangling = Chain::from_view_edge(Id::default(), c.occluded);
    assert!(dangling.push(&c.map, ChainLink::new(c.back_a, true)).is_err());
    Ok(())
}

#[test]
fn test_link_vertices() -> Result<(), ViewMapError> {
    let c = crossing()?;
    let link = ChainLink::new(c.back_b, false);
    assert_eq!(Some(c.ends[1]), link.start_vertex(&c.map)?);
    assert_eq!(Some(c.tvertex), link.end_vertex(&c.map)?);
    Ok(())
}
