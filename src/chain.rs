// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! Chains: ordered sequences of oriented view edges.

#[cfg(test)]
mod tests;

use crate::{
    ViewMapError,
    id::Id,
    utils::GrowingVob,
    view_map::{SVertexId, ViewEdge, ViewEdgeId, ViewMap, ViewVertexId},
    view_vertex::ViewVertex,
};
use log::debug;
use std::collections::VecDeque;

/// A view edge traversed either from `A` to `B` (`forward`) or from `B` to `A`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChainLink {
    pub edge: ViewEdgeId,
    pub forward: bool,
}

impl ChainLink {
    pub fn new(edge: ViewEdgeId, forward: bool) -> Self {
        Self { edge, forward }
    }

    /// The view vertex this link starts at
    pub fn start_vertex(&self, map: &ViewMap) -> Result<Option<ViewVertexId>, ViewMapError> {
        let edge = map.view_edge(self.edge)?;
        Ok(if self.forward {
            edge.vertex_a()
        } else {
            edge.vertex_b()
        })
    }

    /// The view vertex this link ends at
    pub fn end_vertex(&self, map: &ViewMap) -> Result<Option<ViewVertexId>, ViewMapError> {
        let edge = map.view_edge(self.edge)?;
        Ok(if self.forward {
            edge.vertex_b()
        } else {
            edge.vertex_a()
        })
    }
}

/// An ordered list of oriented view edges, each one starting where the previous one ends.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chain {
    id: Id,
    links: Vec<ChainLink>,
}

impl Chain {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            links: Vec::new(),
        }
    }

    pub fn from_view_edge(id: Id, edge: ViewEdgeId) -> Self {
        Self {
            id,
            links: vec![ChainLink::new(edge, true)],
        }
    }

    #[inline(always)]
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn set_id(&mut self, id: Id) {
        self.id = id
    }

    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Appends a link. The link must start at the view vertex where the chain currently ends.
    pub fn push(&mut self, map: &ViewMap, link: ChainLink) -> Result<(), ViewMapError> {
        if let Some(last) = self.links.last() {
            let end = last.end_vertex(map)?;
            let start = link.start_vertex(map)?;
            if end.is_none() || end != start {
                return Err(ViewMapError::InvalidArgument(format!(
                    "{} does not continue chain {} ending at {end:?}",
                    link.edge, self.id
                )));
            }
        } else {
            let _ = map.view_edge(link.edge)?;
        }
        self.links.push(link);
        Ok(())
    }
}

/// The SVertices visited by `links` in order, each paired with the view edge it was sampled from.
/// The junction SVertex shared by two consecutive links is only listed once.
pub(crate) fn oriented_svertices(
    map: &ViewMap,
    links: &[ChainLink],
) -> Result<Vec<(SVertexId, ViewEdgeId)>, ViewMapError> {
    let mut rv: Vec<(SVertexId, ViewEdgeId)> = Vec::new();
    for link in links.iter() {
        let mut svertices = map.view_edge_vertices(link.edge)?;
        if !link.forward {
            svertices.reverse();
        }
        for sv in svertices {
            if rv.last().is_some_and(|(last, _)| *last == sv) {
                continue;
            }
            rv.push((sv, link.edge));
        }
    }
    Ok(rv)
}

/// Finds the edge continuing `current` through `vertex`, if there is exactly one candidate.
///
/// A NonTVertex continues only when it joins exactly two view edges. A TVertex continues with
/// the mate of `current`, so a chain walks straight through the apparent crossing.
fn continuation<'a, P>(
    map: &'a ViewMap,
    vertex: ViewVertexId,
    current: ViewEdgeId,
    visited: &vob::Vob<u32>,
    predicate: &P,
) -> Result<Option<(ViewEdgeId, &'a ViewEdge)>, ViewMapError>
where
    P: Fn(&ViewEdge) -> bool,
{
    let next = match map.view_vertex(vertex)? {
        ViewVertex::NonT(v) => {
            let edges = v.edges();
            if edges.len() != 2 {
                return Ok(None);
            }
            let other = if edges[0].edge == current {
                edges[1].edge
            } else {
                edges[0].edge
            };
            if other == current {
                return Ok(None);
            }
            other
        }
        ViewVertex::T(t) => match t.mate(current) {
            Some(mate) => mate,
            None => return Ok(None),
        },
    };
    if visited.get_f(next.index()) {
        return Ok(None);
    }
    let edge = map.view_edge(next)?;
    Ok(predicate(edge).then_some((next, edge)))
}

/// Greedily groups the view edges accepted by `predicate` into chains.
///
/// Every accepted view edge ends up in exactly one chain. Chains are seeded in view edge order
/// and grown in both directions; growth stops at view vertices joining more than two edges, at
/// dangling ends and at edges already used. Chain ids are `(n, 0)` for the n:th chain.
pub fn chain_view_edges<P>(map: &ViewMap, predicate: P) -> Result<Vec<Chain>, ViewMapError>
where
    P: Fn(&ViewEdge) -> bool,
{
    let mut visited = vob::Vob::<u32>::fill(map.view_edge_count());
    let mut rv = Vec::new();

    for (seed, seed_edge) in map.view_edges() {
        if visited.get_f(seed.index()) || !predicate(seed_edge) {
            continue;
        }
        let _ = visited.set_grow(seed.index(), true);
        let mut links = VecDeque::from([ChainLink::new(seed, true)]);

        // grow from the B end of the seed
        let mut tail = ChainLink::new(seed, true);
        while let Some(vertex) = tail.end_vertex(map)? {
            let Some((next, edge)) = continuation(map, vertex, tail.edge, &visited, &predicate)?
            else {
                break;
            };
            tail = ChainLink::new(next, edge.vertex_a() == Some(vertex));
            let _ = visited.set_grow(next.index(), true);
            links.push_back(tail);
        }

        // grow from the A end of the seed
        let mut head = ChainLink::new(seed, true);
        while let Some(vertex) = head.start_vertex(map)? {
            let Some((next, edge)) = continuation(map, vertex, head.edge, &visited, &predicate)?
            else {
                break;
            };
            head = ChainLink::new(next, edge.vertex_b() == Some(vertex));
            let _ = visited.set_grow(next.index(), true);
            links.push_front(head);
        }

        rv.push(Chain {
            id: Id::new(rv.len() as u32, 0),
            links: links.into_iter().collect(),
        });
    }
    debug!(
        "chained {} view edges into {} chains",
        rv.iter().map(Chain::len).sum::<usize>(),
        rv.len()
    );
    Ok(rv)
}
