// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

use super::{
    FEdge, FEdgeId, SVertex, SVertexId, ViewEdge, ViewEdgeId, ViewMap, ViewShape, ViewShapeId,
    ViewVertexId,
};
use crate::{
    ViewMapError,
    id::Id,
    nature::Nature,
    view_vertex::{DirectedViewEdge, NonTVertex, TVertex, ViewVertex},
};
use log::debug;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use vector_traits::glam::DVec3;

/// Populates a [`ViewMap`].
///
/// The builder is the only place where the graph can be mutated. [`ViewMapBuilder::build`] links
/// the FEdge neighbours, registers FEdges on their SVertices and validates the graph before
/// handing out the immutable map.
#[derive(Debug, Default)]
pub struct ViewMapBuilder {
    map: ViewMap,
}

impl ViewMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shape(&mut self, id: Id, name: &str) -> ViewShapeId {
        let rv = ViewShapeId::new(self.map.shapes.len());
        self.map.shapes.push(ViewShape {
            id,
            name: name.to_string(),
            edges: Vec::new(),
            vertices: Vec::new(),
        });
        rv
    }

    pub fn add_svertex(&mut self, id: Id, point_3d: DVec3, point_2d: DVec3) -> SVertexId {
        let rv = SVertexId::new(self.map.svertices.len());
        self.map.svertices.push(SVertex {
            id,
            point_3d,
            point_2d,
            fedges: SmallVec::new(),
        });
        rv
    }

    /// Adds an empty view edge owned by `shape`. FEdges are appended with
    /// [`ViewMapBuilder::add_fedge`].
    pub fn add_view_edge(
        &mut self,
        id: Id,
        shape: ViewShapeId,
        qi: u32,
        nature: Nature,
    ) -> Result<ViewEdgeId, ViewMapError> {
        let rv = ViewEdgeId::new(self.map.view_edges.len());
        self.shape_mut(shape)?.edges.push(rv);
        self.map.view_edges.push(ViewEdge {
            id,
            vertex_a: None,
            vertex_b: None,
            fedges: Vec::new(),
            qi,
            shape,
            occludee: None,
            nature,
        });
        Ok(rv)
    }

    /// Appends an FEdge from `vertex_a` to `vertex_b` at the end of `view_edge`.
    /// The FEdge inherits the nature of the view edge.
    pub fn add_fedge(
        &mut self,
        id: Id,
        view_edge: ViewEdgeId,
        vertex_a: SVertexId,
        vertex_b: SVertexId,
    ) -> Result<FEdgeId, ViewMapError> {
        let _ = self.map.svertex(vertex_a)?;
        let _ = self.map.svertex(vertex_b)?;
        let rv = FEdgeId::new(self.map.fedges.len());
        let edge = self.view_edge_mut(view_edge)?;
        edge.fedges.push(rv);
        let nature = edge.nature;
        self.map.fedges.push(FEdge {
            id,
            vertex_a,
            vertex_b,
            view_edge,
            next_edge: None,
            previous_edge: None,
            nature,
            occluders: Vec::new(),
        });
        Ok(rv)
    }

    /// Adds a polyline of new SVertices to `view_edge`, one FEdge per segment.
    /// SVertex and FEdge ids are taken from `next_id` and incremented.
    pub fn add_polyline(
        &mut self,
        view_edge: ViewEdgeId,
        points: &[(DVec3, DVec3)],
        next_id: &mut u32,
    ) -> Result<Vec<SVertexId>, ViewMapError> {
        let mut rv = Vec::with_capacity(points.len());
        for (point_3d, point_2d) in points.iter() {
            rv.push(self.add_svertex(Id::from(*next_id), *point_3d, *point_2d));
            *next_id += 1;
        }
        for pair in rv.windows(2) {
            let _ = self.add_fedge(Id::from(*next_id), view_edge, pair[0], pair[1])?;
            *next_id += 1;
        }
        Ok(rv)
    }

    pub fn set_fedge_occluders(
        &mut self,
        fedge: FEdgeId,
        occluders: Vec<ViewShapeId>,
    ) -> Result<(), ViewMapError> {
        for shape in occluders.iter() {
            let _ = self.map.shape(*shape)?;
        }
        self.map
            .fedges
            .get_mut(fedge.index())
            .ok_or_else(|| ViewMapError::InvalidHandle(format!("{fedge:?}")))?
            .occluders = occluders;
        Ok(())
    }

    /// Gives every FEdge of `view_edge` the same occluder list
    pub fn set_view_edge_occluders(
        &mut self,
        view_edge: ViewEdgeId,
        occluders: &[ViewShapeId],
    ) -> Result<(), ViewMapError> {
        let fedges = self.map.view_edge(view_edge)?.fedges.clone();
        for fedge in fedges {
            self.set_fedge_occluders(fedge, occluders.to_vec())?;
        }
        Ok(())
    }

    pub fn set_occludee(
        &mut self,
        view_edge: ViewEdgeId,
        occludee: Option<ViewShapeId>,
    ) -> Result<(), ViewMapError> {
        if let Some(shape) = occludee {
            let _ = self.map.shape(shape)?;
        }
        self.view_edge_mut(view_edge)?.occludee = occludee;
        Ok(())
    }

    pub fn add_non_tvertex(
        &mut self,
        id: Id,
        svertex: SVertexId,
        shape: ViewShapeId,
    ) -> Result<ViewVertexId, ViewMapError> {
        let _ = self.map.svertex(svertex)?;
        self.push_view_vertex(NonTVertex::new(id, svertex).into(), shape)
    }

    /// Adds a fully configured TVertex. The view edges referenced by the vertex get it as
    /// endpoint according to the direction of each slot. Nothing is modified if a handle is
    /// invalid.
    pub fn add_tvertex(
        &mut self,
        tvertex: TVertex,
        shape: ViewShapeId,
    ) -> Result<ViewVertexId, ViewMapError> {
        let edges = tvertex.edges();
        let _ = self.map.shape(shape)?;
        for directed in &edges {
            let _ = self.map.view_edge(directed.edge)?;
        }
        let rv = self.push_view_vertex(tvertex.into(), shape)?;
        for directed in edges {
            let edge = self.view_edge_mut(directed.edge)?;
            if directed.incoming {
                edge.vertex_b = Some(rv);
            } else {
                edge.vertex_a = Some(rv);
            }
        }
        Ok(rv)
    }

    /// Sets the endpoints of a view edge. NonTVertex endpoints register the edge as outgoing at
    /// `vertex_a` and incoming at `vertex_b`; TVertex endpoints must already refer to the edge.
    pub fn set_view_edge_endpoints(
        &mut self,
        view_edge: ViewEdgeId,
        vertex_a: Option<ViewVertexId>,
        vertex_b: Option<ViewVertexId>,
    ) -> Result<(), ViewMapError> {
        for (vertex, incoming) in [(vertex_a, false), (vertex_b, true)] {
            let Some(vertex) = vertex else { continue };
            let view_vertex = self
                .map
                .view_vertices
                .get_mut(vertex.index())
                .ok_or_else(|| ViewMapError::InvalidHandle(format!("{vertex:?}")))?;
            if let Some(v) = view_vertex.as_non_tvertex_mut() {
                let _ = v.add_edge(DirectedViewEdge::new(view_edge, incoming));
            }
        }
        let edge = self.view_edge_mut(view_edge)?;
        edge.vertex_a = vertex_a;
        edge.vertex_b = vertex_b;
        Ok(())
    }

    /// Links the FEdge neighbours, registers incident FEdges and validates the graph.
    pub fn build(mut self) -> Result<ViewMap, ViewMapError> {
        for sv in self.map.svertices.iter_mut() {
            sv.fedges.clear();
        }
        for edge_index in 0..self.map.view_edges.len() {
            let fedges = self.map.view_edges[edge_index].fedges.clone();
            for (n, fedge) in fedges.iter().enumerate() {
                let previous = n.checked_sub(1).map(|p| fedges[p]);
                let next = fedges.get(n + 1).copied();
                let fe = &mut self.map.fedges[fedge.index()];
                fe.previous_edge = previous;
                fe.next_edge = next;
                let (a, b) = (fe.vertex_a, fe.vertex_b);
                for sv in [a, b] {
                    let incident = &mut self.map.svertices[sv.index()].fedges;
                    if !incident.contains(fedge) {
                        incident.push(*fedge);
                    }
                }
            }
        }
        validate(&self.map)?;
        debug!("built {}", self.map);
        Ok(self.map)
    }

    fn push_view_vertex(
        &mut self,
        vertex: ViewVertex,
        shape: ViewShapeId,
    ) -> Result<ViewVertexId, ViewMapError> {
        let rv = ViewVertexId::new(self.map.view_vertices.len());
        self.shape_mut(shape)?.vertices.push(rv);
        self.map.view_vertices.push(vertex);
        Ok(rv)
    }

    fn shape_mut(&mut self, shape: ViewShapeId) -> Result<&mut ViewShape, ViewMapError> {
        self.map
            .shapes
            .get_mut(shape.index())
            .ok_or_else(|| ViewMapError::InvalidHandle(format!("{shape:?}")))
    }

    fn view_edge_mut(&mut self, edge: ViewEdgeId) -> Result<&mut ViewEdge, ViewMapError> {
        self.map
            .view_edges
            .get_mut(edge.index())
            .ok_or_else(|| ViewMapError::InvalidHandle(format!("{edge:?}")))
    }
}

/// Fails if any id appears twice
fn check_unique_ids(kind: &str, ids: impl Iterator<Item = Id>) -> Result<(), ViewMapError> {
    let mut seen = FxHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            return Err(ViewMapError::InvalidViewMap(format!(
                "duplicate {kind} id {id}"
            )));
        }
    }
    Ok(())
}

fn validate(map: &ViewMap) -> Result<(), ViewMapError> {
    check_unique_ids("SVertex", map.svertices.iter().map(|v| v.id))?;
    check_unique_ids("FEdge", map.fedges.iter().map(|e| e.id))?;
    check_unique_ids("ViewVertex", map.view_vertices.iter().map(|v| v.id()))?;
    check_unique_ids("ViewEdge", map.view_edges.iter().map(|e| e.id))?;
    check_unique_ids("ViewShape", map.shapes.iter().map(|s| s.id))?;

    for (edge_id, edge) in map.view_edges() {
        for pair in edge.fedges.windows(2) {
            if map.fedge(pair[0])?.vertex_b != map.fedge(pair[1])?.vertex_a {
                return Err(ViewMapError::InvalidViewMap(format!(
                    "{edge_id}: {} and {} are not connected",
                    pair[0], pair[1]
                )));
            }
        }
        for vertex in [edge.vertex_a, edge.vertex_b].into_iter().flatten() {
            let _ = map.view_vertex(vertex)?;
        }
    }

    for (vertex_id, vertex) in map.view_vertices() {
        match vertex {
            ViewVertex::NonT(v) => {
                let _ = map.svertex(v.svertex())?;
                for directed in v.edges() {
                    check_endpoint(map, vertex_id, directed)?;
                }
            }
            ViewVertex::T(t) => validate_tvertex(map, vertex_id, t)?,
        }
    }
    Ok(())
}

/// Fails unless the view edge of `directed` ends (incoming) or starts at `vertex_id`
fn check_endpoint(
    map: &ViewMap,
    vertex_id: ViewVertexId,
    directed: &DirectedViewEdge,
) -> Result<(), ViewMapError> {
    let edge = map.view_edge(directed.edge)?;
    let endpoint = if directed.incoming {
        edge.vertex_b
    } else {
        edge.vertex_a
    };
    if endpoint != Some(vertex_id) {
        return Err(ViewMapError::InvalidViewMap(format!(
            "{vertex_id} lists {} but is not its endpoint",
            directed.edge
        )));
    }
    Ok(())
}

fn validate_tvertex(map: &ViewMap, vertex_id: ViewVertexId, t: &TVertex) -> Result<(), ViewMapError> {
    for sv in [t.front_svertex(), t.back_svertex()].into_iter().flatten() {
        let _ = map.svertex(sv)?;
    }
    for directed in t.edges() {
        check_endpoint(map, vertex_id, &directed)?;
        if t.is_front_edge(directed.edge) && t.is_back_edge(directed.edge) {
            return Err(ViewMapError::InvalidViewMap(format!(
                "{vertex_id}: {} is both a front and a back edge",
                directed.edge
            )));
        }
    }
    let slots = [
        t.front_edge_a(),
        t.front_edge_b(),
        t.back_edge_a(),
        t.back_edge_b(),
    ];
    let [Some(fa), Some(fb), Some(ba), Some(bb)] = slots else {
        // a partially configured junction has no invisibility relation to check
        return Ok(());
    };
    let qi_back_a = map.view_edge(ba.edge)?.qi;
    let qi_back_b = map.view_edge(bb.edge)?.qi;
    if qi_back_a.abs_diff(qi_back_b) != 1 {
        return Err(ViewMapError::InvalidViewMap(format!(
            "{vertex_id}: back edges must differ by one in qi, found {qi_back_a} and {qi_back_b}"
        )));
    }
    let qi_hidden = qi_back_a.max(qi_back_b);
    for front in [fa, fb] {
        let qi_front = map.view_edge(front.edge)?.qi;
        if qi_hidden <= qi_front {
            return Err(ViewMapError::InvalidViewMap(format!(
                "{vertex_id}: hidden back edge qi {qi_hidden} is not above front edge qi {qi_front}"
            )));
        }
    }
    Ok(())
}
