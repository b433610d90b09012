// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2023, 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

#![deny(
    rust_2018_compatibility,
    rust_2018_idioms,
    nonstandard_style,
    unused,
    future_incompatible,
    non_camel_case_types,
    unused_parens,
    non_upper_case_globals,
    unused_qualifications,
    unused_results,
    unused_imports,
    unused_variables,
    bare_trait_objects,
    ellipsis_inclusive_range_patterns,
    elided_lifetimes_in_paths
)]
#![warn(clippy::explicit_into_iter_loop)]

//! View map graph and stroke iteration core for line-art rendering.
//!
//! A view map is built once by a collaborator (see [`view_map::ViewMapBuilder`]) and is immutable
//! afterwards. Every entity lives in an arena owned by [`view_map::ViewMap`] and is addressed by a
//! typed index handle. Strokes own their vertices and are walked with
//! [`stroke::StrokeVertexIterator`], a cursor that bridges past-the-end iterator semantics to
//! host for-loops.

pub mod chain;
pub mod command;
pub mod functions;
pub mod host;
pub mod id;
pub mod nature;
pub mod stroke;
pub(crate) mod utils;
pub mod view_map;
pub mod view_vertex;

pub mod prelude {
    pub use crate::{
        ViewMapError,
        chain::{Chain, ChainLink, chain_view_edges},
        command::{ConfigType, process_command, process_command_error_handler},
        functions::{
            Interface0D, Interface1D, IntegrationType, UnaryFunction0D, UnaryFunction1D,
            functions1d::GetOccludersF1D, integrate,
        },
        host::{HostObject, HostValue},
        id::Id,
        nature::Nature,
        stroke::{Stroke, StrokeAttribute, StrokeVertex, StrokeVertexIterator},
        view_map::{
            FEdge, FEdgeId, SVertex, SVertexId, ViewEdge, ViewEdgeId, ViewMap, ViewMapBuilder,
            ViewShape, ViewShapeId, ViewVertexId,
        },
        view_vertex::{DirectedViewEdge, NonTVertex, TVertex, ViewVertex},
    };
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ViewMapError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Iteration stopped")]
    IterationStopped,

    #[error("Cannot increment any more")]
    CannotIncrement,

    #[error("Cannot decrement any more")]
    CannotDecrement,

    #[error("Iterator is stale: {0}")]
    IteratorStale(String),

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Invalid view map: {0}")]
    InvalidViewMap(String),

    #[error("Invalid input data: {0}")]
    InvalidParameter(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),
}
