// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! Pure queries over points (0D) and curves (1D) of the view map.
//!
//! A [`UnaryFunction0D`] evaluates an [`Interface0D`], a point such as an SVertex or a
//! [`StrokeVertex`]. A [`UnaryFunction1D`] evaluates an [`Interface1D`], a view edge, a chain or
//! a stroke. Scalar 0D results are folded along a 1D interface with [`integrate`] according to an
//! [`IntegrationType`].

pub mod functions0d;
pub mod functions1d;

use crate::{
    ViewMapError,
    chain::{Chain, ChainLink, oriented_svertices},
    stroke::{Stroke, StrokeVertex},
    view_map::{SVertexId, ViewEdgeId, ViewMap},
};
use std::{borrow::Cow, fmt, str::FromStr};
use vector_traits::glam::DVec3;

/// A point of the view map a 0D function can be evaluated at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interface0D<'a> {
    /// An SVertex, optionally seen as a sample of a view edge
    SVertex {
        vertex: SVertexId,
        view_edge: Option<ViewEdgeId>,
    },
    StrokeVertex(&'a StrokeVertex),
}

impl Interface0D<'_> {
    /// The SVertex behind this point; None for a free-floating stroke vertex
    pub fn svertex(&self) -> Option<SVertexId> {
        match self {
            Interface0D::SVertex { vertex, .. } => Some(*vertex),
            Interface0D::StrokeVertex(v) => v.svertex(),
        }
    }

    /// The view edge this point was sampled from, if known
    pub fn view_edge(&self) -> Option<ViewEdgeId> {
        match self {
            Interface0D::SVertex { view_edge, .. } => *view_edge,
            Interface0D::StrokeVertex(v) => v.view_edge(),
        }
    }

    pub fn point_3d(&self, map: &ViewMap) -> Result<DVec3, ViewMapError> {
        match self {
            Interface0D::SVertex { vertex, .. } => Ok(map.svertex(*vertex)?.point_3d()),
            Interface0D::StrokeVertex(v) => Ok(v.point_3d()),
        }
    }

    /// Projected x, y and depth
    pub fn projected(&self, map: &ViewMap) -> Result<DVec3, ViewMapError> {
        match self {
            Interface0D::SVertex { vertex, .. } => Ok(map.svertex(*vertex)?.point_2d()),
            Interface0D::StrokeVertex(v) => Ok(v.projected()),
        }
    }
}

/// A curve of the view map a 1D function can be evaluated on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interface1D<'a> {
    ViewEdge(ViewEdgeId),
    Chain(&'a Chain),
    Stroke(&'a Stroke),
}

impl<'a> Interface1D<'a> {
    /// The oriented view edges backing this curve. Empty for a free-floating stroke.
    pub fn links(&self) -> Cow<'a, [ChainLink]> {
        match *self {
            Interface1D::ViewEdge(edge) => Cow::Owned(vec![ChainLink::new(edge, true)]),
            Interface1D::Chain(chain) => Cow::Borrowed(chain.links()),
            Interface1D::Stroke(stroke) => Cow::Borrowed(stroke.links()),
        }
    }

    /// The sample points of the curve, from its first to its last vertex
    pub fn vertices(&self, map: &ViewMap) -> Result<Vec<Interface0D<'a>>, ViewMapError> {
        Ok(match *self {
            Interface1D::Stroke(stroke) => stroke
                .vertices()
                .iter()
                .map(Interface0D::StrokeVertex)
                .collect(),
            _ => oriented_svertices(map, &self.links())?
                .into_iter()
                .map(|(vertex, edge)| Interface0D::SVertex {
                    vertex,
                    view_edge: Some(edge),
                })
                .collect(),
        })
    }

    /// Projected 2D length of the curve
    pub fn length_2d(&self, map: &ViewMap) -> Result<f64, ViewMapError> {
        match *self {
            Interface1D::Stroke(stroke) => Ok(stroke.length()),
            _ => {
                let mut length = 0.0;
                for link in self.links().iter() {
                    length += map.view_edge_length_2d(link.edge)?;
                }
                Ok(length)
            }
        }
    }
}

impl<'a> From<&'a Chain> for Interface1D<'a> {
    fn from(chain: &'a Chain) -> Self {
        Interface1D::Chain(chain)
    }
}

impl<'a> From<&'a Stroke> for Interface1D<'a> {
    fn from(stroke: &'a Stroke) -> Self {
        Interface1D::Stroke(stroke)
    }
}

impl From<ViewEdgeId> for Interface1D<'_> {
    fn from(edge: ViewEdgeId) -> Self {
        Interface1D::ViewEdge(edge)
    }
}

/// A pure function of a point of the view map.
pub trait UnaryFunction0D {
    type Output;

    fn name(&self) -> &'static str;

    fn evaluate(
        &self,
        map: &ViewMap,
        inter: &Interface0D<'_>,
    ) -> Result<Self::Output, ViewMapError>;
}

/// A pure function of a curve of the view map.
pub trait UnaryFunction1D {
    type Output;

    fn name(&self) -> &'static str;

    fn evaluate(
        &self,
        map: &ViewMap,
        inter: &Interface1D<'_>,
    ) -> Result<Self::Output, ViewMapError>;
}

/// How per-vertex scalars are folded into one value along a curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IntegrationType {
    #[default]
    Mean,
    Min,
    Max,
    First,
    Last,
}

impl IntegrationType {
    /// Folds `values` into one scalar. An empty sequence is an `InvalidArgument` error.
    pub fn fold(self, values: impl IntoIterator<Item = f64>) -> Result<f64, ViewMapError> {
        let mut values = values.into_iter();
        let Some(first) = values.next() else {
            return Err(ViewMapError::InvalidArgument(format!(
                "can't integrate ({self}) over an empty sequence"
            )));
        };
        Ok(match self {
            IntegrationType::Mean => {
                let (sum, count) = values.fold((first, 1_usize), |(s, c), v| (s + v, c + 1));
                sum / count as f64
            }
            IntegrationType::Min => values.fold(first, f64::min),
            IntegrationType::Max => values.fold(first, f64::max),
            IntegrationType::First => first,
            IntegrationType::Last => values.last().unwrap_or(first),
        })
    }
}

impl fmt::Display for IntegrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntegrationType::Mean => "MEAN",
            IntegrationType::Min => "MIN",
            IntegrationType::Max => "MAX",
            IntegrationType::First => "FIRST",
            IntegrationType::Last => "LAST",
        };
        write!(f, "{name}")
    }
}

impl FromStr for IntegrationType {
    type Err = ViewMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(IntegrationType::Mean),
            "min" => Ok(IntegrationType::Min),
            "max" => Ok(IntegrationType::Max),
            "first" => Ok(IntegrationType::First),
            "last" => Ok(IntegrationType::Last),
            _ => Err(ViewMapError::InvalidParameter(format!(
                "unknown integration type: {s}"
            ))),
        }
    }
}

/// Evaluates `func` at every sample point of `inter` and folds the results with `integration`.
pub fn integrate<F>(
    func: &F,
    map: &ViewMap,
    inter: &Interface1D<'_>,
    integration: IntegrationType,
) -> Result<f64, ViewMapError>
where
    F: UnaryFunction0D,
    F::Output: Into<f64>,
{
    let values = inter
        .vertices(map)?
        .iter()
        .map(|v| func.evaluate(map, v).map(Into::into))
        .collect::<Result<Vec<f64>, _>>()?;
    integration.fold(values)
}
