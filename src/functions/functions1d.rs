// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

use super::{
    Interface1D, IntegrationType, UnaryFunction1D,
    functions0d::{
        GetProjectedXF0D, GetProjectedYF0D, GetProjectedZF0D, GetXF0D, GetYF0D, GetZF0D,
        QuantitativeInvisibilityF0D,
    },
    integrate,
};
use crate::{
    ViewMapError,
    utils::push_unique,
    view_map::{ViewMap, ViewShapeId},
};
use rustc_hash::FxHashSet;

/// The shapes occluding any part of a curve.
///
/// The backing view edges are walked in curve order; each view edge is walked FEdge by FEdge in
/// its traversal direction, and every FEdge contributes its occluders in stored order. A shape is
/// reported once, at its first occurrence. A curve without backing view edges has no occluders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GetOccludersF1D;

impl GetOccludersF1D {
    pub fn new() -> Self {
        Self
    }
}

impl UnaryFunction1D for GetOccludersF1D {
    type Output = Vec<ViewShapeId>;

    fn name(&self) -> &'static str {
        "GetOccludersF1D"
    }

    fn evaluate(
        &self,
        map: &ViewMap,
        inter: &Interface1D<'_>,
    ) -> Result<Vec<ViewShapeId>, ViewMapError> {
        let mut rv = Vec::new();
        let mut seen = FxHashSet::default();
        for link in inter.links().iter() {
            map.extend_view_edge_occluders(link.edge, link.forward, &mut rv, &mut seen)?;
        }
        Ok(rv)
    }
}

/// The shapes owning the backing view edges, in curve order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GetShapeF1D;

impl UnaryFunction1D for GetShapeF1D {
    type Output = Vec<ViewShapeId>;

    fn name(&self) -> &'static str {
        "GetShapeF1D"
    }

    fn evaluate(
        &self,
        map: &ViewMap,
        inter: &Interface1D<'_>,
    ) -> Result<Vec<ViewShapeId>, ViewMapError> {
        let mut rv = Vec::new();
        let mut seen = FxHashSet::default();
        for link in inter.links().iter() {
            push_unique(&mut rv, &mut seen, map.view_edge(link.edge)?.shape());
        }
        Ok(rv)
    }
}

/// The shapes the backing view edges lie on top of, in curve order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GetOccludeeF1D;

impl UnaryFunction1D for GetOccludeeF1D {
    type Output = Vec<ViewShapeId>;

    fn name(&self) -> &'static str {
        "GetOccludeeF1D"
    }

    fn evaluate(
        &self,
        map: &ViewMap,
        inter: &Interface1D<'_>,
    ) -> Result<Vec<ViewShapeId>, ViewMapError> {
        let mut rv = Vec::new();
        let mut seen = FxHashSet::default();
        for link in inter.links().iter() {
            if let Some(shape) = map.view_edge(link.edge)?.occludee() {
                push_unique(&mut rv, &mut seen, shape);
            }
        }
        Ok(rv)
    }
}

/// The quantitative invisibility of a curve.
///
/// A view edge reports its own `qi`. Any other curve integrates the per-vertex invisibility
/// and rounds the result down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuantitativeInvisibilityF1D {
    pub integration: IntegrationType,
}

impl QuantitativeInvisibilityF1D {
    pub fn new(integration: IntegrationType) -> Self {
        Self { integration }
    }
}

impl UnaryFunction1D for QuantitativeInvisibilityF1D {
    type Output = u32;

    fn name(&self) -> &'static str {
        "QuantitativeInvisibilityF1D"
    }

    fn evaluate(&self, map: &ViewMap, inter: &Interface1D<'_>) -> Result<u32, ViewMapError> {
        if let Interface1D::ViewEdge(edge) = inter {
            return Ok(map.view_edge(*edge)?.qi());
        }
        let qi = integrate(&QuantitativeInvisibilityF0D, map, inter, self.integration)?;
        Ok(qi.floor() as u32)
    }
}

macro_rules! integrated_function {
    ($(#[$meta:meta])* $name:ident, $f0d:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            pub integration: IntegrationType,
        }

        impl $name {
            pub fn new(integration: IntegrationType) -> Self {
                Self { integration }
            }
        }

        impl UnaryFunction1D for $name {
            type Output = f64;

            fn name(&self) -> &'static str {
                stringify!($name)
            }

            fn evaluate(
                &self,
                map: &ViewMap,
                inter: &Interface1D<'_>,
            ) -> Result<f64, ViewMapError> {
                integrate(&$f0d, map, inter, self.integration)
            }
        }
    };
}

integrated_function!(
    /// The 3D x coordinate integrated along the curve
    GetXF1D, GetXF0D
);
integrated_function!(
    /// The 3D y coordinate integrated along the curve
    GetYF1D, GetYF0D
);
integrated_function!(
    /// The 3D z coordinate integrated along the curve
    GetZF1D, GetZF0D
);
integrated_function!(
    /// The projected x coordinate integrated along the curve
    GetProjectedXF1D, GetProjectedXF0D
);
integrated_function!(
    /// The projected y coordinate integrated along the curve
    GetProjectedYF1D, GetProjectedYF0D
);
integrated_function!(
    /// The projected depth integrated along the curve
    GetProjectedZF1D, GetProjectedZF0D
);

/// The projected 2D length of a curve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurveLengthF1D;

impl UnaryFunction1D for CurveLengthF1D {
    type Output = f64;

    fn name(&self) -> &'static str {
        "CurveLengthF1D"
    }

    fn evaluate(&self, map: &ViewMap, inter: &Interface1D<'_>) -> Result<f64, ViewMapError> {
        inter.length_2d(map)
    }
}
