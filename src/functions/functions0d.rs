// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

use super::{Interface0D, UnaryFunction0D};
use crate::{
    ViewMapError,
    utils::push_unique,
    view_map::{ViewMap, ViewShapeId},
};
use rustc_hash::FxHashSet;

macro_rules! coordinate_function {
    ($(#[$meta:meta])* $name:ident, $point:ident, $axis:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl UnaryFunction0D for $name {
            type Output = f64;

            fn name(&self) -> &'static str {
                stringify!($name)
            }

            fn evaluate(
                &self,
                map: &ViewMap,
                inter: &Interface0D<'_>,
            ) -> Result<f64, ViewMapError> {
                Ok(inter.$point(map)?.$axis)
            }
        }
    };
}

coordinate_function!(
    /// The 3D x coordinate
    GetXF0D, point_3d, x
);
coordinate_function!(
    /// The 3D y coordinate
    GetYF0D, point_3d, y
);
coordinate_function!(
    /// The 3D z coordinate
    GetZF0D, point_3d, z
);
coordinate_function!(
    /// The projected x coordinate
    GetProjectedXF0D, projected, x
);
coordinate_function!(
    /// The projected y coordinate
    GetProjectedYF0D, projected, y
);
coordinate_function!(
    /// The projected depth
    GetProjectedZF0D, projected, z
);

/// The quantitative invisibility of the view edge the point lies on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuantitativeInvisibilityF0D;

impl UnaryFunction0D for QuantitativeInvisibilityF0D {
    type Output = u32;

    fn name(&self) -> &'static str {
        "QuantitativeInvisibilityF0D"
    }

    fn evaluate(&self, map: &ViewMap, inter: &Interface0D<'_>) -> Result<u32, ViewMapError> {
        let edge = inter.view_edge().ok_or_else(|| {
            ViewMapError::InvalidArgument("the point does not lie on a view edge".to_string())
        })?;
        Ok(map.view_edge(edge)?.qi())
    }
}

/// The shapes occluding the FEdges that meet at the point, in FEdge order.
/// A free-floating stroke vertex has no occluders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GetOccludersF0D;

impl UnaryFunction0D for GetOccludersF0D {
    type Output = Vec<ViewShapeId>;

    fn name(&self) -> &'static str {
        "GetOccludersF0D"
    }

    fn evaluate(
        &self,
        map: &ViewMap,
        inter: &Interface0D<'_>,
    ) -> Result<Vec<ViewShapeId>, ViewMapError> {
        let mut rv = Vec::new();
        let Some(sv) = inter.svertex() else {
            return Ok(rv);
        };
        let mut seen = FxHashSet::default();
        for fedge in map.svertex(sv)?.fedges().iter() {
            for shape in map.fedge(*fedge)?.occluders().iter() {
                push_unique(&mut rv, &mut seen, *shape);
            }
        }
        Ok(rv)
    }
}

/// The shape owning the view edge the point lies on, None if the point has no view edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GetShapeF0D;

impl UnaryFunction0D for GetShapeF0D {
    type Output = Option<ViewShapeId>;

    fn name(&self) -> &'static str {
        "GetShapeF0D"
    }

    fn evaluate(
        &self,
        map: &ViewMap,
        inter: &Interface0D<'_>,
    ) -> Result<Option<ViewShapeId>, ViewMapError> {
        inter
            .view_edge()
            .map(|edge| map.view_edge(edge).map(|e| e.shape()))
            .transpose()
    }
}
