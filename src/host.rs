// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! Dynamic object model for scripting hosts.
//!
//! A host sees [`TVertex`](crate::view_vertex::TVertex),
//! [`StrokeVertexIterator`](crate::stroke::StrokeVertexIterator) and
//! [`GetOccludersF1D`](crate::functions::functions1d::GetOccludersF1D) as objects with named
//! attributes and methods, exchanging [`HostValue`]s. Values of the wrong kind are rejected with
//! `InvalidArgument`. A `HostValue<'a>` may hold a cursor borrowing a stroke that lives for `'a`.

mod trait_impl;

use crate::{
    ViewMapError,
    chain::Chain,
    functions::Interface1D,
    id::Id,
    stroke::{Stroke, StrokeVertex, StrokeVertexIterator},
    view_map::{FEdgeId, SVertexId, ViewEdgeId, ViewMap, ViewShapeId},
};

/// A dynamically typed value passed across the host boundary.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum HostValue<'a> {
    #[default]
    None,
    Bool(bool),
    Float(f64),
    Int(i64),
    Id(Id),
    SVertex(SVertexId),
    FEdge(FEdgeId),
    ViewEdge(ViewEdgeId),
    ViewShape(ViewShapeId),
    ViewShapes(Vec<ViewShapeId>),
    StrokeVertex(StrokeVertex),
    Chain(Chain),
    Stroke(Stroke),
    StrokeVertexIterator(StrokeVertexIterator<'a>),
}

impl HostValue<'_> {
    /// The host side type name of the value
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::None => "None",
            HostValue::Bool(_) => "bool",
            HostValue::Float(_) => "float",
            HostValue::Int(_) => "int",
            HostValue::Id(_) => "Id",
            HostValue::SVertex(_) => "SVertex",
            HostValue::FEdge(_) => "FEdge",
            HostValue::ViewEdge(_) => "ViewEdge",
            HostValue::ViewShape(_) => "ViewShape",
            HostValue::ViewShapes(_) => "list",
            HostValue::StrokeVertex(_) => "StrokeVertex",
            HostValue::Chain(_) => "Chain",
            HostValue::Stroke(_) => "Stroke",
            HostValue::StrokeVertexIterator(_) => "StrokeVertexIterator",
        }
    }

    /// Views the value as an `Interface1D`, `None` for values that aren't one-dimensional
    pub fn as_interface_1d(&self) -> Option<Interface1D<'_>> {
        match self {
            HostValue::ViewEdge(edge) => Some(Interface1D::ViewEdge(*edge)),
            HostValue::Chain(chain) => Some(Interface1D::Chain(chain)),
            HostValue::Stroke(stroke) => Some(Interface1D::Stroke(stroke)),
            _ => None,
        }
    }
}

macro_rules! host_value_conversions {
    ($($variant:ident($ty:ty), $article:literal;)*) => {
        $(
            impl From<$ty> for HostValue<'_> {
                fn from(value: $ty) -> Self {
                    HostValue::$variant(value)
                }
            }

            impl TryFrom<HostValue<'_>> for $ty {
                type Error = ViewMapError;

                fn try_from(value: HostValue<'_>) -> Result<Self, Self::Error> {
                    match value {
                        HostValue::$variant(v) => Ok(v),
                        other => Err(ViewMapError::InvalidArgument(format!(
                            concat!("value must be ", $article, " ", stringify!($variant), ", not {}"),
                            other.type_name()
                        ))),
                    }
                }
            }
        )*
    };
}

host_value_conversions!(
    Bool(bool), "a";
    Float(f64), "a";
    Id(Id), "an";
    SVertex(SVertexId), "an";
    FEdge(FEdgeId), "an";
    ViewEdge(ViewEdgeId), "a";
    ViewShape(ViewShapeId), "a";
    Chain(Chain), "a";
    Stroke(Stroke), "a";
);

impl<'a> From<StrokeVertexIterator<'a>> for HostValue<'a> {
    fn from(value: StrokeVertexIterator<'a>) -> Self {
        HostValue::StrokeVertexIterator(value)
    }
}

impl<'a, T: Into<HostValue<'a>>> From<Option<T>> for HostValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(HostValue::None, Into::into)
    }
}

/// An object exposed to a scripting host. `'a` is the lifetime of the values it hands out.
pub trait HostObject<'a> {
    /// The host side class name
    fn type_name(&self) -> &'static str;

    /// The class names from the root of the hierarchy down to [`HostObject::type_name`]
    fn class_hierarchy(&self) -> &'static [&'static str];

    fn is_instance(&self, class: &str) -> bool {
        self.class_hierarchy().contains(&class)
    }

    fn get_attr(&self, name: &str) -> Result<HostValue<'a>, ViewMapError>;

    fn set_attr(&mut self, name: &str, value: HostValue<'a>) -> Result<(), ViewMapError>;

    /// Calls a method of the object. `__call__` invokes a callable object.
    fn call_method(
        &mut self,
        map: &ViewMap,
        name: &str,
        args: &[HostValue<'a>],
    ) -> Result<HostValue<'a>, ViewMapError>;
}

/// Error for an attribute or method the object doesn't have
pub(crate) fn no_attribute(object: &dyn HostObject<'_>, name: &str) -> ViewMapError {
    ViewMapError::InvalidArgument(format!(
        "'{}' object has no attribute '{name}'",
        object.type_name()
    ))
}

/// Returns the only argument of a call, or an `InvalidArgument` error
pub(crate) fn single_argument<'b, 'a>(
    method: &str,
    args: &'b [HostValue<'a>],
) -> Result<&'b HostValue<'a>, ViewMapError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(ViewMapError::InvalidArgument(format!(
            "{method}() takes exactly one argument ({} given)",
            args.len()
        ))),
    }
}

/// Fails unless the call has no arguments
pub(crate) fn no_arguments(method: &str, args: &[HostValue<'_>]) -> Result<(), ViewMapError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ViewMapError::InvalidArgument(format!(
            "{method}() takes no arguments ({} given)",
            args.len()
        )))
    }
}
