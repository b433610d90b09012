// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

//! [`HostObject`] implementations for the host visible types

use super::{HostObject, HostValue, no_arguments, no_attribute, single_argument};
use crate::{
    ViewMapError,
    functions::{UnaryFunction1D, functions1d::GetOccludersF1D},
    id::Id,
    stroke::StrokeVertexIterator,
    view_map::{FEdgeId, SVertexId, ViewEdgeId, ViewMap},
    view_vertex::TVertex,
};

impl<'a> HostObject<'a> for TVertex {
    fn type_name(&self) -> &'static str {
        "TVertex"
    }

    fn class_hierarchy(&self) -> &'static [&'static str] {
        &["Interface0D", "ViewVertex", "TVertex"]
    }

    fn get_attr(&self, name: &str) -> Result<HostValue<'a>, ViewMapError> {
        Ok(match name {
            "front_svertex" => self.front_svertex().into(),
            "back_svertex" => self.back_svertex().into(),
            "id" => self.id().into(),
            _ => return Err(no_attribute(self, name)),
        })
    }

    fn set_attr(&mut self, name: &str, value: HostValue<'a>) -> Result<(), ViewMapError> {
        match name {
            "front_svertex" => self.set_front_svertex(SVertexId::try_from(value)?),
            "back_svertex" => self.set_back_svertex(SVertexId::try_from(value)?),
            "id" => self.set_id(Id::try_from(value)?),
            _ => return Err(no_attribute(self, name)),
        }
        Ok(())
    }

    fn call_method(
        &mut self,
        map: &ViewMap,
        name: &str,
        args: &[HostValue<'a>],
    ) -> Result<HostValue<'a>, ViewMapError> {
        Ok(match name {
            "get_svertex" => {
                let fedge = FEdgeId::try_from(single_argument(name, args)?.clone())?;
                self.get_svertex(map, fedge).into()
            }
            "get_mate" => {
                let edge = ViewEdgeId::try_from(single_argument(name, args)?.clone())?;
                self.mate(edge).into()
            }
            _ => return Err(no_attribute(self, name)),
        })
    }
}

impl<'a> HostObject<'a> for StrokeVertexIterator<'a> {
    fn type_name(&self) -> &'static str {
        "StrokeVertexIterator"
    }

    fn class_hierarchy(&self) -> &'static [&'static str] {
        &["Iterator", "StrokeVertexIterator"]
    }

    fn get_attr(&self, name: &str) -> Result<HostValue<'a>, ViewMapError> {
        Ok(match name {
            "object" => HostValue::StrokeVertex(self.object()?.clone()),
            "t" => self.t().into(),
            "u" => self.u().into(),
            "at_last" => self.at_last().into(),
            "is_begin" => self.is_begin().into(),
            "is_end" => self.is_end().into(),
            _ => return Err(no_attribute(self, name)),
        })
    }

    fn set_attr(&mut self, name: &str, _value: HostValue<'a>) -> Result<(), ViewMapError> {
        match name {
            "object" | "t" | "u" | "at_last" | "is_begin" | "is_end" => Err(
                ViewMapError::InvalidArgument(format!("attribute '{name}' is read-only")),
            ),
            _ => Err(no_attribute(self, name)),
        }
    }

    /// `__iter__` re-arms the cursor and hands it back, `__next__` yields the next vertex or fails
    /// with `IterationStopped`. `incremented`, `decremented` and `reversed` return new cursors.
    fn call_method(
        &mut self,
        _map: &ViewMap,
        name: &str,
        args: &[HostValue<'a>],
    ) -> Result<HostValue<'a>, ViewMapError> {
        if !matches!(
            name,
            "__iter__" | "__next__" | "incremented" | "decremented" | "reversed"
        ) {
            return Err(no_attribute(self, name));
        }
        no_arguments(name, args)?;
        Ok(match name {
            "__next__" => HostValue::StrokeVertex(self.advance()?.clone()),
            "incremented" => HostValue::StrokeVertexIterator(self.incremented()?),
            "decremented" => HostValue::StrokeVertexIterator(self.decremented()?),
            "reversed" => HostValue::StrokeVertexIterator(self.reversed()),
            _ => HostValue::StrokeVertexIterator(self.start_iteration().clone()),
        })
    }
}

impl<'a> HostObject<'a> for GetOccludersF1D {
    fn type_name(&self) -> &'static str {
        "GetOccludersF1D"
    }

    fn class_hierarchy(&self) -> &'static [&'static str] {
        &[
            "UnaryFunction1D",
            "UnaryFunction1DVectorViewShape",
            "GetOccludersF1D",
        ]
    }

    fn get_attr(&self, name: &str) -> Result<HostValue<'a>, ViewMapError> {
        Err(no_attribute(self, name))
    }

    fn set_attr(&mut self, name: &str, _value: HostValue<'a>) -> Result<(), ViewMapError> {
        Err(no_attribute(self, name))
    }

    /// `__call__` takes a ViewEdge, a Chain or a Stroke and returns the list of its occluders
    fn call_method(
        &mut self,
        map: &ViewMap,
        name: &str,
        args: &[HostValue<'a>],
    ) -> Result<HostValue<'a>, ViewMapError> {
        match name {
            "__call__" => {
                let arg = single_argument(name, args)?;
                let inter = arg.as_interface_1d().ok_or_else(|| {
                    ViewMapError::InvalidArgument(format!(
                        "argument 1 must be an Interface1D, not {}",
                        arg.type_name()
                    ))
                })?;
                Ok(HostValue::ViewShapes(self.evaluate(map, &inter)?))
            }
            _ => Err(no_attribute(self, name)),
        }
    }
}
