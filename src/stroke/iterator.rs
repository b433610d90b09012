// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

use super::{Stroke, StrokeVertex, normalized};
use crate::ViewMapError;

/// A bidirectional cursor over the vertices of a [`Stroke`].
///
/// The cursor position ranges over `0..=len`, where `len` is the past-the-end position that can
/// not be dereferenced. Host iteration goes through [`StrokeVertexIterator::advance`], which
/// yields every vertex exactly once:
///
/// * forward cursors yield the current vertex first (the `at_start` latch), then step until the
///   last vertex, never onto the past-the-end position.
/// * reversed cursors step backward before yielding, so a reversed cursor placed at the
///   past-the-end position yields the vertices from last to first.
///
/// Cloning copies the position, the direction and the `at_start` latch verbatim.
#[derive(Clone, Debug)]
pub struct StrokeVertexIterator<'a> {
    stroke: Option<&'a Stroke>,
    pos: usize,
    reversed: bool,
    at_start: bool,
}

impl Default for StrokeVertexIterator<'_> {
    /// An empty cursor, it can't be dereferenced.
    fn default() -> Self {
        Self {
            stroke: None,
            pos: 0,
            reversed: false,
            at_start: true,
        }
    }
}

impl<'a> StrokeVertexIterator<'a> {
    /// A forward cursor at the first vertex of `stroke`
    pub fn new(stroke: &'a Stroke) -> Self {
        Self {
            stroke: Some(stroke),
            ..Self::default()
        }
    }

    /// A forward cursor at `index`, `index == stroke.len()` being the past-the-end position
    pub fn at(stroke: &'a Stroke, index: usize) -> Result<Self, ViewMapError> {
        if index > stroke.len() {
            return Err(ViewMapError::InvalidArgument(format!(
                "index {index} is out of range for a stroke of {} vertices",
                stroke.len()
            )));
        }
        Ok(Self {
            pos: index,
            ..Self::new(stroke)
        })
    }

    pub(super) fn past_the_end(stroke: &'a Stroke) -> Self {
        Self {
            pos: stroke.len(),
            ..Self::new(stroke)
        }
    }

    /// A new cursor at `pos`, sharing stroke and direction, with a fresh `at_start` latch
    fn fresh(&self, pos: usize, reversed: bool) -> Self {
        Self {
            stroke: self.stroke,
            pos,
            reversed,
            at_start: true,
        }
    }

    #[inline]
    fn stroke_len(&self) -> usize {
        self.stroke.map_or(0, Stroke::len)
    }

    /// The current position, `len` being past-the-end
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// True if the cursor is at the first position
    #[inline]
    pub fn is_begin(&self) -> bool {
        self.pos == 0
    }

    /// True if the cursor is at the past-the-end position
    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos >= self.stroke_len()
    }

    /// True if the cursor is at the last valid vertex
    #[inline]
    pub fn at_last(&self) -> bool {
        self.pos + 1 == self.stroke_len()
    }

    /// The vertex at the current position
    pub fn object(&self) -> Result<&'a StrokeVertex, ViewMapError> {
        self.stroke
            .and_then(|s| s.vertex(self.pos))
            .ok_or_else(|| ViewMapError::IteratorStale("iteration has stopped".to_string()))
    }

    /// The curvilinear abscissa at the current position. Zero for an empty cursor, the stroke
    /// length at the past-the-end position.
    pub fn t(&self) -> f64 {
        match self.stroke {
            Some(stroke) => stroke.vertex(self.pos).map_or(stroke.length(), StrokeVertex::t),
            None => 0.0,
        }
    }

    /// `t / length`, clamped to `[0, 1]`
    pub fn u(&self) -> f64 {
        normalized(self.t(), self.stroke.map_or(0.0, Stroke::length))
    }

    /// Returns a cursor one step forward in the direction of this cursor.
    ///
    /// A forward cursor can't step beyond the last vertex, a reversed cursor can't step before
    /// the first position.
    pub fn incremented(&self) -> Result<Self, ViewMapError> {
        if self.reversed {
            if self.is_begin() {
                return Err(ViewMapError::CannotIncrement);
            }
            Ok(self.fresh(self.pos - 1, self.reversed))
        } else {
            if self.is_end() || self.at_last() {
                return Err(ViewMapError::CannotIncrement);
            }
            Ok(self.fresh(self.pos + 1, self.reversed))
        }
    }

    /// Returns a cursor one step backward in the direction of this cursor.
    ///
    /// A forward cursor can't step before the first position, a reversed cursor can't step
    /// beyond the past-the-end position.
    pub fn decremented(&self) -> Result<Self, ViewMapError> {
        if self.reversed {
            if self.is_end() {
                return Err(ViewMapError::CannotDecrement);
            }
            Ok(self.fresh(self.pos + 1, self.reversed))
        } else {
            if self.is_begin() {
                return Err(ViewMapError::CannotDecrement);
            }
            Ok(self.fresh(self.pos - 1, self.reversed))
        }
    }

    /// Returns a cursor at the same position traversing in the opposite direction
    pub fn reversed(&self) -> Self {
        self.fresh(self.pos, !self.reversed)
    }

    /// Starts a new host iteration: re-arms the `at_start` latch
    pub fn start_iteration(&mut self) -> &mut Self {
        self.at_start = true;
        self
    }

    /// Host iteration step, see the type documentation.
    ///
    /// Returns `IterationStopped` when there is nothing more to yield; the cursor then stays
    /// where it is.
    pub fn advance(&mut self) -> Result<&'a StrokeVertex, ViewMapError> {
        if self.reversed {
            if self.is_begin() {
                return Err(ViewMapError::IterationStopped);
            }
            self.pos -= 1;
        } else {
            if self.is_end() {
                return Err(ViewMapError::IterationStopped);
            }
            if self.at_start {
                self.at_start = false;
            } else if self.at_last() {
                return Err(ViewMapError::IterationStopped);
            } else {
                self.pos += 1;
            }
        }
        self.object()
    }
}

impl PartialEq for StrokeVertexIterator<'_> {
    /// Two cursors are equal when they point at the same position of the same stroke
    fn eq(&self, other: &Self) -> bool {
        let same_stroke = match (self.stroke, other.stroke) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_stroke && self.pos == other.pos
    }
}

impl<'a> Iterator for StrokeVertexIterator<'a> {
    type Item = &'a StrokeVertex;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().ok()
    }
}
