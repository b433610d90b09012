// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the viewmap crate.

use super::{Stroke, StrokeVertexIterator};
use crate::{ViewMapError, id::Id};
use rand::{Rng, SeedableRng, rngs::StdRng};
use vector_traits::{
    approx::assert_ulps_eq,
    glam::{DVec2, dvec2},
};

/// s0, s1, s2 with t = [0, 1, 2.5]
fn three_vertex_stroke() -> Stroke {
    Stroke::from_points(
        Id::new(1, 0),
        [dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(2.5, 0.0)],
    )
}

fn abscissae(vertices: &[&super::StrokeVertex]) -> Vec<f64> {
    vertices.iter().map(|v| v.t()).collect()
}

#[test]
fn test_stroke_parameterization() {
    let stroke = three_vertex_stroke();
    assert_eq!(3, stroke.len());
    assert_ulps_eq!(2.5, stroke.length());
    let t: Vec<f64> = stroke.vertices().iter().map(|v| v.t()).collect();
    assert_eq!(vec![0.0, 1.0, 2.5], t);
    assert_ulps_eq!(0.0, stroke.vertices()[0].u());
    assert_ulps_eq!(0.4, stroke.vertices()[1].u());
    assert_ulps_eq!(1.0, stroke.vertices()[2].u());
    assert!(stroke.links().is_empty());
}

#[test]
fn test_forward_iteration() -> Result<(), ViewMapError> {
    let stroke = three_vertex_stroke();
    let mut it = stroke.vertices_begin();
    assert_eq!(0.0, it.advance()?.t());
    assert_eq!(1.0, it.advance()?.t());
    let last = it.advance()?;
    assert_eq!(2.5, last.t());
    assert_ulps_eq!(1.0, last.u());
    assert_ulps_eq!(1.0, it.u());
    assert_eq!(Err(ViewMapError::IterationStopped), it.advance());
    // the cursor is left on the last vertex, never past-the-end
    assert!(it.at_last());
    assert!(it.object().is_ok());
    Ok(())
}

#[test]
fn test_reverse_iteration() {
    let stroke = three_vertex_stroke();
    let yielded: Vec<_> = stroke.vertices_end().collect();
    assert_eq!(vec![2.5, 1.0, 0.0], abscissae(&yielded));

    let mut it = stroke.vertices_end();
    assert!(it.is_end());
    assert!(it.is_reversed());
    while it.advance().is_ok() {}
    assert!(it.is_begin());
    assert_eq!(Err(ViewMapError::IterationStopped), it.advance());
}

#[test]
fn test_at_last_boundary() -> Result<(), ViewMapError> {
    let stroke = three_vertex_stroke();
    let mut it = stroke.vertices_begin();
    for _ in 0..3 {
        let _ = it.advance()?;
    }
    assert_eq!(2, it.index());
    assert!(it.at_last());
    assert_eq!(Err(ViewMapError::CannotIncrement), it.incremented());
    assert_eq!(Err(ViewMapError::IterationStopped), it.advance());
    assert_eq!(2, it.index());
    Ok(())
}

#[test]
fn test_object_past_the_end() {
    let stroke = three_vertex_stroke();
    let it = stroke.cursor_at(3).unwrap();
    assert!(it.is_end());
    assert!(matches!(it.object(), Err(ViewMapError::IteratorStale(_))));
    assert_ulps_eq!(2.5, it.t());
    assert_ulps_eq!(1.0, it.u());
    assert!(stroke.cursor_at(4).is_err());
}

#[test]
fn test_default_cursor() {
    let mut it = StrokeVertexIterator::default();
    assert!(it.is_begin());
    assert!(it.is_end());
    assert!(!it.at_last());
    assert!(matches!(it.object(), Err(ViewMapError::IteratorStale(_))));
    assert_eq!(0.0, it.t());
    assert_eq!(0.0, it.u());
    assert_eq!(Err(ViewMapError::IterationStopped), it.advance());
    assert_eq!(Err(ViewMapError::CannotIncrement), it.incremented());
    assert_eq!(Err(ViewMapError::CannotDecrement), it.decremented());
    let mut reversed = it.reversed();
    assert_eq!(Err(ViewMapError::IterationStopped), reversed.advance());
}

#[test]
fn test_empty_stroke() {
    let stroke = Stroke::from_points(Id::default(), Vec::<DVec2>::new());
    assert!(stroke.is_empty());
    assert_eq!(0.0, stroke.length());
    assert_eq!(0, stroke.vertices_begin().count());
    assert_eq!(0, stroke.vertices_end().count());
}

#[test]
fn test_single_vertex_stroke() -> Result<(), ViewMapError> {
    let stroke = Stroke::from_points(Id::default(), [dvec2(3.0, 4.0)]);
    let mut it = stroke.vertices_begin();
    assert!(it.is_begin());
    assert!(it.at_last());
    assert_eq!(3.0, it.advance()?.x());
    assert_eq!(Err(ViewMapError::IterationStopped), it.advance());
    // a stroke of no length has u == 0
    assert_eq!(0.0, it.u());
    Ok(())
}

#[test]
fn test_start_iteration_is_idempotent() -> Result<(), ViewMapError> {
    let stroke = three_vertex_stroke();
    let mut it = stroke.vertices_begin();
    let first = it.start_iteration().start_iteration().advance()?;
    assert_eq!(0.0, first.t());

    // restarting a drained cursor yields its current vertex again, then stops
    let mut it = stroke.vertices_begin();
    while it.advance().is_ok() {}
    assert_eq!(2.5, it.start_iteration().advance()?.t());
    assert_eq!(Err(ViewMapError::IterationStopped), it.advance());
    Ok(())
}

#[test]
fn test_copy_keeps_latch() -> Result<(), ViewMapError> {
    let stroke = three_vertex_stroke();
    let mut it = stroke.vertices_begin();
    let _ = it.advance()?;
    // the copy has already observed s0, its next step moves to s1
    let mut copy = it.clone();
    assert_eq!(it, copy);
    assert_eq!(1.0, copy.advance()?.t());

    // a fresh copy yields s0 first
    let mut fresh = stroke.vertices_begin().clone();
    assert_eq!(0.0, fresh.advance()?.t());
    Ok(())
}

#[test]
fn test_incremented_decremented() -> Result<(), ViewMapError> {
    let stroke = three_vertex_stroke();
    let it = stroke.vertices_begin();
    assert_eq!(Err(ViewMapError::CannotDecrement), it.decremented());
    let next = it.incremented()?;
    assert_eq!(1, next.index());
    assert_eq!(1.0, next.object()?.t());
    // the original cursor is untouched
    assert_eq!(0, it.index());
    assert_eq!(it, next.decremented()?);

    // reversed cursors step the other way
    let reversed = stroke.vertices_end();
    let r1 = reversed.incremented()?;
    assert_eq!(2, r1.index());
    assert!(r1.is_reversed());
    assert_eq!(reversed, r1.decremented()?);
    assert_eq!(Err(ViewMapError::CannotDecrement), reversed.decremented());
    let r_begin = r1.incremented()?.incremented()?;
    assert!(r_begin.is_begin());
    assert_eq!(Err(ViewMapError::CannotIncrement), r_begin.incremented());
    Ok(())
}

#[test]
fn test_reversed_keeps_position() -> Result<(), ViewMapError> {
    let stroke = three_vertex_stroke();
    let it = stroke.cursor_at(2)?;
    let reversed = it.reversed();
    assert_eq!(2, reversed.index());
    assert!(reversed.is_reversed());
    assert!(!reversed.reversed().is_reversed());
    // a reversed cursor steps before yielding
    let yielded: Vec<_> = reversed.collect();
    assert_eq!(vec![1.0, 0.0], abscissae(&yielded));
    Ok(())
}

#[test]
fn test_random_strokes_yield_once() -> Result<(), ViewMapError> {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let n = rng.random_range(0..40);
        let points: Vec<DVec2> = (0..n)
            .map(|_| dvec2(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0)))
            .collect();
        let stroke = Stroke::from_points(Id::default(), points.clone());

        let forward: Vec<DVec2> = stroke.vertices_begin().map(|v| v.point_2d()).collect();
        assert_eq!(points, forward);

        let mut backward: Vec<DVec2> = stroke.vertices_end().map(|v| v.point_2d()).collect();
        backward.reverse();
        assert_eq!(points, backward);

        // t and u are monotone along every cursor position, past-the-end included
        let mut previous: Option<(f64, f64)> = None;
        for index in 0..=stroke.len() {
            let it = stroke.cursor_at(index)?;
            assert!((0.0..=1.0).contains(&it.u()));
            if let Some((t, u)) = previous {
                assert!(t <= it.t());
                assert!(u <= it.u());
            }
            previous = Some((it.t(), it.u()));
        }

        // increment then decrement lands on the same vertex
        for index in 0..stroke.len() {
            let it = stroke.cursor_at(index)?;
            if let Ok(next) = it.incremented() {
                assert_eq!(it, next.decremented()?);
            }
        }
    }
    Ok(())
}
