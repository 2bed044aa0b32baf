// Copyright (c) 2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The `area` module contains functions for calculating the area of a
//! polygon on the surface of a sphere.
//!
//! The polygon's edges are great circle arcs between consecutive vertices,
//! the last vertex is joined back to the first.
//! The area is the spherical excess of the polygon times the square of the
//! radius, see [L'Huilier's Theorem](https://mathworld.wolfram.com/LHuiliersTheorem.html)
//! and [Spherical excess](https://en.wikipedia.org/wiki/Spherical_trigonometry#Area_and_spherical_excess).

#![allow(clippy::suboptimal_flops)]

use crate::{angle, great_circle, Coordinate, Degrees, Metres};
use core::f64::consts::TAU;

/// The vertices of a polygon without a closing vertex.
///
/// returns None if fewer than 3 vertices are supplied, a closing vertex
/// included.
#[must_use]
fn open_vertices(polygon: &[Coordinate]) -> Option<&[Coordinate]> {
    if polygon.len() < 3 {
        return None;
    }
    Some(match polygon {
        [first, .., last] if first == last => &polygon[..polygon.len() - 1],
        _ => polygon,
    })
}

/// The spherical excess of the triangle formed by an edge and the North pole.
/// * `a`, `b` - the ends of the edge.
#[must_use]
fn edge_excess(a: &Coordinate, b: &Coordinate) -> f64 {
    let tan_half_phi1 = libm::tan(a.phi() / 2.0);
    let tan_half_phi2 = libm::tan(b.phi() / 2.0);
    let delta_lambda = angle::to_radians(Degrees(b.longitude - a.longitude)).0;

    2.0 * libm::atan2(
        libm::tan(delta_lambda / 2.0) * (tan_half_phi1 + tan_half_phi2),
        1.0 + tan_half_phi1 * tan_half_phi2,
    )
}

/// Whether the open polygon `vertices` encloses a pole.
/// Two open vertices describe an edge and its reverse, which enclose nothing.
#[must_use]
fn encloses_pole(vertices: &[Coordinate]) -> bool {
    vertices.len() > 2 && libm::fabs(turning_angle(vertices)) < 90.0
}

/// The sum of the turning angles of the open polygon `vertices` in degrees.
#[must_use]
fn turning_angle(vertices: &[Coordinate]) -> f64 {
    let n = vertices.len();
    let first_bearing = great_circle::bearing(&vertices[0], &vertices[1]).0;

    let mut sum = 0.0;
    let mut previous_bearing = first_bearing;
    for (i, a) in vertices.iter().enumerate() {
        let b = &vertices[(i + 1) % n];
        let initial_bearing = great_circle::bearing(a, b).0;
        let final_bearing = great_circle::final_bearing(a, b).0;
        sum += angle::normalise_turn(initial_bearing - previous_bearing);
        sum += angle::normalise_turn(final_bearing - initial_bearing);
        previous_bearing = final_bearing;
    }
    sum + angle::normalise_turn(first_bearing - previous_bearing)
}

/// Determine whether a polygon encloses a pole.
///
/// The turning angles around a polygon sum to ±360° unless it encloses a
/// pole, when they sum to approximately 0°.
/// See: [Determining if a spherical polygon contains a pole](https://blog.element84.com/determining-if-a-spherical-polygon-contains-a-pole.html).
///
/// Note: the test can fail when an edge of the polygon passes over a pole,
/// e.g. (85, 90), (85, 0), (85, -90).
/// * `polygon` - the vertices of the polygon, optionally closed.
///
/// returns true if the polygon encloses a pole, false otherwise or if fewer
/// than 3 vertices are supplied.
#[must_use]
pub fn is_pole_enclosed_by(polygon: &[Coordinate]) -> bool {
    open_vertices(polygon).is_some_and(encloses_pole)
}

/// Calculate the area of a polygon bounded by great circle arcs.
/// * `polygon` - the vertices of the polygon, in either order.
///   The last vertex may repeat the first.
/// * `radius` - the radius of the sphere.
///
/// returns the area in the square units of `radius`, or None if fewer than
/// 3 vertices are supplied.
///
/// # Examples
/// ```
/// use sphere_nav::{area, earth, Coordinate};
///
/// let triangle = [
///     Coordinate::from_degrees(1.0, 1.0),
///     Coordinate::from_degrees(2.0, 1.0),
///     Coordinate::from_degrees(1.0, 2.0),
/// ];
/// let result = area(&triangle, earth::MEAN_RADIUS).unwrap();
/// assert_eq!(6_181_527_888.0, libm::round(result));
///
/// assert!(area(&triangle[..2], earth::MEAN_RADIUS).is_none());
/// ```
#[must_use]
pub fn area(polygon: &[Coordinate], radius: Metres) -> Option<f64> {
    let vertices = open_vertices(polygon)?;

    let n = vertices.len();
    let mut excess: f64 = vertices
        .iter()
        .enumerate()
        .map(|(i, a)| edge_excess(a, &vertices[(i + 1) % n]))
        .sum();

    if encloses_pole(vertices) {
        excess = libm::fabs(excess) - TAU;
    }

    Some(libm::fabs(excess * radius.0 * radius.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::earth::MEAN_RADIUS;
    use angle_sc::is_within_tolerance;

    fn polygon(vertices: &[(f64, f64)]) -> Vec<Coordinate> {
        vertices
            .iter()
            .map(|&(lat, lon)| Coordinate::from_degrees(lat, lon))
            .collect()
    }

    #[test]
    fn test_open_vertices() {
        let triangle = polygon(&[(1.0, 1.0), (2.0, 1.0), (1.0, 2.0)]);
        assert_eq!(3, open_vertices(&triangle).unwrap().len());

        let closed = polygon(&[(1.0, 1.0), (2.0, 1.0), (1.0, 2.0), (1.0, 1.0)]);
        assert_eq!(3, open_vertices(&closed).unwrap().len());

        assert!(open_vertices(&[]).is_none());
        assert!(open_vertices(&triangle[..1]).is_none());
        assert!(open_vertices(&triangle[..2]).is_none());

        // three supplied vertices are enough, even when one closes the line
        let closed_line = polygon(&[(1.0, 1.0), (2.0, 1.0), (1.0, 1.0)]);
        assert_eq!(2, open_vertices(&closed_line).unwrap().len());
    }

    #[test]
    fn test_area_triangle() {
        let triangle = polygon(&[(1.0, 1.0), (2.0, 1.0), (1.0, 2.0)]);
        let result = area(&triangle, MEAN_RADIUS).unwrap();
        assert!(is_within_tolerance(6_181_527_887.568_533, result, 1e-2));
        assert_eq!(6_181_527_888.0, libm::round(result));

        // explicitly closed
        let closed = polygon(&[(1.0, 1.0), (2.0, 1.0), (1.0, 2.0), (1.0, 1.0)]);
        assert_eq!(result, area(&closed, MEAN_RADIUS).unwrap());

        // unit sphere
        let result = area(&triangle, Metres(1.0)).unwrap();
        assert!(is_within_tolerance(1.522_932_387_494_763e-4, result, 1e-15));
    }

    #[test]
    fn test_area_winding() {
        let square = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let result = area(&square, MEAN_RADIUS).unwrap();
        assert!(is_within_tolerance(12_363_997_753.679_909, result, 1e-2));

        let reversed: Vec<Coordinate> = square.iter().rev().copied().collect();
        let reverse = area(&reversed, MEAN_RADIUS).unwrap();
        assert!(is_within_tolerance(result, reverse, 1e-3));
    }

    #[test]
    fn test_area_octant() {
        let octant = polygon(&[(0.0, 0.0), (0.0, 90.0), (90.0, 0.0)]);
        let result = area(&octant, MEAN_RADIUS).unwrap();
        let expected = core::f64::consts::PI * MEAN_RADIUS.0 * MEAN_RADIUS.0 / 2.0;
        assert!(is_within_tolerance(expected, result, 1.0));
    }

    #[test]
    fn test_area_around_pole() {
        let north = polygon(&[(89.0, 0.0), (89.0, 120.0), (89.0, -120.0)]);
        assert!(is_pole_enclosed_by(&north));
        let result = area(&north, MEAN_RADIUS).unwrap();
        assert!(is_within_tolerance(16_063_139_191.855_9, result, 1.0));

        let reversed: Vec<Coordinate> = north.iter().rev().copied().collect();
        assert!(is_pole_enclosed_by(&reversed));
        assert!(is_within_tolerance(result, area(&reversed, MEAN_RADIUS).unwrap(), 1.0));

        let south = polygon(&[(-89.0, 0.0), (-89.0, 120.0), (-89.0, -120.0)]);
        assert!(is_pole_enclosed_by(&south));
        assert!(is_within_tolerance(result, area(&south, MEAN_RADIUS).unwrap(), 1.0));
    }

    #[test]
    fn test_is_pole_enclosed_by() {
        let triangle = polygon(&[(1.0, 1.0), (2.0, 1.0), (1.0, 2.0)]);
        assert!(!is_pole_enclosed_by(&triangle));
        assert!(!is_pole_enclosed_by(&triangle[..2]));

        let turning = turning_angle(&triangle);
        assert!(is_within_tolerance(360.0, libm::fabs(turning), 1e-6));
    }

    #[test]
    fn test_area_too_few_vertices() {
        assert!(area(&[], MEAN_RADIUS).is_none());
        let line = polygon(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(area(&line, MEAN_RADIUS).is_none());
    }

    #[test]
    fn test_area_degenerate_polygon() {
        let closed_line = polygon(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        let result = area(&closed_line, MEAN_RADIUS).unwrap();
        assert!(is_within_tolerance(0.0, result, 1e-3));
        assert!(!is_pole_enclosed_by(&closed_line));

        let closed_line = polygon(&[(10.0, 20.0), (40.0, -30.0), (10.0, 20.0)]);
        let result = area(&closed_line, MEAN_RADIUS).unwrap();
        assert!(is_within_tolerance(0.0, result, 1e-3));
        assert!(!is_pole_enclosed_by(&closed_line));
    }
}
