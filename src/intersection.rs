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

//! The `intersection` module contains functions for calculating the
//! intersection of a pair of great circle paths.
//!
//! Each path is a `Course`: a start position and an initial bearing.
//! The intersection is found by solving the spherical triangle formed by
//! the two start positions and the intersection point, see
//! [Ed Williams, Intersecting radials](https://edwilliams.org/avform147.htm#Intersection).
//!
//! A pair of great circles always intersect at two antipodal points (unless
//! they are the same great circle), the functions here return the point ahead
//! of both start positions or None if there is no such unique point.

#![allow(clippy::suboptimal_flops, clippy::similar_names)]

use crate::{angle, great_circle, Coordinate, Course, Segment};
use core::f64::consts::{PI, TAU};

/// Calculate the intersection point of a pair of great circle paths.
/// * `course1`, `course2` - the great circle paths.
///
/// returns the intersection point, or None if:
/// - the paths start at the same position;
/// - the paths are along the same great circle (infinite intersections);
/// - the intersection is behind the start of one of the paths (ambiguous).
///
/// # Examples
/// ```
/// use sphere_nav::{intersection, Coordinate, Course, Degrees};
///
/// let north = Course::new(Coordinate::from_degrees(0.0, 1.0), Degrees(0.0));
/// let east = Course::new(Coordinate::from_degrees(1.0, 0.0), Degrees(90.0));
///
/// let result = intersection(&north, &east).unwrap();
/// assert_eq!(0.999848, libm::round(result.latitude().0 * 1e6) / 1e6);
/// assert_eq!(1.0, libm::round(result.longitude().0 * 1e6) / 1e6);
///
/// // A path does not have a unique intersection with itself.
/// assert!(intersection(&north, &north).is_none());
/// ```
#[allow(clippy::float_cmp)]
#[must_use]
pub fn intersection(course1: &Course, course2: &Course) -> Option<Coordinate> {
    let phi1 = course1.origin.phi();
    let lambda1 = course1.origin.lambda();
    let phi2 = course2.origin.phi();
    let lambda2 = course2.origin.lambda();
    let theta13 = angle::to_radians(course1.bearing()).0;
    let theta23 = angle::to_radians(course2.bearing()).0;

    // angular distance between the start positions
    let delta12 = great_circle::angular_distance(&course1.origin, &course2.origin);
    if delta12 == 0.0 {
        return None;
    }

    let sin_phi1 = libm::sin(phi1);
    let cos_phi1 = libm::cos(phi1);
    let sin_phi2 = libm::sin(phi2);
    let sin_delta12 = libm::sin(delta12);
    let cos_delta12 = libm::cos(delta12);

    // initial and final bearings between the start positions
    let theta_a = libm::acos((sin_phi2 - sin_phi1 * cos_delta12) / (sin_delta12 * cos_phi1));
    let theta_a = if theta_a.is_nan() { 0.0 } else { theta_a };
    let theta_b =
        libm::acos((sin_phi1 - sin_phi2 * cos_delta12) / (sin_delta12 * libm::cos(phi2)));

    // acos is ambiguous East/West, resolve by the longitude difference
    let (theta12, theta21) = if libm::sin(lambda2 - lambda1) > 0.0 {
        (theta_a, TAU - theta_b)
    } else {
        (TAU - theta_a, theta_b)
    };

    // angles at the start positions: 2-1-3 and 1-2-3
    let alpha1 = theta13 - theta12;
    let alpha2 = theta21 - theta23;

    if alpha1 % PI == 0.0 && alpha2 % PI == 0.0 {
        // infinite intersections
        return None;
    }

    let sin_alpha1 = libm::sin(alpha1);
    let sin_alpha2 = libm::sin(alpha2);
    if sin_alpha1 * sin_alpha2 < 0.0 {
        // ambiguous intersection
        return None;
    }

    let cos_alpha1 = libm::cos(alpha1);
    let cos_alpha2 = libm::cos(alpha2);
    let alpha3 = libm::acos(-cos_alpha1 * cos_alpha2 + sin_alpha1 * sin_alpha2 * cos_delta12);
    let delta13 = libm::atan2(
        sin_delta12 * sin_alpha1 * sin_alpha2,
        cos_alpha2 + cos_alpha1 * libm::cos(alpha3),
    );

    let sin_delta13 = libm::sin(delta13);
    let cos_delta13 = libm::cos(delta13);
    let phi3 = libm::asin(sin_phi1 * cos_delta13 + cos_phi1 * sin_delta13 * libm::cos(theta13));
    let delta_lambda13 = libm::atan2(
        libm::sin(theta13) * sin_delta13 * cos_phi1,
        cos_delta13 - sin_phi1 * libm::sin(phi3),
    );

    Some(Coordinate::from_radians(phi3, lambda1 + delta_lambda13))
}

/// Calculate the intersection point of the great circle paths through a pair
/// of `Segment`s.
///
/// The intersection need not lie between the ends of the `Segment`s, only
/// ahead of their start positions.
/// * `segment1`, `segment2` - the great circle paths.
///
/// returns the intersection point or None, see `intersection`.
#[must_use]
pub fn segment_intersection(segment1: &Segment, segment2: &Segment) -> Option<Coordinate> {
    intersection(&Course::from(segment1), &Course::from(segment2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Degrees;
    use angle_sc::is_within_tolerance;

    fn course(lat: f64, lon: f64, bearing: f64) -> Course {
        Course::new(Coordinate::from_degrees(lat, lon), Degrees(bearing))
    }

    #[test]
    fn test_intersection() {
        let result = intersection(&course(0.0, 1.0, 0.0), &course(1.0, 0.0, 90.0)).unwrap();
        assert!(is_within_tolerance(0.999_847_726_077_248_8, result.latitude().0, 1e-9));
        assert!(is_within_tolerance(1.0, result.longitude().0, 1e-9));
        assert_eq!(0.999848, libm::round(result.latitude().0 * 1e6) / 1e6);
        assert_eq!(1.0, libm::round(result.longitude().0 * 1e6) / 1e6);

        let stansted = course(51.8853, 0.2545, 108.547);
        let charles_de_gaulle = course(49.0034, 2.5735, 32.435);
        let result = intersection(&stansted, &charles_de_gaulle).unwrap();
        assert!(is_within_tolerance(50.907_808_698_797_11, result.latitude().0, 1e-9));
        assert!(is_within_tolerance(4.508_409_906_577_526, result.longitude().0, 1e-9));

        let result = intersection(&course(10.0, 0.0, 90.0), &course(20.0, 30.0, 180.0)).unwrap();
        assert!(is_within_tolerance(8.682_203_901_046_169, result.latitude().0, 1e-9));
        assert!(is_within_tolerance(30.0, result.longitude().0, 1e-9));

        let result = intersection(&course(0.0, 0.0, 45.0), &course(0.0, 10.0, 315.0)).unwrap();
        assert!(is_within_tolerance(4.981_069_393_700_204, result.latitude().0, 1e-9));
        assert!(is_within_tolerance(5.0, result.longitude().0, 1e-9));
    }

    #[test]
    fn test_intersection_at_pole() {
        // Northbound meridians meet at the North pole
        let result = intersection(&course(0.0, 0.0, 0.0), &course(0.0, 10.0, 0.0)).unwrap();
        assert!(is_within_tolerance(90.0, result.latitude().0, 1e-5));
    }

    #[test]
    fn test_intersection_on_same_meridian() {
        // the initial bearing between the origins rounds out of the domain of acos
        let result = intersection(&course(0.0, 0.0, 45.0), &course(10.0, 0.0, 135.0)).unwrap();
        assert!(is_within_tolerance(
            4.981_069_393_700_201,
            result.latitude().0,
            1e-12
        ));
        assert!(is_within_tolerance(5.0, result.longitude().0, 1e-12));

        // the final bearing between the origins is not clamped
        let result = intersection(&course(0.0, 0.0, 45.0), &course(33.3, 0.0, 135.0)).unwrap();
        assert!(result.latitude().0.is_nan());
        assert!(result.longitude().0.is_nan());
    }

    #[test]
    fn test_intersection_same_origin() {
        let a = course(0.0, 1.0, 0.0);
        assert!(intersection(&a, &a).is_none());

        // different bearings from the same origin
        let b = course(0.0, 1.0, 90.0);
        assert!(intersection(&a, &b).is_none());
    }

    #[test]
    fn test_intersection_collinear() {
        // both paths along the Equator
        assert!(intersection(&course(0.0, 0.0, 90.0), &course(0.0, 10.0, 270.0)).is_none());
        assert!(intersection(&course(0.0, 0.0, 90.0), &course(0.0, 10.0, 90.0)).is_none());
    }

    #[test]
    fn test_intersection_ambiguous() {
        // diverging paths only meet behind their start positions
        assert!(intersection(&course(0.0, 0.0, 135.0), &course(0.0, 10.0, 45.0)).is_none());
    }

    #[test]
    fn test_segment_intersection() {
        let segment1 = Segment::new(
            Coordinate::from_degrees(51.8853, 0.2545),
            Coordinate::from_degrees(50.0, 5.0),
        );
        let segment2 = Segment::new(
            Coordinate::from_degrees(49.0034, 2.5735),
            Coordinate::from_degrees(51.0, 4.0),
        );
        let course2 = Course::from(&segment2);
        let expected = intersection(&Course::from(&segment1), &course2).unwrap();
        let result = segment_intersection(&segment1, &segment2).unwrap();
        assert_eq!(expected, result);

        let result = intersection(
            &Course::from(&segment1),
            &course(49.0034, 2.5735, 32.435),
        )
        .unwrap();
        assert!(is_within_tolerance(50.425_959_090_997_88, result.latitude().0, 1e-9));
        assert!(is_within_tolerance(4.001_020_910_210_173, result.longitude().0, 1e-9));
    }
}
