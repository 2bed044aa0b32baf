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

//! The `great_circle` module contains functions for calculating distances,
//! bearings and positions along great circles on the surface of a sphere.
//!
//! The formulae convert latitudes (φ) and longitudes (λ) to radians and use
//! angular distances (δ) and bearings (θ) in radians internally.
//! Latitudes and bearings are returned in degrees, distances in the units of
//! the given radius.
//!
//! See: [Calculate distance, bearing and more between Latitude/Longitude points](https://www.movable-type.co.uk/scripts/latlong.html).

#![allow(clippy::suboptimal_flops, clippy::similar_names)]

use crate::{angle, Coordinate, Degrees, Metres, Radians, Segment};

/// Calculate the great circle angular distance between a pair of positions
/// using the haversine formula.
/// * `a`, `b` - the positions.
///
/// returns the angular distance in radians, in the range `[0, π]`.
#[must_use]
pub fn angular_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.phi();
    let phi2 = b.phi();
    let delta_phi = phi2 - phi1;
    let delta_lambda = angle::to_radians(Degrees(b.longitude - a.longitude)).0;

    let sin_half_delta_phi = libm::sin(delta_phi / 2.0);
    let sin_half_delta_lambda = libm::sin(delta_lambda / 2.0);
    let h = sin_half_delta_phi * sin_half_delta_phi
        + libm::cos(phi1) * libm::cos(phi2) * sin_half_delta_lambda * sin_half_delta_lambda;
    2.0 * libm::atan2(libm::sqrt(h), libm::sqrt(1.0 - h))
}

/// Calculate the great circle distance between a pair of positions.
/// * `a`, `b` - the positions.
/// * `radius` - the radius of the sphere.
///
/// returns the distance in the units of `radius`.
/// The result is symmetric: `distance(a, b) == distance(b, a)`.
///
/// # Examples
/// ```
/// use sphere_nav::{earth, great_circle, Coordinate};
///
/// let cambridge = Coordinate::from_degrees(52.205, 0.119);
/// let paris = Coordinate::from_degrees(48.857, 2.351);
///
/// let result = great_circle::distance(&cambridge, &paris, earth::MEAN_RADIUS);
/// assert_eq!(404_279.0, libm::round(result.0));
/// ```
#[must_use]
pub fn distance(a: &Coordinate, b: &Coordinate, radius: Metres) -> Metres {
    Metres(radius.0 * angular_distance(a, b))
}

/// Calculate the initial bearing in radians from `a` to `b`,
/// in the range `[-π, π]`.
#[must_use]
fn initial_bearing_radians(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.phi();
    let phi2 = b.phi();
    let delta_lambda = angle::to_radians(Degrees(b.longitude - a.longitude)).0;

    let y = libm::sin(delta_lambda) * libm::cos(phi2);
    let x = libm::cos(phi1) * libm::sin(phi2)
        - libm::sin(phi1) * libm::cos(phi2) * libm::cos(delta_lambda);
    libm::atan2(y, x)
}

/// Calculate the initial bearing of the great circle from `a` to `b`.
/// * `a`, `b` - the start and end positions.
///
/// returns the bearing in degrees in the range `[0, 360)`.
/// The bearing between coincident positions is not special cased.
///
/// # Examples
/// ```
/// use sphere_nav::{great_circle, Coordinate};
///
/// let cambridge = Coordinate::from_degrees(52.205, 0.119);
/// let paris = Coordinate::from_degrees(48.857, 2.351);
///
/// let result = great_circle::bearing(&cambridge, &paris);
/// assert_eq!(156.2, libm::round(result.0 * 10.0) / 10.0);
/// ```
#[must_use]
pub fn bearing(a: &Coordinate, b: &Coordinate) -> Degrees {
    Degrees(angle::normalise_bearing(
        angle::to_degrees(Radians(initial_bearing_radians(a, b))).0,
    ))
}

/// Calculate the final bearing on arrival at `b` along the great circle from `a`.
///
/// The final bearing is the reverse of the initial bearing from `b` to `a`.
/// * `a`, `b` - the start and end positions.
///
/// returns the bearing in degrees in the range `[0, 360)`.
#[must_use]
pub fn final_bearing(a: &Coordinate, b: &Coordinate) -> Degrees {
    Degrees((bearing(b, a).0 + 180.0) % 360.0)
}

/// Calculate the great circle midpoint between a pair of positions.
/// * `a`, `b` - the positions.
///
/// returns the position half way along the great circle between `a` and `b`.
#[must_use]
pub fn midpoint(a: &Coordinate, b: &Coordinate) -> Coordinate {
    let phi1 = a.phi();
    let lambda1 = a.lambda();
    let phi2 = b.phi();
    let delta_lambda = angle::to_radians(Degrees(b.longitude - a.longitude)).0;

    let cos_phi1 = libm::cos(phi1);
    let bx = libm::cos(phi2) * libm::cos(delta_lambda);
    let by = libm::cos(phi2) * libm::sin(delta_lambda);

    let x = libm::sqrt((cos_phi1 + bx) * (cos_phi1 + bx) + by * by);
    let y = libm::sin(phi1) + libm::sin(phi2);
    let phi3 = libm::atan2(y, x);
    let lambda3 = lambda1 + libm::atan2(by, cos_phi1 + bx);

    Coordinate::from_radians(phi3, lambda3)
}

/// Calculate the position at a fraction of the way along the great circle
/// between a pair of positions.
/// * `a`, `b` - the start and end positions.
/// * `fraction` - the fraction along the great circle: 0 is `a`, 1 is `b`.
///
/// returns the intermediate position.
/// The result is NaN if `a` and `b` are coincident.
#[must_use]
pub fn intermediate_point(a: &Coordinate, b: &Coordinate, fraction: f64) -> Coordinate {
    let phi1 = a.phi();
    let lambda1 = a.lambda();
    let phi2 = b.phi();
    let lambda2 = b.lambda();

    let delta = angular_distance(a, b);
    let sin_delta = libm::sin(delta);
    let a_factor = libm::sin((1.0 - fraction) * delta) / sin_delta;
    let b_factor = libm::sin(fraction * delta) / sin_delta;

    let cos_phi1 = libm::cos(phi1);
    let cos_phi2 = libm::cos(phi2);
    let x = a_factor * cos_phi1 * libm::cos(lambda1) + b_factor * cos_phi2 * libm::cos(lambda2);
    let y = a_factor * cos_phi1 * libm::sin(lambda1) + b_factor * cos_phi2 * libm::sin(lambda2);
    let z = a_factor * libm::sin(phi1) + b_factor * libm::sin(phi2);

    let phi3 = libm::atan2(z, libm::sqrt(x * x + y * y));
    let lambda3 = libm::atan2(y, x);

    Coordinate::from_radians(phi3, lambda3)
}

/// Calculate the destination position given a start position, distance and
/// initial bearing along a great circle.
/// * `origin` - the start position.
/// * `distance` - the distance to travel, in the units of `radius`.
/// * `bearing` - the initial bearing.
/// * `radius` - the radius of the sphere.
///
/// returns the destination position.
///
/// # Examples
/// ```
/// use sphere_nav::{earth, great_circle, Coordinate, Degrees, Metres};
///
/// let greenwich = Coordinate::from_degrees(51.4778, -0.0015);
/// let result = great_circle::destination(&greenwich, Metres(7794.0), Degrees(300.7), earth::MEAN_RADIUS);
/// assert_eq!(51.513546, libm::round(result.latitude().0 * 1e6) / 1e6);
/// assert_eq!(-0.098345, libm::round(result.longitude().0 * 1e6) / 1e6);
/// ```
#[must_use]
pub fn destination(
    origin: &Coordinate,
    distance: Metres,
    bearing: Degrees,
    radius: Metres,
) -> Coordinate {
    let phi1 = origin.phi();
    let lambda1 = origin.lambda();
    let delta = distance.0 / radius.0;
    let theta = angle::to_radians(bearing).0;

    let sin_phi1 = libm::sin(phi1);
    let cos_phi1 = libm::cos(phi1);
    let sin_delta = libm::sin(delta);
    let cos_delta = libm::cos(delta);

    let sin_phi2 = sin_phi1 * cos_delta + cos_phi1 * sin_delta * libm::cos(theta);
    let phi2 = libm::asin(sin_phi2);
    let y = libm::sin(theta) * sin_delta * cos_phi1;
    let x = cos_delta - sin_phi1 * sin_phi2;
    let lambda2 = lambda1 + libm::atan2(y, x);

    Coordinate::from_radians(phi2, lambda2)
}

/// Calculate the angular cross track distance and the angular distance and
/// bearing difference used by the along track distance.
///
/// returns (δxt, δ13, θ12 - θ13) in radians.
#[must_use]
fn cross_track_parameters(point: &Coordinate, segment: &Segment) -> (f64, f64, f64) {
    let delta13 = angular_distance(&segment.start, point);
    let theta13 = initial_bearing_radians(&segment.start, point);
    let theta12 = initial_bearing_radians(&segment.start, &segment.end);

    let xtd = libm::asin(libm::sin(delta13) * libm::sin(theta13 - theta12));
    (xtd, delta13, theta12 - theta13)
}

/// Calculate the signed distance from a position to the great circle path
/// through a `Segment`.
/// * `point` - the position.
/// * `segment` - the great circle path.
/// * `radius` - the radius of the sphere.
///
/// returns the cross track distance: negative if `point` is to the left of
/// the path, positive if it is to the right.
#[must_use]
pub fn cross_track_distance(point: &Coordinate, segment: &Segment, radius: Metres) -> Metres {
    let (xtd, _, _) = cross_track_parameters(point, segment);
    Metres(xtd * radius.0)
}

/// Calculate the signed distance along the great circle path through a
/// `Segment` from its start to the point closest to a position.
/// * `point` - the position.
/// * `segment` - the great circle path.
/// * `radius` - the radius of the sphere.
///
/// returns the along track distance: negative if the closest point is
/// behind the start of the path.
#[must_use]
pub fn along_track_distance(point: &Coordinate, segment: &Segment, radius: Metres) -> Metres {
    let (xtd, delta13, delta_theta) = cross_track_parameters(point, segment);
    let atd = libm::acos(libm::cos(delta13) / libm::fabs(libm::cos(xtd)));
    Metres(atd * angle::sign(libm::cos(delta_theta)) * radius.0)
}

/// Calculate the maximum latitude reached by a great circle, using
/// Clairaut's formula.
///
/// The longitude of `coordinate` does not affect the result.
/// * `coordinate` - a position on the great circle.
/// * `bearing` - the bearing of the great circle at `coordinate`.
///
/// returns the maximum latitude in the range `[0, 90]` degrees.
///
/// # Examples
/// ```
/// use sphere_nav::{great_circle, Coordinate, Degrees};
///
/// let a = Coordinate::from_degrees(51.0, 1.0);
/// assert_eq!(90.0, great_circle::max_latitude(&a, Degrees(0.0)).0);
/// ```
#[must_use]
pub fn max_latitude(coordinate: &Coordinate, bearing: Degrees) -> Degrees {
    let theta = angle::to_radians(bearing).0;
    let phi = coordinate.phi();
    angle::to_degrees(Radians(libm::acos(libm::fabs(
        libm::sin(theta) * libm::cos(phi),
    ))))
}

/// Calculate the minimum latitude reached by a great circle, the negation
/// of `max_latitude`.
/// * `coordinate` - a position on the great circle.
/// * `bearing` - the bearing of the great circle at `coordinate`.
#[must_use]
pub fn min_latitude(coordinate: &Coordinate, bearing: Degrees) -> Degrees {
    Degrees(-max_latitude(coordinate, bearing).0)
}

/// Calculate the longitudes where the great circle through a pair of
/// positions crosses a latitude.
/// * `a`, `b` - positions on the great circle.
/// * `latitude` - the latitude.
///
/// returns the pair of longitudes, or None if the great circle does not
/// reach `latitude`. The longitudes are equal where the great circle
/// touches `latitude` at its vertex.
/// The longitudes are NaN for an equatorial great circle and a `latitude`
/// of zero, since every longitude is a crossing.
///
/// # Examples
/// ```
/// use sphere_nav::{great_circle, Coordinate, Degrees};
///
/// let a = Coordinate::from_degrees(0.0, 0.0);
/// let b = Coordinate::from_degrees(60.0, 30.0);
///
/// let (lon1, lon2) = great_circle::crossing_parallels(&a, &b, Degrees(30.0)).unwrap();
/// assert_eq!(9.594068, libm::round(lon1.0 * 1e6) / 1e6);
/// assert_eq!(170.405932, libm::round(lon2.0 * 1e6) / 1e6);
/// ```
#[must_use]
pub fn crossing_parallels(
    a: &Coordinate,
    b: &Coordinate,
    latitude: Degrees,
) -> Option<(Degrees, Degrees)> {
    let phi = angle::to_radians(latitude).0;
    let phi1 = a.phi();
    let lambda1 = a.lambda();
    let phi2 = b.phi();
    let lambda2 = b.lambda();
    let delta_lambda = lambda2 - lambda1;

    let sin_phi1 = libm::sin(phi1);
    let cos_phi1 = libm::cos(phi1);
    let sin_phi2 = libm::sin(phi2);
    let cos_phi2 = libm::cos(phi2);
    let cos_phi = libm::cos(phi);

    let x = sin_phi1 * cos_phi2 * cos_phi * libm::sin(delta_lambda);
    let y = sin_phi1 * cos_phi2 * cos_phi * libm::cos(delta_lambda) - cos_phi1 * sin_phi2 * cos_phi;
    let z = cos_phi1 * cos_phi2 * libm::sin(phi) * libm::sin(delta_lambda);

    let sq_xy = x * x + y * y;
    if z * z > sq_xy {
        // the great circle does not reach the latitude
        None
    } else {
        // longitude at the maximum latitude
        let lambda_max = libm::atan2(-y, x);
        // longitude difference from lambda_max to the crossing points
        let delta_lambda_i = libm::acos(z / libm::sqrt(sq_xy));

        let lambda_i1 = lambda1 + lambda_max - delta_lambda_i;
        let lambda_i2 = lambda1 + lambda_max + delta_lambda_i;
        Some((
            Degrees(angle::normalise_longitude(angle::to_degrees(Radians(lambda_i1)).0)),
            Degrees(angle::normalise_longitude(angle::to_degrees(Radians(lambda_i2)).0)),
        ))
    }
}
