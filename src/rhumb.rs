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

//! The `rhumb` module contains functions for calculating distances, bearings
//! and positions along rhumb lines (loxodromes) on the surface of a sphere.
//!
//! A rhumb line is a path of constant bearing: a straight line on a Mercator
//! projection. The formulae work on the Mercator "stretched" latitude ψ,
//! the isometric latitude: `ψ = ln(tan(π/4 + φ/2))`.
//!
//! Two degeneracies are handled explicitly:
//! - longitude differences greater than 180° are taken the short way, across
//!   the antimeridian;
//! - on an East-West rhumb line the ratio `q = Δφ/Δψ` is 0/0, so the limiting
//!   value `cos φ` is used instead.

#![allow(clippy::suboptimal_flops, clippy::similar_names)]

use crate::{angle, Coordinate, Degrees, Metres, Radians};
use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// The largest difference in isometric latitude for which a rhumb line is
/// treated as East-West.
pub const MAX_EAST_WEST_DELTA_PSI: f64 = 1e-11;

/// Calculate the difference in isometric latitude between a pair of latitudes.
/// * `phi1`, `phi2` - the latitudes in radians.
#[must_use]
fn delta_psi(phi1: f64, phi2: f64) -> f64 {
    libm::log(libm::tan(FRAC_PI_4 + phi2 / 2.0) / libm::tan(FRAC_PI_4 + phi1 / 2.0))
}

/// Calculate the "stretch factor" `q = Δφ/Δψ` of a rhumb line.
///
/// The factor is ill-conditioned on an East-West rhumb line, where the
/// limiting value `cos φ1` is used.
/// * `delta_phi` - the latitude difference in radians.
/// * `delta_psi` - the isometric latitude difference.
/// * `phi1` - the start latitude in radians.
#[must_use]
fn stretch_factor(delta_phi: f64, delta_psi: f64, phi1: f64) -> f64 {
    if libm::fabs(delta_psi) > MAX_EAST_WEST_DELTA_PSI {
        delta_phi / delta_psi
    } else {
        libm::cos(phi1)
    }
}

/// Calculate the rhumb line distance between a pair of positions.
/// * `a`, `b` - the positions.
/// * `radius` - the radius of the sphere.
///
/// returns the distance in the units of `radius`, across the antimeridian
/// if that is shorter.
///
/// # Examples
/// ```
/// use sphere_nav::{earth, rhumb, Coordinate};
///
/// let plymouth = Coordinate::from_degrees(50.3636, -4.1575);
/// let boston = Coordinate::from_degrees(42.3515, -71.0406);
///
/// let result = rhumb::distance(&plymouth, &boston, earth::MEAN_RADIUS);
/// assert_eq!(5196.265, libm::round(result.0) / 1000.0);
/// ```
#[must_use]
pub fn distance(a: &Coordinate, b: &Coordinate, radius: Metres) -> Metres {
    let phi1 = a.phi();
    let phi2 = b.phi();
    let delta_phi = phi2 - phi1;
    let mut delta_lambda = angle::to_radians(Degrees(libm::fabs(b.longitude - a.longitude))).0;
    if delta_lambda > PI {
        delta_lambda -= TAU;
    }

    let q = stretch_factor(delta_phi, delta_psi(phi1, phi2), phi1);
    let delta = libm::sqrt(delta_phi * delta_phi + q * q * delta_lambda * delta_lambda);
    Metres(delta * radius.0)
}

/// Calculate the rhumb line bearing from `a` to `b`.
/// * `a`, `b` - the start and end positions.
///
/// returns the bearing in degrees in the range `[0, 360)`, across the
/// antimeridian if that is shorter.
///
/// # Examples
/// ```
/// use sphere_nav::{rhumb, Coordinate};
///
/// let a = Coordinate::from_degrees(1.0, -179.0);
/// let b = Coordinate::from_degrees(1.0, 179.0);
///
/// assert_eq!(270.0, libm::round(rhumb::bearing(&a, &b).0));
/// assert_eq!(90.0, libm::round(rhumb::bearing(&b, &a).0));
/// ```
#[must_use]
pub fn bearing(a: &Coordinate, b: &Coordinate) -> Degrees {
    let phi1 = a.phi();
    let phi2 = b.phi();
    let mut delta_lambda = angle::to_radians(Degrees(b.longitude - a.longitude)).0;
    if delta_lambda > PI {
        delta_lambda -= TAU;
    }
    if delta_lambda < -PI {
        delta_lambda += TAU;
    }

    let theta = libm::atan2(delta_lambda, delta_psi(phi1, phi2));
    Degrees(angle::normalise_bearing(angle::to_degrees(Radians(theta)).0))
}

/// Calculate the destination position given a start position, distance and
/// bearing along a rhumb line.
///
/// A rhumb line that passes over a pole is reflected back from it.
/// * `origin` - the start position.
/// * `distance` - the distance to travel, in the units of `radius`.
/// * `bearing` - the rhumb line bearing.
/// * `radius` - the radius of the sphere.
///
/// returns the destination position.
#[must_use]
pub fn destination(
    origin: &Coordinate,
    distance: Metres,
    bearing: Degrees,
    radius: Metres,
) -> Coordinate {
    let phi1 = origin.phi();
    let lambda1 = origin.lambda();
    let theta = angle::to_radians(bearing).0;
    let delta = distance.0 / radius.0;

    let delta_phi = delta * libm::cos(theta);
    let mut phi2 = phi1 + delta_phi;
    // beyond a pole
    if libm::fabs(phi2) > FRAC_PI_2 {
        phi2 = angle::sign(phi2) * PI - phi2;
    }

    let q = stretch_factor(delta_phi, delta_psi(phi1, phi2), phi1);
    let delta_lambda = delta * libm::sin(theta) / q;

    Coordinate::from_radians(phi2, lambda1 + delta_lambda)
}

/// Calculate the rhumb line midpoint between a pair of positions.
/// * `a`, `b` - the positions.
///
/// returns the position half way along the rhumb line between `a` and `b`,
/// across the antimeridian if that is shorter.
#[must_use]
pub fn midpoint(a: &Coordinate, b: &Coordinate) -> Coordinate {
    let phi1 = a.phi();
    let mut lambda1 = a.lambda();
    let phi2 = b.phi();
    let lambda2 = b.lambda();
    if libm::fabs(lambda2 - lambda1) > PI {
        lambda1 += TAU;
    }

    let phi3 = (phi1 + phi2) / 2.0;
    let f1 = libm::tan(FRAC_PI_4 + phi1 / 2.0);
    let f2 = libm::tan(FRAC_PI_4 + phi2 / 2.0);
    let f3 = libm::tan(FRAC_PI_4 + phi3 / 2.0);
    let lambda3 = ((lambda2 - lambda1) * libm::log(f3) + lambda1 * libm::log(f2)
        - lambda2 * libm::log(f1))
        / libm::log(f2 / f1);
    // East-West rhumb line
    let lambda3 = if lambda3.is_finite() {
        lambda3
    } else {
        (lambda1 + lambda2) / 2.0
    };

    Coordinate::from_radians(phi3, lambda3)
}
