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

//! The angle module contains functions for converting between degrees and
//! radians and for normalising longitudes and bearings.
//!
//! Conversions take and return the `angle_sc` newtypes, so a formula converts
//! `Degrees` to `Radians` once at the start and back again at the end.
//! The normalisation functions operate on raw `f64` degrees.

use angle_sc::{Degrees, Radians};

/// Convert an angle in degrees to radians.
/// * `degrees` - the angle in degrees.
/// # Examples
/// ```
/// use sphere_nav::angle::to_radians;
/// use sphere_nav::Degrees;
///
/// assert_eq!(core::f64::consts::PI, to_radians(Degrees(180.0)).0);
/// ```
#[must_use]
pub fn to_radians(degrees: Degrees) -> Radians {
    Radians(degrees.0.to_radians())
}

/// Convert an angle in radians to degrees.
/// * `radians` - the angle in radians.
#[must_use]
pub fn to_degrees(radians: Radians) -> Degrees {
    Degrees::from(radians)
}

/// The sign of a value: -1.0 for negative, 0.0 for zero and 1.0 for positive.
///
/// Unlike `f64::signum`, zero (of either sign) returns zero.
/// NaN returns zero.
/// * `value` - the value.
#[must_use]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// The remainder of `value` divided by `modulus`, in the range `[0, modulus)`.
#[must_use]
fn modulo(value: f64, modulus: f64) -> f64 {
    let remainder = value % modulus;
    if remainder < 0.0 {
        remainder + modulus
    } else {
        remainder
    }
}

/// Normalise a longitude in degrees into the range `[-180, 180)`.
///
/// The value is offset by 540° before the modulo so that values slightly
/// outside ±180° from accumulated rounding wrap onto the correct side.
/// * `degrees` - the longitude in degrees.
/// # Examples
/// ```
/// use sphere_nav::angle::normalise_longitude;
///
/// assert_eq!(-179.0, normalise_longitude(181.0));
/// assert_eq!(179.0, normalise_longitude(-181.0));
/// assert_eq!(-180.0, normalise_longitude(180.0));
/// ```
#[must_use]
pub fn normalise_longitude(degrees: f64) -> f64 {
    modulo(degrees + 540.0, 360.0) - 180.0
}

/// Normalise a bearing in degrees into the range `[0, 360)`.
/// * `degrees` - the bearing in degrees, normally in the range `[-180, 180]`.
#[must_use]
pub fn normalise_bearing(degrees: f64) -> f64 {
    modulo(degrees + 360.0, 360.0)
}

/// Normalise the difference between two bearings into the range `[-180, 180)`.
/// * `delta` - the bearing difference in degrees.
#[must_use]
pub fn normalise_turn(delta: f64) -> f64 {
    normalise_longitude(delta)
}
