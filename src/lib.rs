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

//! sphere-nav
//!
//! A library for performing navigation calculations on a spherical Earth.
//!
//! The shortest path between two points on the surface of a sphere is a
//! [great circle](https://en.wikipedia.org/wiki/Great_circle) arc, also known
//! as an orthodrome. A path of constant compass bearing is a
//! [rhumb line](https://en.wikipedia.org/wiki/Rhumb_line), also known as a
//! loxodrome. A rhumb line is a straight line on a Mercator projection and is
//! generally longer than the great circle arc between the same points.
//!
//! This library calculates:
//!
//! - the distance, initial and final bearings between a pair of positions;
//! - midpoints, intermediate points and destination points along great circles;
//! - the intersection of two great circle paths;
//! - the across track and along track distances of a position relative to a
//!   great circle path;
//! - the maximum latitude of a great circle (Clairaut's formula) and the
//!   longitudes where it crosses a given latitude;
//! - the distance, bearing, destination and midpoint along rhumb lines;
//! - and the area of a polygon bounded by great circle arcs.
//!
//! ## Design
//!
//! The formulae are the classic spherical trigonometry formulae collected
//! by [Ed Williams](https://edwilliams.org/avform147.htm) and
//! [Chris Veness](https://www.movable-type.co.uk/scripts/latlong.html).
//! Each formula has numerically unstable regimes: near the poles, across the
//! antimeridian, for antipodal or parallel paths and for East-West rhumb
//! lines. These are detected and handled explicitly, see the documentation of
//! the individual functions.
//!
//! The `Coordinate` struct is an immutable latitude and longitude pair in
//! degrees. Every calculation returns a new value, longitudes of calculated
//! positions are normalised to the range `[-180, 180)`.
//!
//! Input coordinates are **not** validated: latitudes outside ±90° and
//! longitudes outside ±180° are passed straight through the formulae.
//! Degenerate inputs (e.g. the bearing between coincident positions) yield
//! NaN rather than an error. Operations that may have no meaningful result
//! return an `Option`.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - for `Degrees` and the
//!   `Validate` trait;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - for `LatLong`,
//!   which `Coordinate` converts to and from;
//! - [libm](https://crates.io/crates/libm) - for the trigonometric functions.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.
//!
//! ## Example
//!
//! ```
//! use sphere_nav::*;
//!
//! let cambridge = Coordinate::from_degrees(52.205, 0.119);
//! let paris = Coordinate::from_degrees(48.857, 2.351);
//!
//! let distance = cambridge.distance_to(&paris, earth::MEAN_RADIUS);
//! assert_eq!(404_279.0, libm::round(distance.0));
//!
//! let bearing = cambridge.bearing_to(&paris);
//! assert_eq!(156.2, libm::round(bearing.0 * 10.0) / 10.0);
//!
//! println!("Cambridge-Paris distance: {:?}", NauticalMiles::from(distance));
//! ```

#![cfg_attr(not(test), no_std)]

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod angle;
pub mod area;
pub mod earth;
pub mod great_circle;
pub mod intersection;
pub mod rhumb;

pub use angle_sc::{Degrees, Radians, Validate};
pub use area::area;
pub use great_circle::crossing_parallels;
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use intersection::intersection;
pub use unit_sphere::LatLong;

use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

/// A geographic position: a latitude and longitude in degrees.
///
/// Equality is exact floating point equality of both fields.
/// The values are not constrained to the valid latitude and longitude ranges,
/// see `is_valid`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// The latitude in degrees, positive North.
    latitude: f64,
    /// The longitude in degrees, positive East.
    longitude: f64,
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // 0.0 and -0.0 are equal so must hash the same
        (self.latitude + 0.0).to_bits().hash(state);
        (self.longitude + 0.0).to_bits().hash(state);
    }
}

impl Validate for Coordinate {
    /// Test whether a `Coordinate` is valid.
    /// Whether -90° <= `latitude` <= 90° and -180° <= `longitude` <= 180°.
    fn is_valid(&self) -> bool {
        libm::fabs(self.latitude) <= 90.0 && libm::fabs(self.longitude) <= 180.0
    }
}

impl Coordinate {
    /// Constructor.
    /// * `latitude` - the latitude in degrees.
    /// * `longitude` - the longitude in degrees.
    #[must_use]
    pub const fn new(latitude: Degrees, longitude: Degrees) -> Self {
        Self {
            latitude: latitude.0,
            longitude: longitude.0,
        }
    }

    /// Construct a `Coordinate` from raw degree values.
    /// * `latitude` - the latitude in degrees.
    /// * `longitude` - the longitude in degrees.
    #[must_use]
    pub const fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Construct a calculated `Coordinate` from radians, normalising the
    /// longitude to `[-180, 180)`.
    #[must_use]
    pub(crate) fn from_radians(phi: f64, lambda: f64) -> Self {
        Self::from_degrees(
            angle::to_degrees(Radians(phi)).0,
            angle::normalise_longitude(angle::to_degrees(Radians(lambda)).0),
        )
    }

    /// Accessor for the latitude.
    #[must_use]
    pub const fn latitude(&self) -> Degrees {
        Degrees(self.latitude)
    }

    /// Accessor for the longitude.
    #[must_use]
    pub const fn longitude(&self) -> Degrees {
        Degrees(self.longitude)
    }

    /// The latitude in radians.
    #[must_use]
    pub(crate) fn phi(&self) -> f64 {
        angle::to_radians(self.latitude()).0
    }

    /// The longitude in radians.
    #[must_use]
    pub(crate) fn lambda(&self) -> f64 {
        angle::to_radians(self.longitude()).0
    }

    /// Parse a `Coordinate` from its `"latitude,longitude"` form.
    /// * `text` - the text to parse.
    ///
    /// returns the `Coordinate` or None if `text` is not exactly two numbers
    /// separated by a single comma.
    ///
    /// # Examples
    /// ```
    /// use sphere_nav::Coordinate;
    ///
    /// let position = Coordinate::parse("52.205,0.119").unwrap();
    /// assert_eq!(52.205, position.latitude().0);
    /// assert_eq!(0.119, position.longitude().0);
    ///
    /// assert!(Coordinate::parse("52.205").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    /// The great circle distance to another position, see
    /// `great_circle::distance`.
    #[must_use]
    pub fn distance_to(&self, other: &Self, radius: Metres) -> Metres {
        great_circle::distance(self, other, radius)
    }

    /// The initial great circle bearing to another position, see
    /// `great_circle::bearing`.
    #[must_use]
    pub fn bearing_to(&self, other: &Self) -> Degrees {
        great_circle::bearing(self, other)
    }

    /// The final great circle bearing on arrival at another position, see
    /// `great_circle::final_bearing`.
    #[must_use]
    pub fn final_bearing_to(&self, other: &Self) -> Degrees {
        great_circle::final_bearing(self, other)
    }

    /// The great circle midpoint between this and another position.
    #[must_use]
    pub fn midpoint_to(&self, other: &Self) -> Self {
        great_circle::midpoint(self, other)
    }

    /// The position at `fraction` of the way along the great circle to another
    /// position, see `great_circle::intermediate_point`.
    #[must_use]
    pub fn intermediate_point_to(&self, other: &Self, fraction: f64) -> Self {
        great_circle::intermediate_point(self, other, fraction)
    }

    /// The position reached by travelling `distance` along the great circle
    /// with initial `bearing`, see `great_circle::destination`.
    #[must_use]
    pub fn destination(&self, distance: Metres, bearing: Degrees, radius: Metres) -> Self {
        great_circle::destination(self, distance, bearing, radius)
    }

    /// The signed distance from this position to the great circle through
    /// `segment`, see `great_circle::cross_track_distance`.
    #[must_use]
    pub fn cross_track_distance_to(&self, segment: &Segment, radius: Metres) -> Metres {
        great_circle::cross_track_distance(self, segment, radius)
    }

    /// The signed distance along `segment` to the point abeam this position,
    /// see `great_circle::along_track_distance`.
    #[must_use]
    pub fn along_track_distance_to(&self, segment: &Segment, radius: Metres) -> Metres {
        great_circle::along_track_distance(self, segment, radius)
    }

    /// The maximum latitude reached by a great circle through this position
    /// on `bearing`, see `great_circle::max_latitude`.
    #[must_use]
    pub fn max_latitude(&self, bearing: Degrees) -> Degrees {
        great_circle::max_latitude(self, bearing)
    }

    /// The minimum latitude reached by a great circle through this position
    /// on `bearing`.
    #[must_use]
    pub fn min_latitude(&self, bearing: Degrees) -> Degrees {
        great_circle::min_latitude(self, bearing)
    }

    /// The rhumb line distance to another position, see `rhumb::distance`.
    #[must_use]
    pub fn rhumb_distance_to(&self, other: &Self, radius: Metres) -> Metres {
        rhumb::distance(self, other, radius)
    }

    /// The rhumb line bearing to another position, see `rhumb::bearing`.
    #[must_use]
    pub fn rhumb_bearing_to(&self, other: &Self) -> Degrees {
        rhumb::bearing(self, other)
    }

    /// The position reached by travelling `distance` along the rhumb line
    /// of `bearing`, see `rhumb::destination`.
    #[must_use]
    pub fn rhumb_destination(&self, distance: Metres, bearing: Degrees, radius: Metres) -> Self {
        rhumb::destination(self, distance, bearing, radius)
    }

    /// The rhumb line midpoint between this and another position, see
    /// `rhumb::midpoint`.
    #[must_use]
    pub fn rhumb_midpoint_to(&self, other: &Self) -> Self {
        rhumb::midpoint(self, other)
    }
}

impl fmt::Display for Coordinate {
    /// Formats a `Coordinate` as `"latitude,longitude"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// The reasons that text could not be parsed as a `Coordinate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseCoordinateError {
    /// There is no comma separating the latitude and longitude.
    MissingSeparator,
    /// There is more than one comma.
    TooManyFields,
    /// The latitude is not a number.
    InvalidLatitude,
    /// The longitude is not a number.
    InvalidLongitude,
}

impl fmt::Display for ParseCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => f.write_str("missing ',' between latitude and longitude"),
            Self::TooManyFields => f.write_str("too many ',' separated fields"),
            Self::InvalidLatitude => f.write_str("invalid latitude"),
            Self::InvalidLongitude => f.write_str("invalid longitude"),
        }
    }
}

impl core::error::Error for ParseCoordinateError {}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Parse a `Coordinate` from `"latitude,longitude"`.
    /// No whitespace is permitted around the numbers.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (latitude, longitude) = text
            .split_once(',')
            .ok_or(ParseCoordinateError::MissingSeparator)?;
        if longitude.contains(',') {
            return Err(ParseCoordinateError::TooManyFields);
        }
        let latitude = latitude
            .parse::<f64>()
            .map_err(|_| ParseCoordinateError::InvalidLatitude)?;
        let longitude = longitude
            .parse::<f64>()
            .map_err(|_| ParseCoordinateError::InvalidLongitude)?;
        Ok(Self::from_degrees(latitude, longitude))
    }
}

impl From<&LatLong> for Coordinate {
    /// Convert a `LatLong` into a `Coordinate`.
    fn from(a: &LatLong) -> Self {
        Self::new(a.lat(), a.lon())
    }
}

impl From<&Coordinate> for LatLong {
    /// Convert a `Coordinate` into a `LatLong`.
    /// @pre the `Coordinate` is valid.
    fn from(a: &Coordinate) -> Self {
        Self::new(a.latitude(), a.longitude())
    }
}

/// A great circle path defined by a start position and an initial bearing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Course {
    /// The start position.
    origin: Coordinate,
    /// The initial bearing in degrees.
    bearing: f64,
}

impl Course {
    /// Constructor.
    /// * `origin` - the start position.
    /// * `bearing` - the initial bearing.
    #[must_use]
    pub const fn new(origin: Coordinate, bearing: Degrees) -> Self {
        Self {
            origin,
            bearing: bearing.0,
        }
    }

    /// Accessor for the start position.
    #[must_use]
    pub const fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Accessor for the initial bearing.
    #[must_use]
    pub const fn bearing(&self) -> Degrees {
        Degrees(self.bearing)
    }
}

impl From<&Segment> for Course {
    /// The great circle `Course` from the start of a `Segment` towards its end.
    fn from(segment: &Segment) -> Self {
        Self::new(
            segment.start,
            great_circle::bearing(&segment.start, &segment.end),
        )
    }
}

/// A great circle path defined by a start and an end position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// The start position.
    start: Coordinate,
    /// The end position.
    end: Coordinate,
}

impl Segment {
    /// Constructor.
    /// * `start` - the start position.
    /// * `end` - the end position.
    #[must_use]
    pub const fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    /// Accessor for the start position.
    #[must_use]
    pub const fn start(&self) -> Coordinate {
        self.start
    }

    /// Accessor for the end position.
    #[must_use]
    pub const fn end(&self) -> Coordinate {
        self.end
    }

    /// The great circle length of the `Segment`.
    /// * `radius` - the radius of the sphere.
    #[must_use]
    pub fn length(&self, radius: Metres) -> Metres {
        great_circle::distance(&self.start, &self.end, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of(a: &Coordinate) -> u64 {
        let mut hasher = DefaultHasher::new();
        a.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_coordinate_traits() {
        let a = Coordinate::new(Degrees(52.205), Degrees(0.119));
        assert_eq!(52.205, a.latitude().0);
        assert_eq!(0.119, a.longitude().0);
        assert!(a.is_valid());

        let b = Coordinate::from_degrees(52.205, 0.119);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        assert_ne!(a, Coordinate::from_degrees(0.119, 52.205));

        println!("Coordinate: {:?}", a);
    }

    #[test]
    fn test_coordinate_hash() {
        let zero = Coordinate::from_degrees(0.0, 0.0);
        let negative_zero = Coordinate::from_degrees(-0.0, -0.0);
        assert_eq!(zero, negative_zero);
        assert_eq!(hash_of(&zero), hash_of(&negative_zero));

        let mut set = HashSet::new();
        assert!(set.insert(Coordinate::from_degrees(1.0, 2.0)));
        assert!(set.insert(Coordinate::from_degrees(2.0, 1.0)));
        assert!(!set.insert(Coordinate::from_degrees(1.0, 2.0)));
        assert_eq!(2, set.len());
    }

    #[test]
    fn test_coordinate_is_valid() {
        assert!(Coordinate::from_degrees(90.0, 180.0).is_valid());
        assert!(Coordinate::from_degrees(-90.0, -180.0).is_valid());
        assert!(!Coordinate::from_degrees(90.000_001, 0.0).is_valid());
        assert!(!Coordinate::from_degrees(0.0, -180.000_001).is_valid());
        assert!(!Coordinate::from_degrees(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_coordinate_from_radians() {
        let a = Coordinate::from_radians(
            core::f64::consts::FRAC_PI_4,
            3.0 * core::f64::consts::FRAC_PI_2,
        );
        assert!(is_within_tolerance(45.0, a.latitude().0, 1e-12));
        assert!(is_within_tolerance(-90.0, a.longitude().0, 1e-12));
    }

    #[test]
    fn test_coordinate_display() {
        assert_eq!("52.205,0.119", Coordinate::from_degrees(52.205, 0.119).to_string());
        assert_eq!("-1,2.5", Coordinate::from_degrees(-1.0, 2.5).to_string());
        assert_eq!("0,-180", Coordinate::from_degrees(0.0, -180.0).to_string());
    }

    #[test]
    fn test_coordinate_from_str() {
        assert_eq!(
            Ok(Coordinate::from_degrees(42.0, -71.5)),
            "42,-71.5".parse::<Coordinate>()
        );
        assert_eq!(
            Err(ParseCoordinateError::MissingSeparator),
            "INVALID_STRING".parse::<Coordinate>()
        );
        assert_eq!(
            Err(ParseCoordinateError::MissingSeparator),
            "42".parse::<Coordinate>()
        );
        assert_eq!(
            Err(ParseCoordinateError::InvalidLongitude),
            "42,".parse::<Coordinate>()
        );
        assert_eq!(
            Err(ParseCoordinateError::InvalidLatitude),
            ",42".parse::<Coordinate>()
        );
        assert_eq!(
            Err(ParseCoordinateError::TooManyFields),
            "1,2,3".parse::<Coordinate>()
        );
        assert_eq!(
            Err(ParseCoordinateError::InvalidLatitude),
            " 1,2".parse::<Coordinate>()
        );

        assert_eq!("invalid longitude", ParseCoordinateError::InvalidLongitude.to_string());
    }

    #[test]
    fn test_coordinate_parse() {
        for text in ["INVALID_STRING", "42", "42,", ",42", "1,2,3", ""] {
            assert!(Coordinate::parse(text).is_none(), "{text}");
        }

        let values = [
            (52.205, 0.119),
            (-33.868_820, 151.209_296),
            (0.1 + 0.2, -179.999_999_999_9),
            (1e-300, -0.0),
            (90.0, 180.0),
        ];
        for (lat, lon) in values {
            let a = Coordinate::from_degrees(lat, lon);
            assert_eq!(Some(a), Coordinate::parse(&a.to_string()));
        }
    }

    #[test]
    fn test_lat_long_conversions() {
        let lat_long = LatLong::new(Degrees(51.4778), Degrees(-0.0015));
        let a = Coordinate::from(&lat_long);
        assert_eq!(51.4778, a.latitude().0);
        assert_eq!(-0.0015, a.longitude().0);

        let b = LatLong::from(&a);
        assert_eq!(51.4778, b.lat().0);
        assert_eq!(-0.0015, b.lon().0);
    }

    #[test]
    fn test_course_and_segment() {
        let cambridge = Coordinate::from_degrees(52.205, 0.119);
        let paris = Coordinate::from_degrees(48.857, 2.351);

        let course = Course::new(cambridge, Degrees(156.2));
        assert_eq!(cambridge, course.origin());
        assert_eq!(156.2, course.bearing().0);

        let segment = Segment::new(cambridge, paris);
        assert_eq!(cambridge, segment.start());
        assert_eq!(paris, segment.end());
        assert_eq!(404_279.0, libm::round(segment.length(earth::MEAN_RADIUS).0));

        let course = Course::from(&segment);
        assert_eq!(cambridge, course.origin());
        assert!(is_within_tolerance(156.167, course.bearing().0, 1e-3));
    }

    #[test]
    fn test_coordinate_methods() {
        let cambridge = Coordinate::from_degrees(52.205, 0.119);
        let paris = Coordinate::from_degrees(48.857, 2.351);
        let radius = earth::MEAN_RADIUS;

        assert_eq!(
            great_circle::distance(&cambridge, &paris, radius),
            cambridge.distance_to(&paris, radius)
        );
        assert_eq!(
            great_circle::bearing(&cambridge, &paris).0,
            cambridge.bearing_to(&paris).0
        );
        assert_eq!(
            great_circle::final_bearing(&cambridge, &paris).0,
            cambridge.final_bearing_to(&paris).0
        );
        assert_eq!(
            great_circle::midpoint(&cambridge, &paris),
            cambridge.midpoint_to(&paris)
        );
        assert_eq!(
            great_circle::intermediate_point(&cambridge, &paris, 0.25),
            cambridge.intermediate_point_to(&paris, 0.25)
        );
        assert_eq!(
            rhumb::distance(&cambridge, &paris, radius),
            cambridge.rhumb_distance_to(&paris, radius)
        );
        assert_eq!(
            rhumb::bearing(&cambridge, &paris).0,
            cambridge.rhumb_bearing_to(&paris).0
        );
        assert_eq!(
            rhumb::midpoint(&cambridge, &paris),
            cambridge.rhumb_midpoint_to(&paris)
        );
        assert_eq!(
            -cambridge.max_latitude(Degrees(45.0)).0,
            cambridge.min_latitude(Degrees(45.0)).0
        );
    }
}
