// Copyright (c) 2024-2025 Ken Barker

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

//! wgs84-vincenty
//!
//! A library for solving the direct and inverse geodesic problems on the
//! [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid using
//! [Vincenty's formulae](https://en.wikipedia.org/wiki/Vincenty%27s_formulae).
//!
//! - the inverse problem: given two positions, calculate the distance between
//!   them and the bearings at each end of the geodesic joining them;
//! - the direct problem: given a start position, bearing and distance,
//!   calculate the finish position and its bearing.
//!
//! ## Design
//!
//! Vincenty's formulae map the ellipsoid onto an auxiliary sphere using
//! `parametric` (reduced) latitudes and iterate on a great circle arc on the
//! sphere until the correction for the flattening of the ellipsoid converges.
//!
//! The iteration of the inverse solution does not converge for nearly
//! antipodal points. Both solutions return a [`Solution`] which records
//! whether the iteration converged and how many iterations were performed:
//! - [`Vincenty::inverse`] treats a solution that has not converged as an error;
//! - [`Vincenty::direct`] returns the estimate from the last iteration.
//!
//! The library also contains robust angle primitives in the [`geomath`]
//! module (exact degree reduction, angle normalisation and an error-free sum)
//! and a compensated [`Accumulator`].
//!
//! The `Ellipsoid` class represents an ellipsoid of revolution.
//! The static `WGS84_ELLIPSOID` represents the WGS-84 `Ellipsoid` which is used
//! by `Vincenty::default()` and the crate level `inverse` and `direct` functions.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians`;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them;
//! - [log](https://crates.io/crates/log) - to report iteration counts and
//!   convergence failures;
//! - [thiserror](https://crates.io/crates/thiserror) - to define `Error`.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.

#![cfg_attr(not(test), no_std)]

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod accumulator;
pub mod ellipsoid;
pub mod error;
pub mod geomath;
pub mod vincenty;

pub use accumulator::Accumulator;
pub use angle_sc::{Angle, Degrees, Radians};
pub use error::Error;
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use unit_sphere::LatLong;
pub use vincenty::{DirectResult, InverseResult, Solution, Vincenty};

use lazy_static::lazy_static;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    #[must_use]
    pub fn new(a: Metres, f: f64) -> Self {
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            one_minus_f: 1.0 - f,
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
        }
    }

    /// Constructor that validates its parameters.
    /// * `a` - the Semimajor axis of the `Ellipsoid`, positive and finite.
    /// * `f` - the flattening of the `Ellipsoid`, finite and less than one.
    ///
    /// # Errors
    ///
    /// `Error::InvalidEllipsoid` if the parameters do not describe an ellipsoid.
    pub fn try_new(a: Metres, f: f64) -> Result<Self, Error> {
        if geomath::is_finite(a.0) && 0.0 < a.0 && geomath::is_finite(f) && f < 1.0 {
            Ok(Self::new(a, f))
        } else {
            Err(Error::InvalidEllipsoid { a: a.0, f })
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// Convert a geodetic Latitude to a parametric Latitude on the
    /// auxiliary sphere.
    /// * `lat` - the geodetic Latitude
    #[must_use]
    pub fn calculate_parametric_latitude(&self, lat: Angle) -> Angle {
        ellipsoid::calculate_parametric_latitude(lat, self.one_minus_f)
    }

    /// Convert a parametric Latitude on the auxiliary sphere to a
    /// geodetic Latitude.
    /// * `beta` - the parametric Latitude
    #[must_use]
    pub fn calculate_geodetic_latitude(&self, beta: Angle) -> Angle {
        ellipsoid::calculate_geodetic_latitude(beta, self.one_minus_f)
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Ellipsoid`.
    pub static ref WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();
}

/// Calculate the geodesic distance and bearings between a pair of positions
/// on the WGS-84 ellipsoid.
/// * `lat1`, `lon1` - the start position in degrees.
/// * `lat2`, `lon2` - the finish position in degrees.
///
/// returns the distance in metres and the bearings at the start and finish
/// positions in degrees, in the range [0, 360).
///
/// # Errors
///
/// `Error::NotConverged` for nearly antipodal positions,
/// `Error::InvalidLatitude` or `Error::InvalidLongitude` for invalid positions.
///
/// # Examples
/// ```
/// use wgs84_vincenty::*;
///
/// // Sydney to Los Angeles
/// let result = inverse(-33.9399, 151.1753, 33.9416, -118.4085).unwrap();
///
/// let distance_nm = NauticalMiles::from(result.distance);
/// println!("Sydney-Los Angeles distance: {:?}", distance_nm);
/// assert!((result.distance.0 - 12_050_430.0).abs() < 1.0);
/// assert!((result.initial_bearing.0 - 61.168).abs() < 0.001);
///
/// // The points are too close to antipodal for the iteration to converge.
/// assert_eq!(
///     Err(Error::NotConverged { iterations: 200 }),
///     inverse(0.0, 0.0, 0.5, 179.7)
/// );
/// ```
#[allow(clippy::similar_names)]
pub fn inverse(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<InverseResult, Error> {
    let a = LatLong::new(Degrees(lat1), Degrees(lon1));
    let b = LatLong::new(Degrees(lat2), Degrees(lon2));
    Vincenty::default().inverse(&a, &b)
}

/// Calculate the position and bearing at a distance along a geodesic from
/// a start position on the WGS-84 ellipsoid.
/// * `lat1`, `lon1` - the start position in degrees.
/// * `bearing` - the bearing at the start position in degrees.
/// * `distance` - the distance along the geodesic in metres.
///
/// returns the finish position in degrees, with longitude in the range
/// (-180, 180], and the bearing at the finish position in degrees.
///
/// # Errors
///
/// `Error::InvalidLatitude`, `Error::InvalidLongitude`,
/// `Error::InvalidBearing` or `Error::InvalidDistance` for invalid parameters.
///
/// # Examples
/// ```
/// use wgs84_vincenty::*;
///
/// // 3000 km South East from Phoenix
/// let result = direct(33.6891, -112.0410, 120.0, 3_000_000.0).unwrap();
/// assert!((result.latitude.0 - 17.73992).abs() < 1e-5);
/// assert!((result.longitude.0 - -87.71399).abs() < 1e-5);
/// assert!((result.final_bearing.0 - 130.79039).abs() < 1e-5);
/// ```
pub fn direct(lat1: f64, lon1: f64, bearing: f64, distance: f64) -> Result<DirectResult, Error> {
    let a = LatLong::new(Degrees(lat1), Degrees(lon1));
    Vincenty::default().direct(&a, Degrees(bearing), Metres(distance))
}
