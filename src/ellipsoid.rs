// Copyright (c) 2024 Ken Barker

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

//! The ellipsoid module contains types and functions for defining an ellipsoid
//! given its Semimajor axis (the equivalent of its radius) and flattening ratio.
//!
//! It also contains the conversions between `geodetic` latitudes on the
//! ellipsoid and `parametric` (reduced) latitudes on the auxiliary sphere
//! used by Vincenty's formulae.

#![allow(clippy::suboptimal_flops)]

pub mod coefficients;
pub mod wgs84;

use crate::Metres;
use angle_sc::Angle;

/// Calculate the Semiminor axis of an ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use wgs84_vincenty::Metres;
/// use wgs84_vincenty::ellipsoid::{calculate_minor_axis, wgs84};
///
/// // The WGS 84 Semiminor axis measured in metres.
/// let b : Metres = Metres(6_356_752.314_245_179);
/// assert_eq!(b, calculate_minor_axis(wgs84::A, wgs84::F));
/// ```
#[must_use]
pub fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the square of the Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use wgs84_vincenty::ellipsoid::{calculate_sq_eccentricity, wgs84};
///
/// // The WGS 84 sq_eccentricity.
/// assert_eq!(0.0066943799901413165, calculate_sq_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the square of the second Eccentricity of an ellipsoid.
///
/// This is (a^2 - b^2) / b^2, the factor used to derive Vincenty's `u^2`
/// from the square of the cosine of the azimuth at the Equator.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use wgs84_vincenty::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
///
/// // The WGS 84 sq 2nd eccentricity.
/// assert_eq!(0.006739496742276434, calculate_sq_2nd_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_2nd_eccentricity(f: f64) -> f64 {
    let one_minus_f = 1.0 - f;
    calculate_sq_eccentricity(f) / (one_minus_f * one_minus_f)
}

/// Function to convert a `geodetic` Latitude to a `parametric` Latitude on the
/// auxiliary sphere.
///
/// Equivalent to `atan((1 - f) * tan(lat))`, but exact at the poles.
/// * `lat` - the `geodetic` Latitude
/// * `one_minus_f` - one minus the flattening ratio.
#[must_use]
pub fn calculate_parametric_latitude(lat: Angle, one_minus_f: f64) -> Angle {
    Angle::from_y_x(one_minus_f * lat.sin().0, lat.cos().0)
}

/// Function to convert a `parametric` Latitude on the auxiliary sphere to a
/// `geodetic` Latitude.
/// * `lat` - the `parametric` Latitude
/// * `one_minus_f` - one minus the flattening ratio.
#[must_use]
pub fn calculate_geodetic_latitude(lat: Angle, one_minus_f: f64) -> Angle {
    Angle::from_y_x(lat.sin().0 / one_minus_f, lat.cos().0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::{is_within_tolerance, Degrees, Radians};

    #[test]
    fn test_calculate_minor_axis() {
        let sphere = calculate_minor_axis(Metres(1000.0), 0.0);
        assert_eq!(Metres(1000.0), sphere);

        let b = calculate_minor_axis(wgs84::A, wgs84::F);
        let f = (wgs84::A.0 - b.0) / wgs84::A.0;
        assert!(is_within_tolerance(wgs84::F, f, 1e-15));
    }

    #[test]
    fn test_calculate_sq_2nd_eccentricity() {
        let b = calculate_minor_axis(wgs84::A, wgs84::F);
        let ep_2 = (wgs84::A.0 * wgs84::A.0 - b.0 * b.0) / (b.0 * b.0);
        assert!(is_within_tolerance(
            ep_2,
            calculate_sq_2nd_eccentricity(wgs84::F),
            1e-15
        ));
        assert_eq!(0.0, calculate_sq_2nd_eccentricity(0.0));
    }

    #[test]
    fn test_calculate_parametric_and_geodetic_latitude() {
        let one_minus_f = 1.0 - wgs84::F;

        for i in -90..91 {
            let latitude = i as f64;
            let lat = Angle::from(Degrees(latitude));
            let parametric_lat = calculate_parametric_latitude(lat, one_minus_f);
            let result = calculate_geodetic_latitude(parametric_lat, one_minus_f);

            assert!(is_within_tolerance(
                Radians::from(lat).0,
                Radians::from(result).0,
                f64::EPSILON
            ));
        }
    }

    #[test]
    fn test_calculate_parametric_latitude() {
        let one_minus_f = 1.0 - wgs84::F;

        // The parametric latitude is closer to the Equator
        let lat = Angle::from(Degrees(45.0));
        let beta = calculate_parametric_latitude(lat, one_minus_f);
        let expected = libm::atan(one_minus_f * libm::tan(core::f64::consts::FRAC_PI_4));
        assert!(is_within_tolerance(
            expected,
            Radians::from(beta).0,
            8.0 * f64::EPSILON
        ));

        // The poles and the Equator are unchanged
        let north_pole = calculate_parametric_latitude(Angle::from(Degrees(90.0)), one_minus_f);
        assert!(is_within_tolerance(
            90.0,
            Degrees::from(north_pole).0,
            32.0 * f64::EPSILON
        ));
        let equator = calculate_parametric_latitude(Angle::from(Degrees(0.0)), one_minus_f);
        assert_eq!(0.0, equator.sin().0);
    }
}
