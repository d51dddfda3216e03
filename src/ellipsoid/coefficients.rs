// Copyright (c) 2024-2026 Ken Barker

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

//! This module contains the series used by Vincenty's formulae to convert
//! between great circle arcs on the auxiliary sphere and geodesics on the
//! ellipsoid.
//!
//! The equations are from T. Vincenty,
//! [Direct and Inverse Solutions of Geodesics on the Ellipsoid with application
//! of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf),
//! Survey Review XXIII, No. 176, April 1975.
//!
//! The `A` and `B` series are in `u^2 = cos^2(alpha) * e'^2`, where alpha is
//! the azimuth of the geodesic at the Equator and e' is the second
//! eccentricity of the ellipsoid.

#![allow(clippy::suboptimal_flops)]

use crate::geomath::polyval;

/// The coefficients of the polynomial in `u^2` in Vincenty's eq. 3,
/// highest order first.
const A_COEFFS: [f64; 4] = [-175.0, 320.0, -768.0, 4096.0];

/// The coefficients of the polynomial in `u^2` in Vincenty's eq. 4,
/// highest order first.
const B_COEFFS: [f64; 4] = [-47.0, 74.0, -128.0, 256.0];

/// The terms of a great circle arc on the auxiliary sphere used by the series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SigmaTerms {
    /// The arc length, sigma, in radians.
    pub sigma: f64,
    /// The sine of sigma.
    pub sin_sigma: f64,
    /// The cosine of sigma.
    pub cos_sigma: f64,
    /// The cosine of twice the arc length from the Equator to the mid point
    /// of the arc.
    pub cos_2sigma_m: f64,
}

impl SigmaTerms {
    /// Constructor.
    /// * `sigma` - the arc length in radians.
    /// * `sin_sigma`, `cos_sigma` - the sine and cosine of sigma.
    /// * `cos_2sigma_m` - the cosine of 2 * sigma_m.
    #[must_use]
    pub const fn new(sigma: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> Self {
        Self {
            sigma,
            sin_sigma,
            cos_sigma,
            cos_2sigma_m,
        }
    }

    /// 2 * cos^2(2 * sigma_m) - 1, common to `delta_sigma` and the longitude
    /// correction.
    #[must_use]
    const fn cos_2sigma_m_term(&self) -> f64 {
        -1.0 + 2.0 * self.cos_2sigma_m * self.cos_2sigma_m
    }
}

/// Vincenty's `A`, eq. 3.
/// * `u_sq` - `u^2`.
/// # Examples
/// ```
/// use wgs84_vincenty::ellipsoid::coefficients::evaluate_a;
///
/// // A meridian on a sphere
/// assert_eq!(1.0, evaluate_a(0.0));
/// ```
#[must_use]
pub fn evaluate_a(u_sq: f64) -> f64 {
    1.0 + u_sq / 16384.0 * polyval(&A_COEFFS, u_sq)
}

/// Vincenty's `B`, eq. 4.
/// * `u_sq` - `u^2`.
#[must_use]
pub fn evaluate_b(u_sq: f64) -> f64 {
    u_sq / 1024.0 * polyval(&B_COEFFS, u_sq)
}

/// Vincenty's `C`, eq. 10.
/// * `f` - the flattening of the ellipsoid.
/// * `cos_sq_alpha` - the square of the cosine of the azimuth at the Equator.
#[must_use]
pub fn evaluate_c(f: f64, cos_sq_alpha: f64) -> f64 {
    f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha))
}

/// Vincenty's `delta sigma`, eq. 6: the difference between the arc length on
/// the auxiliary sphere and the scaled geodesic length.
/// * `b` - Vincenty's `B`.
/// * `terms` - the arc terms.
#[must_use]
pub fn calculate_delta_sigma(b: f64, terms: &SigmaTerms) -> f64 {
    let sin_sigma = terms.sin_sigma;
    let cos_2sigma_m = terms.cos_2sigma_m;
    b * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (terms.cos_sigma * terms.cos_2sigma_m_term()
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)))
}

/// The difference between the longitude difference on the auxiliary sphere
/// and on the ellipsoid, from Vincenty's eq. 11.
/// * `f` - the flattening of the ellipsoid.
/// * `c` - Vincenty's `C`.
/// * `sin_alpha` - the sine of the azimuth at the Equator.
/// * `terms` - the arc terms.
#[must_use]
pub fn calculate_lambda_correction(f: f64, c: f64, sin_alpha: f64, terms: &SigmaTerms) -> f64 {
    (1.0 - c)
        * f
        * sin_alpha
        * (terms.sigma
            + c * terms.sin_sigma
                * (terms.cos_2sigma_m + c * terms.cos_sigma * terms.cos_2sigma_m_term()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::{calculate_sq_2nd_eccentricity, wgs84};
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_evaluate_a_and_b() {
        assert_eq!(1.0, evaluate_a(0.0));
        assert_eq!(0.0, evaluate_b(0.0));

        // azimuth 45 degrees at the Equator
        let u_sq = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
        assert!(is_within_tolerance(
            1.0008419055635631,
            evaluate_a(u_sq),
            2.0 * f64::EPSILON
        ));
        assert!(is_within_tolerance(
            0.0008410204515406976,
            evaluate_b(u_sq),
            f64::EPSILON
        ));

        // a meridian
        let u_sq = calculate_sq_2nd_eccentricity(wgs84::F);
        assert!(is_within_tolerance(
            1.0016827510415456,
            evaluate_a(u_sq),
            2.0 * f64::EPSILON
        ));
    }

    #[test]
    fn test_evaluate_c() {
        // Equatorial geodesic
        assert_eq!(0.0, evaluate_c(wgs84::F, 0.0));
        // sphere
        assert_eq!(0.0, evaluate_c(0.0, 0.5));

        assert!(is_within_tolerance(
            0.0004199795627304385,
            evaluate_c(wgs84::F, 0.5),
            f64::EPSILON
        ));
        assert!(is_within_tolerance(
            0.0008389052498964729,
            evaluate_c(wgs84::F, 1.0),
            f64::EPSILON
        ));
    }

    #[test]
    fn test_calculate_delta_sigma() {
        let u_sq = calculate_sq_2nd_eccentricity(wgs84::F) / 2.0;
        let b = evaluate_b(u_sq);

        let sigma = core::f64::consts::FRAC_PI_3;
        let (sin_sigma, cos_sigma) = libm::sincos(sigma);
        let terms = SigmaTerms::new(sigma, sin_sigma, cos_sigma, libm::cos(0.4 + sigma));
        assert!(is_within_tolerance(
            8.971928575087029e-05,
            calculate_delta_sigma(b, &terms),
            1e-18
        ));

        // no difference on a sphere
        assert_eq!(0.0, calculate_delta_sigma(0.0, &terms));
    }

    #[test]
    fn test_calculate_lambda_correction() {
        let sigma = core::f64::consts::FRAC_PI_2;
        let terms = SigmaTerms::new(sigma, 1.0, 0.0, 0.0);

        // Equatorial geodesic: C = 0, sin_alpha = 1
        let result = calculate_lambda_correction(wgs84::F, 0.0, 1.0, &terms);
        assert!(is_within_tolerance(
            wgs84::F * sigma,
            result,
            f64::EPSILON
        ));

        // Meridian: sin_alpha = 0
        let c = evaluate_c(wgs84::F, 1.0);
        assert_eq!(0.0, calculate_lambda_correction(wgs84::F, c, 0.0, &terms));
    }
}
