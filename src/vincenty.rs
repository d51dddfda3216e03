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

//! The vincenty module contains Vincenty's iterative solutions of the direct
//! and inverse geodesic problems on an ellipsoid.
//!
//! Both solutions iterate on a great circle arc on the auxiliary sphere:
//! - the inverse solution iterates on the longitude difference, lambda;
//! - the direct solution iterates on the arc length, sigma.
//!
//! The inverse solution fails to converge for nearly antipodal points.
//! The result of both solutions is a [`Solution`], so the caller decides
//! whether a solution that has not converged is an error or an estimate.

#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]

use crate::ellipsoid::coefficients::{
    calculate_delta_sigma, calculate_lambda_correction, evaluate_a, evaluate_b, evaluate_c,
    SigmaTerms,
};
use crate::{geomath, Ellipsoid, Error, Metres, WGS84_ELLIPSOID};
use angle_sc::trig::UnitNegRange;
use angle_sc::{Angle, Degrees, Radians};
use log::{debug, trace};
use unit_sphere::LatLong;

/// The default convergence tolerance, in Radians.
pub const TOLERANCE: Radians = Radians(1.0e-12);

/// The default maximum number of iterations of the inverse solution.
pub const MAX_INVERSE_ITERATIONS: u32 = 200;

/// The default maximum number of iterations of the direct solution.
pub const MAX_DIRECT_ITERATIONS: u32 = 100;

/// The solution of the inverse problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseResult {
    /// The geodesic distance between the points.
    pub distance: Metres,
    /// The bearing at the start point, in the range [0, 360).
    pub initial_bearing: Degrees,
    /// The bearing at the finish point, in the range [0, 360).
    pub final_bearing: Degrees,
}

impl Default for InverseResult {
    /// The result for coincident points.
    fn default() -> Self {
        Self {
            distance: Metres(0.0),
            initial_bearing: Degrees(0.0),
            final_bearing: Degrees(0.0),
        }
    }
}

/// The solution of the direct problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectResult {
    /// The latitude of the finish point, in the range [-90, 90].
    pub latitude: Degrees,
    /// The longitude of the finish point, in the range (-180, 180].
    pub longitude: Degrees,
    /// The bearing at the finish point, in the range [0, 360).
    pub final_bearing: Degrees,
}

impl DirectResult {
    /// The finish point as a `LatLong`.
    #[must_use]
    pub fn lat_long(&self) -> LatLong {
        LatLong::new(self.latitude, self.longitude)
    }
}

/// The outcome of an iterative solution.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Solution<T> {
    /// The iteration converged within the tolerance.
    Converged {
        /// The solution.
        value: T,
        /// The number of iterations performed.
        iterations: u32,
    },
    /// The iteration reached its maximum number of iterations.
    NotConverged {
        /// The solution from the last iteration.
        estimate: T,
        /// The number of iterations performed.
        iterations: u32,
    },
}

impl<T> Solution<T> {
    fn new(value: T, iterations: u32, converged: bool) -> Self {
        if converged {
            Self::Converged { value, iterations }
        } else {
            Self::NotConverged {
                estimate: value,
                iterations,
            }
        }
    }

    /// Whether the iteration converged.
    #[must_use]
    pub const fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// The number of iterations performed.
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        match self {
            Self::Converged { iterations, .. } | Self::NotConverged { iterations, .. } => {
                *iterations
            }
        }
    }

    /// The solution, whether or not the iteration converged.
    #[must_use]
    pub const fn value(&self) -> &T {
        match self {
            Self::Converged { value, .. } => value,
            Self::NotConverged { estimate, .. } => estimate,
        }
    }

    /// The converged solution.
    ///
    /// # Errors
    ///
    /// `Error::NotConverged` if the iteration did not converge.
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Self::Converged { value, .. } => Ok(value),
            Self::NotConverged { iterations, .. } => Err(Error::NotConverged { iterations }),
        }
    }

    /// The solution, whether or not the iteration converged.
    #[must_use]
    pub fn into_estimate(self) -> T {
        match self {
            Self::Converged { value, .. } => value,
            Self::NotConverged { estimate, .. } => estimate,
        }
    }
}

/// Log the outcome of a solution.
fn log_solution<T>(problem: &str, solution: Solution<T>) -> Solution<T> {
    match &solution {
        Solution::Converged { iterations, .. } => {
            trace!("Vincenty {problem} converged after {iterations} iterations");
        }
        Solution::NotConverged { iterations, .. } => {
            debug!("Vincenty {problem} did not converge after {iterations} iterations");
        }
    }
    solution
}

/// Convert a latitude in degrees to an `Angle`.
///
/// # Errors
///
/// `Error::InvalidLatitude` if the latitude is not in the range [-90, 90].
fn validate_latitude(lat: Degrees) -> Result<Angle, Error> {
    let lat = geomath::lat_fix(lat.0).ok_or(Error::InvalidLatitude(lat.0))?;
    let (sin_lat, cos_lat) = geomath::sincosd(lat);
    Ok(Angle::new(UnitNegRange(sin_lat), UnitNegRange(cos_lat)))
}

/// Check that a longitude in degrees is finite.
///
/// # Errors
///
/// `Error::InvalidLongitude` if the longitude is not finite.
fn validate_longitude(lon: Degrees) -> Result<f64, Error> {
    if geomath::is_finite(lon.0) {
        Ok(lon.0)
    } else {
        Err(Error::InvalidLongitude(lon.0))
    }
}

/// Normalise a bearing in degrees to the range [0, 360).
#[must_use]
fn normalize_bearing(bearing: f64) -> Degrees {
    let bearing = bearing % 360.0;
    let bearing = if bearing < 0.0 {
        bearing + 360.0
    } else {
        // convert -0.0 to 0.0
        bearing + 0.0
    };
    // a tiny negative bearing rounds up to 360
    Degrees(if bearing < 360.0 { bearing } else { 0.0 })
}

/// Vincenty's direct and inverse solutions on an `Ellipsoid`.
///
/// # Examples
/// ```
/// use wgs84_vincenty::*;
///
/// let vincenty = Vincenty::default();
///
/// let berlin = LatLong::new(Degrees(52.5548), Degrees(13.29));
/// let moscow = LatLong::new(Degrees(55.9736), Degrees(37.4125));
/// let result = vincenty.inverse(&berlin, &moscow).unwrap();
///
/// let distance_nm = NauticalMiles::from(result.distance);
/// println!("Berlin-Moscow distance: {:?}", distance_nm);
/// assert!((result.initial_bearing.0 - 66.742).abs() < 0.001);
///
/// let end = vincenty.direct(&berlin, result.initial_bearing, result.distance).unwrap();
/// assert!((end.latitude.0 - 55.9736).abs() < 1e-9);
/// assert!((end.longitude.0 - 37.4125).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vincenty<'a> {
    /// A reference to the underlying `Ellipsoid`.
    ellipsoid: &'a Ellipsoid,
    /// The convergence tolerance.
    tolerance: Radians,
    /// The maximum number of iterations of the inverse solution.
    max_inverse_iterations: u32,
    /// The maximum number of iterations of the direct solution.
    max_direct_iterations: u32,
}

impl Default for Vincenty<'static> {
    /// Vincenty's solutions on the WGS-84 `Ellipsoid` with the default settings.
    fn default() -> Self {
        Self::new(&WGS84_ELLIPSOID)
    }
}

impl<'a> Vincenty<'a> {
    /// Constructor, with the default tolerance and maximum iterations.
    /// * `ellipsoid` - a reference to the `Ellipsoid`.
    #[must_use]
    pub const fn new(ellipsoid: &'a Ellipsoid) -> Self {
        Self {
            ellipsoid,
            tolerance: TOLERANCE,
            max_inverse_iterations: MAX_INVERSE_ITERATIONS,
            max_direct_iterations: MAX_DIRECT_ITERATIONS,
        }
    }

    /// Set the convergence tolerance.
    /// * `tolerance` - the tolerance in Radians.
    #[must_use]
    pub const fn with_tolerance(self, tolerance: Radians) -> Self {
        Self { tolerance, ..self }
    }

    /// Set the maximum number of iterations of the inverse solution.
    /// * `max_iterations` - at least one iteration is always performed.
    #[must_use]
    pub const fn with_max_inverse_iterations(self, max_iterations: u32) -> Self {
        Self {
            max_inverse_iterations: max_iterations,
            ..self
        }
    }

    /// Set the maximum number of iterations of the direct solution.
    /// * `max_iterations` - at least one iteration is always performed.
    #[must_use]
    pub const fn with_max_direct_iterations(self, max_iterations: u32) -> Self {
        Self {
            max_direct_iterations: max_iterations,
            ..self
        }
    }

    /// Accessor for the reference to the underlying `Ellipsoid`.
    #[must_use]
    pub const fn ellipsoid(&self) -> &Ellipsoid {
        self.ellipsoid
    }

    /// Accessor for the convergence tolerance.
    #[must_use]
    pub const fn tolerance(&self) -> Radians {
        self.tolerance
    }

    /// Accessor for the maximum number of iterations of the inverse solution.
    #[must_use]
    pub const fn max_inverse_iterations(&self) -> u32 {
        self.max_inverse_iterations
    }

    /// Accessor for the maximum number of iterations of the direct solution.
    #[must_use]
    pub const fn max_direct_iterations(&self) -> u32 {
        self.max_direct_iterations
    }

    /// Solve the inverse problem: the distance and bearings between a pair
    /// of positions.
    /// * `a`, `b` - the start and finish positions in geodetic coordinates.
    ///
    /// returns the `Solution`, converged or not.
    ///
    /// # Errors
    ///
    /// `Error::InvalidLatitude` or `Error::InvalidLongitude` for an invalid
    /// position.
    pub fn solve_inverse(
        &self,
        a: &LatLong,
        b: &LatLong,
    ) -> Result<Solution<InverseResult>, Error> {
        let lat1 = validate_latitude(a.lat())?;
        let lat2 = validate_latitude(b.lat())?;
        let lon1 = validate_longitude(a.lon())?;
        let lon2 = validate_longitude(b.lon())?;

        let f = self.ellipsoid.f();

        // project latitudes onto the auxiliary sphere
        let beta1 = self.ellipsoid.calculate_parametric_latitude(lat1);
        let beta2 = self.ellipsoid.calculate_parametric_latitude(lat2);
        let (sin_u1, cos_u1) = (beta1.sin().0, beta1.cos().0);
        let (sin_u2, cos_u2) = (beta2.sin().0, beta2.cos().0);

        // the longitude difference on the ellipsoid, in the range (-pi, pi]
        let l = geomath::ang_diff(lon1, lon2).0.to_radians();

        let mut lambda = l;
        let mut iterations = 0;
        loop {
            let (sin_lambda, cos_lambda) = libm::sincos(lambda);
            let y = cos_u2 * sin_lambda;
            let x = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
            let sin_sigma = geomath::hypot(y, x);
            let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            if sin_sigma == 0.0 {
                if 0.0 < cos_sigma {
                    debug!("Vincenty inverse: coincident points");
                    return Ok(Solution::Converged {
                        value: InverseResult::default(),
                        iterations,
                    });
                }

                // opposite poles: half a meridian, where delta_sigma is zero
                debug!("Vincenty inverse: opposite poles");
                let distance = Metres(
                    self.ellipsoid.b().0 * evaluate_a(self.ellipsoid.ep_2()) * core::f64::consts::PI,
                );
                let bearing = Degrees(if 0.0 < sin_u1 { 180.0 } else { 0.0 });
                return Ok(Solution::Converged {
                    value: InverseResult {
                        distance,
                        initial_bearing: bearing,
                        final_bearing: bearing,
                    },
                    iterations,
                });
            }

            let sigma = libm::atan2(sin_sigma, cos_sigma);
            let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
            let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
            let cos_2sigma_m = cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha;
            // an equatorial line: cos_sq_alpha is zero
            let cos_2sigma_m = if cos_2sigma_m.is_nan() {
                0.0
            } else {
                cos_2sigma_m
            };
            let terms = SigmaTerms::new(sigma, sin_sigma, cos_sigma, cos_2sigma_m);

            let c = evaluate_c(f, cos_sq_alpha);
            let previous = lambda;
            lambda = l + calculate_lambda_correction(f, c, sin_alpha, &terms);
            iterations += 1;

            let converged = libm::fabs(lambda - previous) <= self.tolerance.0;
            if converged || self.max_inverse_iterations <= iterations {
                let u_sq = cos_sq_alpha * self.ellipsoid.ep_2();
                let delta_sigma = calculate_delta_sigma(evaluate_b(u_sq), &terms);
                let distance =
                    Metres(self.ellipsoid.b().0 * evaluate_a(u_sq) * (sigma - delta_sigma));

                let initial_bearing = normalize_bearing(geomath::atan2d(y, x));
                let final_bearing = normalize_bearing(geomath::atan2d(
                    cos_u1 * sin_lambda,
                    cos_u1 * sin_u2 * cos_lambda - sin_u1 * cos_u2,
                ));

                let value = InverseResult {
                    distance,
                    initial_bearing,
                    final_bearing,
                };
                return Ok(log_solution(
                    "inverse",
                    Solution::new(value, iterations, converged),
                ));
            }
        }
    }

    /// Calculate the distance and bearings between a pair of positions.
    /// * `a`, `b` - the start and finish positions in geodetic coordinates.
    ///
    /// # Errors
    ///
    /// `Error::NotConverged` if the solution did not converge, e.g. for
    /// nearly antipodal points; `Error::InvalidLatitude` or
    /// `Error::InvalidLongitude` for an invalid position.
    pub fn inverse(&self, a: &LatLong, b: &LatLong) -> Result<InverseResult, Error> {
        self.solve_inverse(a, b)?.into_result()
    }

    /// Solve the direct problem: the position and bearing at a distance
    /// along a geodesic from a start position.
    /// * `a` - the start position in geodetic coordinates.
    /// * `bearing` - the bearing at the start position.
    /// * `distance` - the distance along the geodesic.
    ///
    /// returns the `Solution`, converged or not.
    ///
    /// # Errors
    ///
    /// `Error::InvalidLatitude`, `Error::InvalidLongitude`,
    /// `Error::InvalidBearing` or `Error::InvalidDistance` for invalid
    /// parameters.
    pub fn solve_direct(
        &self,
        a: &LatLong,
        bearing: Degrees,
        distance: Metres,
    ) -> Result<Solution<DirectResult>, Error> {
        let lat1 = validate_latitude(a.lat())?;
        let lon1 = validate_longitude(a.lon())?;
        if !geomath::is_finite(bearing.0) {
            return Err(Error::InvalidBearing(bearing.0));
        }
        if !geomath::is_finite(distance.0) {
            return Err(Error::InvalidDistance(distance.0));
        }

        let f = self.ellipsoid.f();
        let (sin_alpha1, cos_alpha1) = geomath::sincosd(bearing.0);

        let beta1 = self.ellipsoid.calculate_parametric_latitude(lat1);
        let (sin_u1, cos_u1) = (beta1.sin().0, beta1.cos().0);

        // the arc length from the Northbound Equator crossing to the start
        let sigma1 = libm::atan2(sin_u1, cos_u1 * cos_alpha1);

        // the azimuth at the Equator crossing
        let sin_alpha = cos_u1 * sin_alpha1;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        let u_sq = cos_sq_alpha * self.ellipsoid.ep_2();
        let b_coeff = evaluate_b(u_sq);

        // the arc length on the auxiliary sphere without delta_sigma
        let sigma0 = distance.0 / (self.ellipsoid.b().0 * evaluate_a(u_sq));

        let arc_terms = |sigma: f64| {
            let (sin_sigma, cos_sigma) = libm::sincos(sigma);
            SigmaTerms::new(sigma, sin_sigma, cos_sigma, libm::cos(2.0 * sigma1 + sigma))
        };

        let mut sigma = sigma0;
        let mut iterations = 0;
        let (terms, converged) = loop {
            let terms = arc_terms(sigma);
            let previous = sigma;
            sigma = sigma0 + calculate_delta_sigma(b_coeff, &terms);
            iterations += 1;

            let converged = libm::fabs(sigma - previous) <= self.tolerance.0;
            if converged || self.max_direct_iterations <= iterations {
                break (terms, converged);
            }
        };

        // the finish point uses the terms of the last iteration,
        // only the longitude correction uses the updated sigma
        let terms = SigmaTerms { sigma, ..terms };
        let tmp = sin_u1 * terms.sin_sigma - cos_u1 * terms.cos_sigma * cos_alpha1;

        // the finish point latitude
        let beta2 = Angle::from_y_x(
            sin_u1 * terms.cos_sigma + cos_u1 * terms.sin_sigma * cos_alpha1,
            geomath::hypot(sin_alpha, tmp),
        );
        let lat2 = self.ellipsoid.calculate_geodetic_latitude(beta2);

        // the finish point longitude
        let lambda = libm::atan2(
            terms.sin_sigma * sin_alpha1,
            cos_u1 * terms.cos_sigma - sin_u1 * terms.sin_sigma * cos_alpha1,
        );
        let c = evaluate_c(f, cos_sq_alpha);
        let delta_lon = lambda - calculate_lambda_correction(f, c, sin_alpha, &terms);

        let value = DirectResult {
            latitude: Degrees(geomath::atan2d(lat2.sin().0, lat2.cos().0)),
            longitude: Degrees(geomath::ang_normalize(lon1 + delta_lon.to_degrees())),
            final_bearing: normalize_bearing(geomath::atan2d(sin_alpha, -tmp)),
        };
        Ok(log_solution(
            "direct",
            Solution::new(value, iterations, converged),
        ))
    }

    /// Calculate the position and bearing at a distance along a geodesic
    /// from a start position.
    ///
    /// If the solution does not converge, the estimate from the last
    /// iteration is returned. Use `solve_direct` to detect it.
    /// * `a` - the start position in geodetic coordinates.
    /// * `bearing` - the bearing at the start position.
    /// * `distance` - the distance along the geodesic.
    ///
    /// # Errors
    ///
    /// `Error::InvalidLatitude`, `Error::InvalidLongitude`,
    /// `Error::InvalidBearing` or `Error::InvalidDistance` for invalid
    /// parameters.
    pub fn direct(
        &self,
        a: &LatLong,
        bearing: Degrees,
        distance: Metres,
    ) -> Result<DirectResult, Error> {
        Ok(self.solve_direct(a, bearing, distance)?.into_estimate())
    }
}
