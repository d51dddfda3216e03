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

//! Error type used by the crate.

use thiserror::Error;

/// The errors returned by the geodesic calculations.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    /// The iteration did not converge within the maximum number of iterations.
    #[error("failed to converge after {iterations} iterations")]
    NotConverged {
        /// The number of iterations performed.
        iterations: u32,
    },

    /// A latitude outside the range [-90, 90] degrees, or NaN.
    #[error("invalid latitude: {0} degrees")]
    InvalidLatitude(f64),

    /// A longitude that is not finite.
    #[error("invalid longitude: {0} degrees")]
    InvalidLongitude(f64),

    /// A bearing that is not finite.
    #[error("invalid bearing: {0} degrees")]
    InvalidBearing(f64),

    /// A distance that is not finite.
    #[error("invalid distance: {0} metres")]
    InvalidDistance(f64),

    /// Ellipsoid parameters that do not describe an ellipsoid.
    #[error("invalid ellipsoid: semimajor axis {a} metres, flattening {f}")]
    InvalidEllipsoid {
        /// The semimajor axis in metres.
        a: f64,
        /// The flattening ratio.
        f: f64,
    },
}
