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

//! The geomath module contains the floating point primitives used by the
//! geodesic calculations.
//!
//! They follow the functions of the `Math` class in Charles Karney's
//! [GeographicLib](https://geographiclib.sourceforge.io/), which are designed
//! to avoid loss of precision near the poles, the Equator and the
//! antimeridian:
//! - error free addition, see [`sum`];
//! - angle reduction and normalisation, see [`ang_normalize`] and [`ang_diff`];
//! - trigonometric functions in degrees, see [`sincosd`] and [`atan2d`].
//!
//! Note: the error free transformations depend on IEEE 754 evaluation order.
//! Expressions such as `s - (s - v)` must not be "simplified".

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]

/// The number of binary digits in the mantissa of an `f64`.
pub const DIGITS: u32 = f64::MANTISSA_DIGITS;

/// The machine epsilon: 0.5^(`DIGITS` - 1).
pub const EPSILON: f64 = f64::EPSILON;

/// The smallest normalised `f64`: 0.5^1022.
pub const MIN: f64 = f64::MIN_POSITIVE;

/// The square of x.
#[must_use]
pub const fn sq(x: f64) -> f64 {
    x * x
}

/// The length of the hypotenuse, scaled by the larger operand to avoid
/// overflow and underflow.
/// * `x`, `y` - the sides of the triangle.
/// # Examples
/// ```
/// use wgs84_vincenty::geomath::hypot;
///
/// assert_eq!(5.0, hypot(3.0, -4.0));
/// // no overflow
/// assert!(hypot(1.0e300, 1.0e300).is_finite());
/// ```
#[must_use]
pub fn hypot(x: f64, y: f64) -> f64 {
    let x = libm::fabs(x);
    let y = libm::fabs(y);
    let a = x.max(y);
    let b = x.min(y) / if a == 0.0 { 1.0 } else { a };
    a * libm::sqrt(1.0 + b * b)
}

/// ln(1 + x), accurate for small x.
#[must_use]
pub fn log1p(x: f64) -> f64 {
    let y = 1.0 + x;
    let z = y - 1.0;
    // z is the exact value of y - 1, so the ratio corrects the rounding of y
    if z == 0.0 {
        x
    } else {
        x * libm::log(y) / z
    }
}

/// The inverse hyperbolic tangent of x.
#[must_use]
pub fn atanh(x: f64) -> f64 {
    let y = libm::fabs(x);
    let y = log1p(2.0 * y / (1.0 - y)) / 2.0;
    if x < 0.0 {
        -y
    } else {
        y
    }
}

/// The magnitude of x with the sign of y, where -0.0 is negative.
#[must_use]
pub fn copysign(x: f64, y: f64) -> f64 {
    let negative = y < 0.0 || (y == 0.0 && y.is_sign_negative());
    libm::fabs(x) * if negative { -1.0 } else { 1.0 }
}

/// The real cube root of x.
#[must_use]
pub fn cube_root(x: f64) -> f64 {
    let y = libm::cbrt(libm::fabs(x));
    if x < 0.0 {
        -y
    } else {
        y
    }
}

/// Whether x is neither infinite nor NaN.
#[must_use]
pub fn is_finite(x: f64) -> bool {
    libm::fabs(x) <= f64::MAX
}

/// Scale a sine and cosine pair so that they lie on the unit circle.
/// * `sinx`, `cosx` - the unnormalised sine and cosine.
///
/// returns the normalised sine and cosine.
#[must_use]
pub fn norm(sinx: f64, cosx: f64) -> (f64, f64) {
    let r = hypot(sinx, cosx);
    (sinx / r, cosx / r)
}

/// The error free transformation of a sum.
///
/// `u + v = s + t` exactly, where `s` is the correctly rounded sum and `t`
/// is its rounding error.
/// * `u`, `v` - the values to add.
///
/// returns `s` and `t`.
/// # Examples
/// ```
/// use wgs84_vincenty::geomath::sum;
///
/// let (s, t) = sum(1.0e16, 1.0);
/// assert_eq!(1.0e16, s);
/// assert_eq!(1.0, t);
/// ```
#[must_use]
pub fn sum(u: f64, v: f64) -> (f64, f64) {
    let s = u + v;
    let up = s - v;
    let vpp = s - up;
    let up = up - u;
    let vpp = vpp - v;
    let t = -(up + vpp);
    (s, t)
}

/// Evaluate a polynomial using
/// [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
/// * `coeffs` - the coefficients, highest order first. A polynomial stored
///   inside a larger table is evaluated by passing the sub-slice.
/// * `x` - the variable.
///
/// returns the value of the polynomial, zero if `coeffs` is empty.
/// # Examples
/// ```
/// use wgs84_vincenty::geomath::polyval;
///
/// // 2x^2 - 3x + 1
/// assert_eq!(3.0, polyval(&[2.0, -3.0, 1.0], 2.0));
///
/// let table = [9.0, 1.0, 2.0, 9.0];
/// // x + 2
/// assert_eq!(5.0, polyval(&table[1..3], 3.0));
/// ```
#[must_use]
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .split_first()
        .map_or(0.0, |(first, rest)| {
            rest.iter().fold(*first, |y, p| y * x + p)
        })
}

/// Round an angle so that small values are held on a grid of 1/2^57.
///
/// This is about 0.7 pm on the Earth for an angle in degrees and avoids
/// near singular cases for tiny, non zero, values.
/// -0.0 is converted to 0.0; tiny negative values may become -0.0.
#[must_use]
pub fn ang_round(x: f64) -> f64 {
    const Z: f64 = 1.0 / 16.0;

    if x == 0.0 {
        return 0.0;
    }

    let y = libm::fabs(x);
    let y = if y < Z { Z - (Z - y) } else { y };
    if x < 0.0 {
        -y
    } else {
        y
    }
}

/// Normalise an angle in degrees to the range (-180, 180].
/// # Examples
/// ```
/// use wgs84_vincenty::geomath::ang_normalize;
///
/// assert_eq!(180.0, ang_normalize(-180.0));
/// assert_eq!(-170.0, ang_normalize(190.0));
/// assert_eq!(10.0, ang_normalize(730.0));
/// ```
#[must_use]
pub fn ang_normalize(x: f64) -> f64 {
    let x = x % 360.0;
    if x <= -180.0 {
        x + 360.0
    } else if x <= 180.0 {
        x
    } else {
        x - 360.0
    }
}

/// Check a latitude in degrees.
///
/// returns the latitude if it is in the range [-90, 90], None otherwise
/// (including NaN).
#[must_use]
pub fn lat_fix(x: f64) -> Option<f64> {
    (-90.0..=90.0).contains(&x).then_some(x)
}

/// The exact difference of two angles, `y - x`, in degrees reduced to the
/// range (-180, 180].
/// * `x`, `y` - the angles in degrees.
///
/// returns the difference `d` and its rounding error `e`: `y - x = d + e`.
/// # Examples
/// ```
/// use wgs84_vincenty::geomath::ang_diff;
///
/// assert_eq!(20.0, ang_diff(170.0, -170.0).0);
/// assert_eq!(180.0, ang_diff(0.0, 180.0).0);
/// ```
#[must_use]
pub fn ang_diff(x: f64, y: f64) -> (f64, f64) {
    let (d, t) = sum(ang_normalize(-x), ang_normalize(y));
    let d = ang_normalize(d);
    // keep the result in (-180, 180] when the error would push it over 180
    sum(if d == 180.0 && 0.0 < t { -180.0 } else { d }, t)
}

/// The sine and cosine of an angle in degrees.
///
/// The angle is reduced exactly to the range [-45, 45] before it is
/// converted to radians, to minimise round-off errors.
/// * `x` - the angle in degrees.
///
/// returns the sine and cosine of x.
/// # Examples
/// ```
/// use wgs84_vincenty::geomath::sincosd;
///
/// assert_eq!((1.0, 0.0), sincosd(90.0));
/// assert_eq!((0.0, -1.0), sincosd(180.0));
/// assert_eq!((-1.0, 0.0), sincosd(-90.0));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn sincosd(x: f64) -> (f64, f64) {
    let r = x % 360.0;
    let q = libm::floor(r / 90.0 + 0.5);
    // now abs(r) <= 45
    let r = (r - 90.0 * q).to_radians();
    let (s, c) = libm::sincos(r);
    let (sinx, cosx) = match (q as i32) & 3 {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    };
    if x == 0.0 {
        (sinx, cosx)
    } else {
        // convert -0.0 to 0.0
        (sinx + 0.0, cosx + 0.0)
    }
}

/// The arc tangent of y/x in degrees, in the range (-180, 180].
///
/// The arguments are rearranged so that the call to `atan2` lies in the
/// range [-π/4, π/4] before the result is mapped to the correct quadrant.
/// # Examples
/// ```
/// use wgs84_vincenty::geomath::atan2d;
///
/// assert_eq!(45.0, atan2d(1.0, 1.0));
/// assert_eq!(135.0, atan2d(1.0, -1.0));
/// assert_eq!(-90.0, atan2d(-1.0, 0.0));
/// assert_eq!(180.0, atan2d(0.0, -1.0));
/// ```
#[must_use]
pub fn atan2d(y: f64, x: f64) -> f64 {
    let (mut y, mut x) = (y, x);
    let mut q = 0;
    if libm::fabs(x) < libm::fabs(y) {
        core::mem::swap(&mut x, &mut y);
        q = 2;
    }
    if x < 0.0 {
        x = -x;
        q += 1;
    }
    // here x >= 0 and x >= abs(y), so the angle is in [-pi/4, pi/4]
    let ang = libm::atan2(y, x).to_degrees();
    match q {
        1 => (if 0.0 <= y { 180.0 } else { -180.0 }) - ang,
        2 => 90.0 - ang,
        3 => -90.0 + ang,
        _ => ang,
    }
}
