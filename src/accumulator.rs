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

//! The accumulator module contains `Accumulator`, a running sum held to
//! roughly twice the precision of an `f64`.

#![allow(clippy::float_cmp)]

use crate::geomath;

/// A compensated sum.
///
/// The sum is held as a pair of `f64`s: `s`, the best single `f64`
/// approximation to the sum and `t`, the rounding error in `s`.
/// Each addition uses [`geomath::sum`] so that the low order bits of the
/// values added are not lost.
///
/// # Examples
/// ```
/// use wgs84_vincenty::Accumulator;
///
/// let mut acc = Accumulator::new(1.0e16);
/// for _ in 0..1000 {
///     acc.add(1.0);
/// }
/// acc.add(-1.0e16);
/// assert_eq!(1000.0, acc.sum());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accumulator {
    /// The accumulated sum.
    s: f64,
    /// The rounding error in the accumulated sum.
    t: f64,
}

impl Accumulator {
    /// Constructor.
    /// * `y` - the initial value of the sum.
    #[must_use]
    pub const fn new(y: f64) -> Self {
        Self { s: y, t: 0.0 }
    }

    /// Set the sum to a value, discarding any accumulated error.
    /// * `y` - the new value of the sum.
    pub const fn set(&mut self, y: f64) {
        self.s = y;
        self.t = 0.0;
    }

    /// The value of the sum.
    #[must_use]
    pub const fn sum(&self) -> f64 {
        self.s
    }

    /// The value the sum would have if `y` were added, without changing it.
    /// * `y` - the value to add.
    #[must_use]
    pub fn sum_with(&self, y: f64) -> f64 {
        let mut acc = *self;
        acc.add(y);
        acc.s
    }

    /// Add a value to the sum.
    /// * `y` - the value to add.
    pub fn add(&mut self, y: f64) {
        // accumulate y into t first, u is the part of y that t could not hold
        let (y, u) = geomath::sum(y, self.t);
        let (s, t) = geomath::sum(y, self.s);
        self.s = s;
        self.t = t;

        // s == 0 implies t == 0, so the result is u
        if self.s == 0.0 {
            self.s = u;
        } else {
            self.t += u;
        }
    }

    /// Negate the sum.
    pub const fn negate(&mut self) {
        self.s = -self.s;
        self.t = -self.t;
    }

    /// Reduce the sum to the IEEE remainder of the sum divided by `y`,
    /// e.g. to keep an accumulated angle in the range [-180, 180].
    /// * `y` - the divisor.
    pub fn remainder(&mut self, y: f64) {
        self.s = libm::remainder(self.s, y);
        // renormalise s and t
        self.add(0.0);
    }
}

impl From<f64> for Accumulator {
    fn from(y: f64) -> Self {
        Self::new(y)
    }
}

impl core::ops::AddAssign<f64> for Accumulator {
    fn add_assign(&mut self, y: f64) {
        self.add(y);
    }
}

impl core::ops::Neg for Accumulator {
    type Output = Self;

    fn neg(self) -> Self {
        let mut acc = self;
        acc.negate();
        acc
    }
}
