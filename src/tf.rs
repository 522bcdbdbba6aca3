// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use num_traits::Float;

use crate::poly::Polynomial;

/// A single-input single-output transfer function `num(x) / den(x)`.
///
/// Construction never fails, so that degenerate controllers (all gains zero) can still be
/// represented; [`RationalFunction::is_degenerate`] and [`RationalFunction::is_proper`] are
/// checked by the composer and the simulator respectively.
#[derive(Debug, Clone, PartialEq)]
pub struct RationalFunction<T> {
    num: Polynomial<T>,
    den: Polynomial<T>,
}

impl<T: Float> RationalFunction<T> {
    /// Creates `num / den`. Degenerate denominators are accepted.
    pub fn new(num: Polynomial<T>, den: Polynomial<T>) -> Self {
        Self { num, den }
    }

    /// Builds a transfer function from raw coefficient lists, highest power first.
    pub fn from_coeffs(num: &[T], den: &[T]) -> Self {
        Self::new(Polynomial::new(num), Polynomial::new(den))
    }

    /// The identity transfer function `1 / 1`.
    pub fn identity() -> Self {
        Self::gain(T::one())
    }

    /// A static gain `k / 1`.
    pub fn gain(k: T) -> Self {
        Self::new(Polynomial::constant(k), Polynomial::one())
    }

    /// Returns the numerator.
    pub fn num(&self) -> &Polynomial<T> {
        &self.num
    }

    /// Returns the denominator.
    pub fn den(&self) -> &Polynomial<T> {
        &self.den
    }

    /// Returns `true` if the denominator is the zero polynomial.
    pub fn is_degenerate(&self) -> bool {
        self.den.is_zero()
    }

    /// Returns `true` if the numerator degree does not exceed the denominator degree.
    ///
    /// A zero numerator is proper; a degenerate denominator is not.
    pub fn is_proper(&self) -> bool {
        match (self.num.degree(), self.den.degree()) {
            (None, Some(_)) => true,
            (Some(n), Some(d)) => n <= d,
            (_, None) => false,
        }
    }

    /// Multiplies the numerator by `k`.
    pub fn scale(&self, k: T) -> Self {
        Self::new(self.num.scale(k), self.den.clone())
    }

    /// Series (cascade) connection `self · other`.
    pub fn series(&self, other: &Self) -> Self {
        Self::new(&self.num * &other.num, &self.den * &other.den).trim()
    }

    /// Negative feedback connection of `self` in the forward path and `sensor` in the return
    /// path: `G / (1 + G·H)`.
    ///
    /// With `G = Ng/Dg` and `H = Nh/Dh` this is `Ng·Dh / (Dg·Dh + Ng·Nh)`. No pole/zero
    /// cancellation is attempted beyond [`RationalFunction::reduce_common_power`].
    pub fn feedback(&self, sensor: &Self) -> Self {
        let num = &self.num * &sensor.den;
        let den = &(&self.den * &sensor.den) + &(&self.num * &sensor.num);
        Self::new(num, den).trim()
    }

    /// Cancels the common power of the transform variable shared by numerator and
    /// denominator, e.g. `(kp·s) / s` becomes `kp / 1`.
    ///
    /// A zero numerator cancels every power of the variable from the denominator.
    pub fn reduce_common_power(&self) -> Self {
        let common = match (self.num.trailing_zeros(), self.den.trailing_zeros()) {
            (Some(n), Some(d)) => n.min(d),
            (None, Some(d)) => d,
            (_, None) => 0,
        };
        if common == 0 {
            return self.trim();
        }
        Self::new(self.num.shift_down(common), self.den.shift_down(common)).trim()
    }

    /// Strips leading zeros from both polynomials.
    pub fn trim(&self) -> Self {
        Self::new(self.num.trim(), self.den.trim())
    }

    /// Evaluates the transfer function at a real point, e.g. `s = 0` or `z = 1` for the DC gain.
    pub fn eval(&self, x: T) -> T {
        self.num.eval(x) / self.den.eval(x)
    }

    /// Converts the coefficients to another floating point type.
    pub fn cast<U: Float>(&self) -> Option<RationalFunction<U>> {
        Some(RationalFunction::new(self.num.cast()?, self.den.cast()?))
    }
}

/// Padé approximant of a pure time delay `exp(-delay · s)` with equal numerator and denominator
/// order.
///
/// Coefficients follow the recurrence of Golub and Van Loan (Algorithm 11.3.1), normalized so
/// that the leading denominator coefficient is one.
pub fn pade(delay: f64, order: usize) -> RationalFunction<f64> {
    if delay == 0.0 || order == 0 {
        return RationalFunction::identity();
    }

    let n = order as f64;
    let mut num = vec![0.0; order + 1];
    let mut den = vec![0.0; order + 1];
    num[order] = 1.0;
    den[order] = 1.0;

    let mut cn = 1.0;
    let mut cd = 1.0;
    for k in 1..=order {
        let k_f = k as f64;
        let ratio = (n - k_f + 1.0) / (2.0 * n - k_f + 1.0) / k_f;
        cn *= -delay * ratio;
        cd *= delay * ratio;
        num[order - k] = cn;
        den[order - k] = cd;
    }

    let lead = den[0];
    let num: Vec<f64> = num.iter().map(|c| c / lead).collect();
    let den: Vec<f64> = den.iter().map(|c| c / lead).collect();
    RationalFunction::from_coeffs(&num, &den)
}
