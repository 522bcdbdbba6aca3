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

use core::ops::{Add, Mul};

use num_traits::Float;

/// A polynomial in a single transform variable (`s` or `z`).
///
/// Coefficients are stored from the highest to the lowest power, so `[1.0, 2.0, 3.0]` is
/// `x² + 2x + 3`. Arithmetic keeps the *nominal* length of its operands: leading zeros are never
/// dropped implicitly. Call [`Polynomial::trim`] to obtain the canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<T> {
    coeffs: Vec<T>,
}

impl<T: Float> Polynomial<T> {
    /// Creates a polynomial from coefficients ordered from the highest power down.
    ///
    /// An empty coefficient list is the zero polynomial.
    pub fn new(coeffs: impl Into<Vec<T>>) -> Self {
        let mut coeffs = coeffs.into();
        if coeffs.is_empty() {
            coeffs.push(T::zero());
        }
        Self { coeffs }
    }

    /// The constant polynomial `c`.
    pub fn constant(c: T) -> Self {
        Self { coeffs: vec![c] }
    }

    /// The zero polynomial `[0]`.
    pub fn zero() -> Self {
        Self::constant(T::zero())
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self::constant(T::one())
    }

    /// Returns the coefficients, highest power first, including any leading zeros.
    pub fn coeffs(&self) -> &[T] {
        &self.coeffs
    }

    /// Number of stored coefficients, i.e. the nominal degree plus one.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Returns `true` if every coefficient is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    /// Returns the degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs
            .iter()
            .position(|c| !c.is_zero())
            .map(|first| self.coeffs.len() - 1 - first)
    }

    /// Returns the coefficient of the highest nonzero power, or zero for the zero polynomial.
    pub fn leading(&self) -> T {
        self.coeffs
            .iter()
            .copied()
            .find(|c| !c.is_zero())
            .unwrap_or_else(T::zero)
    }

    /// Drops leading zero coefficients. The zero polynomial trims to `[0]`.
    pub fn trim(&self) -> Self {
        match self.coeffs.iter().position(|c| !c.is_zero()) {
            Some(first) => Self::new(&self.coeffs[first..]),
            None => Self::zero(),
        }
    }

    /// Drops leading coefficients whose magnitude does not exceed `rel_tol` times the largest
    /// coefficient magnitude.
    ///
    /// Used where floating point cancellation leaves residue in a coefficient that is exactly
    /// zero analytically.
    pub fn trim_negligible(&self, rel_tol: T) -> Self {
        let scale = self.max_abs();
        if scale.is_zero() {
            return Self::zero();
        }
        let threshold = rel_tol * scale;
        match self.coeffs.iter().position(|c| c.abs() > threshold) {
            Some(first) => Self::new(&self.coeffs[first..]),
            None => Self::zero(),
        }
    }

    /// Largest coefficient magnitude.
    pub fn max_abs(&self) -> T {
        self.coeffs
            .iter()
            .fold(T::zero(), |acc, c| acc.max(c.abs()))
    }

    /// Number of trailing zero coefficients, i.e. the largest `k` such that `x^k` divides the
    /// polynomial. Returns `None` for the zero polynomial, which every power divides.
    pub fn trailing_zeros(&self) -> Option<usize> {
        if self.is_zero() {
            return None;
        }
        Some(self.coeffs.iter().rev().take_while(|c| c.is_zero()).count())
    }

    /// Divides by `x^k`. `k` must not exceed [`Polynomial::trailing_zeros`]; higher powers are
    /// clamped so the result is never empty.
    pub fn shift_down(&self, k: usize) -> Self {
        let keep = self.coeffs.len().saturating_sub(k).max(1);
        Self::new(&self.coeffs[..keep])
    }

    /// Multiplies every coefficient by `k`.
    pub fn scale(&self, k: T) -> Self {
        Self::new(self.coeffs.iter().map(|&c| c * k).collect::<Vec<_>>())
    }

    /// Raises the polynomial to a non-negative integer power by repeated multiplication.
    pub fn pow(&self, exp: usize) -> Self {
        (0..exp).fold(Self::one(), |acc, _| &acc * self)
    }

    /// Evaluates the polynomial with Horner's scheme.
    pub fn eval(&self, x: T) -> T {
        self.coeffs.iter().fold(T::zero(), |acc, &c| acc * x + c)
    }

    /// Converts the coefficients to another floating point type.
    ///
    /// Returns `None` if any coefficient is not representable.
    pub fn cast<U: Float>(&self) -> Option<Polynomial<U>> {
        self.coeffs
            .iter()
            .map(|&c| U::from(c))
            .collect::<Option<Vec<U>>>()
            .map(Polynomial::new)
    }
}

impl<T: Float> Add for &Polynomial<T> {
    type Output = Polynomial<T>;

    /// Coefficient-wise sum, aligned at the constant term.
    fn add(self, rhs: Self) -> Polynomial<T> {
        let len = self.len().max(rhs.len());
        let pad = |p: &Polynomial<T>, i: usize| {
            let offset = len - p.len();
            if i < offset {
                T::zero()
            } else {
                p.coeffs[i - offset]
            }
        };
        Polynomial::new((0..len).map(|i| pad(self, i) + pad(rhs, i)).collect::<Vec<_>>())
    }
}

impl<T: Float> Mul for &Polynomial<T> {
    type Output = Polynomial<T>;

    /// Polynomial product (coefficient convolution).
    fn mul(self, rhs: Self) -> Polynomial<T> {
        let mut coeffs = vec![T::zero(); self.len() + rhs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] = coeffs[i + j] + a * b;
            }
        }
        Polynomial::new(coeffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_ignores_leading_zeros() {
        let p = Polynomial::new([0.0, 0.0, 2.0, 1.0]);
        assert_eq!(p.len(), 4);
        assert_eq!(p.degree(), Some(1));
        assert_eq!(p.leading(), 2.0);
        assert_eq!(p.trim().coeffs(), &[2.0, 1.0]);

        let zero = Polynomial::new([0.0, 0.0, 0.0]);
        assert!(zero.is_zero());
        assert_eq!(zero.degree(), None);
        assert_eq!(zero.trim().coeffs(), &[0.0]);
        assert_eq!(Polynomial::<f64>::new(vec![]).coeffs(), &[0.0]);
    }

    #[test]
    fn test_add_aligns_constant_terms() {
        let a = Polynomial::new([1.0, 0.0, -1.0]);
        let b = Polynomial::new([2.0, 3.0]);
        assert_eq!((&a + &b).coeffs(), &[1.0, 2.0, 2.0]);
        assert_eq!((&b + &a).coeffs(), &[1.0, 2.0, 2.0]);

        // Cancellation keeps the nominal length
        let c = Polynomial::new([-1.0, 0.0, 0.0]);
        assert_eq!((&a + &c).coeffs(), &[0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_mul_convolves() {
        // (x + 1)(x - 1) = x² - 1
        let a = Polynomial::new([1.0, 1.0]);
        let b = Polynomial::new([1.0, -1.0]);
        assert_eq!((&a * &b).coeffs(), &[1.0, 0.0, -1.0]);

        // (x - 1)³ = x³ - 3x² + 3x - 1
        assert_eq!(b.pow(3).coeffs(), &[1.0, -3.0, 3.0, -1.0]);
        assert_eq!(b.pow(0).coeffs(), &[1.0]);
    }

    #[test]
    fn test_eval_horner() {
        let p = Polynomial::new([2.0, -3.0, 1.0]);
        assert_eq!(p.eval(0.0), 1.0);
        assert_eq!(p.eval(1.0), 0.0);
        assert_eq!(p.eval(2.0), 3.0);
    }

    #[test]
    fn test_trailing_zeros_and_shift() {
        let p = Polynomial::new([3.0, 2.0, 0.0, 0.0]);
        assert_eq!(p.trailing_zeros(), Some(2));
        assert_eq!(p.shift_down(2).coeffs(), &[3.0, 2.0]);
        assert_eq!(Polynomial::new([1.0]).trailing_zeros(), Some(0));
        assert_eq!(Polynomial::<f64>::zero().trailing_zeros(), None);
        assert_eq!(Polynomial::new([0.0, 0.0]).shift_down(5).coeffs(), &[0.0]);
    }

    #[test]
    fn test_trim_negligible_is_relative() {
        let p = Polynomial::new([1e-20, 1.0, 2.0]);
        assert_eq!(p.trim_negligible(1e-12).coeffs(), &[1.0, 2.0]);

        // Small but significant leading coefficients survive
        let q = Polynomial::new([1e-6, 1.0, 2.0]);
        assert_eq!(q.trim_negligible(1e-12).coeffs(), &[1e-6, 1.0, 2.0]);
    }

    #[test]
    fn test_single_precision() {
        let a = Polynomial::<f32>::new([0.5, 0.25]);
        let b = a.scale(2.0);
        assert_eq!(b.coeffs(), &[1.0f32, 0.5]);
        assert_eq!(a.cast::<f64>().unwrap().coeffs(), &[0.5, 0.25]);
    }
}
