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
use tracing::trace;

use crate::error::ComputationError;
use crate::poly::Polynomial;
use crate::tf::RationalFunction;

/// Exact backward-difference discretization `s = (1 - z⁻¹) / T`.
///
/// Both polynomials are rewritten in `z` by substituting `s = (z - 1) / (T·z)` and multiplying
/// through by `(T·z)^m`, where `m` is the larger of the two degrees:
///
/// ```text
/// Σ aᵢ sⁱ  ↦  Σ aᵢ (z - 1)ⁱ (T·z)^(m - i)
/// ```
///
/// Every term has exactly `m + 1` coefficients, so numerator and denominator come out with the
/// same nominal degree. A mismatch would mean the substitution itself is broken and is reported
/// as [`ComputationError::DegreeMismatch`] instead of being truncated.
pub fn backward_difference<T: Float>(
    tf: &RationalFunction<T>,
    sample_period: T,
) -> Result<RationalFunction<T>, ComputationError> {
    if !(sample_period > T::zero()) || !sample_period.is_finite() {
        return Err(ComputationError::InvalidSamplePeriod(
            sample_period.to_f64().unwrap_or(f64::NAN),
        ));
    }
    if tf.is_degenerate() {
        return Err(ComputationError::DegenerateDenominator(
            "continuous closed loop",
        ));
    }

    let num = tf.num().trim();
    let den = tf.den().trim();
    let m = num.len().max(den.len()) - 1;

    let z_minus_one = Polynomial::new([T::one(), -T::one()]);
    let t_z = Polynomial::new([sample_period, T::zero()]);
    let z_minus_one_pows: Vec<_> = (0..=m).map(|i| z_minus_one.pow(i)).collect();
    let t_z_pows: Vec<_> = (0..=m).map(|i| t_z.pow(i)).collect();

    let substitute = |p: &Polynomial<T>| {
        let degree = p.len() - 1;
        p.coeffs()
            .iter()
            .enumerate()
            .map(|(idx, &a)| {
                let power = degree - idx;
                (&z_minus_one_pows[power] * &t_z_pows[m - power]).scale(a)
            })
            .fold(Polynomial::new(vec![T::zero(); m + 1]), |acc, term| {
                &acc + &term
            })
    };

    let num_z = substitute(&num);
    let den_z = substitute(&den);
    trace!(m, num = num_z.len(), den = den_z.len(), "backward difference");

    if num_z.len() != den_z.len() || den_z.len() != m + 1 {
        return Err(ComputationError::DegreeMismatch {
            num: num_z.len(),
            den: den_z.len(),
        });
    }
    if den_z.is_zero() {
        return Err(ComputationError::DegenerateDenominator(
            "discrete closed loop",
        ));
    }

    Ok(RationalFunction::new(num_z, den_z))
}
