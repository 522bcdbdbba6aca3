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

use nalgebra as na;
use num_traits::Float;
use tracing::debug;

use crate::closed_loop::{ClosedLoop, Domain};
use crate::error::{ArgumentError, ComputationError, FixtureError, FixtureResult};
use crate::poly::Polynomial;
use crate::tf::RationalFunction;

/// Leading coefficients of a discrete transfer function below this fraction of the largest
/// coefficient are treated as cancellation residue.
const NEGLIGIBLE_COEFF: f64 = 1e-12;

/// Clamping range applied to every output sample, emulating actuator or data type limits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Saturation<T = f64> {
    min: T,
    max: T,
}

impl<T: Float> Default for Saturation<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T: Float> Saturation<T> {
    /// Creates a saturation range.
    ///
    /// # Returns
    /// - `Err(ArgumentError::InvalidOutputLimits)` if either bound is NaN or `min > max`.
    ///   Equal bounds are allowed and pin the output to a constant.
    pub fn new(min: T, max: T) -> Result<Self, ArgumentError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(ArgumentError::InvalidOutputLimits {
                min: min.to_f64().unwrap_or(f64::NAN),
                max: max.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self { min, max })
    }

    /// The range `(-∞, +∞)`, which leaves every sample untouched.
    pub fn unbounded() -> Self {
        Self {
            min: T::neg_infinity(),
            max: T::infinity(),
        }
    }

    /// Returns the lower bound.
    pub fn min(&self) -> T {
        self.min
    }

    /// Returns the upper bound.
    pub fn max(&self) -> T {
        self.max
    }

    /// Returns `true` if at least one bound is finite.
    pub fn is_bounded(&self) -> bool {
        self.min.is_finite() || self.max.is_finite()
    }

    /// Clamps `value` into the range. NaN passes through unchanged.
    pub fn apply(&self, value: T) -> T {
        num_traits::clamp(value, self.min, self.max)
    }
}

/// Step input parameters shared by both simulation modes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Input {
    g: f64,
    sp: f64,
    n: usize,
    saturation: Saturation,
}

impl Input {
    /// Creates an unsaturated step input of height `g`, sampled `n` times every `sp` seconds.
    ///
    /// # Returns
    /// - `Err(ArgumentError::NonFiniteValue)` if `g` is not finite.
    /// - `Err(ArgumentError::InvalidSamplePeriod)` if `sp` is not positive and finite.
    /// - `Err(ArgumentError::InvalidSampleCount)` if `n` is zero.
    pub fn new(g: f64, sp: f64, n: usize) -> Result<Self, ArgumentError> {
        if !g.is_finite() {
            return Err(ArgumentError::NonFiniteValue { name: "g", value: g });
        }
        if !(sp > 0.0) || !sp.is_finite() {
            return Err(ArgumentError::InvalidSamplePeriod(sp));
        }
        if n == 0 {
            return Err(ArgumentError::InvalidSampleCount);
        }
        Ok(Self {
            g,
            sp,
            n,
            saturation: Saturation::unbounded(),
        })
    }

    /// Replaces the output saturation range.
    pub fn with_saturation(mut self, saturation: Saturation) -> Self {
        self.saturation = saturation;
        self
    }

    /// Returns the step height.
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Returns the sampling period in seconds.
    pub fn sp(&self) -> f64 {
        self.sp
    }

    /// Returns the number of samples.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the output saturation range.
    pub fn saturation(&self) -> Saturation {
        self.saturation
    }
}

/// A sampled step response. All three sequences have the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResponse {
    /// Sample instants `sp·k`.
    pub time: Vec<f64>,
    /// The reference signal fed to the closed loop.
    pub input: Vec<f64>,
    /// The closed-loop output after saturation.
    pub output: Vec<f64>,
}

/// Builds the time grid `tₖ = sp·k` and the delayed step `rₖ = g·[tₖ > 0]`.
///
/// The first sample of the input is zero: the step happens right after the origin.
pub fn step_signal(input: &Input) -> (Vec<f64>, Vec<f64>) {
    let t: Vec<f64> = (0..input.n).map(|k| input.sp * k as f64).collect();
    let r = t
        .iter()
        .map(|&tk| if tk > 0.0 { input.g } else { 0.0 })
        .collect();
    (r, t)
}

/// Normalizes a transfer function to a monic denominator and pads the numerator to the same
/// length, rejecting improper and degenerate systems.
fn monic<T: Float>(num: &Polynomial<T>, den: &Polynomial<T>) -> FixtureResult<(Vec<T>, Vec<T>)> {
    let den_degree = den
        .degree()
        .ok_or(ComputationError::DegenerateDenominator("closed loop"))?;
    if let Some(num_degree) = num.degree() {
        if num_degree > den_degree {
            return Err(FixtureError::ImproperSystem {
                num_degree,
                den_degree,
            });
        }
    }

    let den = den.trim();
    let num = num.trim();
    let lead = den.coeffs()[0];

    let a: Vec<T> = den.coeffs().iter().map(|&c| c / lead).collect();
    let mut b = vec![T::zero(); a.len() - num.len()];
    b.extend(num.coeffs().iter().map(|&c| c / lead));
    Ok((b, a))
}

/// Simulates the step response of a discrete transfer function `B(z) / A(z)` exactly.
///
/// The transfer function is realized in controllable canonical form
///
/// ```text
///          ┌                    ┐        ┌   ┐
///          │ -a₁  -a₂  ⋯  -aₙ  │        │ 1 │
/// xₖ₊₁ =   │  1    0   ⋯   0   │ xₖ  +  │ 0 │ uₖ
///          │  ⋮    ⋱   ⋱   ⋮   │        │ ⋮ │
///          │  0    ⋯   1   0   │        │ 0 │
///          └                    ┘        └   ┘
///
/// yₖ = [ b₁ - b₀a₁  ⋯  bₙ - b₀aₙ ] xₖ + b₀ uₖ
/// ```
///
/// and iterated from rest with `uₖ = g` for every `k ≥ 0`. Each output sample is then clamped
/// into `saturation`; the clamped value is not fed back.
///
/// An unstable loop overflows to infinity or NaN and is reported as
/// [`ComputationError::NonFinite`] rather than clamped into the fixture.
pub fn simulate_discrete<T: Float>(
    tf: &RationalFunction<T>,
    g: T,
    n: usize,
    saturation: &Saturation<T>,
) -> FixtureResult<Vec<T>> {
    let tol = T::from(NEGLIGIBLE_COEFF).unwrap_or_else(T::epsilon);
    let (b, a) = monic(&tf.num().trim_negligible(tol), &tf.den().trim_negligible(tol))?;

    let order = a.len() - 1;
    let d = b[0];
    let c: Vec<T> = (1..=order).map(|i| b[i] - d * a[i]).collect();
    debug!(order, n, "simulating discrete step response");

    let mut x = vec![T::zero(); order];
    let mut y = Vec::with_capacity(n);
    for _ in 0..n {
        let out = c
            .iter()
            .zip(&x)
            .fold(d * g, |acc, (&ci, &xi)| acc + ci * xi);
        if !out.is_finite() {
            return Err(ComputationError::NonFinite("discrete simulation").into());
        }
        y.push(saturation.apply(out));

        if order > 0 {
            let head = a[1..]
                .iter()
                .zip(&x)
                .fold(g, |acc, (&ai, &xi)| acc - ai * xi);
            x.rotate_right(1);
            x[0] = head;
        }
    }
    Ok(y)
}

/// Simulates the response of a continuous transfer function to the delayed step of
/// [`step_signal`].
///
/// The transfer function is realized in controllable canonical form after a frequency scaling
/// `s = ω·p`, with `ω` the largest `|aᵢ|^(1/i)` of the monic denominator, which keeps the
/// companion matrix of high-order loops well conditioned. Between samples the input is treated
/// as piecewise linear and the state is propagated exactly with the exponential of
///
/// ```text
///     ┌             ┐
///     │ A·dt  B·dt 0 │
/// M = │  0     0   1 │
///     │  0     0   0 │
///     └             ┘
/// ```
pub fn simulate_continuous(
    tf: &RationalFunction<f64>,
    input: &Input,
) -> FixtureResult<StepResponse> {
    let (r, t) = step_signal(input);
    let (b, a) = monic(tf.num(), tf.den())?;
    let order = a.len() - 1;
    let d = b[0];
    let saturation = input.saturation;

    if order == 0 {
        let output = r.iter().map(|&u| saturation.apply(d * u)).collect();
        return Ok(StepResponse {
            time: t,
            input: r,
            output,
        });
    }

    let omega = (1..=order)
        .map(|i| a[i].abs().powf(1.0 / i as f64))
        .fold(0.0, f64::max);
    let omega = if omega > 0.0 && omega.is_finite() {
        omega
    } else {
        1.0
    };
    let a: Vec<f64> = (0..=order).map(|i| a[i] / omega.powi(i as i32)).collect();
    let b: Vec<f64> = (0..=order).map(|i| b[i] / omega.powi(i as i32)).collect();
    debug!(order, omega, "simulating continuous step response");

    let dt = input.sp;
    let size = order + 2;
    let mut m = na::DMatrix::<f64>::zeros(size, size);
    for j in 0..order {
        m[(0, j)] = -a[j + 1] * omega * dt;
    }
    for i in 1..order {
        m[(i, i - 1)] = omega * dt;
    }
    m[(0, order)] = omega * dt;
    m[(order, order + 1)] = 1.0;

    let e = m.exp();
    if e.iter().any(|v| !v.is_finite()) {
        return Err(ComputationError::NonFinite("matrix exponential").into());
    }

    let ad = na::DMatrix::from_fn(order, order, |i, j| e[(i, j)]);
    let bd1 = na::DVector::from_fn(order, |i, _| e[(i, order + 1)]);
    let bd0 = na::DVector::from_fn(order, |i, _| e[(i, order)]) - &bd1;
    let c = na::DVector::from_fn(order, |i, _| b[i + 1] - d * a[i + 1]);

    let mut x = na::DVector::<f64>::zeros(order);
    let mut output = Vec::with_capacity(r.len());
    for k in 0..r.len() {
        let out = c.dot(&x) + d * r[k];
        if !out.is_finite() {
            return Err(ComputationError::NonFinite("continuous simulation").into());
        }
        output.push(saturation.apply(out));
        if let Some(&next) = r.get(k + 1) {
            x = &ad * &x + &bd0 * r[k] + &bd1 * next;
        }
    }

    Ok(StepResponse {
        time: t,
        input: r,
        output,
    })
}

/// Simulates a composed closed loop in its own domain.
///
/// Continuous loops are driven by the delayed step of [`step_signal`]. Discrete loops are driven
/// by a step present from the first sample, matching a controller that sees the setpoint on its
/// first call.
pub fn step_response(closed_loop: &ClosedLoop, input: &Input) -> FixtureResult<StepResponse> {
    match closed_loop.domain {
        Domain::Continuous => simulate_continuous(&closed_loop.tf, input),
        Domain::Discrete { sample_period } => {
            let output =
                simulate_discrete(&closed_loop.tf, input.g, input.n, &input.saturation)?;
            Ok(StepResponse {
                time: (0..input.n).map(|k| sample_period * k as f64).collect(),
                input: vec![input.g; input.n],
                output,
            })
        }
    }
}
