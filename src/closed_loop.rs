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

use tracing::debug;

use crate::discretize::backward_difference;
use crate::error::ComputationError;
use crate::pid::System;
use crate::tf::{pade, RationalFunction};

/// The transform domain a composed transfer function lives in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Domain {
    /// Laplace domain, simulated by numerical integration.
    Continuous,
    /// Sampled domain at a fixed period, simulated exactly by recursion.
    Discrete {
        /// Sampling period in seconds.
        sample_period: f64,
    },
}

/// A closed-loop transfer function together with its domain.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedLoop {
    /// The composed transfer function, in `s` or `z` according to `domain`.
    pub tf: RationalFunction<f64>,
    /// The domain `tf` lives in.
    pub domain: Domain,
}

/// Combines the controller and pre-filter of a [`System`] into a single closed-loop transfer
/// function `feedforward · feedback / (1 + feedback · sensor)`.
///
/// The implementations differ in the sensor element inserted into the return path and in the
/// domain of the result.
pub trait ClosedLoopComposer {
    /// Composes the closed loop, failing if any denominator along the way is degenerate.
    fn compose(&self, system: &System) -> Result<ClosedLoop, ComputationError>;
}

fn checked(
    tf: &RationalFunction<f64>,
    what: &'static str,
) -> Result<RationalFunction<f64>, ComputationError> {
    let reduced = tf.reduce_common_power();
    if reduced.is_degenerate() {
        return Err(ComputationError::DegenerateDenominator(what));
    }
    Ok(reduced)
}

/// Closes the loop in continuous time around a scaled Padé approximant of a short transport
/// delay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PadeComposer {
    delay: f64,
    order: usize,
    gain: f64,
}

impl Default for PadeComposer {
    fn default() -> Self {
        Self {
            delay: 0.01,
            order: 10,
            gain: 0.5,
        }
    }
}

impl PadeComposer {
    /// Creates a composer approximating `delay` seconds with an `order` Padé approximant scaled by
    /// `gain`.
    pub fn new(delay: f64, order: usize, gain: f64) -> Self {
        Self {
            delay,
            order,
            gain,
        }
    }

    /// Returns the delay in seconds approximated by the sensor element.
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Returns the order of the Padé approximant.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the static gain of the sensor element.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// The sensor element `gain · pade(delay, order)`.
    pub fn sensor(&self) -> RationalFunction<f64> {
        pade(self.delay, self.order).scale(self.gain)
    }
}

impl ClosedLoopComposer for PadeComposer {
    fn compose(&self, system: &System) -> Result<ClosedLoop, ComputationError> {
        let feedback = checked(&system.feedback, "feedback controller")?;
        let feedforward = checked(&system.feedforward, "feedforward filter")?;

        let inner = feedback.feedback(&self.sensor());
        let tf = checked(&feedforward.series(&inner), "continuous closed loop")?;
        debug!(
            num_degree = ?tf.num().degree(),
            den_degree = ?tf.den().degree(),
            "composed continuous closed loop"
        );

        Ok(ClosedLoop {
            tf,
            domain: Domain::Continuous,
        })
    }
}

/// Closes the loop around an ideal one-sample delay and discretizes the result exactly.
///
/// Under the backward-difference map `s = (1 - z⁻¹) / T` the unit delay `z⁻¹` is the polynomial
/// `1 - T·s`, so the loop can be composed in the Laplace domain and substituted once, without
/// numerical integration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UnitDelayComposer {
    sample_period: f64,
}

impl UnitDelayComposer {
    /// Creates a composer for a controller sampled every `sample_period` seconds.
    pub fn new(sample_period: f64) -> Self {
        Self { sample_period }
    }

    /// Returns the sampling period in seconds.
    pub fn sample_period(&self) -> f64 {
        self.sample_period
    }

    /// The unit delay `z⁻¹ = 1 - T·s`.
    pub fn sensor(&self) -> RationalFunction<f64> {
        RationalFunction::from_coeffs(&[-self.sample_period, 1.0], &[1.0])
    }
}

impl ClosedLoopComposer for UnitDelayComposer {
    fn compose(&self, system: &System) -> Result<ClosedLoop, ComputationError> {
        let feedback = checked(&system.feedback, "feedback controller")?;
        let feedforward = checked(&system.feedforward, "feedforward filter")?;

        let inner = feedback.feedback(&self.sensor());
        let continuous = checked(&feedforward.series(&inner), "continuous closed loop")?;
        let discrete = backward_difference(&continuous, self.sample_period)?;
        let tf = checked(&discrete, "discrete closed loop")?;
        debug!(
            sample_period = self.sample_period,
            num = ?tf.num().coeffs(),
            den = ?tf.den().coeffs(),
            "composed discrete closed loop"
        );

        Ok(ClosedLoop {
            tf,
            domain: Domain::Discrete {
                sample_period: self.sample_period,
            },
        })
    }
}
