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

use thiserror::Error;

/// Malformed or out-of-range user input, detected before any transfer function is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    /// The architecture token is not one of `PID`, `PI_D`, `I_PD`.
    #[error("unknown architecture `{0}`, expected one of PID, PI_D, I_PD")]
    UnknownArchitecture(String),

    /// The fixture name cannot be used as a C++ namespace.
    #[error("fixture name `{0}` is not a valid C++ identifier")]
    InvalidName(String),

    /// A gain or the step height is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFiniteValue {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The sampling period is not positive and finite.
    #[error("sampling period must be positive and finite, got {0}")]
    InvalidSamplePeriod(f64),

    /// Zero samples were requested.
    #[error("sample count must be at least 1")]
    InvalidSampleCount,

    /// The output limits are inverted or NaN.
    #[error("output limits must satisfy minv <= maxv, got [{min}, {max}]")]
    InvalidOutputLimits {
        /// Requested lower limit.
        min: f64,
        /// Requested upper limit.
        max: f64,
    },
}

/// Violation of an internal algebraic invariant. These indicate a defect or a degenerate loop,
/// not a user mistake.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    /// The named transfer function has an all-zero denominator.
    #[error("denominator of the {0} is the zero polynomial")]
    DegenerateDenominator(&'static str),

    /// Numerator and denominator came out of the substitution with different lengths.
    #[error("backward-difference substitution produced {num} numerator and {den} denominator coefficients")]
    DegreeMismatch {
        /// Numerator coefficient count.
        num: usize,
        /// Denominator coefficient count.
        den: usize,
    },

    /// Discretization was asked for a non-positive or non-finite period.
    #[error("cannot discretize with sampling period {0}")]
    InvalidSamplePeriod(f64),

    /// The named stage overflowed or produced NaN, typically because the loop is unstable.
    #[error("{0} produced non-finite values")]
    NonFinite(&'static str),
}

/// Any failure of the fixture pipeline. No fixture text is produced when one of these is
/// returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixtureError {
    /// Invalid user input.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// The closed loop has more zeros than poles and cannot be simulated.
    #[error("improper system: numerator degree {num_degree} exceeds denominator degree {den_degree}")]
    ImproperSystem {
        /// Degree of the numerator.
        num_degree: usize,
        /// Degree of the denominator.
        den_degree: usize,
    },

    /// Composition or simulation failed.
    #[error(transparent)]
    Computation(#[from] ComputationError),

    /// All three gains are zero.
    #[error("all gains are zero, the null controller has no closed-loop response")]
    NullController,
}

/// Result type of the fixture pipeline.
pub type FixtureResult<T> = Result<T, FixtureError>;
