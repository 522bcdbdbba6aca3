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

use core::fmt;
use core::str::FromStr;

use crate::error::ArgumentError;
use crate::tf::RationalFunction;

/// Placement of the control terms between the feedforward and the feedback path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Architecture {
    /// All three terms act on the error signal.
    Pid,
    /// Proportional and integral act on the error, derivative on the measurement only.
    PiD,
    /// Only the integral acts on the error, proportional and derivative on the measurement.
    IPd,
}

impl Architecture {
    /// Every supported architecture, in declaration order.
    pub const ALL: [Architecture; 3] = [Architecture::Pid, Architecture::PiD, Architecture::IPd];

    /// The token used on the command line and in generated fixtures.
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::Pid => "PID",
            Architecture::PiD => "PI_D",
            Architecture::IPd => "I_PD",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Architecture::ALL
            .into_iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| ArgumentError::UnknownArchitecture(s.to_owned()))
    }
}

/// Proportional, integral and derivative gains.
///
/// No range restriction applies; all three being zero is the degenerate null controller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Param {
    kp: f64,
    ki: f64,
    kd: f64,
}

impl Param {
    /// Creates a gain set. Any real values are accepted.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    /// Returns the proportional gain.
    pub fn kp(&self) -> f64 {
        self.kp
    }

    /// Returns the integral gain.
    pub fn ki(&self) -> f64 {
        self.ki
    }

    /// Returns the derivative gain.
    pub fn kd(&self) -> f64 {
        self.kd
    }

    /// Convenience method that returns the proportional, integral, and derivative gains together as a tuple.
    pub fn gains(&self) -> (f64, f64, f64) {
        (self.kp, self.ki, self.kd)
    }

    /// Returns `true` if every gain is zero.
    pub fn is_null(&self) -> bool {
        self.kp == 0.0 && self.ki == 0.0 && self.kd == 0.0
    }
}

/// The two halves of the control loop derived from one set of gains.
#[derive(Clone, Debug, PartialEq)]
pub struct System {
    /// The controller acting on the loop error.
    pub feedback: RationalFunction<f64>,
    /// The pre-filter applied to the reference before it enters the loop.
    pub feedforward: RationalFunction<f64>,
}

/// The full PID law `(kd·s² + kp·s + ki) / s`.
pub fn pid_tf(param: &Param) -> RationalFunction<f64> {
    RationalFunction::from_coeffs(&[param.kd, param.kp, param.ki], &[1.0, 0.0])
}

/// The reference pre-filter that removes the terms an architecture keeps out of the
/// feedforward path.
pub fn feedforward_tf(arch: Architecture, param: &Param) -> RationalFunction<f64> {
    let (kp, ki, kd) = param.gains();
    match arch {
        Architecture::Pid => RationalFunction::identity(),
        Architecture::PiD => RationalFunction::from_coeffs(&[kp, ki], &[kd, kp, ki]),
        Architecture::IPd => RationalFunction::from_coeffs(&[ki], &[kd, kp, ki]),
    }
}

/// Builds the feedback and feedforward transfer functions for an architecture.
///
/// Total over all gains, including the null controller; degenerate denominators are reported
/// later by the composer.
pub fn create_system(arch: Architecture, param: &Param) -> System {
    System {
        feedback: pid_tf(param),
        feedforward: feedforward_tf(arch, param),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_architecture_tokens_round_trip() {
        for arch in Architecture::ALL {
            assert_eq!(arch.as_str().parse::<Architecture>(), Ok(arch));
            assert_eq!(arch.to_string(), arch.as_str());
        }
        assert_eq!(
            "PD".parse::<Architecture>(),
            Err(ArgumentError::UnknownArchitecture("PD".to_owned()))
        );
        // Tokens are case sensitive
        assert!("pid".parse::<Architecture>().is_err());
    }

    #[test]
    fn test_feedback_is_full_pid_law() {
        let param = Param::new(2.0, 3.0, 0.5);
        let fb = pid_tf(&param);
        assert_eq!(fb.num().coeffs(), &[0.5, 2.0, 3.0]);
        assert_eq!(fb.den().coeffs(), &[1.0, 0.0]);
    }

    #[test]
    fn test_feedforward_per_architecture() {
        let param = Param::new(2.0, 3.0, 0.5);

        let pid = create_system(Architecture::Pid, &param);
        assert_eq!(pid.feedforward, RationalFunction::identity());

        let pi_d = create_system(Architecture::PiD, &param);
        assert_eq!(pi_d.feedforward.num().coeffs(), &[2.0, 3.0]);
        assert_eq!(pi_d.feedforward.den().coeffs(), &[0.5, 2.0, 3.0]);

        let i_pd = create_system(Architecture::IPd, &param);
        assert_eq!(i_pd.feedforward.num().coeffs(), &[3.0]);
        assert_eq!(i_pd.feedforward.den().coeffs(), &[0.5, 2.0, 3.0]);

        // The feedback half does not depend on the architecture
        assert_eq!(pid.feedback, pi_d.feedback);
        assert_eq!(pid.feedback, i_pd.feedback);
    }

    #[test]
    fn test_null_controller_is_constructible() {
        let param = Param::new(0.0, 0.0, 0.0);
        assert!(param.is_null());
        for arch in Architecture::ALL {
            let system = create_system(arch, &param);
            assert!(system.feedback.num().is_zero());
        }
        assert!(create_system(Architecture::PiD, &param)
            .feedforward
            .is_degenerate());
        assert!(!Param::new(0.0, 1e-9, 0.0).is_null());
    }
}
