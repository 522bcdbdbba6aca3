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

use tracing::{debug, info};

use crate::closed_loop::{ClosedLoopComposer, PadeComposer, UnitDelayComposer};
use crate::error::{ArgumentError, FixtureError, FixtureResult};
use crate::pid::{create_system, Architecture, Param};
use crate::sim::{step_response, Input, Saturation, StepResponse};

/// Words that cannot name a C++ namespace.
const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Returns `true` if `name` can be used verbatim as a C++ namespace name.
pub fn is_cpp_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    head_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !CPP_KEYWORDS.contains(&name)
}

/// How the closed loop is composed and simulated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SimulationMode {
    /// Padé-delayed loop simulated in continuous time and sampled every `sp`.
    #[default]
    Continuous,
    /// Unit-delay loop discretized exactly and iterated as a difference equation.
    DiscreteExact,
}

impl SimulationMode {
    /// Number of samples used when none is given.
    pub fn default_sample_count(&self) -> usize {
        match self {
            SimulationMode::Continuous => 200,
            SimulationMode::DiscreteExact => 32,
        }
    }

    /// Returns the composer implementing this mode for a given sampling period.
    pub fn composer(&self, sample_period: f64) -> Box<dyn ClosedLoopComposer> {
        match self {
            SimulationMode::Continuous => Box::new(PadeComposer::default()),
            SimulationMode::DiscreteExact => Box::new(UnitDelayComposer::new(sample_period)),
        }
    }
}

/// A validated request for one fixture.
#[derive(Clone, Debug, PartialEq)]
pub struct FixtureConfig {
    name: String,
    arch: Architecture,
    param: Param,
    input: Input,
    mode: SimulationMode,
}

impl FixtureConfig {
    /// Returns the C++ namespace name of the fixture.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the controller architecture.
    pub fn arch(&self) -> Architecture {
        self.arch
    }

    /// Returns the controller gains.
    pub fn param(&self) -> &Param {
        &self.param
    }

    /// Returns the step input and sampling parameters.
    pub fn input(&self) -> &Input {
        &self.input
    }

    /// Returns the simulation mode.
    pub fn mode(&self) -> SimulationMode {
        self.mode
    }
}

/// Builder for [`FixtureConfig`] with the same defaults as the command line.
///
/// Every field is validated in [`FixtureConfigBuilder::build`], before any transfer function is
/// constructed.
#[derive(Clone, Debug)]
pub struct FixtureConfigBuilder {
    name: String,
    arch: Architecture,
    kp: f64,
    ki: f64,
    kd: f64,
    g: f64,
    sp: f64,
    n: Option<usize>,
    minv: f64,
    maxv: f64,
    mode: SimulationMode,
}

impl FixtureConfigBuilder {
    /// Starts a fixture named `name` with the default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arch: Architecture::Pid,
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            g: 1.0,
            sp: 0.01,
            n: None,
            minv: f64::NEG_INFINITY,
            maxv: f64::INFINITY,
            mode: SimulationMode::Continuous,
        }
    }

    /// Sets the controller architecture.
    pub fn arch(mut self, arch: Architecture) -> Self {
        self.arch = arch;
        self
    }

    /// Sets the proportional gain.
    pub fn kp(mut self, kp: f64) -> Self {
        self.kp = kp;
        self
    }

    /// Sets the integral gain.
    pub fn ki(mut self, ki: f64) -> Self {
        self.ki = ki;
        self
    }

    /// Sets the derivative gain.
    pub fn kd(mut self, kd: f64) -> Self {
        self.kd = kd;
        self
    }

    /// Sets the step height.
    pub fn g(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    /// Sets the sampling period in seconds.
    pub fn sp(mut self, sp: f64) -> Self {
        self.sp = sp;
        self
    }

    /// Sets the number of samples. Defaults to [`SimulationMode::default_sample_count`].
    pub fn n(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    /// Sets the output saturation range.
    pub fn output_limits(mut self, minv: f64, maxv: f64) -> Self {
        self.minv = minv;
        self.maxv = maxv;
        self
    }

    /// Sets the simulation mode.
    pub fn mode(mut self, mode: SimulationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validates the fields and produces the config.
    ///
    /// # Returns
    /// - `Err(ArgumentError::InvalidName)` if the name is not a C++ identifier or is a keyword.
    /// - `Err(ArgumentError::NonFiniteValue)` if a gain or the step height is not finite.
    /// - `Err(ArgumentError::InvalidSamplePeriod)` if `sp` is not positive and finite.
    /// - `Err(ArgumentError::InvalidSampleCount)` if `n` is zero.
    /// - `Err(ArgumentError::InvalidOutputLimits)` if `minv > maxv` or either is NaN.
    pub fn build(&self) -> Result<FixtureConfig, ArgumentError> {
        if !is_cpp_identifier(&self.name) {
            return Err(ArgumentError::InvalidName(self.name.clone()));
        }
        for (name, value) in [("kp", self.kp), ("ki", self.ki), ("kd", self.kd)] {
            if !value.is_finite() {
                return Err(ArgumentError::NonFiniteValue { name, value });
            }
        }

        let n = self.n.unwrap_or_else(|| self.mode.default_sample_count());
        let saturation = Saturation::new(self.minv, self.maxv)?;
        let input = Input::new(self.g, self.sp, n)?.with_saturation(saturation);

        Ok(FixtureConfig {
            name: self.name.clone(),
            arch: self.arch,
            param: Param::new(self.kp, self.ki, self.kd),
            input,
            mode: self.mode,
        })
    }
}

/// Runs the numeric pipeline: transfer functions, closed loop, step response.
///
/// # Returns
/// - `Err(FixtureError::NullController)` if every gain is zero.
/// - `Err(FixtureError::Computation)` if the loop is degenerate or the simulation diverges
///   numerically.
/// - `Err(FixtureError::ImproperSystem)` if the composed loop cannot be simulated.
pub fn simulate(
    arch: Architecture,
    param: &Param,
    input: &Input,
    mode: SimulationMode,
) -> FixtureResult<StepResponse> {
    if param.is_null() {
        return Err(FixtureError::NullController);
    }

    let system = create_system(arch, param);
    let closed_loop = mode.composer(input.sp()).compose(&system)?;
    debug!(?arch, ?mode, domain = ?closed_loop.domain, "closed loop ready");

    step_response(&closed_loop, input)
}

/// Produces the step response described by a validated config.
pub fn generate(config: &FixtureConfig) -> FixtureResult<StepResponse> {
    info!(
        name = config.name(),
        arch = %config.arch(),
        n = config.input().n(),
        "generating fixture"
    );
    simulate(config.arch, &config.param, &config.input, config.mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpp_identifiers() {
        for name in ["simple_p", "_x", "Fixture2", "occilate_p"] {
            assert!(is_cpp_identifier(name), "{name}");
        }
        for name in ["", "2fast", "has-dash", "has space", "namespace", "double", "ünicode"] {
            assert!(!is_cpp_identifier(name), "{name}");
        }
    }

    #[test]
    fn test_builder_defaults() {
        let config = FixtureConfigBuilder::new("simple_p").build().unwrap();
        assert_eq!(config.name(), "simple_p");
        assert_eq!(config.arch(), Architecture::Pid);
        assert_eq!(config.param().gains(), (1.0, 0.0, 0.0));
        assert_eq!(config.input().g(), 1.0);
        assert_eq!(config.input().sp(), 0.01);
        assert_eq!(config.input().n(), 200);
        assert!(!config.input().saturation().is_bounded());
        assert_eq!(config.mode(), SimulationMode::Continuous);

        let discrete = FixtureConfigBuilder::new("simple_p")
            .mode(SimulationMode::DiscreteExact)
            .build()
            .unwrap();
        assert_eq!(discrete.input().n(), 32);
    }

    #[test]
    fn test_builder_rejects_invalid_fields() {
        let base = FixtureConfigBuilder::new("fixture");
        assert_eq!(
            FixtureConfigBuilder::new("class").build(),
            Err(ArgumentError::InvalidName("class".to_owned()))
        );
        assert_eq!(
            base.clone().kd(f64::INFINITY).build(),
            Err(ArgumentError::NonFiniteValue {
                name: "kd",
                value: f64::INFINITY
            })
        );
        assert!(matches!(
            base.clone().g(f64::NAN).build(),
            Err(ArgumentError::NonFiniteValue { name: "g", .. })
        ));
        for sp in [0.0, -0.01] {
            assert_eq!(
                base.clone().sp(sp).build(),
                Err(ArgumentError::InvalidSamplePeriod(sp))
            );
        }
        assert_eq!(
            base.clone().n(0).build(),
            Err(ArgumentError::InvalidSampleCount)
        );
        assert_eq!(
            base.clone().output_limits(1.0, -1.0).build(),
            Err(ArgumentError::InvalidOutputLimits {
                min: 1.0,
                max: -1.0
            })
        );
        // Negative gains are accepted
        assert!(base.kp(-1.0).build().is_ok());
    }

    #[test]
    fn test_null_controller_is_rejected_before_composition() {
        let input = Input::new(1.0, 0.01, 10).unwrap();
        for mode in [SimulationMode::Continuous, SimulationMode::DiscreteExact] {
            for arch in Architecture::ALL {
                assert_eq!(
                    simulate(arch, &Param::new(0.0, 0.0, 0.0), &input, mode),
                    Err(FixtureError::NullController)
                );
            }
        }
    }
}
