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

use crate::fixture::{FixtureConfig, SimulationMode};
use crate::sim::StepResponse;

/// A C++ `double` literal with the shortest representation that round-trips.
struct CppDouble(f64);

impl fmt::Display for CppDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            f.write_str("std::numeric_limits<double>::quiet_NaN()")
        } else if v == f64::INFINITY {
            f.write_str("std::numeric_limits<double>::infinity()")
        } else if v == f64::NEG_INFINITY {
            f.write_str("-std::numeric_limits<double>::infinity()")
        } else {
            // Debug always keeps a decimal point or an exponent, so the literal stays a double
            write!(f, "{v:?}")
        }
    }
}

/// A fixture rendered as a C++ header.
///
/// The header declares `constexpr` scalars for the configuration and `std::array`s for the
/// sampled signals inside `namespace testcases::<name>`. Rendering is infallible; use
/// [`to_cpp`] to obtain the text.
pub struct CppHeader<'a> {
    config: &'a FixtureConfig,
    response: &'a StepResponse,
}

impl<'a> CppHeader<'a> {
    /// Pairs a config with its simulated response.
    pub fn new(config: &'a FixtureConfig, response: &'a StepResponse) -> Self {
        Self { config, response }
    }

    fn emits_input(&self) -> bool {
        self.config.mode() == SimulationMode::Continuous
    }

    fn needs_limits(&self) -> bool {
        let saturation = self.config.input().saturation();
        let bounds = [saturation.min(), saturation.max()];
        let bounds: &[f64] = if saturation.is_bounded() { &bounds } else { &[] };
        let input: &[f64] = if self.emits_input() {
            &self.response.input
        } else {
            &[]
        };
        bounds
            .iter()
            .chain(input)
            .chain(&self.response.output)
            .any(|v| !v.is_finite())
    }
}

fn write_scalar(f: &mut fmt::Formatter<'_>, name: &str, value: f64) -> fmt::Result {
    writeln!(f, "        constexpr double {name}{{{}}};", CppDouble(value))
}

fn write_array(f: &mut fmt::Formatter<'_>, name: &str, values: &[f64]) -> fmt::Result {
    writeln!(f, "        constexpr std::array<double, {}> {name}{{", values.len())?;
    f.write_str("            ")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", CppDouble(*v))?;
    }
    f.write_str("\n        };\n")
}

impl fmt::Display for CppHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config;
        let input = config.input();
        let (kp, ki, kd) = config.param().gains();

        f.write_str("#include <array>\n")?;
        if self.needs_limits() {
            f.write_str("#include <limits>\n")?;
        }
        f.write_str("\nnamespace testcases {\n")?;
        writeln!(f, "    namespace {} {{", config.name())?;
        writeln!(f, "        constexpr const char* arch{{\"{}\"}};", config.arch())?;
        write_scalar(f, "kp", kp)?;
        write_scalar(f, "ki", ki)?;
        write_scalar(f, "kd", kd)?;
        write_scalar(f, "g", input.g())?;
        write_scalar(f, "sp", input.sp())?;

        let saturation = input.saturation();
        if saturation.is_bounded() {
            write_scalar(f, "minv", saturation.min())?;
            write_scalar(f, "maxv", saturation.max())?;
        }

        f.write_str("\n")?;
        if self.emits_input() {
            write_array(f, "input", &self.response.input)?;
        }
        write_array(f, "output", &self.response.output)?;
        f.write_str("    }\n}\n")
    }
}

/// Renders a fixture as C++ header text.
pub fn to_cpp(config: &FixtureConfig, response: &StepResponse) -> String {
    CppHeader::new(config, response).to_string()
}
