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


use fixtures::test_fixture::*;

use pid_fixtures::emit::to_cpp;
use pid_fixtures::fixture::{generate, FixtureConfigBuilder, SimulationMode};
use pid_fixtures::pid::Architecture;

#[test]
fn test_discrete_header_layout() {
    let config = FixtureConfigBuilder::new("occilate_p")
        .n(5)
        .mode(SimulationMode::DiscreteExact)
        .build()
        .unwrap();
    let response = generate(&config).unwrap();
    assert_eq!(to_cpp(&config, &response), OSCILLATING_P_HEADER);
}

#[test]
fn test_continuous_header_carries_input() {
    let config = make_continuous(Architecture::PiD, (0.5, 1.0, 0.001), 12);
    let response = generate(&config).unwrap();
    let text = to_cpp(&config, &response);

    assert!(text.starts_with("#include <array>\n\nnamespace testcases {\n"));
    assert!(text.contains("        constexpr const char* arch{\"PI_D\"};\n"));
    assert!(text.contains("        constexpr double kd{0.001};\n"));
    assert!(text.contains("constexpr std::array<double, 12> input{\n            0.0,1.0,1.0,"));
    assert!(text.contains("constexpr std::array<double, 12> output{"));
    assert!(!text.contains("minv"));
    assert!(!text.contains("<limits>"));
}

#[test]
fn test_bounded_output_emits_limits() {
    let config = FixtureConfigBuilder::new("clamped")
        .ki(1.0)
        .n(4)
        .output_limits(f64::NEG_INFINITY, 0.5)
        .mode(SimulationMode::DiscreteExact)
        .build()
        .unwrap();
    let response = generate(&config).unwrap();
    let text = to_cpp(&config, &response);

    assert!(text.starts_with("#include <array>\n#include <limits>\n"));
    assert!(text.contains(
        "        constexpr double minv{-std::numeric_limits<double>::infinity()};\n"
    ));
    assert!(text.contains("        constexpr double maxv{0.5};\n"));
    assert!(!text.contains(" input{"));
}

#[test]
fn test_values_round_trip_through_text() {
    let config = make_discrete(Architecture::IPd, (0.7, 0.9, 0.003), 20);
    let response = generate(&config).unwrap();
    let text = to_cpp(&config, &response);

    let body = text
        .split("output{\n")
        .nth(1)
        .and_then(|rest| rest.split('\n').next())
        .unwrap();
    let parsed: Vec<f64> = body
        .trim()
        .split(',')
        .map(|v| v.parse().unwrap())
        .collect();
    assert_eq!(parsed, response.output);
}
