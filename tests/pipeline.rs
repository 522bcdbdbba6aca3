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
use pid_fixtures::error::{ComputationError, FixtureError};
use pid_fixtures::fixture::{generate, simulate, FixtureConfigBuilder, SimulationMode};
use pid_fixtures::pid::{Architecture, Param};
use pid_fixtures::sim::{Input, Saturation};

use approx::assert_abs_diff_eq;

const MODES: [SimulationMode; 2] = [SimulationMode::Continuous, SimulationMode::DiscreteExact];

mod test_determinism {
    use super::*;

    #[test]
    fn test_repeated_runs_are_bit_identical() {
        for mode in MODES {
            for arch in Architecture::ALL {
                let config = make_config("repeat", arch, (0.8, 0.3, 0.002), mode, 50);
                let first = generate(&config).unwrap();
                let second = generate(&config).unwrap();

                let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
                assert_eq!(bits(&first.output), bits(&second.output));
                assert_eq!(to_cpp(&config, &first), to_cpp(&config, &second));
            }
        }
    }

    #[test]
    fn test_sequences_have_requested_length() {
        for mode in MODES {
            let config = make_config("len", Architecture::Pid, (0.5, 1.0, 0.0), mode, 17);
            let response = generate(&config).unwrap();
            assert_eq!(response.time.len(), 17);
            assert_eq!(response.input.len(), 17);
            assert_eq!(response.output.len(), 17);
            assert_abs_diff_eq!(response.time[16], 0.16, epsilon = 1e-15);
        }
    }
}

mod test_discrete_exact {
    use super::*;

    #[test]
    fn test_unit_proportional_gain_oscillates() {
        // The loop pole sits at z = -1
        let config = FixtureConfigBuilder::new("occilate_p")
            .g(2.0)
            .n(5)
            .mode(SimulationMode::DiscreteExact)
            .build()
            .unwrap();
        let response = generate(&config).unwrap();
        assert_eq!(response.output, vec![2.0, 0.0, 2.0, 0.0, 2.0]);
        assert_eq!(response.input, vec![2.0; 5]);
    }

    #[test]
    fn test_proportional_steady_state() {
        // g·kp / (1 + kp)
        for (kp, g) in [(0.5, 1.0), (0.5, 3.0), (0.25, -2.0)] {
            let config = FixtureConfigBuilder::new("p_only")
                .kp(kp)
                .g(g)
                .n(80)
                .mode(SimulationMode::DiscreteExact)
                .build()
                .unwrap();
            let output = generate(&config).unwrap().output;
            let expected = g * kp / (1.0 + kp);
            assert_abs_diff_eq!(output[79], expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_integral_action_removes_steady_state_error() {
        for arch in Architecture::ALL {
            let config = make_discrete(arch, (0.5, 1.0, 0.0), 4000);
            let output = generate(&config).unwrap().output;
            assert_abs_diff_eq!(output[3999], 1.0, epsilon = 1e-6);
        }
    }
}

mod test_continuous {
    use super::*;

    #[test]
    fn test_input_is_delayed_step() {
        let config = make_continuous(Architecture::Pid, (1.0, 0.0, 0.0), 10);
        let response = generate(&config).unwrap();
        assert_eq!(response.input[0], 0.0);
        assert!(response.input[1..].iter().all(|&r| r == 1.0));
        assert_eq!(response.output[0], 0.0);
    }

    #[test]
    fn test_proportional_steady_state() {
        // The sensor has a static gain of 0.5, so the loop settles at kp / (1 + 0.5·kp)
        let config = make_continuous(Architecture::Pid, (1.0, 0.0, 0.0), 200);
        let output = generate(&config).unwrap().output;
        assert_abs_diff_eq!(output[199], 1.0 / 1.5, epsilon = 1e-6);
    }

    #[test]
    fn test_integral_action_settles_at_inverse_sensor_gain() {
        for arch in Architecture::ALL {
            let config = make_continuous(arch, (1.0, 10.0, 0.0), 600);
            let output = generate(&config).unwrap().output;
            assert_abs_diff_eq!(output[599], 2.0, epsilon = 1e-6);
        }
    }
}

mod test_edge_cases {
    use super::*;

    #[test]
    fn test_pi_without_derivative_simulates() {
        for mode in MODES {
            for arch in Architecture::ALL {
                let config = make_config("pi", arch, (2.0, 0.5, 0.0), mode, 40);
                let output = generate(&config).unwrap().output;
                assert!(output.iter().all(|y| y.is_finite()));
            }
        }
    }

    #[test]
    fn test_null_controller() {
        for mode in MODES {
            let config = make_config("null", Architecture::PiD, (0.0, 0.0, 0.0), mode, 10);
            assert_eq!(generate(&config), Err(FixtureError::NullController));
        }
    }

    #[test]
    fn test_diverging_loop_produces_no_fixture() {
        // A large derivative gain with nothing on the reference drives the loop unstable
        let cases = [
            (SimulationMode::DiscreteExact, "discrete simulation"),
            (SimulationMode::Continuous, "continuous simulation"),
        ];
        for (mode, stage) in cases {
            let config = make_config("unstable", Architecture::PiD, (0.0, 0.0, 5.0), mode, 400);
            assert_eq!(
                generate(&config),
                Err(FixtureError::Computation(ComputationError::NonFinite(stage)))
            );
        }
    }

    #[test]
    fn test_saturation_clamps_without_feedback() {
        let unbounded = Input::new(1.0, 0.01, 60).unwrap();
        let bounded = unbounded.with_saturation(Saturation::new(0.0, 0.5).unwrap());
        let param = Param::new(0.5, 1.0, 0.0);

        for mode in MODES {
            let free = simulate(Architecture::Pid, &param, &unbounded, mode).unwrap();
            let clamped = simulate(Architecture::Pid, &param, &bounded, mode).unwrap();

            assert!(clamped.output.iter().all(|&y| (0.0..=0.5).contains(&y)));
            for (y, c) in free.output.iter().zip(&clamped.output) {
                assert_eq!(*c, y.clamp(0.0, 0.5));
            }
        }
    }

    #[test]
    fn test_default_limits_reproduce_unclamped_response() {
        let explicit = FixtureConfigBuilder::new("limits")
            .ki(1.0)
            .output_limits(f64::NEG_INFINITY, f64::INFINITY)
            .build()
            .unwrap();
        let default = FixtureConfigBuilder::new("limits").ki(1.0).build().unwrap();
        assert_eq!(generate(&explicit), generate(&default));
    }
}
