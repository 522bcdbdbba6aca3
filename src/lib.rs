#![warn(missing_docs)]

//! # PID Step-Response Fixture Generator
//!
//! This library computes golden step responses for PID-family controllers and renders them as
//! C++ headers, to be compiled into the native test suite of an embedded controller.
//!
//! Given an architecture, a set of gains and the sampling parameters, the closed loop is
//! composed symbolically from polynomials, then simulated either in continuous time or exactly in
//! discrete time.
//!
//! ## Features
//!
//! - Three controller architectures sharing one feedback law:
//!   - `PID`: all terms act on the error.
//!   - `PI_D`: derivative on measurement, avoiding derivative kick.
//!   - `I_PD`: proportional and derivative on measurement.
//!
//! - Two ways of closing the loop:
//!   - **Continuous**: the loop is closed around a 10th order Padé approximant of a 10ms delay
//!     and integrated with a first-order hold, matching a plant sampled by a real controller.
//!   - **Discrete exact**: the loop is closed around a one-sample delay and discretized with the
//!     backward difference, so the fixture is the exact output of a discrete controller.
//!
//! - Optional output saturation to exercise the controller's output limits.
//!
//! - Deterministic output: the same request always produces byte-identical text.
//!
//! ## Usage
//!
//! ```rust
//! use pid_fixtures::emit::to_cpp;
//! use pid_fixtures::fixture::{generate, FixtureConfigBuilder, SimulationMode};
//! use pid_fixtures::pid::Architecture;
//!
//! let config = FixtureConfigBuilder::new("simple_pi")
//!     .arch(Architecture::PiD)
//!     .kp(0.5)
//!     .ki(1.0)
//!     .mode(SimulationMode::DiscreteExact)
//!     .build()
//!     .expect("Invalid fixture config");
//!
//! let response = generate(&config).expect("Simulation failed");
//! assert_eq!(response.output.len(), 32);
//!
//! let header = to_cpp(&config, &response);
//! assert!(header.contains("namespace simple_pi {"));
//! ```
//!
//! ## License
//!
//! MIT

/// Error types of the fixture pipeline.
pub mod error;

/// Dense polynomials with real coefficients.
pub mod poly;

/// Rational transfer functions and the Padé delay approximant.
pub mod tf;

/// Controller architectures and their transfer functions.
pub mod pid;

/// Exact backward-difference discretization.
pub mod discretize;

/// Closing the control loop around a sensor element.
pub mod closed_loop;

/// Step-response simulation of continuous and discrete transfer functions.
pub mod sim;

/// Validated fixture requests and the end-to-end pipeline.
pub mod fixture;

/// Rendering fixtures as C++ headers.
pub mod emit;

/// README examples compiled as doctests.
#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
