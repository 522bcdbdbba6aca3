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

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use pid_fixtures::emit::to_cpp;
use pid_fixtures::error::FixtureResult;
use pid_fixtures::fixture::{generate, FixtureConfigBuilder, SimulationMode};
use pid_fixtures::pid::Architecture;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Padé-delayed loop integrated in continuous time
    Continuous,
    /// Unit-delay loop discretized exactly
    Discrete,
}

impl From<ModeArg> for SimulationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Continuous => SimulationMode::Continuous,
            ModeArg::Discrete => SimulationMode::DiscreteExact,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "pid-fixtures", version)]
#[command(about = "Generate PID step-response fixtures as C++ headers", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Name of the fixture, used as the C++ namespace
    name: String,

    /// Proportional gain
    #[arg(long, default_value_t = 1.0)]
    kp: f64,

    /// Integral gain
    #[arg(long, default_value_t = 0.0)]
    ki: f64,

    /// Derivative gain
    #[arg(long, default_value_t = 0.0)]
    kd: f64,

    /// Step height
    #[arg(long, default_value_t = 1.0)]
    g: f64,

    /// Sampling period in seconds
    #[arg(long, default_value_t = 0.01)]
    sp: f64,

    /// Number of samples [default: 200 continuous, 32 discrete]
    #[arg(long)]
    n: Option<usize>,

    /// Controller architecture: PID, PI_D or I_PD
    #[arg(long, default_value = "PID")]
    arch: Architecture,

    /// Simulation mode
    #[arg(long, value_enum, default_value_t = ModeArg::Continuous)]
    mode: ModeArg,

    /// Lower output limit
    #[arg(long, default_value_t = f64::NEG_INFINITY)]
    minv: f64,

    /// Upper output limit
    #[arg(long, default_value_t = f64::INFINITY)]
    maxv: f64,

    /// Log the composed loop and simulation details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> FixtureResult<String> {
    let mut builder = FixtureConfigBuilder::new(args.name.as_str())
        .arch(args.arch)
        .kp(args.kp)
        .ki(args.ki)
        .kd(args.kd)
        .g(args.g)
        .sp(args.sp)
        .output_limits(args.minv, args.maxv)
        .mode(args.mode.into());
    if let Some(n) = args.n {
        builder = builder.n(n);
    }

    let config = builder.build()?;
    let response = generate(&config)?;
    Ok(to_cpp(&config, &response))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        "pid_fixtures=debug"
    } else {
        "pid_fixtures=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let text = match run(&args) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("pid-fixtures: {}: {err}", args.name);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
        eprintln!("pid-fixtures: failed to write fixture: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
